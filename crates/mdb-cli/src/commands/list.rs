use std::collections::HashMap;

use clap::Parser;
use mdb_dal::{genre::GenreRepository, movie::MovieRepository};
use mdb_types::config::BackendConfig;

use crate::commands::{open_pool, Executor};

#[derive(Parser, Debug)]
pub struct ListCmd {
    #[command(flatten)]
    backend: BackendConfig,
}

impl Executor for ListCmd {
    async fn run(self) -> anyhow::Result<()> {
        let pool = open_pool(&self.backend).await?;
        let genres: HashMap<i64, String> = GenreRepository::new(pool.clone())
            .list()
            .await?
            .into_iter()
            .map(|g| (g.id, g.name))
            .collect();
        let movies = MovieRepository::new(pool).list().await?;

        for movie in movies {
            let names: Vec<&str> = movie
                .genre
                .iter()
                .filter_map(|id| genres.get(id).map(String::as_str))
                .collect();
            println!(
                "{:>5}  {} [{}] audience {}",
                movie.id,
                movie.title,
                names.join(", "),
                movie.audience
            );
        }

        Ok(())
    }
}
