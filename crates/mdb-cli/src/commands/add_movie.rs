use clap::Parser;
use garde::Validate as _;
use mdb_dal::movie::{CreateMovie, MovieRepository};
use mdb_types::config::BackendConfig;

use crate::commands::{open_pool, Executor};

#[derive(Parser, Debug)]
pub struct AddMovieCmd {
    #[command(flatten)]
    backend: BackendConfig,
    #[arg(short, long, help = "Movie title, up to 50 characters")]
    pub title: String,
    #[arg(short, long, default_value_t = 0, help = "Audience size")]
    pub audience: i64,
    #[arg(long, default_value = "", help = "URL of poster image, up to 200 characters")]
    pub poster_url: String,
    #[arg(short, long, default_value = "", help = "Movie description")]
    pub description: String,
    #[arg(short, long, num_args = 0.., value_delimiter = ',', help = "Genre ids, comma separated or used multiple times")]
    pub genre: Vec<i64>,
}

impl Executor for AddMovieCmd {
    async fn run(self) -> anyhow::Result<()> {
        let payload = CreateMovie {
            title: self.title,
            audience: self.audience,
            poster_url: self.poster_url,
            description: self.description,
            genre: self.genre,
        };
        payload.validate()?;

        let pool = open_pool(&self.backend).await?;
        let movie = MovieRepository::new(pool).create(payload).await?;
        let genres: Vec<_> = movie.genre.iter().map(|g| g.name.as_str()).collect();
        println!(
            "Created movie {} with id {} (genres: {})",
            movie.title,
            movie.id,
            genres.join(", ")
        );

        Ok(())
    }
}
