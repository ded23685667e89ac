use clap::Parser;
use garde::Validate as _;
use mdb_dal::genre::{CreateGenre, GenreRepository};
use mdb_types::config::BackendConfig;

use crate::commands::{open_pool, Executor};

#[derive(Parser, Debug)]
pub struct AddGenreCmd {
    #[command(flatten)]
    backend: BackendConfig,
    #[arg(short, long, help = "Genre name, up to 50 characters")]
    pub name: String,
}

impl Executor for AddGenreCmd {
    async fn run(self) -> anyhow::Result<()> {
        let payload = CreateGenre { name: self.name };
        payload.validate()?;

        let pool = open_pool(&self.backend).await?;
        let genre = GenreRepository::new(pool).create(payload).await?;
        println!("Created genre {} with id {}", genre.name, genre.id);

        Ok(())
    }
}
