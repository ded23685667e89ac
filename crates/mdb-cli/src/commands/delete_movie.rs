use clap::Parser;
use mdb_dal::movie::MovieRepository;
use mdb_types::config::BackendConfig;

use crate::commands::{open_pool, Executor};

#[derive(Parser, Debug)]
pub struct DeleteMovieCmd {
    #[command(flatten)]
    backend: BackendConfig,
    #[arg(help = "Id of movie to delete, its reviews are deleted too")]
    pub id: i64,
}

impl Executor for DeleteMovieCmd {
    async fn run(self) -> anyhow::Result<()> {
        let pool = open_pool(&self.backend).await?;
        let reviews = MovieRepository::new(pool).delete(self.id).await?;
        println!("Deleted movie {} and {reviews} review(s)", self.id);

        Ok(())
    }
}
