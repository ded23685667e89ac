use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use mdb_dal::fixture::{load_fixture, Fixture};
use mdb_types::config::BackendConfig;
use tokio::fs;

use crate::commands::{open_pool, Executor};

#[derive(Parser, Debug)]
pub struct LoadCmd {
    #[command(flatten)]
    backend: BackendConfig,
    #[arg(help = "JSON file with genres and movies, movies refer to genres by name")]
    pub file: PathBuf,
}

impl Executor for LoadCmd {
    async fn run(self) -> anyhow::Result<()> {
        let data = fs::read_to_string(&self.file)
            .await
            .with_context(|| format!("Cannot read fixture {}", self.file.display()))?;
        let fixture = Fixture::from_json(&data)?;

        let pool = open_pool(&self.backend).await?;
        let summary = load_fixture(&pool, fixture).await?;
        println!(
            "Loaded {} genre(s) and {} movie(s)",
            summary.genres, summary.movies
        );

        Ok(())
    }
}
