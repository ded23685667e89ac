use clap::{Parser, Subcommand};

use crate::commands::{
    add_genre::AddGenreCmd, add_movie::AddMovieCmd, delete_movie::DeleteMovieCmd, list::ListCmd,
    load::LoadCmd,
};

#[derive(Parser)]
#[command(
    version,
    about,
    long_about = "CLI for mdb - manages movie catalog (genres and movies) directly in the database."
)]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    AddGenre(AddGenreCmd),
    AddMovie(AddMovieCmd),
    DeleteMovie(DeleteMovieCmd),
    Load(LoadCmd),
    List(ListCmd),
}

impl crate::commands::Executor for Command {
    async fn run(self) -> anyhow::Result<()> {
        match self {
            Command::AddGenre(cmd) => cmd.run().await,
            Command::AddMovie(cmd) => cmd.run().await,
            Command::DeleteMovie(cmd) => cmd.run().await,
            Command::Load(cmd) => cmd.run().await,
            Command::List(cmd) => cmd.run().await,
        }
    }
}
