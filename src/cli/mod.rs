mod auth;
mod export;
mod session;
mod show;

use clap::{Parser, Subcommand};
use anyhow::Result;

pub use export::ExportArgs;
pub use show::ShowResource;

#[derive(Parser, Debug)]
#[command(name = "monzo")]
#[command(about = "Inspect Monzo accounts from the command line", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Auth { reset } => auth::execute(*reset).await,
            Commands::Logout => auth::logout().await,
            Commands::Show { resource } => resource.execute().await,
            Commands::Export(args) => export::execute(args).await,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authorize this client against your Monzo account
    Auth {
        /// Forget cached tokens and authorize again
        #[arg(long)]
        reset: bool,
    },
    /// Revoke the cached access token and forget it
    Logout,
    Show {
        #[command(subcommand)]
        resource: ShowResource,
    },
    /// Export transactions of every open account as CSV
    Export(ExportArgs),
}
