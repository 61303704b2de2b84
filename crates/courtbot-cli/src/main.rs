use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod serve;
mod slack;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (output to stderr, initialize only once)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Look { text } => commands::handle_look(&text.join(" ")).await,
        Commands::Book { text } => commands::handle_book(&text.join(" ")).await,
        Commands::Chat { text } => commands::handle_chat(&text.join(" ")).await,
        Commands::Auto => commands::handle_auto().await,
        Commands::Serve { port } => serve::handle_serve(port).await,
    }
}
