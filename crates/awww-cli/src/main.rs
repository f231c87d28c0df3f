//! awww CLI - Command-line tools for awww plugin widgets.

mod commands;
mod trace;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "awww")]
#[command(author, version, about = "Audio plugin widget toolkit CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List widget kinds and their options
    Widgets(commands::widgets::WidgetsArgs),

    /// Convert values through a scale
    Scale(commands::scale::ScaleArgs),

    /// Replay a recorded input trace against a layout widget
    Replay(commands::replay::ReplayArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Widgets(args) => commands::widgets::run(args),
        Commands::Scale(args) => commands::scale::run(args),
        Commands::Replay(args) => commands::replay::run(args),
    }
}
