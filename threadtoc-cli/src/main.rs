use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

mod settings;
mod subcommands;

use settings::SettingsArgs;

/// Thread-wide tables of contents for rendered posts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    settings: SettingsArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the header records serialized with the first post, as JSON
    Headers(subcommands::headers::Args),
    /// Print the thread's table of contents markup
    Toc(subcommands::toc::Args),
    /// Print every post with heading ids stamped and the marker replaced, as JSON
    Decorate(subcommands::decorate::Args),
    /// Render a Markdown document with its own table of contents
    Markdown(subcommands::markdown::Args),
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let settings = args.settings.load()?;
    tracing::debug!(?settings, "loaded settings");

    match &args.command {
        Command::Headers(command) => subcommands::headers::run(command, &settings),
        Command::Toc(command) => subcommands::toc::run(command, &settings),
        Command::Decorate(command) => subcommands::decorate::run(command, &settings),
        Command::Markdown(command) => subcommands::markdown::run(command, &settings),
    }
}
