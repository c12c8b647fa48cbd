//! CLI entry and dispatch.

use anyhow::Result;
use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "chatnav")]
#[command(version)]
#[command(about = "Terminal sidebar navigator for chat sessions")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Seed the session list with N demo conversations
    #[arg(long, value_name = "N", default_value_t = 0)]
    sessions: usize,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // default to the interactive navigator
    let Some(command) = cli.command else {
        return commands::navigate::run(cli.sessions);
    };

    match command {
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
