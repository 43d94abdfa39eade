use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quiesce-cli", version, about = "Quiesce CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a scenario file and print the emitted event log
    Play {
        /// Path to a scenario JSON file
        file: PathBuf,
        /// Print the log as JSON instead of human-readable lines
        #[arg(long)]
        json: bool,
        /// Config profile supplying emitter defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Scenario management
    Scenario {
        #[command(subcommand)]
        action: commands::scenario::ScenarioAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Play { file, json, config } => commands::play::run(&file, json, config.as_deref()),
        Commands::Scenario { action } => commands::scenario::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
