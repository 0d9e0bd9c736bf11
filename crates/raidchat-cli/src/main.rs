//! RaidChat CLI
//!
//! Line-oriented front end for the conversational RAID command engine

use clap::{Parser, Subcommand};

mod classifier;
mod commands;

#[derive(Debug, Parser)]
#[command(name = "raidchat")]
#[command(about = "RaidChat - manage RAID items through conversation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start an interactive chat session on stdin
    Chat(commands::chat::ChatArgs),
    /// Print the questions asked for a command
    Steps(commands::steps::StepsArgs),
}

fn main() {
    // RUST_LOG may come from .env
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Chat(args) => commands::chat::execute(args),
        Commands::Steps(args) => commands::steps::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
