//! Steps command
//!
//! Usage: raidchat steps <create|edit|transition> [--config <FILE>]

use clap::{Args, ValueEnum};
use raidchat_core::conversation::build_steps;
use raidchat_core::CommandType;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StepsCommand {
    Create,
    Edit,
    Transition,
}

impl From<StepsCommand> for CommandType {
    fn from(command: StepsCommand) -> Self {
        match command {
            StepsCommand::Create => CommandType::CreateRaid,
            StepsCommand::Edit => CommandType::EditRaid,
            StepsCommand::Transition => CommandType::TransitionWorkflow,
        }
    }
}

#[derive(Debug, Args)]
pub struct StepsArgs {
    /// Command whose questions to print
    #[arg(value_enum)]
    pub command: StepsCommand,

    /// TOML configuration file (its sequencer policy applies)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Execute steps command
pub fn execute(args: StepsArgs) -> anyhow::Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let command = CommandType::from(args.command);

    println!("{}", command.label());
    for (index, step) in build_steps(command, &config.sequencer).iter().enumerate() {
        let kind = if step.required { "required" } else { "optional" };
        println!(
            "{}. {} ({}): {}",
            index + 1,
            step.field.as_str(),
            kind,
            step.prompt
        );
    }
    Ok(())
}
