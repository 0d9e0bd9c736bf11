//! Chat command
//!
//! Usage: raidchat chat --project <KEY> [--config <FILE>] [--json-logs] [--transcript <FILE>]
//!
//! Reads one message per line from stdin and prints every reply as
//! `[role] content`. EOF ends the session.

use anyhow::{bail, Context};
use clap::Args;
use raidchat_core::logging_facility::{self, Profile};
use raidchat_core::ChatMessage;
use raidchat_engine::{ChatSession, InMemoryRaidApi};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::classifier::KeywordClassifier;

#[derive(Debug, Args)]
pub struct ChatArgs {
    /// Project the session is scoped to (default: `default_project` from config)
    #[arg(short, long)]
    pub project: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Emit JSON logs on stderr
    #[arg(long)]
    pub json_logs: bool,

    /// Write the full message log as JSON when the session ends
    #[arg(long)]
    pub transcript: Option<PathBuf>,
}

/// Execute chat command
pub fn execute(args: ChatArgs) -> anyhow::Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let profile = if args.json_logs {
        Profile::Production
    } else {
        config.log_profile
    };
    logging_facility::init(profile);

    let Some(project_key) = args.project.clone().or(config.default_project.clone()) else {
        bail!("no project given: pass --project or set default_project in the config file");
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;

    tracing::info!(project_key = %project_key, "chat session started");
    let session = ChatSession::new(project_key, InMemoryRaidApi::new(), KeywordClassifier)
        .with_policy(config.sequencer);
    let messages = runtime.block_on(run(session))?;

    if let Some(path) = args.transcript {
        let json = serde_json::to_string_pretty(&messages)?;
        std::fs::write(&path, json)
            .with_context(|| format!("writing transcript to {}", path.display()))?;
    }
    Ok(())
}

async fn run(
    mut session: ChatSession<InMemoryRaidApi, KeywordClassifier>,
) -> anyhow::Result<Vec<ChatMessage>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        for reply in session.submit(&line).await {
            writeln!(stdout, "[{}] {}", reply.role.as_str(), reply.content)?;
        }
        stdout.flush()?;
    }

    Ok(session.end())
}
