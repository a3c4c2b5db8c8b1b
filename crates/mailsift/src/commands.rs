//! CLI commands.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use mailsift_classify::ClassificationVerdict;
use mailsift_core::{DigestFilter, Settings, load_messages};
use serde::Serialize;
use tracing::info;

#[derive(Parser)]
#[command(name = "mailsift")]
#[command(about = "Filter marketing and spam out of email digests")]
#[command(version)]
pub struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true, env = "MAILSIFT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a verdict for every message in a dump
    Classify {
        /// JSON message dump (array or `{"value": [...]}` page)
        input: PathBuf,
        /// Only print messages that would be excluded
        #[arg(long)]
        unwanted_only: bool,
    },

    /// Print kept messages grouped by direction and sender
    Digest {
        /// JSON message dump (array or `{"value": [...]}` page)
        input: PathBuf,
        /// Leave excluded messages out of the output
        #[arg(long)]
        hide_excluded: bool,
    },

    /// Add an address or domain to the trusted roster
    Trust {
        /// Address (or domain with `--domain`) to trust
        entry: String,
        /// Treat the entry as a domain
        #[arg(long)]
        domain: bool,
    },
}

/// One line of `classify` output.
#[derive(Serialize)]
struct VerdictRow<'a> {
    subject: &'a str,
    sender: &'a str,
    #[serde(flatten)]
    verdict: ClassificationVerdict,
}

impl Cli {
    /// Runs the selected command.
    pub fn run(self) -> anyhow::Result<()> {
        let config_path = self.config.unwrap_or_else(Settings::default_path);
        let settings = Settings::load(&config_path)
            .with_context(|| format!("Failed to load settings from {}", config_path.display()))?;

        match self.command {
            Commands::Classify {
                input,
                unwanted_only,
            } => classify(&settings, &input, unwanted_only),
            Commands::Digest {
                input,
                hide_excluded,
            } => digest(&settings, &input, hide_excluded),
            Commands::Trust { entry, domain } => trust(settings, &config_path, &entry, domain),
        }
    }
}

fn classify(settings: &Settings, input: &Path, unwanted_only: bool) -> anyhow::Result<()> {
    let filter = DigestFilter::new(settings)?;
    let messages = read_input(input)?;

    let rows: Vec<VerdictRow<'_>> = messages
        .iter()
        .map(|message| VerdictRow {
            subject: &message.subject,
            sender: &message.sender.address,
            verdict: filter.classify(message),
        })
        .filter(|row| !unwanted_only || row.verdict.unwanted)
        .collect();

    let unwanted = rows.iter().filter(|row| row.verdict.unwanted).count();
    info!(total = messages.len(), unwanted, "Classified messages");
    print_json(&rows)
}

fn digest(settings: &Settings, input: &Path, hide_excluded: bool) -> anyhow::Result<()> {
    let filter = DigestFilter::new(settings)?;
    let mut digest = filter.filter(read_input(input)?);
    if hide_excluded {
        digest.excluded.clear();
    }
    print_json(&digest)
}

fn trust(mut settings: Settings, path: &Path, entry: &str, domain: bool) -> anyhow::Result<()> {
    let added = if domain {
        settings.add_trusted_domain(entry)?
    } else {
        settings.add_trusted_sender(entry)?
    };

    if added {
        settings
            .save(path)
            .with_context(|| format!("Failed to save settings to {}", path.display()))?;
    } else {
        info!("{entry} is already trusted");
    }
    Ok(())
}

fn read_input(input: &Path) -> anyhow::Result<Vec<mailsift_classify::Message>> {
    load_messages(input).with_context(|| format!("Failed to read messages from {}", input.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
