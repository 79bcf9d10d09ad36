//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for pdraft
#[derive(Parser, Debug)]
#[command(name = "pdraft")]
#[command(author, version, about = "AI-assisted LaTeX document generator")]
#[command(long_about = r#"
pdraft turns a title and a short description into a typeset PDF:
a remote model drafts the LaTeX source, a remote compiler turns it
into a PDF, and the download link lands in your transcript.

Sign in with an account to keep a document history and a persistent
credit balance, or run as a guest with a fixed one-off balance.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./pdraft.toml       Project-level config
3. ~/.config/pdraft/config.toml   Global config

Example:
  pdraft --guest -t "Report" -d "Quarterly results for the board"
  pdraft -e ada@example.com -t "Survey" -d "Rust async runtimes"
  pdraft --chat --guest
"#)]
pub struct Cli {
    /// Document title for one-shot generation
    #[arg(short, long, requires = "description")]
    pub title: Option<String>,

    /// Document description for one-shot generation
    #[arg(short, long, requires = "title")]
    pub description: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Run as a guest (fixed starting balance, no document history)
    #[arg(short, long, conflicts_with = "email")]
    pub guest: bool,

    /// Sign in with this email (the password is prompted)
    #[arg(short, long, value_name = "EMAIL")]
    pub email: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
