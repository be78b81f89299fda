//! CLI - Command Line Interface for the Lazismu site
//!
//! Every page operation is scriptable. All output is JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # Render program cards (remote feed, demo fallback on failure)
//! lazismu programs --json
//!
//! # News teaser, full listing, article detail
//! lazismu news
//! lazismu news --all
//! lazismu article --id layanan-kesehatan-mobile
//!
//! # Preferences
//! lazismu lang en
//! lazismu theme toggle
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::IsTerminal;
use std::path::PathBuf;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// Lazismu - multilingual nonprofit site in your terminal
///
/// Run without arguments to launch the interactive viewer.
/// Use subcommands for scriptable rendering.
#[derive(Parser, Debug)]
#[command(
    name = "lazismu",
    version,
    about = "Multilingual nonprofit site renderer",
    long_about = "Renders the Lazismu Türkiye site: aid programs from the published \
                  spreadsheet feed, news articles, hero slider and language/theme \
                  preferences.\n\n\
                  Run without arguments to launch the interactive viewer.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  lazismu                                    Launch interactive viewer\n\
                  lazismu programs --feed-url URL            Render program cards\n\
                  lazismu article --id iftaar-kolaborasi     Render one article\n\
                  lazismu lang ar                            Switch and persist language"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Language for this run (tr, en, ar; anything else means tr)
    #[arg(long, short = 'l', global = true)]
    pub lang: Option<String>,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Programs feed endpoint (overrides config)
    #[arg(long, global = true)]
    pub feed_url: Option<String>,

    /// Keep preferences in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Page to open in the viewer (index.html, berita.html, artikel-detail.html?id=...)
    #[arg(long, short = 'p', default_value = "index.html")]
    pub page: String,

    /// Subcommand to run (omit for viewer mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load and render program cards
    #[command(visible_alias = "pr")]
    Programs(ProgramsCmd),

    /// Render news cards (teaser by default)
    #[command(visible_alias = "n")]
    News(NewsCmd),

    /// Render an article detail view
    #[command(visible_alias = "a")]
    Article(ArticleCmd),

    /// Set and persist the site language
    Lang(LangCmd),

    /// Show or toggle the persisted theme
    Theme(ThemeCmd),

    /// Show persisted preferences
    Prefs,
}

/// Render program cards from the feed
#[derive(Args, Debug)]
pub struct ProgramsCmd {
    /// Skip the network and render the demo programs
    #[arg(long)]
    pub offline: bool,
}

/// Render news cards
#[derive(Args, Debug)]
pub struct NewsCmd {
    /// Full listing instead of the three-card teaser
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Render one article
#[derive(Args, Debug)]
pub struct ArticleCmd {
    /// Article identifier
    #[arg(long, short = 'i', conflicts_with = "url")]
    pub id: Option<String>,

    /// Page URL carrying an `id` query parameter
    #[arg(long, short = 'u')]
    pub url: Option<String>,
}

/// Set the site language
#[derive(Args, Debug)]
pub struct LangCmd {
    /// Language code (tr, en, ar)
    pub code: String,
}

/// Theme actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ThemeAction {
    /// Print the persisted theme
    #[default]
    Show,
    /// Flip between light and dark
    Toggle,
}

/// Show or toggle the theme
#[derive(Args, Debug)]
pub struct ThemeCmd {
    #[arg(value_enum, default_value = "show")]
    pub action: ThemeAction,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// JSON envelope for scripted output
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            code: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error_msg(msg: &str, code: ExitCode) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.to_string()),
            code: Some(code.into()),
        }
    }
}

/// Output writer honoring --json and --quiet
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
