//! # Command-Line Adapter
//!
//! Feeds text from argv or stdin through the core and prints the result.
//! Holds no text logic of its own.
//!
//! ```text
//! chirp [--roster users.json] [--format json|lines] <command> [TEXT]
//!
//!   segment    full segmentation (mentions, then hashtags)
//!   mentions   distinct mentioned usernames
//!   hashtags   distinct hashtags
//!   complete   `@` autocomplete at --cursor
//! ```

pub mod output;

use clap::{Parser, Subcommand};
use log::{debug, info};
use std::fmt;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use crate::OutputFormat;
use crate::core::autocomplete::{active_mention, suggest};
use crate::core::config::{self, CliOverrides, ConfigError, ResolvedConfig};
use crate::core::extract::{extract_hashtags, extract_mentions};
use crate::core::roster::{RosterError, RosterUser, load_roster};
use crate::core::segmenter::render_segments;

#[derive(Parser, Debug)]
#[command(name = "chirp", about = "Split post text into mentions, hashtags and plain text")]
pub struct Args {
    /// JSON file with the user roster (array of users or a search response)
    #[arg(short, long, global = true)]
    pub roster: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Config file to use instead of ~/.chirp/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Segment text into text, mention and hashtag spans
    Segment {
        /// Text to segment (read from stdin if omitted)
        text: Option<String>,
    },
    /// List the distinct usernames mentioned in the text
    Mentions { text: Option<String> },
    /// List the distinct hashtags in the text
    Hashtags { text: Option<String> },
    /// Show the mention being typed at a cursor and roster suggestions
    Complete {
        /// Byte offset of the cursor (defaults to end of text)
        #[arg(short, long)]
        cursor: Option<usize>,
        text: Option<String>,
    },
}

impl Command {
    fn text(&self) -> Option<&str> {
        match self {
            Command::Segment { text }
            | Command::Mentions { text }
            | Command::Hashtags { text }
            | Command::Complete { text, .. } => text.as_deref(),
        }
    }

    fn needs_roster(&self) -> bool {
        matches!(self, Command::Segment { .. } | Command::Complete { .. })
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum CliError {
    Io(io::Error),
    Config(ConfigError),
    Roster(RosterError),
    Json(serde_json::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Config(e) => write!(f, "{e}"),
            CliError::Roster(e) => write!(f, "{e}"),
            CliError::Json(e) => write!(f, "output error: {e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<RosterError> for CliError {
    fn from(e: RosterError) -> Self {
        CliError::Roster(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

// ============================================================================
// Running
// ============================================================================

/// Load and resolve config for these arguments.
pub fn resolve_config(args: &Args) -> Result<ResolvedConfig, CliError> {
    let file_config = match &args.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };
    let overrides = CliOverrides {
        roster_file: args.roster.clone(),
        format: args.format,
    };
    Ok(config::resolve(&file_config, &overrides))
}

/// Run the parsed command, reading stdin when no text was given.
pub fn run(args: &Args, config: &ResolvedConfig) -> Result<(), CliError> {
    let text = match args.command.text() {
        Some(text) => text.to_string(),
        None => read_input(io::stdin().lock())?,
    };

    let users = match (&config.roster_file, args.command.needs_roster()) {
        (Some(path), true) => load_roster(path)?,
        _ => Vec::new(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&args.command, &text, &users, config, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Read piped text, dropping the single line ending that `echo` and most
/// editors append so the default cursor lands on the last typed character.
pub fn read_input<R: Read>(mut reader: R) -> io::Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    if buf.ends_with('\n') {
        buf.pop();
        if buf.ends_with('\r') {
            buf.pop();
        }
    }
    Ok(buf)
}

/// Execute `command` against `text` and write the result to `out`.
pub fn execute<W: Write>(
    command: &Command,
    text: &str,
    users: &[RosterUser],
    config: &ResolvedConfig,
    out: &mut W,
) -> Result<(), CliError> {
    info!("Running {:?} on {} bytes", command, text.len());
    let format = config.format;

    match command {
        Command::Segment { .. } => {
            let segments = render_segments(text, users);
            output::write_segments(out, &segments, format)?;
        }
        Command::Mentions { .. } => {
            output::write_names(out, &extract_mentions(text), format)?;
        }
        Command::Hashtags { .. } => {
            output::write_names(out, &extract_hashtags(text), format)?;
        }
        Command::Complete { cursor, .. } => {
            let cursor = cursor.unwrap_or(text.len());
            let query = active_mention(text, cursor, config.max_query_chars);
            let suggestions = match &query {
                Some(q) => suggest(users, q.query, config.suggestion_limit),
                None => Vec::new(),
            };
            debug!("Completion query {:?}, {} suggestions", query, suggestions.len());
            output::write_completion(out, query.as_ref(), &suggestions, format)?;
        }
    }
    Ok(())
}
