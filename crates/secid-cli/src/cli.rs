//! CLI argument definitions for secid.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `validate` | Validate bare FIGIs |
//! | `parse` | Parse Bloomberg-style symbology strings |
//! | `check-digit` | Compute the check digit of 11-character bases |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Fail when warnings are present |
//! | `--stream` | `false` | Emit NDJSON events |
//! | `--config` | `$SECID_CONFIG` | TOML configuration file |
//! | `--require-service` | `false` | Reject locators without `//blp/<provider>` |
//! | `-v` | off | Raise log verbosity (repeatable) |
//!
//! # Examples
//!
//! ```bash
//! secid validate BBG000B9XVV8 KKG000003B64
//! secid parse "//blp/mktdata/bbgid/BBG007Z1JW11@BVAL" --pretty
//! cat figis.txt | secid validate --format table
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;

/// secid - FIGI validation and symbology parsing
#[derive(Debug, Parser)]
#[command(
    name = "secid",
    author,
    version,
    about = "FIGI validation and Bloomberg-style symbology parsing",
    long_about = "secid validates Financial Instrument Global Identifiers and parses \
symbology strings such as //blp/mktdata/bbgid/BBG007Z1JW11@BVAL.\n\
\n\
Inputs are read from arguments, or one per line from stdin when no \
argument (or '-') is given."
)]
pub struct Cli {
    /// Output format for results. Overrides `[output] format`.
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Emit NDJSON events: start, chunk per result, error per failure, end.
    #[arg(long, global = true, default_value_t = false)]
    pub stream: bool,

    /// Path to a TOML configuration file.
    #[arg(long, global = true, env = "SECID_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Reject locators that omit the service prefix.
    #[arg(long, global = true, default_value_t = false)]
    pub require_service: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text for terminal display.
    Table,
    /// Single JSON object output.
    Json,
    /// The envelope on a single line.
    Ndjson,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate one or more bare FIGIs.
    ///
    ///   secid validate BBG000B9XVV8
    ///   secid validate BBG000B9XVV8 KKG000003B64 --format table
    Validate(ValidateArgs),

    /// Parse one or more symbology strings.
    ///
    ///   secid parse //blp/mktdata/bbgid/BBG000B9XVV8
    ///   secid parse "//blp/refdata/bbgid/BBG000BLNNH6 Equity" --pretty
    Parse(ParseArgs),

    /// Compute the check digit of 11-character FIGI bases.
    ///
    ///   secid check-digit BBG000BPH45
    CheckDigit(CheckDigitArgs),
}

impl Command {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Validate(_) => "validate",
            Self::Parse(_) => "parse",
            Self::CheckDigit(_) => "check-digit",
        }
    }
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Identifiers to validate; '-' reads stdin.
    #[arg(value_name = "FIGI")]
    pub inputs: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Symbology strings to parse; '-' reads stdin.
    #[arg(value_name = "LOCATOR")]
    pub inputs: Vec<String>,
}

#[derive(Debug, Args)]
pub struct CheckDigitArgs {
    /// Eleven-character bases; '-' reads stdin.
    #[arg(value_name = "BASE")]
    pub inputs: Vec<String>,
}
