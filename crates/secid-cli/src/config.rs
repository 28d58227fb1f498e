//! Settings file and flag resolution.
//!
//! ```toml
//! [output]
//! format = "table"
//! pretty = true
//!
//! [parser]
//! require_service = true
//!
//! [logging]
//! filter = "secid=debug"
//! json = false
//! ```
//!
//! Flags given on the command line win over the file.

use std::fs;
use std::path::Path;

use secid_core::ParserOptions;
use serde::Deserialize;
use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use crate::error::CliError;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub output: OutputConfig,
    pub parser: ParserOptions,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub pretty: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directives; `RUST_LOG` still takes precedence.
    pub filter: Option<String>,
    pub json: bool,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let raw = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

/// Effective settings for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub format: OutputFormat,
    pub pretty: bool,
    pub strict: bool,
    pub stream: bool,
    pub parser: ParserOptions,
    pub logging: LoggingConfig,
    pub verbose: u8,
}

impl Settings {
    pub fn resolve(cli: &Cli) -> Result<Self, CliError> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(cli, file))
    }

    fn merge(cli: &Cli, file: FileConfig) -> Self {
        Self {
            format: cli
                .format
                .or(file.output.format)
                .unwrap_or(OutputFormat::Json),
            pretty: cli.pretty || file.output.pretty.unwrap_or(false),
            strict: cli.strict,
            stream: cli.stream,
            parser: file
                .parser
                .with_require_service(cli.require_service || file.parser.require_service),
            logging: file.logging,
            verbose: cli.verbose,
        }
    }

    /// Records where settings came from once logging is up.
    pub fn log_origin(&self, cli: &Cli) {
        match &cli.config {
            Some(path) => debug!(path = %path.display(), format = ?self.format, "loaded configuration"),
            None => debug!(format = ?self.format, "using default configuration"),
        }
    }
}
