//! Server configuration.
//!
//! Values come from the command line (or environment), then an optional YAML
//! file given with `--config`, then built-in defaults, in that order of
//! precedence.
//!
//! ```bash
//! skiff --directory /tmp/files/
//! LISTEN=127.0.0.1:8080 skiff --config skiff.yaml
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4221";
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 1024 * 1024;

/// Command-line arguments. Every setting is optional here so that a YAML file
/// can fill whatever was not given explicitly.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "skiff")]
#[command(about = "Minimal HTTP/1.1 echo and file server")]
pub struct Args {
    /// Directory that /files/{name} reads from and writes to
    #[arg(long, env = "SKIFF_DIRECTORY")]
    pub directory: Option<String>,

    /// Address to listen on
    #[arg(long, env = "LISTEN")]
    pub listen: Option<String>,

    /// Seconds to wait for a complete request before closing the connection
    #[arg(long = "read-timeout")]
    pub read_timeout_secs: Option<u64>,

    /// Largest request (headers plus body) accepted, in bytes
    #[arg(long = "max-request-bytes")]
    pub max_request_bytes: Option<usize>,

    /// YAML file with default settings
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Settings read from a YAML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub directory: Option<String>,
    pub listen_addr: Option<String>,
    pub read_timeout_secs: Option<u64>,
    pub max_request_bytes: Option<usize>,
}

impl FileConfig {
    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(text).context("invalid YAML config")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml(&text)
    }
}

/// Resolved, read-only server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub listen_addr: String,
    /// Prefix joined to file names by plain concatenation
    pub directory: String,
    pub read_timeout: Option<Duration>,
    pub max_request_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            directory: String::new(),
            read_timeout: None,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
        }
    }
}

impl Config {
    /// Parses the process arguments and loads the YAML file they name, if any.
    pub fn load() -> anyhow::Result<Self> {
        let args = Args::parse();
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(args, file))
    }

    /// Combines explicit arguments with file settings; arguments win.
    pub fn merge(args: Args, file: FileConfig) -> Self {
        let defaults = Config::default();
        Self {
            listen_addr: args
                .listen
                .or(file.listen_addr)
                .unwrap_or(defaults.listen_addr),
            directory: args
                .directory
                .or(file.directory)
                .unwrap_or(defaults.directory),
            read_timeout: args
                .read_timeout_secs
                .or(file.read_timeout_secs)
                .map(Duration::from_secs),
            max_request_bytes: args
                .max_request_bytes
                .or(file.max_request_bytes)
                .unwrap_or(defaults.max_request_bytes),
        }
    }

    /// Builds the on-disk path for a served file.
    ///
    /// This is `directory + name` with no separator inserted and no
    /// normalisation, so `--directory` is expected to end in `/`.
    pub fn file_path(&self, name: &str) -> PathBuf {
        PathBuf::from(format!("{}{}", self.directory, name))
    }
}
