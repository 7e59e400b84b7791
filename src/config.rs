use std::ffi::OsString;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::rule_set::RuleSet;

/// Environment variable naming the file logs are written to.
pub const LOG_FILE_VAR: &str = "TERMLIFE_LOG";

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

/// A cellular automaton in your terminal.
///
/// Keys: q quit, c clear, r randomize, p pause/edit, m faster, n slower. While paused, h/j/k/l
/// or the arrows move the cursor, a adds a cell and d deletes one.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Birth/survival rule, e.g. B3/S23 (Life) or B36/S23 (HighLife)
    #[arg(value_name = "RULE")]
    pub rule: Option<RuleSet>,
}

/// Settings for one run, gathered from the command line and the environment
#[derive(Debug)]
pub struct Config {
    pub rules: RuleSet,

    /// Where to write logs. Nothing is logged when unset, since the screen belongs to the board.
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::new(Cli::parse(), std::env::var_os(LOG_FILE_VAR))
    }

    pub fn new(cli: Cli, log_file: Option<OsString>) -> Self {
        Self {
            rules: cli.rule.unwrap_or_default(),
            log_file: log_file.filter(|path| !path.is_empty()).map(PathBuf::from),
        }
    }

    /// Install the global tracing subscriber if a log file was requested.
    pub fn init_logging(&self) -> anyhow::Result<()> {
        let Some(path) = &self.log_file else {
            return Ok(());
        };

        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))
            .context("Failed to install log subscriber")?;

        Ok(())
    }
}
