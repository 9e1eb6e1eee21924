//! Log setup for the two binaries.
//!
//! The TUI owns the terminal, so it logs to a file through `log4rs`. The
//! command-line tool logs to stderr through `env_logger`.

use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::config::ClientSettings;

/// Environment variable holding the log level (`error` .. `trace`).
pub const LOG_LEVEL_ENV: &str = "AGENTSWARM_LOG";
/// Optional log4rs YAML configuration that replaces the built-in file appender.
pub const LOG4RS_CONFIG_PATH: &str = "config/log4rs.yaml";

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l:<5} {t} - {m}{n}";

/// Initialises `log4rs` for the TUI.
pub fn init_file_logging(settings: &ClientSettings) -> Result<()> {
    let yaml = Path::new(LOG4RS_CONFIG_PATH);
    if yaml.exists() {
        return log4rs::init_file(yaml, Default::default())
            .with_context(|| format!("Failed to load {}", yaml.display()));
    }

    let level = level_from_env(std::env::var(LOG_LEVEL_ENV).ok().as_deref());
    let appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(&settings.log_file)
        .with_context(|| format!("Failed to open log file {}", settings.log_file.display()))?;
    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(appender)))
        .build(Root::builder().appender("file").build(level))
        .map_err(|err| anyhow!("Invalid log configuration: {err}"))?;
    log4rs::init_config(config).map_err(|err| anyhow!("Logger already initialised: {err}"))?;
    Ok(())
}

/// Initialises `env_logger` on stderr for the command-line tool.
pub fn init_stderr_logging() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_LEVEL_ENV, "warn")).init();
}

/// Parses a level name, defaulting to `info`.
pub fn level_from_env(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|raw| LevelFilter::from_str(raw.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}
