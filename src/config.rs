//! Runtime configuration constants, environment lookups and logger setup.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use std::error::Error;
use std::path::Path;

/// Largest number of prefix bits `subnet` may add in one call (`2^24` networks).
pub const MAX_SUBNET_BITS: u8 = 24;

/// log4rs configuration file used when no override is set.
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

/// Environment variable (also read from `.env`) naming an alternative log4rs file.
pub const LOG_CONFIG_ENV: &str = "SUBNET_SUMMARY_LOG_CONFIG";

/// Path of the log4rs configuration file.
pub fn log_config_path() -> String {
    std::env::var(LOG_CONFIG_ENV).unwrap_or_else(|_| DEFAULT_LOG_CONFIG.to_string())
}

/// Initialize log4rs from [`log_config_path`], or log warnings to stderr when the file is missing.
pub fn init_logging() -> Result<(), Box<dyn Error>> {
    let path = log_config_path();
    if Path::new(&path).exists() {
        log4rs::init_file(&path, Default::default())?;
        log::debug!("Logging configured from {path}");
        return Ok(());
    }
    let stderr = ConsoleAppender::builder().target(Target::Stderr).build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
    log4rs::init_config(config)?;
    Ok(())
}
