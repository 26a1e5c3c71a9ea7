//! log4rs setup.

use crate::config::{DEFAULT_LOG_CONFIG, ENV_LOG_CONFIG};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::PathBuf;

/// Initialise logging from `log4rs.yml` (or `$FW_EXPORT_LOG_CONFIG`).
///
/// Without a config file, warnings and errors go to stderr so stdout only
/// carries operator messages.
pub fn init() -> Result<(), Box<dyn Error>> {
    let path = std::env::var(ENV_LOG_CONFIG)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_CONFIG));

    if path.exists() {
        log4rs::init_file(&path, Default::default())?;
        log::debug!("logging configured from {}", path.display());
    } else {
        log4rs::init_config(console_config(LevelFilter::Warn)?)?;
    }
    Ok(())
}

/// Single stderr appender at `level`.
pub fn console_config(
    level: LevelFilter,
) -> Result<Config, log4rs::config::runtime::ConfigErrors> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{h({l})} {t} - {m}{n}")))
        .build();
    Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
}
