//! File logging for the onboarding wizard
//!
//! The terminal belongs to the UI while the wizard runs, so all `tracing`
//! output goes to `~/.clara-onboarding/onboarding.log`.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::Error;

pub const LOG_DIR: &str = ".clara-onboarding";
pub const LOG_FILE: &str = "onboarding.log";

/// Location of the log file
pub fn log_file_path() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(LOG_DIR);
    path.push(LOG_FILE);
    path
}

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(debug: bool) -> String {
    let level = if debug { "debug" } else { "info" };
    format!("clara_onboarding={},reqwest=warn,hyper=warn", level)
}

fn env_filter(debug: bool) -> Result<EnvFilter, Error> {
    let directives = match std::env::var("RUST_LOG") {
        Ok(custom) if !custom.trim().is_empty() => custom,
        _ => default_filter(debug),
    };

    EnvFilter::try_new(&directives)
        .map_err(|e| Error::Config(format!("Failed to create environment filter: {}", e)))
}

/// Install the global subscriber writing to the log file; returns its path
pub fn init_file_logging(debug: bool) -> Result<PathBuf, Error> {
    let path = log_file_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::registry()
        .with(env_filter(debug)?)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .map_err(|e| Error::Other(format!("Failed to install log subscriber: {}", e)))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path_ends_in_app_dir() {
        let path = log_file_path();
        assert!(path.ends_with(".clara-onboarding/onboarding.log"));
    }

    #[test]
    fn test_default_filter_levels() {
        assert!(default_filter(false).starts_with("clara_onboarding=info"));
        assert!(default_filter(true).starts_with("clara_onboarding=debug"));
        assert!(EnvFilter::try_new(default_filter(true)).is_ok());
    }
}
