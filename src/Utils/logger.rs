use crate::symbolic::symbolic_errors::SymbolicError;
use chrono::Local;
use simplelog::*;
use std::error::Error;
use std::fs::File;
use std::path::Path;

/// "debug", "info", "warn", "error" or "off"
pub fn parse_level(loglevel: &str) -> Result<LevelFilter, SymbolicError> {
    match loglevel.trim().to_lowercase().as_str() {
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        "off" | "none" => Ok(LevelFilter::Off),
        other => Err(SymbolicError::InvalidFormat(format!(
            "loglevel must be debug, info, warn, error or off, got '{}'",
            other
        ))),
    }
}

/// `log_2024-05-01_12-30-00.txt`
pub fn timestamped_log_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.txt", date_and_time)
}

/// Install a terminal logger, plus a file logger if `log_file` is given.
/// Level defaults to info. A logger installed earlier stays in place.
pub fn init_logger(loglevel: Option<&str>, log_file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let log_option = match loglevel {
        Some(level) => parse_level(level)?,
        None => LevelFilter::Info,
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        log_option,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        loggers.push(WriteLogger::new(log_option, Config::default(), File::create(path)?));
    }
    let logger_instance = CombinedLogger::init(loggers);
    match logger_instance {
        Ok(()) => log::info!("logger initialized at level {}", log_option),
        Err(_) => log::debug!("logger already initialized"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN ").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::Off);
        assert!(matches!(
            parse_level("verbose"),
            Err(SymbolicError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_timestamped_log_name() {
        let name = timestamped_log_name();
        assert!(name.starts_with("log_"));
        assert!(name.ends_with(".txt"));
        assert_eq!(name.len(), "log_2024-05-01_12-30-00.txt".len());
    }

    #[test]
    fn test_init_logger_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(timestamped_log_name());
        init_logger(Some("info"), Some(&path)).unwrap();
        assert!(path.exists());
        // a second call keeps the first logger
        init_logger(None, None).unwrap();
        assert!(init_logger(Some("loud"), None).is_err());
    }
}
