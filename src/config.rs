use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use tracing::{info, warn};

/// Runtime settings, read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Simulated latency applied to every timetable generation
    pub generate_delay: Duration,
    /// Where the CLI writes timetable.txt and timetable.csv
    pub export_dir: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self {
            host: try_load("HOST", "0.0.0.0"),
            port: try_load("PORT", "8080"),
            generate_delay: Duration::from_millis(try_load("GENERATE_DELAY_MS", "0")),
            export_dir: PathBuf::from(try_load::<String>("EXPORT_DIR", ".")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            generate_delay: Duration::ZERO,
            export_dir: PathBuf::from("."),
        }
    }
}

fn try_load<T>(key: &str, default: &str) -> T
where
    T: FromStr + Default,
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    parse_or_default(key, &raw, default)
}

fn parse_or_default<T>(key: &str, raw: &str, default: &str) -> T
where
    T: FromStr + Default,
    T::Err: Display,
{
    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default.parse().unwrap_or_default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_default() {
        let port: u16 = parse_or_default("PORT", " 9090 ", "8080");
        assert_eq!(port, 9090);

        let port: u16 = parse_or_default("PORT", "not-a-port", "8080");
        assert_eq!(port, 8080);

        let delay: u64 = parse_or_default("GENERATE_DELAY_MS", "-5", "0");
        assert_eq!(delay, 0);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.generate_delay, Duration::ZERO);
    }
}
