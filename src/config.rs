//! Runtime settings.
//!
//! Defaults are compile-time constants; [`Config::from_env`] lets the
//! environment (or a `.env` file loaded by the binary) override them.

use log::warn;
use std::env;
use std::str::FromStr;

/// Most child networks listed by a subnet request.
pub const SUBNET_LIMIT: usize = 20;
pub const LOG_CONFIG_FILE: &str = "log4rs.yml";

pub const ENV_SUBNET_LIMIT: &str = "NETADDR_SUBNET_LIMIT";
pub const ENV_LOG_CONFIG: &str = "NETADDR_LOG_CONFIG";
pub const ENV_OUTPUT: &str = "NETADDR_OUTPUT";

/// How the binary prints a result record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
    Table,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<OutputFormat, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "pretty" => Ok(OutputFormat::Pretty),
            "table" => Ok(OutputFormat::Table),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub subnet_limit: usize,
    pub log_config: String,
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            subnet_limit: SUBNET_LIMIT,
            log_config: LOG_CONFIG_FILE.to_string(),
            output: OutputFormat::default(),
        }
    }
}

/// Path of the log4rs file, read on its own so logging can start before
/// the rest of the configuration is checked.
pub fn log_config_from_env() -> String {
    log_config_with(&|key: &str| env::var(key).ok())
}

fn log_config_with<F>(lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(ENV_LOG_CONFIG)
        .filter(|path| !path.trim().is_empty())
        .unwrap_or_else(|| LOG_CONFIG_FILE.to_string())
}

impl Config {
    /// Read overrides from the process environment.
    pub fn from_env() -> Config {
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config {
            log_config: log_config_with(&lookup),
            ..Config::default()
        };
        if let Some(limit) = lookup(ENV_SUBNET_LIMIT) {
            match limit.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.subnet_limit = n,
                _ => warn!(
                    "{}='{}' is not a positive number, using {}",
                    ENV_SUBNET_LIMIT, limit, SUBNET_LIMIT
                ),
            }
        }
        if let Some(output) = lookup(ENV_OUTPUT) {
            match OutputFormat::from_str(&output) {
                Ok(format) => config.output = format,
                Err(e) => warn!("{}: {}, using json", ENV_OUTPUT, e),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(config.subnet_limit, 20);
        assert_eq!(config.log_config, "log4rs.yml");
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("NETADDR_SUBNET_LIMIT", "5"),
            ("NETADDR_LOG_CONFIG", "/etc/netaddr/log.yml"),
            ("NETADDR_OUTPUT", "Table"),
        ]));
        assert_eq!(config.subnet_limit, 5);
        assert_eq!(config.log_config, "/etc/netaddr/log.yml");
        assert_eq!(config.output, OutputFormat::Table);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("NETADDR_SUBNET_LIMIT", "lots"),
            ("NETADDR_OUTPUT", "xml"),
        ]));
        assert_eq!(config.subnet_limit, SUBNET_LIMIT);
        assert_eq!(config.output, OutputFormat::Json);

        let config = Config::from_lookup(lookup(&[("NETADDR_SUBNET_LIMIT", "0")]));
        assert_eq!(config.subnet_limit, SUBNET_LIMIT);
    }

    #[test]
    fn test_log_config_lookup() {
        assert_eq!(log_config_with(&lookup(&[])), LOG_CONFIG_FILE);
        assert_eq!(
            log_config_with(&lookup(&[("NETADDR_LOG_CONFIG", "  ")])),
            LOG_CONFIG_FILE
        );
        assert_eq!(
            log_config_with(&lookup(&[("NETADDR_LOG_CONFIG", "/tmp/log.yml")])),
            "/tmp/log.yml"
        );
    }
}
