//! Configuration (AMBIENT): a `[[source]]`-per-entry TOML file merged
//! with CLI flags/env vars via clap, generalized from the teacher's
//! single flat `Config` since this core fans out over an arbitrary
//! number of independently-configured sources rather than one upstream
//! list.

use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

fn default_poll_interval() -> u64 {
    30
}

fn default_retry_interval() -> u64 {
    10
}

/// One monitored Zabbix instance.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub id: String,
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Defaults reproduce the source's own development default; production
    /// deployments MUST override these via the TOML file.
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default = "default_password")]
    pub password: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_sec: u64,
    #[serde(default = "default_retry_interval")]
    pub retry_interval_sec: u64,
}

fn default_port() -> u16 {
    80
}

fn default_user() -> String {
    "admin".to_string()
}

fn default_password() -> String {
    "zabbix".to_string()
}

impl SourceConfig {
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}/zabbix/api_jsonrpc.php", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Default)]
struct FleetConfigFile {
    #[serde(default, rename = "source")]
    sources: Vec<SourceConfig>,
}

#[derive(Debug, Clone)]
pub struct FleetConfig {
    pub sources: Vec<SourceConfig>,
    pub status_port: u16,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "zbxpoller", about = "Zabbix-compatible monitoring-data ingestion poller")]
pub struct Cli {
    /// Path to a TOML file listing `[[source]]` entries.
    #[arg(long, env = "ZBXPOLLER_CONFIG")]
    pub config: PathBuf,

    /// Port the `/health` and `/status` endpoints listen on.
    #[arg(long, env = "ZBXPOLLER_STATUS_PORT", default_value = "9100")]
    pub status_port: u16,

    /// Enable verbose logging.
    #[arg(short, long, env = "ZBXPOLLER_VERBOSE", default_value = "false")]
    pub verbose: bool,
}

#[derive(Debug)]
pub struct ConfigError(pub String);

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "configuration error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

impl FleetConfig {
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(&cli.config).map_err(|e| ConfigError(format!("reading {}: {e}", cli.config.display())))?;
        Self::parse(&text, cli.status_port)
    }

    fn parse(text: &str, status_port: u16) -> Result<Self, ConfigError> {
        let file: FleetConfigFile = toml::from_str(text).map_err(|e| ConfigError(e.to_string()))?;
        if file.sources.is_empty() {
            return Err(ConfigError("config must declare at least one [[source]]".to_string()));
        }
        let mut seen = std::collections::HashSet::new();
        for source in &file.sources {
            if !seen.insert(source.id.clone()) {
                return Err(ConfigError(format!("duplicate source id {:?}", source.id)));
            }
        }
        Ok(Self { sources: file.sources, status_port })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_single_source_file() {
        let toml = r#"
            [[source]]
            id = "prod-zabbix"
            host = "zabbix.example.com"
        "#;
        let config = FleetConfig::parse(toml, 9100).unwrap();
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.sources[0].port, 80);
        assert_eq!(config.sources[0].poll_interval_sec, 30);
        assert_eq!(config.sources[0].endpoint(), "http://zabbix.example.com:80/zabbix/api_jsonrpc.php");
    }

    #[test]
    fn rejects_duplicate_source_ids() {
        let toml = r#"
            [[source]]
            id = "a"
            host = "h1"

            [[source]]
            id = "a"
            host = "h2"
        "#;
        assert!(FleetConfig::parse(toml, 9100).is_err());
    }

    #[test]
    fn rejects_a_config_with_no_sources() {
        assert!(FleetConfig::parse("", 9100).is_err());
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let toml = r#"
            [[source]]
            id = "a"
            host = "h1"
            port = 8080
            user = "monitor"
            password = "secret"
            poll_interval_sec = 60
            retry_interval_sec = 5
        "#;
        let config = FleetConfig::parse(toml, 9100).unwrap();
        let source = &config.sources[0];
        assert_eq!(source.port, 8080);
        assert_eq!(source.user, "monitor");
        assert_eq!(source.poll_interval_sec, 60);
    }
}
