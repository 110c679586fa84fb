use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            worker_threads: Some(DEFAULT_WORKER_THREADS),
            shutdown_timeout_secs: default_shutdown_timeout(),
        }
    }
}

const DEFAULT_WORKER_THREADS: usize = 4;

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }
fn default_shutdown_timeout() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(anyhow!("unknown log format {other:?}; expected \"compact\" or \"json\"")),
        }
    }
}

/// Load from `CONFIG_PATH` (default `config.toml`). A missing file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if Path::new(&path).exists() {
        load_from_file(&path)
    } else {
        Ok(AppConfig::default())
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).with_context(|| format!("cannot read {path}"))?;
    let cfg: AppConfig = toml::from_str(&content).with_context(|| format!("cannot parse {path}"))?;
    Ok(cfg)
}

impl AppConfig {
    /// File (or defaults), then environment overrides, then validation.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.apply_env_overrides()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// `SERVER_HOST`, `SERVER_PORT` (or `SERVE_PORT`), `TOKIO_WORKER_THREADS`,
    /// `SHUTDOWN_TIMEOUT_SECS`, `LOG_FORMAT`.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(host) = env_var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = env_var("SERVER_PORT").or_else(|| env_var("SERVE_PORT")) {
            self.server.port = port.parse().with_context(|| format!("invalid server port {port:?}"))?;
        }
        if let Some(threads) = env_var("TOKIO_WORKER_THREADS") {
            let threads = threads
                .parse()
                .with_context(|| format!("invalid TOKIO_WORKER_THREADS {threads:?}"))?;
            self.server.worker_threads = Some(threads);
        }
        if let Some(secs) = env_var("SHUTDOWN_TIMEOUT_SECS") {
            self.server.shutdown_timeout_secs = secs
                .parse()
                .with_context(|| format!("invalid SHUTDOWN_TIMEOUT_SECS {secs:?}"))?;
        }
        if let Some(format) = env_var("LOG_FORMAT") {
            self.logging.format = format.parse()?;
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(DEFAULT_WORKER_THREADS),
            Some(_) => {}
        }
        if self.shutdown_timeout_secs == 0 {
            return Err(anyhow!("server.shutdown_timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ENV_KEYS: [&str; 7] = [
        "CONFIG_PATH",
        "SERVER_HOST",
        "SERVER_PORT",
        "SERVE_PORT",
        "TOKIO_WORKER_THREADS",
        "SHUTDOWN_TIMEOUT_SECS",
        "LOG_FORMAT",
    ];

    fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let mut all: Vec<(&str, Option<&str>)> = ENV_KEYS.iter().map(|k| (*k, None)).collect();
        for &(k, v) in vars {
            all.retain(|(key, _)| *key != k);
            all.push((k, Some(v)));
        }
        temp_env::with_vars(all, f);
    }

    #[test]
    fn parses_full_toml() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            worker_threads = 2
            shutdown_timeout_secs = 3

            [logging]
            format = "json"
            "#,
        )
        .expect("valid toml");
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:9000");
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.server.shutdown_timeout_secs, 3);
        assert_eq!(cfg.logging.format, LogFormat::Json);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let cfg: AppConfig = toml::from_str("[server]\nport = 9001\n").expect("valid toml");
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 9001);
        assert_eq!(cfg.server.shutdown_timeout_secs, 10);
        assert_eq!(cfg.logging.format, LogFormat::Compact);
    }

    #[test]
    #[serial]
    fn missing_file_yields_defaults() {
        with_env(&[("CONFIG_PATH", "/nonexistent-config-for-tests.toml")], || {
            let cfg = AppConfig::load_and_validate().expect("defaults are valid");
            assert_eq!(cfg.server, ServerConfig::default());
        });
    }

    #[test]
    #[serial]
    fn env_overrides_file_values() {
        with_env(
            &[
                ("CONFIG_PATH", "/nonexistent-config-for-tests.toml"),
                ("SERVER_HOST", "0.0.0.0"),
                ("SERVE_PORT", "8088"),
                ("TOKIO_WORKER_THREADS", "8"),
                ("LOG_FORMAT", "JSON"),
            ],
            || {
                let cfg = AppConfig::load_and_validate().expect("valid");
                assert_eq!(cfg.server.bind_addr(), "0.0.0.0:8088");
                assert_eq!(cfg.server.worker_threads, Some(8));
                assert_eq!(cfg.logging.format, LogFormat::Json);
            },
        );
    }

    #[test]
    #[serial]
    fn server_port_wins_over_serve_port() {
        with_env(
            &[
                ("CONFIG_PATH", "/nonexistent-config-for-tests.toml"),
                ("SERVER_PORT", "7000"),
                ("SERVE_PORT", "8088"),
            ],
            || {
                let cfg = AppConfig::load_and_validate().expect("valid");
                assert_eq!(cfg.server.port, 7000);
            },
        );
    }

    #[test]
    #[serial]
    fn invalid_env_values_are_rejected() {
        with_env(&[("CONFIG_PATH", "/nonexistent-config-for-tests.toml"), ("SERVE_PORT", "eighty")], || {
            assert!(AppConfig::load_and_validate().is_err());
        });
        with_env(&[("CONFIG_PATH", "/nonexistent-config-for-tests.toml"), ("LOG_FORMAT", "xml")], || {
            assert!(AppConfig::load_and_validate().is_err());
        });
    }

    #[test]
    fn normalization_rules() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "  ".into();
        cfg.server.worker_threads = Some(0);
        cfg.normalize_and_validate().expect("normalizes");
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));

        let mut zero_port = AppConfig::default();
        zero_port.server.port = 0;
        assert!(zero_port.normalize_and_validate().is_err());

        let mut zero_timeout = AppConfig::default();
        zero_timeout.server.shutdown_timeout_secs = 0;
        assert!(zero_timeout.normalize_and_validate().is_err());
    }
}
