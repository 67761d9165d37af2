use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

const ENV_VAR: &str = "PLENUM_ENV";
const HOST_VAR: &str = "PLENUM_HOST";
const PORT_VAR: &str = "PLENUM_PORT";
const LOG_LEVEL_VAR: &str = "PLENUM_LOG_LEVEL";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 4000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the conference service, read once at startup
/// from `PLENUM_*` environment variables (a `.env` file is honored).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::parse(&env_or(ENV_VAR, "development"));

        let host = env_or(HOST_VAR, DEFAULT_HOST);
        if host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }

        let raw_port = env_or(PORT_VAR, &DEFAULT_PORT.to_string());
        let port = raw_port
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|port| *port != 0)
            .ok_or(ConfigError::InvalidPort { value: raw_port })?;

        let log_level = env_or(LOG_LEVEL_VAR, DEFAULT_LOG_LEVEL);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = match self.host.as_str() {
            host if host.eq_ignore_ascii_case("localhost") => IpAddr::from([127, 0, 0, 1]),
            host => host
                .parse()
                .map_err(|source| ConfigError::InvalidHost { source })?,
        };

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyHost,
    InvalidPort { value: String },
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyHost => write!(f, "{HOST_VAR} must not be blank"),
            ConfigError::InvalidPort { value } => {
                write!(f, "{PORT_VAR} must be a non-zero u16, got '{value}'")
            }
            ConfigError::InvalidHost { .. } => {
                write!(f, "{HOST_VAR} must be 'localhost' or an IP address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::EmptyHost | ConfigError::InvalidPort { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var(ENV_VAR);
        env::remove_var(HOST_VAR);
        env::remove_var(PORT_VAR);
        env::remove_var(LOG_LEVEL_VAR);
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.telemetry.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var(HOST_VAR, "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(
            addr,
            SocketAddr::new(IpAddr::from([127, 0, 0, 1]), DEFAULT_PORT)
        );
        env::remove_var(HOST_VAR);
    }

    #[test]
    fn rejects_blank_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var(HOST_VAR, "   ");
        let result = AppConfig::load();
        assert!(matches!(result, Err(ConfigError::EmptyHost)));
        env::remove_var(HOST_VAR);
    }

    #[test]
    fn rejects_non_numeric_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var(PORT_VAR, "eight-thousand");
        let result = AppConfig::load();
        assert!(matches!(result, Err(ConfigError::InvalidPort { .. })));
        env::remove_var(PORT_VAR);
    }

    #[test]
    fn rejects_the_wildcard_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var(PORT_VAR, "0");
        let result = AppConfig::load();
        assert!(matches!(result, Err(ConfigError::InvalidPort { .. })));
        env::remove_var(PORT_VAR);
    }
}
