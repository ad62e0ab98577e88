use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use url::Url;

const DEFAULT_NOCODB_URL: &str = "https://nocodb.tdconsulting.vn";
const DEFAULT_JOBS_TABLE_ID: &str = "mh36y68rb3lserw";
const DEFAULT_COMPANY_TABLE_ID: &str = "m6kww8gls7yguss";
pub const DEFAULT_WEBHOOK_URL: &str = "https://n8n.tdconsulting.vn/webhook/tdgames-apply";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub nocodb: NocoDbConfig,
    pub webhook: WebhookConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let nocodb = NocoDbConfig {
            base_url: url_var("NOCODB_URL", DEFAULT_NOCODB_URL)?,
            jobs_table_id: non_empty_var("NOCODB_TABLE_ID", DEFAULT_JOBS_TABLE_ID),
            company_table_id: non_empty_var(
                "NOCODB_COMPANY_INFO_TABLE_ID",
                DEFAULT_COMPANY_TABLE_ID,
            ),
            api_token: env::var("NOCODB_API_TOKEN").unwrap_or_default(),
        };

        let webhook = WebhookConfig {
            url: url_var("WEBHOOK_URL", DEFAULT_WEBHOOK_URL)?,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            nocodb,
            webhook,
        })
    }
}

fn non_empty_var(name: &str, fallback: &str) -> String {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn url_var(name: &'static str, fallback: &str) -> Result<Url, ConfigError> {
    let raw = non_empty_var(name, fallback);
    Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { var: name, source })
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Location and credentials of the NocoDB instance backing the landing page.
#[derive(Debug, Clone)]
pub struct NocoDbConfig {
    pub base_url: Url,
    pub jobs_table_id: String,
    pub company_table_id: String,
    pub api_token: String,
}

/// Endpoint receiving submitted applications.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub url: Url,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidUrl {
        var: &'static str,
        source: url::ParseError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidUrl { var, .. } => {
                write!(f, "{var} must be an absolute URL")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidUrl { source, .. } => Some(source),
        }
    }
}
