use crate::scoring::{Domain, ReferenceYears, ScoringConfig, TierTable, TierTableError};
use chrono::Datelike;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

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
    pub storage: StorageConfig,
    pub fetch: FetchConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let storage = StorageConfig {
            database_path: env::var("APP_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_database_path()),
            ui_path: env::var("APP_UI_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("index.html")),
        };

        let fetch = FetchConfig {
            user_agent: env::var("APP_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            search_base_url: env::var("APP_SEARCH_BASE_URL")
                .unwrap_or_else(|_| "https://www.google.com".to_string()),
            github_base_url: env::var("APP_GITHUB_BASE_URL")
                .unwrap_or_else(|_| "https://github.com".to_string()),
            ad_library_base_url: env::var("APP_AD_LIBRARY_BASE_URL")
                .unwrap_or_else(|_| "https://www.facebook.com".to_string()),
            whois_api_key: env::var("APP_WHOIS_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
        };

        let reference_year = match env::var("APP_REFERENCE_YEAR") {
            Ok(raw) => raw
                .trim()
                .parse::<i32>()
                .map_err(|_| ConfigError::InvalidReferenceYear(raw))?,
            Err(_) => chrono::Local::now().year(),
        };

        let mut scoring = ScoringConfig::new(ReferenceYears::new(reference_year));
        for domain in Domain::ALL {
            let key = format!("APP_TIERS_{}", domain.env_key());
            if let Ok(raw) = env::var(&key) {
                let table = TierTable::parse(&raw)
                    .map_err(|source| ConfigError::InvalidTiers { key, source })?;
                scoring = scoring.with_tiers(domain, table);
            }
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            storage,
            fetch,
            scoring,
        })
    }
}

fn default_database_path() -> PathBuf {
    let base = env::var_os("APPDATA")
        .or_else(|| env::var_os("XDG_DATA_HOME"))
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join("LeadDork").join("database.db")
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Locations of the search log database and the bundled UI.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub database_path: PathBuf,
    pub ui_path: PathBuf,
}

/// Outbound HTTP identity and the third-party bases queried by lookups.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub search_base_url: String,
    pub github_base_url: String,
    pub ad_library_base_url: String,
    pub whois_api_key: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            search_base_url: "https://www.google.com".to_string(),
            github_base_url: "https://github.com".to_string(),
            ad_library_base_url: "https://www.facebook.com".to_string(),
            whois_api_key: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidReferenceYear(String),
    InvalidTiers { key: String, source: TierTableError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidReferenceYear(raw) => {
                write!(f, "APP_REFERENCE_YEAR must be a calendar year, got '{raw}'")
            }
            ConfigError::InvalidTiers { key, source } => {
                write!(f, "{key} is not a valid tier table: {source}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidReferenceYear(_) => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidTiers { source, .. } => Some(source),
        }
    }
}
