use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub sessions: SessionsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Spreadsheet source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Spreadsheet key (the long id in the sheet URL).
    pub spreadsheet_id: String,
    /// API key used to read the sheet.
    /// Missing keys are reported at load time, not at startup.
    #[serde(default)]
    pub api_key: Option<String>,
    /// A1 range to read (default: every column of the first sheet).
    #[serde(default = "default_range")]
    pub range: String,
    /// Base URL (default: https://sheets.googleapis.com/v4).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_range() -> String {
    "A:ZZ".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Catalog presentation and caching configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Header of the unique integer identifier column.
    #[serde(default = "default_id_column")]
    pub id_column: String,
    /// Cards per catalog page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Seconds a loaded table is served before the source is fetched again.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            id_column: default_id_column(),
            page_size: default_page_size(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_id_column() -> String {
    "index".to_string()
}

fn default_page_size() -> usize {
    crate::paginate::PAGE_SIZE
}

fn default_cache_ttl() -> u64 {
    3600
}

/// Browser session bookkeeping.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionsConfig {
    /// Sessions untouched for this long are dropped.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout(),
        }
    }
}

fn default_idle_timeout() -> u64 {
    86_400
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub source: SanitizedSourceConfig,
    pub catalog: CatalogConfig,
    pub sessions: SessionsConfig,
}

/// Sanitized source config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSourceConfig {
    pub spreadsheet_id: String,
    pub range: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            source: SanitizedSourceConfig {
                spreadsheet_id: config.source.spreadsheet_id.clone(),
                range: config.source.range.clone(),
                api_key_configured: config
                    .source
                    .api_key
                    .as_ref()
                    .is_some_and(|k| !k.trim().is_empty()),
                timeout_secs: config.source.timeout_secs,
            },
            catalog: config.catalog.clone(),
            sessions: config.sessions.clone(),
        }
    }
}
