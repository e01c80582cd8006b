use serde::Deserialize;
use std::env;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origins allowed by CORS. `"*"` allows any origin.
    #[serde(default = "default_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            cors_allowed_origins: default_allowed_origins(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { db_path: default_db_path() }
    }
}

/// Which offer backends to wire up.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderMode {
    /// In-memory demo tables.
    #[default]
    Static,
    /// Amadeus for flights, Hotelbeds for hotels.
    Remote,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub mode: ProviderMode,
    /// Departure airport/city for remote flight searches.
    #[serde(default = "default_flight_origin")]
    pub flight_origin: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default)]
    pub amadeus: SupplierConfig,
    #[serde(default)]
    pub hotelbeds: SupplierConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            mode: ProviderMode::default(),
            flight_origin: default_flight_origin(),
            request_timeout_seconds: default_request_timeout(),
            amadeus: SupplierConfig::default(),
            hotelbeds: SupplierConfig::default(),
        }
    }
}

/// Remote supplier endpoint. Unset fields fall back to the provider's
/// sandbox URL and to "no credentials".
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SupplierConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

fn default_port() -> u16 { 3002 }
fn default_allowed_origins() -> Vec<String> { vec!["http://localhost:3000".to_string()] }
fn default_body_limit() -> usize { 100 * 1024 }
fn default_db_path() -> String { "data/db.json".to_string() }
fn default_flight_origin() -> String { "NYC".to_string() }
fn default_request_timeout() -> u64 { 10 }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Layered load: `default` -> `$RUN_MODE` (optional) -> `local` (optional)
    /// -> `WAYFARE__*` environment variables.
    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let file = |name: &str| dir.join(name).to_string_lossy().into_owned();

        let s = config::Config::builder()
            .add_source(config::File::with_name(&file("default")))
            .add_source(config::File::with_name(&file(&run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name(&file("local")).required(false))
            // Eg. `WAYFARE__SERVER__PORT=8080`
            .add_source(
                config::Environment::with_prefix("WAYFARE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}
