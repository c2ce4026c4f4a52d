use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.ffxivteamcraft.com/";
const DEFAULT_SEARCH_ENDPOINT: &str = "search";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RATE_LIMIT_MS: u64 = 0;
pub const DEFAULT_OUTPUT_DIR: &str = "api_responses";

/// Settings for the search API client.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub search_endpoint: String,
    pub timeout: Duration,
    /// Minimum pause between two consecutive requests.
    pub rate_limit_delay: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            rate_limit_delay: Duration::from_millis(DEFAULT_RATE_LIMIT_MS),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(base) = std::env::var("TEAMCRAFT_BASE_URL") {
            cfg.base_url = base;
        }
        if let Ok(timeout) = std::env::var("TEAMCRAFT_TIMEOUT_SECS") {
            if let Ok(parsed) = timeout.parse::<u64>() {
                cfg.timeout = Duration::from_secs(parsed);
            }
        }
        if let Ok(delay) = std::env::var("TEAMCRAFT_RATE_LIMIT_MS") {
            if let Ok(parsed) = delay.parse::<u64>() {
                cfg.rate_limit_delay = Duration::from_millis(parsed);
            }
        }
        cfg
    }

    pub fn search_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.search_endpoint.trim_start_matches('/')
        )
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub output_root: PathBuf,
    pub quiet: bool,
}

impl AppConfig {
    /// Environment first, then CLI overrides.
    pub fn load(output: Option<PathBuf>, quiet: bool) -> Self {
        let output_root = output
            .or_else(|| std::env::var("TEAMCRAFT_OUTPUT_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        Self { api: ApiConfig::from_env(), output_root, quiet }
    }
}
