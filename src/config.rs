use {
    crate::render::{DEFAULT_BATCH_SIZE, DEFAULT_LOOKAHEAD},
    std::{env, time::Duration},
};

pub const DEFAULT_USER_IDS: [&str; 3] = ["lMjZp", "rd2be", "2xYazJ"];
pub const DEFAULT_API_BASE: &str = "https://api.joyland.ai";
pub const DEFAULT_PROFILE_BASE: &str = "https://www.joyland.ai";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    /// Source user ids, in declaration order
    pub user_ids: Vec<String>,
    pub api_base: String,
    pub profile_base: String,
    pub page_size: u32,
    /// Hard stop for a source that never reports its last page
    pub page_limit: u32,
    pub batch_size: usize,
    /// Rows past the viewport at which the sentinel counts as visible
    pub lookahead_rows: usize,
    pub search_debounce: Duration,
    /// Per-request timeout; `None` lets a stalled request hang its source
    pub fetch_timeout: Option<Duration>,
    pub carousel_interval: Duration,
    pub log_file: Option<String>,
    pub rust_log: Option<String>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            user_ids: DEFAULT_USER_IDS.iter().map(|id| id.to_string()).collect(),
            api_base: DEFAULT_API_BASE.to_string(),
            profile_base: DEFAULT_PROFILE_BASE.to_string(),
            page_size: 100,
            page_limit: 1000,
            batch_size: DEFAULT_BATCH_SIZE,
            lookahead_rows: DEFAULT_LOOKAHEAD,
            search_debounce: Duration::from_millis(300),
            fetch_timeout: None,
            carousel_interval: Duration::from_secs(3),
            log_file: None,
            rust_log: None,
        }
    }
}

impl GalleryConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `BOT_USER_IDS` (comma-separated, default: lMjZp,rd2be,2xYazJ)
    /// - `BOT_API_BASE` (default: https://api.joyland.ai)
    /// - `BOT_PROFILE_BASE` (default: https://www.joyland.ai)
    /// - `BOT_PAGE_SIZE` (default: 100)
    /// - `BOT_PAGE_LIMIT` (default: 1000)
    /// - `BOT_BATCH_SIZE` (default: 20)
    /// - `BOT_LOOKAHEAD_ROWS` (default: 3)
    /// - `SEARCH_DEBOUNCE_MS` (default: 300)
    /// - `FETCH_TIMEOUT_SECS` (default: unset, no timeout)
    /// - `CAROUSEL_INTERVAL_SECS` (default: 3)
    /// - `LOG_FILE` (default: unset, logs go to stderr)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let user_ids = env::var("BOT_USER_IDS")
            .map(|s| {
                s.split(',')
                    .map(|id| id.trim().to_string())
                    .filter(|id| !id.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.user_ids);

        let config = Self {
            user_ids,
            api_base: env::var("BOT_API_BASE").unwrap_or(defaults.api_base),
            profile_base: env::var("BOT_PROFILE_BASE").unwrap_or(defaults.profile_base),
            page_size: parse_var("BOT_PAGE_SIZE")?.unwrap_or(defaults.page_size),
            page_limit: parse_var("BOT_PAGE_LIMIT")?.unwrap_or(defaults.page_limit),
            batch_size: parse_var("BOT_BATCH_SIZE")?.unwrap_or(defaults.batch_size),
            lookahead_rows: parse_var("BOT_LOOKAHEAD_ROWS")?.unwrap_or(defaults.lookahead_rows),
            search_debounce: parse_var("SEARCH_DEBOUNCE_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.search_debounce),
            fetch_timeout: parse_var("FETCH_TIMEOUT_SECS")?.map(Duration::from_secs),
            carousel_interval: parse_var("CAROUSEL_INTERVAL_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.carousel_interval),
            log_file: env::var("LOG_FILE").ok().filter(|s| !s.is_empty()),
            rust_log: env::var("RUST_LOG").ok(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.user_ids.is_empty() {
            return Err(ConfigError::InvalidValue(
                "BOT_USER_IDS must name at least one user".to_string(),
            ));
        }

        for (name, base) in [("BOT_API_BASE", &self.api_base), ("BOT_PROFILE_BASE", &self.profile_base)] {
            if !base.starts_with("http://") && !base.starts_with("https://") {
                return Err(ConfigError::InvalidValue(format!(
                    "{} must start with http:// or https://",
                    name
                )));
            }
        }

        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue("BOT_PAGE_SIZE must be > 0".to_string()));
        }
        if self.page_limit == 0 {
            return Err(ConfigError::InvalidValue("BOT_PAGE_LIMIT must be > 0".to_string()));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidValue("BOT_BATCH_SIZE must be > 0".to_string()));
        }
        // The sentinel sits one row below the last card, so a zero margin
        // would never see it once the grid is full.
        if self.lookahead_rows == 0 {
            return Err(ConfigError::InvalidValue("BOT_LOOKAHEAD_ROWS must be > 0".to_string()));
        }

        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(format!("{}={} is not a valid number", name, raw))),
        Err(_) => Ok(None),
    }
}
