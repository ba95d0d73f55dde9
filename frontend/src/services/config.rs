use log::LevelFilter;

/// Bills API served by the Billed backend in development
pub const DEFAULT_BASE_URL: &str = "http://localhost:5678";

/// Front end configuration.
///
/// A wasm bundle has no process environment, so overrides are read when the
/// bundle is built: `BILLED_API_URL` and `BILLED_LOG_LEVEL`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub log_level: LevelFilter,
}

impl ApiConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("BILLED_API_URL"), option_env!("BILLED_LOG_LEVEL"))
    }

    /// Create a configuration with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }

    fn from_values(base_url: Option<&str>, log_level: Option<&str>) -> Self {
        let mut config = base_url
            .filter(|url| !url.trim().is_empty())
            .map(|url| Self::with_base_url(url.to_string()))
            .unwrap_or_default();
        if let Some(level) = log_level.and_then(|level| level.parse().ok()) {
            config.log_level = level;
        }
        config
    }

    /// Absolute URL of an API path such as `bills/1234`
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            log_level: LevelFilter::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_values(None, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_values(Some("https://api.billed.test/"), Some("debug"));
        assert_eq!(config.base_url, "https://api.billed.test/");
        assert_eq!(config.log_level, LevelFilter::Debug);

        let config = ApiConfig::from_values(Some("  "), Some("loud"));
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn test_url_joins_single_slash() {
        let config = ApiConfig::with_base_url("https://api.billed.test/".to_string());
        assert_eq!(config.url("bills"), "https://api.billed.test/bills");
        assert_eq!(config.url("/bills/1234"), "https://api.billed.test/bills/1234");
    }
}
