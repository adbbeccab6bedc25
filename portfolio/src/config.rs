use std::fs;
use std::num::NonZeroU32;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::comment::{CommentQuery, SortOption};
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    pub base_url: String,
    pub max_comments: Option<NonZeroU32>,
    pub sort_option: Option<SortOption>,
    /// Zero disables the timeout.
    pub timeout_secs: u64,
    pub log_level: String,
    pub log_file: Option<String>,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            max_comments: None,
            sort_option: None,
            timeout_secs: 10,
            log_level: "info,portfolio=debug".to_string(),
            log_file: Some("portfolio-tui.log".to_string()),
        }
    }
}

impl PortfolioConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io { path: display.clone(), source })?;
        Self::parse(&display, &raw)
    }

    pub fn parse(origin: &str, raw: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(raw).map_err(|source| ConfigError::Parse { path: origin.to_string(), source })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::BaseUrl(self.base_url.clone()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn query(&self) -> CommentQuery {
        CommentQuery::new(self.max_comments, self.sort_option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg = PortfolioConfig::parse("test", "base_url = \"https://example.com\"\nmax_comments = 5\nsort_option = \"oldest\"\n").unwrap();
        assert_eq!(cfg.base_url, "https://example.com");
        assert_eq!(cfg.query(), CommentQuery::new(NonZeroU32::new(5), Some(SortOption::Oldest)));
        assert_eq!(cfg.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(cfg.log_level, PortfolioConfig::default().log_level);
    }

    #[test]
    fn zero_max_comments_is_rejected() {
        assert!(matches!(PortfolioConfig::parse("test", "max_comments = 0"), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn bad_base_url_is_rejected() {
        assert!(matches!(PortfolioConfig::parse("test", "base_url = \"ftp://x\""), Err(ConfigError::BaseUrl(_))));
    }

    #[test]
    fn zero_timeout_disables_it() {
        let cfg = PortfolioConfig { timeout_secs: 0, ..PortfolioConfig::default() };
        assert_eq!(cfg.timeout(), None);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = PortfolioConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
