use crate::config::types::Config;
use crate::ConfigError;

/// Validates a parsed configuration.
///
/// Timeouts must be positive, the crawl deadline must cover at least one
/// page render, the worker pool must be small but non-empty, and the
/// page budget must allow at least the base page.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let scan = &config.scan;

    if scan.page_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "page-timeout-ms must be greater than 0".to_string(),
        ));
    }

    if scan.discovery_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "discovery-timeout-ms must be greater than 0".to_string(),
        ));
    }

    if scan.crawl_deadline_ms < scan.page_timeout_ms {
        return Err(ConfigError::Validation(format!(
            "crawl-deadline-ms ({}) must be at least page-timeout-ms ({})",
            scan.crawl_deadline_ms, scan.page_timeout_ms
        )));
    }

    if scan.max_concurrent_pages == 0 || scan.max_concurrent_pages > 8 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-pages must be between 1 and 8, got {}",
            scan.max_concurrent_pages
        )));
    }

    if scan.default_max_pages == 0 {
        return Err(ConfigError::Validation(
            "default-max-pages must be at least 1".to_string(),
        ));
    }

    if config.user_agent.name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent name must not be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.scan.page_timeout_ms = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_deadline_shorter_than_page_timeout_rejected() {
        let mut config = Config::default();
        config.scan.crawl_deadline_ms = 1000;
        config.scan.page_timeout_ms = 5000;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_worker_pool_bounds() {
        let mut config = Config::default();
        config.scan.max_concurrent_pages = 0;
        assert!(validate(&config).is_err());
        config.scan.max_concurrent_pages = 9;
        assert!(validate(&config).is_err());
        config.scan.max_concurrent_pages = 4;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_blank_user_agent_rejected() {
        let mut config = Config::default();
        config.user_agent.name = "  ".to_string();
        assert!(validate(&config).is_err());
    }
}
