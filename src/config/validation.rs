use crate::config::types::{
    CatalogConfig, Config, FetchConfig, PoolConfig, ProviderConfig, StorageConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_catalog_config(&config.catalog)?;
    validate_fetch_config(&config.fetch)?;
    validate_provider_config(&config.provider)?;
    validate_pool_config(&config.pool)?;
    validate_storage_config(&config.storage)?;
    Ok(())
}

/// Validates catalog discovery configuration
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    validate_http_url("catalog.base-url", &config.base_url)?;

    if config.partitions.is_empty() {
        return Err(ConfigError::Validation(
            "catalog.partitions must contain at least one partition key".to_string(),
        ));
    }

    for key in &config.partitions {
        if key.is_empty() {
            return Err(ConfigError::Validation(
                "partition keys cannot be empty".to_string(),
            ));
        }
        if key.contains('/') {
            return Err(ConfigError::Validation(format!(
                "partition key '{}' cannot contain '/'",
                key
            )));
        }
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "catalog.max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    Ok(())
}

/// Validates HTTP fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 || config.max_attempts > 10 {
        return Err(ConfigError::Validation(format!(
            "fetch.max-attempts must be between 1 and 10, got {}",
            config.max_attempts
        )));
    }

    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "fetch.timeout-secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "fetch.user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates lyrics provider configuration
fn validate_provider_config(config: &ProviderConfig) -> Result<(), ConfigError> {
    validate_http_url("provider.api-base-url", &config.api_base_url)?;

    if config.max_attempts < 1 || config.max_attempts > 10 {
        return Err(ConfigError::Validation(format!(
            "provider.max-attempts must be between 1 and 10, got {}",
            config.max_attempts
        )));
    }

    Ok(())
}

/// Validates worker pool configuration
fn validate_pool_config(config: &PoolConfig) -> Result<(), ConfigError> {
    // workers == 0 means "derive from available parallelism"
    if config.workers > 256 {
        return Err(ConfigError::Validation(format!(
            "pool.workers must be <= 256, got {}",
            config.workers
        )));
    }

    Ok(())
}

/// Validates object storage configuration
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.root.trim().is_empty() {
        return Err(ConfigError::Validation(
            "storage.root cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Checks that a config value parses as an http(s) URL
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", field, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must be http or https, got '{}'",
            field,
            url.scheme()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::RecrawlConfig;

    fn valid_config() -> Config {
        Config {
            catalog: CatalogConfig {
                base_url: "https://lyrics.example.com/artists-index".to_string(),
                partitions: vec!["a".to_string(), "b".to_string()],
                max_pages: 100,
            },
            fetch: FetchConfig::default(),
            provider: ProviderConfig {
                api_base_url: "https://api.example.com".to_string(),
                max_attempts: 5,
            },
            pool: PoolConfig { workers: 4 },
            storage: StorageConfig {
                root: "./lyrics-root".to_string(),
            },
            recrawl: RecrawlConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let mut config = valid_config();
        config.catalog.base_url = "ftp://lyrics.example.com".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_rejects_empty_partitions() {
        let mut config = valid_config();
        config.catalog.partitions.clear();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_partition_with_slash() {
        let mut config = valid_config();
        config.catalog.partitions = vec!["a/b".to_string()];
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_zero_fetch_attempts() {
        let mut config = valid_config();
        config.fetch.max_attempts = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_pool() {
        let mut config = valid_config();
        config.pool.workers = 1000;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_workers_is_auto() {
        let mut config = valid_config();
        config.pool.workers = 0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_rejects_empty_storage_root() {
        let mut config = valid_config();
        config.storage.root = "  ".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }
}
