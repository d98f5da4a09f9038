use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Source section exists (enforced by serde) and names a spreadsheet
/// - Server port is not 0
/// - Catalog page size, cache TTL and identifier column are usable
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.source.spreadsheet_id.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "source.spreadsheet_id cannot be empty".to_string(),
        ));
    }

    if config.catalog.page_size == 0 {
        return Err(ConfigError::ValidationError(
            "catalog.page_size must be greater than 0".to_string(),
        ));
    }

    if config.catalog.cache_ttl_secs == 0 {
        return Err(ConfigError::ValidationError(
            "catalog.cache_ttl_secs must be greater than 0".to_string(),
        ));
    }

    if config.catalog.id_column.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "catalog.id_column cannot be empty".to_string(),
        ));
    }

    Ok(())
}
