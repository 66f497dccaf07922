//! Centralized configuration for TvSource.
//!
//! Tunable resolution parameters live here instead of being hard-coded in
//! the resolver.

/// Buffer size applied to sources that do not specify one.
pub const DEFAULT_BUFFER_MS: u32 = 1500;

/// Source resolution configuration.
///
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Buffer size in milliseconds for sources without an explicit one
    pub default_buffer_ms: u32,
    /// Fill empty HTTP source paths with the local API URL so direct play
    /// checks can run
    pub fill_http_placeholder: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            default_buffer_ms: DEFAULT_BUFFER_MS,
            fill_http_placeholder: true,
        }
    }
}

impl SourceConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Unparseable values are ignored and the default is kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(buffer) = std::env::var("TVSOURCE_DEFAULT_BUFFER_MS") {
            if let Ok(buffer_ms) = buffer.parse::<u32>() {
                config.default_buffer_ms = buffer_ms;
            }
        }

        if let Ok(fill) = std::env::var("TVSOURCE_FILL_HTTP_PLACEHOLDER") {
            if let Ok(enabled) = fill.parse::<bool>() {
                config.fill_http_placeholder = enabled;
            }
        }

        config
    }

    /// Creates a configuration for tests.
    pub fn for_testing() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = SourceConfig::default();

        assert_eq!(config.default_buffer_ms, 1500);
        assert!(config.fill_http_placeholder);
    }

    #[test]
    fn test_env_override() {
        unsafe {
            std::env::set_var("TVSOURCE_DEFAULT_BUFFER_MS", "3000");
            std::env::set_var("TVSOURCE_FILL_HTTP_PLACEHOLDER", "false");
        }

        let config = SourceConfig::from_env();

        assert_eq!(config.default_buffer_ms, 3000);
        assert!(!config.fill_http_placeholder);

        // Cleanup
        unsafe {
            std::env::remove_var("TVSOURCE_DEFAULT_BUFFER_MS");
            std::env::remove_var("TVSOURCE_FILL_HTTP_PLACEHOLDER");
        }
    }
}
