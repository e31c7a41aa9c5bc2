//! Load — config loading from file and environment variables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::model::ServerConfig;

const DEFAULT_CONFIG_PATH: &str = "/etc/cwlogs-mcp/server.toml";

impl ServerConfig {
    /// Load configuration from file or environment variables.
    /// Priority: CLI/environment > config file > defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = match explicit_path {
            Some(path) => path.to_path_buf(),
            None => std::env::var("CWLOGS_CONFIG_FILE")
                .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
                .into(),
        };

        let mut config = if config_path.exists() {
            tracing::info!("Loading configuration from: {}", config_path.display());
            Self::from_file(&config_path)?
        } else {
            tracing::info!(
                "Config file not found at {}, using environment variables",
                config_path.display()
            );
            Self::from_env()
        };

        // Environment variables override file config
        if let Ok(region) = std::env::var("CWLOGS_REGION") {
            config.default_region = Some(region);
        }
        if let Ok(endpoint) = std::env::var("CWLOGS_ENDPOINT_URL") {
            config.endpoint_url = Some(endpoint);
        }

        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: ServerConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            default_region: std::env::var("CWLOGS_REGION").ok(),
            endpoint_url: std::env::var("CWLOGS_ENDPOINT_URL").ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_empty() {
        let config = ServerConfig::default();
        assert_eq!(config.default_region, None);
        assert_eq!(config.endpoint_url, None);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_region = \"us-west-2\"").unwrap();
        writeln!(file, "endpoint_url = \"http://localhost:4566\"").unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.default_region.as_deref(), Some("us-west-2"));
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:4566"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_region = \"ap-southeast-2\"").unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.default_region.as_deref(), Some("ap-southeast-2"));
        assert_eq!(config.endpoint_url, None);
    }
}
