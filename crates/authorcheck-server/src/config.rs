//! Server configuration

use authorcheck_detectors::DetectionConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Scoring thresholds, weights and rule tables
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Standalone detection config file, replacing `detection` when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detection_file: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from file, falling back to defaults when the file
    /// does not exist
    pub fn load(config_path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = config_path.as_ref();
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_yaml(&content)?
        } else {
            Self::default()
        };

        Ok(config)
    }

    /// Parse and validate configuration from YAML
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        let mut config: Self = serde_yaml::from_str(yaml)?;
        match &config.detection_file {
            Some(path) => config.detection = DetectionConfig::from_file(path)?,
            None => config.detection.validate()?,
        }
        Ok(config)
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, listen: Option<String>, port: Option<u16>) -> Self {
        if let Some(listen) = listen {
            self.listen = listen;
        }

        if let Some(port) = port {
            self.port = port;
        }

        self
    }

    /// Socket address string for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listen, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            cors: CorsConfig::default(),
            detection: DetectionConfig::default(),
            detection_file: None,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allow requests from any origin
    #[serde(default = "default_true")]
    pub allow_any_origin: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_any_origin: true,
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8002
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ServerConfig::load("/nonexistent/authorcheck.yaml").unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8002");
        assert!(config.cors.allow_any_origin);
        assert_eq!(config.detection, DetectionConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "port: 9000\ncors:\n  allow_any_origin: false\ndetection:\n  min_text_length: 80"
        )
        .unwrap();

        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.listen, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert!(!config.cors.allow_any_origin);
        assert_eq!(config.detection.min_text_length, 80);
        assert_eq!(config.detection.min_code_length, 100);
    }

    #[test]
    fn test_invalid_detection_config_rejected() {
        let yaml = "detection:\n  thresholds:\n    moderate: 0.7\n    questionable: 0.6\n    inadequate: 0.8";
        assert!(ServerConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_detection_file_replaces_inline_section() {
        let mut detection = tempfile::NamedTempFile::new().unwrap();
        writeln!(detection, "min_text_length: 120\nweights:\n  text: 0.5\n  code: 0.5").unwrap();

        let yaml = format!(
            "detection:\n  min_text_length: 80\ndetection_file: {}",
            detection.path().display()
        );
        let config = ServerConfig::from_yaml(&yaml).unwrap();
        assert_eq!(config.detection.min_text_length, 120);
        assert_eq!(config.detection.weights.text, 0.5);
    }

    #[test]
    fn test_missing_detection_file_is_io_error() {
        let yaml = "detection_file: /nonexistent/detection.yaml";
        let err = ServerConfig::from_yaml(yaml).unwrap_err();
        let err = err.downcast::<authorcheck_core::Error>().unwrap();
        assert_eq!(err.kind(), "io");
    }

    #[test]
    fn test_cli_overrides() {
        let config = ServerConfig::default().with_overrides(Some("127.0.0.1".to_string()), None);
        assert_eq!(config.bind_address(), "127.0.0.1:8002");

        let config = config.with_overrides(None, Some(3000));
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }
}
