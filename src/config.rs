use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (default: 127.0.0.1)
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("invalid bind address {}:{}: {e}", self.host, self.port))
    }
}

/// Where the exported model artifacts live
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactsConfig {
    /// Directory holding the artifact files, relative to the working directory
    #[serde(default = "default_artifacts_dir")]
    pub dir: PathBuf,
    /// Risk classifier file name
    #[serde(default = "default_classifier_file")]
    pub classifier: String,
    /// Label encoder file name (optional artifact)
    #[serde(default = "default_label_encoder_file")]
    pub label_encoder: String,
    /// Cluster model file name
    #[serde(default = "default_cluster_model_file")]
    pub cluster_model: String,
    /// Feature scaler file name
    #[serde(default = "default_scaler_file")]
    pub scaler: String,
    /// Refuse risk predictions when the label encoder is missing
    #[serde(default)]
    pub require_label_encoder: bool,
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_classifier_file() -> String {
    "modelo_risco.onnx".to_string()
}

fn default_label_encoder_file() -> String {
    "label_encoder_risco.json".to_string()
}

fn default_cluster_model_file() -> String {
    "modelo_cluster.onnx".to_string()
}

fn default_scaler_file() -> String {
    "scaler_cluster.onnx".to_string()
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: default_artifacts_dir(),
            classifier: default_classifier_file(),
            label_encoder: default_label_encoder_file(),
            cluster_model: default_cluster_model_file(),
            scaler: default_scaler_file(),
            require_label_encoder: false,
        }
    }
}

impl ArtifactsConfig {
    /// Same file names, rooted at `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn classifier_path(&self) -> PathBuf {
        self.dir.join(&self.classifier)
    }

    pub fn label_encoder_path(&self) -> PathBuf {
        self.dir.join(&self.label_encoder)
    }

    pub fn cluster_model_path(&self) -> PathBuf {
        self.dir.join(&self.cluster_model)
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.dir.join(&self.scaler)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
    /// Optional directory for a daily rolling log file
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            dir: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            artifacts: ArtifactsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with default values
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("SYMBIO_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (SYMBIO__SERVER__PORT, etc.)
            .add_source(
                Environment::with_prefix("SYMBIO")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push("server.port must be non-zero".to_string());
        }

        if let Err(e) = self.server.socket_addr() {
            errors.push(e);
        }

        let files = [
            ("artifacts.classifier", &self.artifacts.classifier),
            ("artifacts.label_encoder", &self.artifacts.label_encoder),
            ("artifacts.cluster_model", &self.artifacts.cluster_model),
            ("artifacts.scaler", &self.artifacts.scaler),
        ];
        for (key, value) in files {
            if value.trim().is_empty() {
                errors.push(format!("{key} must not be empty"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_flask_deployment() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(
            config.artifacts.classifier_path(),
            PathBuf::from("./modelo_risco.onnx")
        );
        assert!(!config.artifacts.require_label_encoder);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            r#"
[server]
host = "0.0.0.0"
port = 8088

[artifacts]
dir = "models"
require_label_encoder = true
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8088);
        assert_eq!(
            config.artifacts.scaler_path(),
            PathBuf::from("models/scaler_cluster.onnx")
        );
        assert!(config.artifacts.require_label_encoder);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn rejects_empty_file_names() {
        let mut config = AppConfig::default();
        config.artifacts.scaler = "  ".to_string();
        config.server.port = 0;

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.contains("artifacts.scaler")));
    }
}
