use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::keys::{KeyCodec, RefSuffix, DEFAULT_LABEL_PREFIX};

/// Main configuration structure for Copydesk
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CopydeskConfig {
    /// Backend and workflow settings
    pub backend: BackendSettings,
    /// Observability settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendSettings {
    /// Batch-publish ("stack") lifecycle enabled for this backend
    pub stack: bool,
    /// Namespace for review labels shared with other tools
    pub label_prefix: String,
    /// Path this deployment is mounted at; drives the ref suffix
    pub base_path: String,
    /// Open authoring: contributors without direct publish rights
    pub open_authoring: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Enable structured tracing output
    pub tracing_enabled: bool,
    /// Log level
    pub log_level: String,
}

impl Default for CopydeskConfig {
    fn default() -> Self {
        Self {
            backend: BackendSettings {
                stack: false,
                label_prefix: DEFAULT_LABEL_PREFIX.to_string(),
                base_path: "/".to_string(),
                open_authoring: false,
            },
            observability: ObservabilityConfig {
                tracing_enabled: true,
                log_level: "info".to_string(),
            },
        }
    }
}

impl CopydeskConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (copydesk.toml)
    /// 3. Environment variables (prefixed with COPYDESK_)
    pub fn load() -> Result<Self> {
        let mut builder =
            Config::builder().add_source(Config::try_from(&CopydeskConfig::default())?);

        if Path::new("copydesk.toml").exists() {
            builder = builder.add_source(File::with_name("copydesk"));
        }

        builder = builder.add_source(
            Environment::with_prefix("COPYDESK")
                .separator("_")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }

    /// Codec configured for this deployment. Constructed explicitly so
    /// multiple engine instances (and tests) never share ambient state.
    pub fn codec(&self) -> KeyCodec {
        KeyCodec::new(
            RefSuffix::from_base_path(&self.backend.base_path),
            self.backend.label_prefix.clone(),
        )
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<CopydeskConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        let _ = CopydeskConfig::load_env_file();
        CopydeskConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static CopydeskConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

/// Initialize configuration (called at startup)
pub fn init_config() -> Result<()> {
    let _config = config()?;
    tracing::info!("Configuration loaded successfully");
    Ok(())
}
