use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::ConversionOptions;
use crate::infrastructure::observability::DEFAULT_FILTER;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub bridge: BridgeSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BridgeSettings {
    pub program: String,
    pub shell: String,
    pub mount_root: String,
    pub converter: String,
    pub timeout_secs: u64,
}

impl BridgeSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub root: String,
    pub uploads_dir: String,
    pub outputs_dir: String,
    pub max_upload_mb: usize,
}

impl StorageSettings {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Settings {
    /// Defaults, then `appsettings.<env>.toml` when present, then `APP_`-prefixed environment
    /// variables using `__` between sections (`APP_BRIDGE__TIMEOUT_SECS=120`).
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("bridge.program", "wsl")?
            .set_default("bridge.shell", "/bin/bash")?
            .set_default("bridge.mount_root", "/mnt")?
            .set_default("bridge.converter", "python3 /opt/transcriber/convert.py")?
            .set_default("bridge.timeout_secs", 300)?
            .set_default("storage.root", "data")?
            .set_default("storage.uploads_dir", "uploads")?
            .set_default("storage.outputs_dir", "outputs")?
            .set_default("storage.max_upload_mb", 100)?
            .set_default("logging.level", DEFAULT_FILTER)?
            .set_default("logging.json", environment == Environment::Prod)?
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    pub fn conversion_options(&self) -> ConversionOptions {
        ConversionOptions {
            converter: self.bridge.converter.clone(),
            uploads_dir: self.storage.uploads_dir.clone(),
            outputs_dir: self.storage.outputs_dir.clone(),
            timeout: self.bridge.timeout(),
        }
    }
}
