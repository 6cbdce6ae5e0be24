mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    BridgeSettings, LoggingSettings, ServerSettings, Settings, StorageSettings,
};
