mod conversion_events;
mod path_translator;
mod process_runner;
mod staging_store;

pub use conversion_events::ConversionEvents;
pub use path_translator::PathTranslator;
pub use process_runner::{LaunchError, ProcessRunner};
pub use staging_store::{StagingStore, StagingStoreError};
