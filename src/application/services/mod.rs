mod conversion_service;
pub mod outcome_classifier;

pub use conversion_service::{
    ConversionOptions, ConversionService, DEFAULT_TIMEOUT, OUTPUT_EXTENSION, build_command,
};
pub use outcome_classifier::classify;
