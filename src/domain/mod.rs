mod conversion_id;
mod conversion_request;
mod conversion_result;
mod foreign_path;
mod media_type;
mod process_outcome;
mod stage_event;
mod storage_path;

pub use conversion_id::ConversionId;
pub use conversion_request::ConversionRequest;
pub use conversion_result::{ConversionResult, FailureKind};
pub use foreign_path::{ForeignPath, InvalidPathError};
pub use media_type::MediaType;
pub use process_outcome::ProcessOutcome;
pub use stage_event::{ConversionStage, StageEvent};
pub use storage_path::StoragePath;
