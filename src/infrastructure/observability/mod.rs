mod conversion_events;
mod init_tracing;
mod output_excerpt;
mod request_id;
mod tracing_config;

pub use conversion_events::TracingConversionEvents;
pub use init_tracing::init_tracing;
pub use output_excerpt::output_excerpt;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
pub use tracing_config::{DEFAULT_FILTER, TracingConfig};
