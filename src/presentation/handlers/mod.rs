mod convert;
mod health;
mod outputs;
mod responses;

pub use convert::convert_handler;
pub use health::health_handler;
pub use outputs::download_output_handler;
pub use responses::{ErrorResponse, status_for};
