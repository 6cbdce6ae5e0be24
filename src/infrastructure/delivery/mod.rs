mod file_delivery;

pub use file_delivery::{DeliveredFile, DeliveryError, FileDelivery, public_url};
