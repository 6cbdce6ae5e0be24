pub mod bridge;
pub mod delivery;
pub mod observability;
pub mod storage;
