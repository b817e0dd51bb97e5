pub mod dates;
pub mod harvest;
pub mod models;
pub mod storage;

pub use harvest::{Daily, HarvestClient, HarvestError};
pub use models::TimerRecord;
pub use storage::Credentials;
