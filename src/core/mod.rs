pub mod crops;
pub mod financials;
pub mod table;
pub mod tasks;
pub mod weather;

pub use crate::domain::model::Record;
pub use crate::domain::ports::{BackendClient, ConfigProvider};
pub use crate::utils::error::Result;
