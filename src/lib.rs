pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::BackendSettings;

pub use adapters::apper::ApperHttpClient;
pub use core::{
    crops::CropService, financials::FinancialService, tasks::TaskService, weather::WeatherService,
};
pub use utils::error::{FarmError, Result};
