//! Configuration module
//!
//! - Path resolution (environment override or platform config dir)
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FinancePaths;
pub use settings::Settings;
