pub mod configuration;
pub mod error;

pub use configuration::TableConfig;
pub use error::ConfigError;
