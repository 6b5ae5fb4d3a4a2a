pub mod app_config;
pub mod columns;
pub mod config;
pub mod products;
pub mod quantity;

pub use app_config::{AppConfig, Environment};
pub use columns::{load_columns, ColumnsFile};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{NormalizedProduct, OUTPUT_COLUMNS};
pub use quantity::{Quantity, Unit};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read columns file {path}: {source}")]
    ColumnsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse columns file: {0}")]
    ColumnsFileParse(#[from] serde_yaml::Error),

    #[error("columns config validation failed: {0}")]
    Validation(String),
}
