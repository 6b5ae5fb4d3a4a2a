use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for the batch tools, read from `KOSAR_*` environment
/// variables (see [`crate::load_app_config`]).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Directory holding the dated `<market>_<kind>_<stamp>.csv` files.
    pub data_dir: PathBuf,
    /// Market prefix used in data file names, e.g. `"spar"`.
    pub market: String,
    /// Value written to the `store_name` output column.
    pub store_name: String,
    /// Directory holding the manually curated override tables.
    pub overrides_dir: PathBuf,
    /// YAML file listing the columns dropped by the filter step.
    pub columns_path: PathBuf,
}
