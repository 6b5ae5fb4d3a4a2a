use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Column filter configuration: the raw catalogue columns that carry no
/// information for normalization and are dropped before it runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnsFile {
    #[serde(default)]
    pub drop: Vec<String>,
}

impl ColumnsFile {
    /// Returns `true` if `column` is on the drop list.
    #[must_use]
    pub fn is_dropped(&self, column: &str) -> bool {
        self.drop.iter().any(|c| c == column)
    }
}

/// Load and validate the column filter configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_columns(path: &Path) -> Result<ColumnsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ColumnsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let columns: ColumnsFile = serde_yaml::from_str(&content)?;

    validate_columns(&columns)?;

    Ok(columns)
}

fn validate_columns(columns: &ColumnsFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for column in &columns.drop {
        if column.trim().is_empty() {
            return Err(ConfigError::Validation(
                "column name must be non-empty".to_string(),
            ));
        }

        if column.trim() != column {
            return Err(ConfigError::Validation(format!(
                "column '{column}' has leading or trailing whitespace"
            )));
        }

        if !seen.insert(column.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate column: '{column}'"
            )));
        }
    }

    Ok(())
}
