use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompareError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("{label}: missing columns {missing:?}; available columns: {available:?}")]
    MissingColumns {
        label: String,
        missing: Vec<String>,
        available: Vec<String>,
    },

    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}

impl CompareError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}
