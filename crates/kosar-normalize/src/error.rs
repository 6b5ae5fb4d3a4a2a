use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {context}: {source}")]
    Csv {
        context: String,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read override table {path}: {source}")]
    OverrideTable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no data file matching {pattern} in {dir}")]
    NoDataFile { dir: String, pattern: String },
}

impl NormalizeError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn csv(context: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            context: context.into(),
            source,
        }
    }
}
