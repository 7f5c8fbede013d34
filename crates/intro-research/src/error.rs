//! Error types for research loading

use std::path::PathBuf;

/// Research discovery and loading errors
#[derive(Debug, thiserror::Error)]
pub enum ResearchError {
    /// File could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File is not a valid research document
    #[error("invalid research JSON in {}: {source}", .path.display())]
    Json {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Search pattern could not be built
    #[error("invalid search pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// No research document for the company
    #[error("no research JSON found for '{company}'")]
    NotFound {
        /// Company searched for
        company: String,
    },

    /// No model workbook in the company's model folder
    #[error("no model workbook in {}", .dir.display())]
    NoModel {
        /// Folder searched
        dir: PathBuf,
    },
}

impl ResearchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ResearchError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        ResearchError::Json {
            path: path.into(),
            source,
        }
    }
}
