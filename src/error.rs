// ⚠️ Pipeline Errors
// Fatal failures abort the run; coercion problems are values, not errors.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Fatal pipeline failures
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Input collection missing, unreadable or not shaped like lodging records
    #[error("Failed to deserialize records from {}: {reason}", .path.display())]
    Deserialization { path: PathBuf, reason: String },

    /// A column has no valid value to compute its median or mode from
    #[error("Column '{column}' has no valid values to impute from")]
    NoData { column: String },

    /// Output file or directory could not be created, written or renamed
    #[error("Failed to write {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    pub fn deserialization(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        PipelineError::Deserialization {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Persistence {
            path: path.into(),
            source,
        }
    }
}

// ============================================================================
// COERCION WARNING
// ============================================================================

/// A raw value that could not be parsed into its column type.
/// The cell becomes missing and is filled by imputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoercionWarning {
    pub row_id: u64,
    pub column: String,
    pub value: String,
}

impl fmt::Display for CoercionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}: could not parse {} value '{}'",
            self.row_id, self.column, self.value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_column_and_path() {
        let err = PipelineError::NoData {
            column: "price".to_string(),
        };
        assert_eq!(err.to_string(), "Column 'price' has no valid values to impute from");

        let err = PipelineError::deserialization("in.json", "unexpected end of file");
        assert!(err.to_string().contains("in.json"));
        assert!(err.to_string().contains("unexpected end of file"));
    }

    #[test]
    fn test_coercion_warning_display() {
        let warning = CoercionWarning {
            row_id: 2,
            column: "date".to_string(),
            value: "bad-date".to_string(),
        };
        assert_eq!(warning.to_string(), "row 2: could not parse date value 'bad-date'");
    }
}
