// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Medparse.

use thiserror::Error;

/// Top-level error type for all Medparse operations.
#[derive(Debug, Error)]
pub enum MedparseError {
    // -- Usage errors (reported before any parsing, exit code 1) --
    #[error("{0}")]
    Usage(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    // -- Extraction errors (captured into the result record) --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("page {page}: {detail}")]
    PageError { page: u32, detail: String },

    #[error("invalid cleanup pattern: {0}")]
    InvalidPattern(String),

    // -- Configuration / persistence --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MedparseError {
    /// Whether this error belongs to the usage tier (bad arguments, missing
    /// input) rather than the extraction tier.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::Usage(_) | Self::FileNotFound(_))
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MedparseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_not_found_message_names_the_path() {
        let err = MedparseError::FileNotFound("/tmp/missing.pdf".into());
        assert_eq!(err.to_string(), "File not found: /tmp/missing.pdf");
        assert!(err.is_usage_error());
    }

    #[test]
    fn extraction_errors_are_not_usage_errors() {
        let err = MedparseError::PageError {
            page: 3,
            detail: "bad content stream".into(),
        };
        assert_eq!(err.to_string(), "page 3: bad content stream");
        assert!(!err.is_usage_error());
        assert!(!MedparseError::PdfError("truncated".into()).is_usage_error());
    }
}
