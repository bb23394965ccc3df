// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: the extraction result record and its JSON shape.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Which pipeline produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Per-page strategies followed by the medical cleanup pass.
    EnhancedMedical,
    /// Whole-document extraction with default parameters, no cleanup.
    SimpleFallback,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnhancedMedical => "enhanced_medical",
            Self::SimpleFallback => "simple_fallback",
        }
    }
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labelled span in the extracted text.
///
/// Reserved for annotation tooling; extraction never produces any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

/// Successful extraction payload. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    text: String,
    pages: usize,
    /// Only the primary path counts words.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    word_count: Option<usize>,
    filename: String,
    entities: Vec<Entity>,
    success: bool,
    extraction_method: ExtractionMethod,
}

/// Failure payload for errors raised inside the extraction pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedExtraction {
    text: String,
    entities: Vec<Entity>,
    success: bool,
    error: String,
    filename: String,
}

/// The single record emitted per invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractionResult {
    Extracted(ExtractedDocument),
    Failed(FailedExtraction),
}

impl ExtractionResult {
    /// Result of the per-page pipeline.
    pub fn enhanced(text: String, pages: usize, word_count: usize, filename: String) -> Self {
        Self::Extracted(ExtractedDocument {
            text,
            pages,
            word_count: Some(word_count),
            filename,
            entities: Vec::new(),
            success: true,
            extraction_method: ExtractionMethod::EnhancedMedical,
        })
    }

    /// Result of the whole-document fallback.
    pub fn fallback(text: String, pages: usize, filename: String) -> Self {
        Self::Extracted(ExtractedDocument {
            text,
            pages,
            word_count: None,
            filename,
            entities: Vec::new(),
            success: true,
            extraction_method: ExtractionMethod::SimpleFallback,
        })
    }

    /// Extraction error captured into the record.
    pub fn failed(error: impl Into<String>, filename: String) -> Self {
        Self::Failed(FailedExtraction {
            text: String::new(),
            entities: Vec::new(),
            success: false,
            error: error.into(),
            filename,
        })
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Extracted(doc) => &doc.text,
            Self::Failed(failed) => &failed.text,
        }
    }

    pub fn filename(&self) -> &str {
        match self {
            Self::Extracted(doc) => &doc.filename,
            Self::Failed(failed) => &failed.filename,
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            Self::Extracted(doc) => doc.success,
            Self::Failed(failed) => failed.success,
        }
    }

    pub fn pages(&self) -> Option<usize> {
        match self {
            Self::Extracted(doc) => Some(doc.pages),
            Self::Failed(_) => None,
        }
    }

    pub fn word_count(&self) -> Option<usize> {
        match self {
            Self::Extracted(doc) => doc.word_count,
            Self::Failed(_) => None,
        }
    }

    pub fn extraction_method(&self) -> Option<ExtractionMethod> {
        match self {
            Self::Extracted(doc) => Some(doc.extraction_method),
            Self::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Extracted(_) => None,
            Self::Failed(failed) => Some(&failed.error),
        }
    }

    pub fn entities(&self) -> &[Entity] {
        match self {
            Self::Extracted(doc) => &doc.entities,
            Self::Failed(failed) => &failed.entities,
        }
    }

    /// Pretty-printed JSON (two-space indent, non-ASCII kept literally).
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Top-level error object printed for usage errors (bad arguments, missing file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageReport {
    pub error: String,
    pub success: bool,
}

impl UsageReport {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            success: false,
        }
    }
}

/// Base name of `path`, as reported in the `filename` field.
pub fn filename_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
