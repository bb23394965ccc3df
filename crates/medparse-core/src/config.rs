// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Extraction configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MedparseError, Result};

/// Tunables for the extraction pipeline.
///
/// The defaults reproduce the stock behaviour: 2-unit merge tolerances, a
/// 10-character threshold before the next page strategy is tried, and the
/// medical cleanup pass enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum horizontal gap between glyphs of the same word.
    pub x_tolerance: f32,
    /// Maximum vertical offset between glyphs of the same line.
    pub y_tolerance: f32,
    /// Trimmed page text shorter than this falls through to the next strategy.
    pub min_page_chars: usize,
    /// Joiner placed between table cells when flattening a row.
    pub table_cell_separator: String,
    /// Ruling lines closer than this are snapped together during table detection.
    pub table_snap_tolerance: f32,
    /// Run the whole-document fallback when the primary path fails or is empty.
    pub fallback_enabled: bool,
    /// Apply the medical rewrite rules on the primary path.
    pub medical_cleanup: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            x_tolerance: 2.0,
            y_tolerance: 2.0,
            min_page_chars: 10,
            table_cell_separator: " | ".to_string(),
            table_snap_tolerance: 3.0,
            fallback_enabled: true,
            medical_cleanup: true,
        }
    }
}

impl ExtractionConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        debug!(path = %path.display(), ?config, "loaded extraction config");
        Ok(config)
    }

    /// Reject values the layout code cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.x_tolerance >= 0.0 && self.y_tolerance >= 0.0) {
            return Err(MedparseError::Config(format!(
                "tolerances must be non-negative (x={}, y={})",
                self.x_tolerance, self.y_tolerance
            )));
        }
        if !(self.table_snap_tolerance >= 0.0) {
            return Err(MedparseError::Config(format!(
                "table_snap_tolerance must be non-negative, got {}",
                self.table_snap_tolerance
            )));
        }
        Ok(())
    }
}
