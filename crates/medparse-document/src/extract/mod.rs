// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Extraction entry point: primary pipeline first, fallback when it fails or
// comes back empty. Errors never escape; they become a failure record.

pub mod fallback;
pub mod primary;
pub mod strategy;

use std::path::Path;

use medparse_core::{ExtractionConfig, ExtractionResult, filename_of};
use tracing::{info, instrument, warn};

pub use fallback::FallbackExtractor;
pub use primary::{PageText, PrimaryExtractor};
pub use strategy::{CharStreamStrategy, PageStrategy, TableStrategy, TextLayerStrategy};

/// Extract `path` into a result record.
///
/// The fallback runs when the primary pipeline errors or yields only
/// whitespace, unless `fallback_enabled` is off. When both paths error the
/// record carries the primary error.
#[instrument(skip(config), fields(path = %path.display()))]
pub fn extract_text_from_pdf(path: &Path, config: &ExtractionConfig) -> ExtractionResult {
    let filename = filename_of(path);

    let primary_error = match PrimaryExtractor::new(config).and_then(|p| p.extract(path)) {
        Ok(result) if !result.text().trim().is_empty() => return result,
        Ok(result) if !config.fallback_enabled => return result,
        Err(err) if !config.fallback_enabled => {
            return ExtractionResult::failed(err.to_string(), filename);
        }
        Ok(_) => {
            info!("primary extraction produced no text, trying fallback");
            None
        }
        Err(err) => {
            warn!(error = %err, "primary extraction failed, trying fallback");
            Some(err)
        }
    };

    match FallbackExtractor::new().extract(path) {
        Ok(result) => result,
        Err(err) => {
            warn!(error = %err, "fallback extraction failed");
            let reported = primary_error.unwrap_or(err);
            ExtractionResult::failed(reported.to_string(), filename)
        }
    }
}
