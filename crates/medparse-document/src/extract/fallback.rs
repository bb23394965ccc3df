// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fallback extractor: lopdf's own whole-page text rendering with no layout
// tolerances and no medical cleanup.

use std::path::Path;

use medparse_core::error::Result;
use medparse_core::{ExtractionResult, filename_of};
use tracing::{info, instrument};

use crate::cleanup::collapse_whitespace;
use crate::pdf::PlainTextReader;

#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackExtractor;

impl FallbackExtractor {
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn extract(&self, path: &Path) -> Result<ExtractionResult> {
        let reader = PlainTextReader::open(path)?;
        self.extract_reader(&reader, filename_of(path))
    }

    pub fn extract_reader(
        &self,
        reader: &PlainTextReader,
        filename: String,
    ) -> Result<ExtractionResult> {
        let mut pages = Vec::with_capacity(reader.page_count());
        for number in reader.page_numbers() {
            let text = reader.page_text(number)?;
            if !text.is_empty() {
                pages.push(text);
            }
        }

        let text = pages
            .join("\n")
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .map(collapse_whitespace)
            .collect::<Vec<_>>()
            .join("\n");

        info!(pages = reader.page_count(), chars = text.len(), "fallback extraction finished");
        Ok(ExtractionResult::fallback(text, reader.page_count(), filename))
    }
}
