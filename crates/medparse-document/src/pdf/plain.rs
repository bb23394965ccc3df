// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-text reader: lopdf's whole-page text rendering, with no layout
// analysis. Independent of the pdfplumber reader so the fallback path does
// not share its failure modes.

use std::path::Path;

use lopdf::Document;
use medparse_core::error::MedparseError;
use tracing::{debug, instrument};

/// Reads page text straight out of content streams via `lopdf`.
pub struct PlainTextReader {
    document: Document,
}

impl PlainTextReader {
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MedparseError> {
        let path_ref = path.as_ref();
        let document = Document::load(path_ref).map_err(|err| {
            MedparseError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");
        Ok(Self { document })
    }

    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, MedparseError> {
        let document = Document::load_mem(data).map_err(|err| {
            MedparseError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;
        Ok(Self { document })
    }

    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// 1-indexed page numbers in document order.
    pub fn page_numbers(&self) -> Vec<u32> {
        self.document.get_pages().keys().copied().collect()
    }

    /// lopdf's plain-text rendering of one page.
    #[instrument(skip(self))]
    pub fn page_text(&self, page_number: u32) -> Result<String, MedparseError> {
        self.document
            .extract_text(&[page_number])
            .map_err(|err| MedparseError::PageError {
                page: page_number,
                detail: format!("text extraction failed: {}", err),
            })
    }
}
