// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader: open existing PDF documents with the `pdfplumber` crate and hand
// out its layout-aware pages (positioned characters, ruling edges, tables).

use std::path::Path;

use medparse_core::error::MedparseError;
use pdfplumber::{Page, Pdf};
use tracing::{debug, instrument};

/// Reads existing PDF files for the layout-aware pipeline.
///
/// Wraps `pdfplumber::Pdf`. The parsed document is released when the reader
/// is dropped, so scoping a reader to a function scopes the document too.
pub struct PdfReader {
    /// The underlying pdfplumber document.
    pdf: Pdf,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MedparseError> {
        let path_ref = path.as_ref();
        let pdf = Pdf::open_file(path_ref, None).map_err(|err| {
            MedparseError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = pdf.page_count(), "PDF loaded");

        Ok(Self {
            pdf,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, MedparseError> {
        let pdf = Pdf::open_bytes(data, None).map_err(|err| {
            MedparseError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = pdf.page_count(), "PDF loaded from bytes");

        Ok(Self {
            pdf,
            source_path: None,
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pdf.page_count()
    }

    /// Return the source path if the reader was created via [`PdfReader::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    // -- Extraction -----------------------------------------------------------

    /// Interpret one page, addressed by its 1-based position.
    #[instrument(skip(self))]
    pub fn page(&self, position: usize) -> Result<Page, MedparseError> {
        if position == 0 || position > self.page_count() {
            return Err(MedparseError::PdfError(format!(
                "page {} out of range (document has {} pages)",
                position,
                self.page_count()
            )));
        }
        self.pdf
            .page(position - 1)
            .map_err(|err| page_error(position, &err))
    }

    /// Every page in document order, each interpreted on demand.
    pub fn pages(&self) -> impl Iterator<Item = Result<Page, MedparseError>> + '_ {
        self.pdf
            .pages_iter()
            .enumerate()
            .map(|(index, page)| page.map_err(|err| page_error(index + 1, &err)))
    }
}

fn page_error(position: usize, err: &pdfplumber::PdfError) -> MedparseError {
    MedparseError::PageError {
        page: u32::try_from(position).unwrap_or(u32::MAX),
        detail: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::writer::PdfWriter;

    fn two_page_pdf() -> Vec<u8> {
        let mut writer = PdfWriter::letter();
        writer.add_page().text(72.0, 700.0, 12.0, "Chief complaint: chest pain");
        writer.add_page().text(72.0, 700.0, 12.0, "Plan: aspirin");
        writer.to_bytes().unwrap()
    }

    #[test]
    fn counts_pages() {
        let reader = PdfReader::from_bytes(&two_page_pdf()).unwrap();
        assert_eq!(reader.page_count(), 2);
        assert_eq!(reader.pages().count(), 2);
        assert!(reader.source_path().is_none());
    }

    #[test]
    fn page_exposes_geometry_and_chars() {
        let reader = PdfReader::from_bytes(&two_page_pdf()).unwrap();
        let page = reader.page(2).unwrap();
        assert_eq!(page.width(), 612.0);
        assert_eq!(page.height(), 792.0);
        let text: String = page.chars().iter().map(|c| c.text.as_str()).collect();
        assert_eq!(text, "Plan: aspirin");
        assert!((page.chars()[0].bbox.x0 - 72.0).abs() < 1e-3);
    }

    #[test]
    fn out_of_range_page_is_an_error() {
        let reader = PdfReader::from_bytes(&two_page_pdf()).unwrap();
        assert!(reader.page(3).is_err());
        assert!(reader.page(0).is_err());
    }

    #[test]
    fn garbage_bytes_fail_to_load() {
        let err = PdfReader::from_bytes(b"definitely not a pdf").err().unwrap();
        assert!(matches!(err, MedparseError::PdfError(_)));
    }

    #[test]
    fn open_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.pdf");
        std::fs::write(&path, two_page_pdf()).unwrap();

        let reader = PdfReader::open(&path).unwrap();
        assert_eq!(reader.page_count(), 2);
        assert_eq!(reader.source_path(), Some(path.display().to_string().as_str()));
    }
}
