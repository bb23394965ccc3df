// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// medparse-document: PDF text extraction for Medparse.
//
// Provides PDF access (pdfplumber for positioned characters, text and tables;
// lopdf for plain page text), the per-page strategy pipeline with its
// whole-document fallback, and the medical cleanup pass.

pub mod cleanup;
pub mod extract;
pub mod pdf;

// Re-export the primary entry points so callers can use `medparse_document::PdfReader` etc.
pub use cleanup::MedicalCleanup;
pub use extract::{FallbackExtractor, PrimaryExtractor, extract_text_from_pdf};
pub use pdf::{PdfReader, PlainTextReader};
#[cfg(feature = "test-support")]
pub use pdf::PdfWriter;
