// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module: layout-aware pages from pdfplumber, plain page text from lopdf,
// and a small writer for building test documents.

pub mod plain;
pub mod reader;
#[cfg(any(test, feature = "test-support"))]
pub mod writer;

pub use plain::PlainTextReader;
pub use reader::PdfReader;
#[cfg(any(test, feature = "test-support"))]
pub use writer::PdfWriter;
