// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cleanup module: line normalisation and the medical rewrite pass.

pub mod medical;
pub mod normalize;

pub use medical::MedicalCleanup;
pub use normalize::{collapse_whitespace, normalize_lines, page_marker};
