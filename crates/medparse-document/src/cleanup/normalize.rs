// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Line normalisation applied to accumulated page text before cleanup.

/// Prefix of the separator line written between pages.
pub const PAGE_MARKER_PREFIX: &str = "--- Page";

/// The separator line placed before page `number`.
pub fn page_marker(number: u32) -> String {
    format!("{PAGE_MARKER_PREFIX} {number} ---")
}

/// Collapse every whitespace run to one space and trim both ends.
pub fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop blank lines and collapse whitespace in the rest. Page separator lines
/// are only trimmed.
pub fn normalize_lines(text: &str) -> String {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            if line.starts_with(PAGE_MARKER_PREFIX) {
                line.trim().to_string()
            } else {
                collapse_whitespace(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
