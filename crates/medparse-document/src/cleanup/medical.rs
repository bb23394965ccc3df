// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Medical text cleanup: an ordered list of regex rewrites that repair the
// most common extraction artefacts in clinical documents.
//
// Each rule runs on the output of the previous one, so the order of `RULES`
// is part of the behaviour: splitting a capital from its word is repaired
// before spaced-out abbreviations are joined, dosages are glued before score
// tokens are spaced, and punctuation spacing runs last.

use medparse_core::error::{MedparseError, Result};
use regex::Regex;
use tracing::trace;

/// `(name, pattern, replacement)` in application order.
const RULES: [(&str, &str, &str); 6] = [
    // "P atient" -> "Patient"
    ("broken_term", r"\b([A-Z])\s+([a-z]+)\b", "${1}${2}"),
    // "500 mg" -> "500mg"
    ("dosage_unit", r"(\d+)\s*(mg|ml|g|mcg|units?)\b", "${1}${2}"),
    // "T I C I" -> "TICI"
    ("spaced_abbreviation", r"\b([A-Z])\s+([A-Z])\s+([A-Z])\s+([A-Z])\b", "${1}${2}${3}${4}"),
    // "GCS   15" -> "GCS 15"
    ("score", r"\b([A-Z]{2,})\s+(\d+[a-z]?)\b", "${1} ${2}"),
    // "98 . 6" -> "98.6"
    ("broken_decimal", r"(\d+)\s+\.\s+(\d+)", "${1}.${2}"),
    // "word ,next" -> "word, next"
    ("punctuation", r"\s+([.,;:])\s*", "${1} "),
];

#[derive(Debug, Clone)]
struct Rule {
    name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

/// The compiled rewrite pipeline.
#[derive(Debug, Clone)]
pub struct MedicalCleanup {
    rules: Vec<Rule>,
}

impl MedicalCleanup {
    pub fn new() -> Result<Self> {
        let rules = RULES
            .iter()
            .map(|&(name, pattern, replacement)| {
                let pattern = Regex::new(pattern)
                    .map_err(|err| MedparseError::InvalidPattern(format!("{name}: {err}")))?;
                Ok(Rule {
                    name,
                    pattern,
                    replacement,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Run every rule over `text`, in order.
    pub fn apply(&self, text: &str) -> String {
        self.rules.iter().fold(text.to_string(), |current, rule| {
            let rewritten = rule.pattern.replace_all(&current, rule.replacement);
            if rewritten != current {
                trace!(rule = rule.name, "cleanup rule rewrote text");
            }
            rewritten.into_owned()
        })
    }

    /// Rule names in application order.
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name)
    }
}
