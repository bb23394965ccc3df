// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Primary extractor: read every page, pick the best strategy output per
// page, stitch pages together with separator lines, then normalise and run
// the medical cleanup pass.

use std::path::Path;

use medparse_core::error::Result;
use medparse_core::{ExtractionConfig, ExtractionResult, filename_of};
use pdfplumber::Page;
use tracing::{debug, info, instrument};

use crate::cleanup::{MedicalCleanup, normalize_lines, page_marker};
use crate::pdf::PdfReader;

use super::strategy::{PageStrategy, default_strategies};

/// Raw output of the page loop, before normalisation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageText {
    pub text: String,
    pub pages: usize,
    pub word_count: usize,
}

/// The per-page extraction pipeline.
pub struct PrimaryExtractor {
    config: ExtractionConfig,
    strategies: Vec<Box<dyn PageStrategy>>,
    cleanup: Option<MedicalCleanup>,
}

impl PrimaryExtractor {
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        let cleanup = if config.medical_cleanup {
            Some(MedicalCleanup::new()?)
        } else {
            None
        };
        Ok(Self {
            config: config.clone(),
            strategies: default_strategies(),
            cleanup,
        })
    }

    /// Open `path` and extract it. The document is closed before returning.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn extract(&self, path: &Path) -> Result<ExtractionResult> {
        let reader = PdfReader::open(path)?;
        self.extract_reader(&reader, filename_of(path))
    }

    pub fn extract_reader(&self, reader: &PdfReader, filename: String) -> Result<ExtractionResult> {
        let raw = self.collect_pages(reader)?;
        let mut text = normalize_lines(&raw.text);
        if let Some(cleanup) = &self.cleanup {
            text = cleanup.apply(&text);
        }

        info!(
            pages = raw.pages,
            words = raw.word_count,
            chars = text.len(),
            "primary extraction finished"
        );
        Ok(ExtractionResult::enhanced(text, raw.pages, raw.word_count, filename))
    }

    /// Run the page loop: separators before every non-empty page after the
    /// first, word count over each page's raw text.
    pub fn collect_pages(&self, reader: &PdfReader) -> Result<PageText> {
        let mut out = PageText {
            pages: reader.page_count(),
            ..PageText::default()
        };

        for (index, page) in reader.pages().enumerate() {
            let position = index + 1;
            let page_text = self.page_text(&page?, position);
            if page_text.is_empty() {
                debug!(page = position, "page produced no text");
                continue;
            }

            if position > 1 {
                out.text.push('\n');
                out.text.push_str(&page_marker(position as u32));
                out.text.push('\n');
            }
            out.text.push_str(&page_text);
            out.text.push('\n');
            out.word_count += page_text.split_whitespace().count();
        }
        Ok(out)
    }

    /// First strategy output long enough to keep; otherwise the last output
    /// any strategy produced.
    fn page_text(&self, page: &Page, position: usize) -> String {
        let mut chosen = None;
        for strategy in &self.strategies {
            let Some(text) = strategy.extract(page, &self.config) else {
                continue;
            };
            let long_enough = text.trim().chars().count() >= self.config.min_page_chars;
            debug!(
                page = position,
                strategy = strategy.name(),
                chars = text.len(),
                long_enough,
                "strategy produced text"
            );
            chosen = Some(text);
            if long_enough {
                break;
            }
        }
        chosen.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::PdfWriter;

    fn reader(writer: &PdfWriter) -> PdfReader {
        PdfReader::from_bytes(&writer.to_bytes().unwrap()).unwrap()
    }

    fn extractor(config: ExtractionConfig) -> PrimaryExtractor {
        PrimaryExtractor::new(&config).unwrap()
    }

    #[test]
    fn pages_are_separated_counted_and_cleaned() {
        let mut writer = PdfWriter::letter();
        writer.add_page().text(72.0, 700.0, 10.0, "Discharge summary for patient");
        writer.add_page().text(72.0, 700.0, 10.0, "Aspirin 500 mg daily with food");
        writer.add_page().text(72.0, 700.0, 10.0, "Temp 98 . 6 on admission");

        let result = extractor(ExtractionConfig::default())
            .extract_reader(&reader(&writer), "summary.pdf".into())
            .unwrap();

        assert_eq!(
            result.text(),
            "Discharge summary for patient\n--- Page 2 ---\nAspirin 500mg daily with food\n--- Page 3 ---\nTemp 98.6 on admission"
        );
        assert_eq!(result.pages(), Some(3));
        assert_eq!(result.word_count(), Some(16));
        assert_eq!(result.filename(), "summary.pdf");
    }

    #[test]
    fn standard_font_metrics_keep_words_apart() {
        // Each word is its own run, placed at its true Helvetica advance.
        let mut writer = PdfWriter::letter();
        let page = writer.add_page();
        page.text(72.0, 700.0, 10.0, "ill");
        page.text(81.44, 700.0, 10.0, "me");
        page.text(72.0, 680.0, 10.0, "Patient");
        page.text(105.91, 680.0, 10.0, "stable");

        let result = extractor(ExtractionConfig::default())
            .extract_reader(&reader(&writer), "ward.pdf".into())
            .unwrap();
        assert_eq!(result.text(), "ill me\nPatient stable");
        assert_eq!(result.word_count(), Some(4));
    }

    #[test]
    fn cleanup_can_be_disabled() {
        let mut writer = PdfWriter::letter();
        writer.add_page().text(72.0, 700.0, 10.0, "Aspirin 500 mg daily");
        let config = ExtractionConfig {
            medical_cleanup: false,
            ..ExtractionConfig::default()
        };
        let result = extractor(config)
            .extract_reader(&reader(&writer), "a.pdf".into())
            .unwrap();
        assert_eq!(result.text(), "Aspirin 500 mg daily");
    }

    #[test]
    fn blank_page_gets_no_separator() {
        let mut writer = PdfWriter::letter();
        writer.add_page().text(72.0, 700.0, 10.0, "Admission note, ward 7");
        writer.add_page();
        writer.add_page().text(72.0, 700.0, 10.0, "Progress note, day two");

        let raw = extractor(ExtractionConfig::default())
            .collect_pages(&reader(&writer))
            .unwrap();
        assert_eq!(raw.pages, 3);
        assert_eq!(
            raw.text,
            "Admission note, ward 7\n\n--- Page 3 ---\nProgress note, day two\n"
        );
        assert_eq!(raw.word_count, 8);
    }

    #[test]
    fn short_text_layer_defers_to_tables() {
        let mut writer = PdfWriter::letter();
        writer
            .add_page()
            .table(50.0, 700.0, &[100.0, 100.0], 20.0, 10.0, &[&["Na", "140"], &["K", "4.1"]]);
        let config = ExtractionConfig {
            min_page_chars: 15,
            ..ExtractionConfig::default()
        };

        let raw = extractor(config).collect_pages(&reader(&writer)).unwrap();
        assert_eq!(raw.text, "Na | 140\nK | 4.1\n");
        assert_eq!(raw.word_count, 6);
    }

    #[test]
    fn char_stream_is_the_last_resort() {
        let mut writer = PdfWriter::letter();
        let page = writer.add_page();
        page.text(72.0, 700.0, 10.0, "BP 120");
        page.text(72.0, 680.0, 10.0, "HR 88");
        let config = ExtractionConfig {
            min_page_chars: 1000,
            ..ExtractionConfig::default()
        };

        let raw = extractor(config).collect_pages(&reader(&writer)).unwrap();
        assert_eq!(raw.text, "BP 120HR 88\n");
        assert_eq!(raw.word_count, 3);
    }

    #[test]
    fn whitespace_only_page_normalises_to_empty() {
        let mut writer = PdfWriter::letter();
        writer.add_page().text(72.0, 700.0, 10.0, "     ");
        let result = extractor(ExtractionConfig::default())
            .extract_reader(&reader(&writer), "blank.pdf".into())
            .unwrap();
        assert_eq!(result.text(), "");
        assert_eq!(result.word_count(), Some(0));
    }
}
