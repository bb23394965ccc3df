// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-page extraction strategies, tried from highest to lowest fidelity.

use medparse_core::ExtractionConfig;
use pdfplumber::{Page, Table, TableSettings, WordOptions, words_to_text};

/// One way of turning an interpreted page into text.
///
/// `None` means the strategy found nothing to offer (no text layer, no
/// tables). `Some` may still be short; the caller decides whether it is
/// good enough.
pub trait PageStrategy {
    fn name(&self) -> &'static str;

    fn extract(&self, page: &Page, config: &ExtractionConfig) -> Option<String>;
}

/// Word grouping with the configured merge tolerances.
pub fn word_options(config: &ExtractionConfig) -> WordOptions {
    WordOptions {
        x_tolerance: f64::from(config.x_tolerance),
        y_tolerance: f64::from(config.y_tolerance),
        ..WordOptions::default()
    }
}

/// Ruling-line table detection with the configured snap tolerance.
pub fn table_settings(config: &ExtractionConfig) -> TableSettings {
    let snap = f64::from(config.table_snap_tolerance);
    TableSettings {
        snap_tolerance: snap,
        snap_x_tolerance: snap,
        snap_y_tolerance: snap,
        ..TableSettings::default()
    }
}

/// Text layer merged into words and lines with the configured tolerances.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextLayerStrategy;

impl PageStrategy for TextLayerStrategy {
    fn name(&self) -> &'static str {
        "text_layer"
    }

    fn extract(&self, page: &Page, config: &ExtractionConfig) -> Option<String> {
        let words = page.extract_words(&word_options(config));
        let text = words_to_text(&words, f64::from(config.y_tolerance));
        (!text.is_empty()).then_some(text)
    }
}

/// Ruled tables, one line per row with cells joined by the separator.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableStrategy;

impl PageStrategy for TableStrategy {
    fn name(&self) -> &'static str {
        "tables"
    }

    fn extract(&self, page: &Page, config: &ExtractionConfig) -> Option<String> {
        let tables = page.find_tables(&table_settings(config));
        if tables.is_empty() {
            return None;
        }
        let text = tables
            .iter()
            .map(|table| table_text(table, &config.table_cell_separator))
            .collect::<Vec<_>>()
            .join("\n");
        Some(text)
    }
}

/// Rows top to bottom, empty cells as empty strings.
fn table_text(table: &Table, separator: &str) -> String {
    table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.text.as_deref().unwrap_or_default())
                .collect::<Vec<_>>()
                .join(separator)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every glyph on the page in (top, x0) order with no separators.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharStreamStrategy;

impl PageStrategy for CharStreamStrategy {
    fn name(&self) -> &'static str {
        "char_stream"
    }

    fn extract(&self, page: &Page, _config: &ExtractionConfig) -> Option<String> {
        let mut chars: Vec<_> = page.chars().iter().collect();
        chars.sort_by(|a, b| {
            a.bbox
                .top
                .total_cmp(&b.bbox.top)
                .then(a.bbox.x0.total_cmp(&b.bbox.x0))
        });
        Some(chars.iter().map(|ch| ch.text.as_str()).collect())
    }
}

/// The default strategy chain.
pub fn default_strategies() -> Vec<Box<dyn PageStrategy>> {
    vec![
        Box::new(TextLayerStrategy),
        Box::new(TableStrategy),
        Box::new(CharStreamStrategy),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::{PdfReader, PdfWriter};

    fn first_page(writer: &PdfWriter) -> Page {
        let reader = PdfReader::from_bytes(&writer.to_bytes().unwrap()).unwrap();
        reader.page(1).unwrap()
    }

    // Helvetica advances at 10pt: "ill" is 6.66 wide and a space 2.78, so a
    // typesetter placing "me" as its own run starts it at 72 + 6.66 + 2.78.
    fn separately_placed_words() -> PdfWriter {
        let mut writer = PdfWriter::letter();
        let page = writer.add_page();
        page.text(72.0, 700.0, 10.0, "ill");
        page.text(81.44, 700.0, 10.0, "me");
        page.text(72.0, 680.0, 10.0, "Patient");
        page.text(105.91, 680.0, 10.0, "stable");
        writer
    }

    #[test]
    fn text_layer_keeps_separately_placed_words_apart() {
        let page = first_page(&separately_placed_words());
        let text = TextLayerStrategy
            .extract(&page, &ExtractionConfig::default())
            .unwrap();
        assert_eq!(text, "ill me\nPatient stable");
    }

    #[test]
    fn text_layer_uses_configured_tolerances() {
        let page = first_page(&separately_placed_words());
        let loose = ExtractionConfig {
            x_tolerance: 3.0,
            ..ExtractionConfig::default()
        };
        let text = TextLayerStrategy.extract(&page, &loose).unwrap();
        assert_eq!(text, "illme\nPatientstable");
    }

    #[test]
    fn text_layer_is_absent_on_blank_page() {
        let mut writer = PdfWriter::letter();
        writer.add_page();
        let page = first_page(&writer);
        assert_eq!(TextLayerStrategy.extract(&page, &ExtractionConfig::default()), None);
    }

    #[test]
    fn tables_flatten_with_separator() {
        let mut writer = PdfWriter::letter();
        writer.add_page().table(
            50.0,
            700.0,
            &[100.0, 100.0],
            20.0,
            10.0,
            &[&["Drug", "Dose"], &["Heparin"]],
        );
        let page = first_page(&writer);

        let text = TableStrategy.extract(&page, &ExtractionConfig::default());
        assert_eq!(text.as_deref(), Some("Drug | Dose\nHeparin | "));
    }

    #[test]
    fn tables_absent_without_rules() {
        let mut writer = PdfWriter::letter();
        writer.add_page().text(72.0, 700.0, 10.0, "No ruling lines here");
        let page = first_page(&writer);
        assert_eq!(TableStrategy.extract(&page, &ExtractionConfig::default()), None);
    }

    #[test]
    fn char_stream_sorts_by_top_then_x() {
        let mut writer = PdfWriter::letter();
        let page = writer.add_page();
        // Drawn bottom line first and right-hand run before the left one.
        page.text(72.0, 680.0, 10.0, "d");
        page.text(90.0, 700.0, 10.0, "bc");
        page.text(72.0, 700.0, 10.0, "a ");
        let page = first_page(&writer);

        assert_eq!(
            CharStreamStrategy
                .extract(&page, &ExtractionConfig::default())
                .as_deref(),
            Some("a bcd")
        );
    }

    #[test]
    fn default_chain_order() {
        let names: Vec<_> = default_strategies().iter().map(|s| s.name()).collect();
        assert_eq!(names, ["text_layer", "tables", "char_stream"]);
    }
}
