// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer for test documents. Builds small PDFs with `lopdf` from
// positioned text runs, ruling lines, rectangles and ruled tables on
// fixed-size pages.
//
// Every page shares one standard-14 Helvetica resource with WinAnsi encoding
// and no /Widths array, so readers must fall back on the built-in font
// metrics the way they do for real-world documents.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use medparse_core::error::MedparseError;
use tracing::{debug, info, instrument};

/// Operations for one page under construction.
#[derive(Debug, Default)]
pub struct PageBuilder {
    operations: Vec<Operation>,
}

impl PageBuilder {
    /// Show `text` with its baseline starting at (`x`, `y`) in PDF user space.
    pub fn text(&mut self, x: f32, y: f32, size: f32, text: &str) -> &mut Self {
        self.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), Object::Real(size)]),
            Operation::new("Td", vec![Object::Real(x), Object::Real(y)]),
            Operation::new("Tj", vec![Object::string_literal(encode_winansi(text))]),
            Operation::new("ET", vec![]),
        ]);
        self
    }

    /// Stroke a straight line.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> &mut Self {
        self.operations.extend([
            Operation::new("m", vec![Object::Real(x1), Object::Real(y1)]),
            Operation::new("l", vec![Object::Real(x2), Object::Real(y2)]),
            Operation::new("S", vec![]),
        ]);
        self
    }

    /// Stroke a rectangle with its lower-left corner at (`x`, `y`).
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.operations.extend([
            Operation::new(
                "re",
                vec![
                    Object::Real(x),
                    Object::Real(y),
                    Object::Real(width),
                    Object::Real(height),
                ],
            ),
            Operation::new("S", vec![]),
        ]);
        self
    }

    /// Draw a fully ruled grid whose top-left corner is at (`x`, `top`), with
    /// one text run per cell. Rows shorter than `column_widths` leave the
    /// remaining cells empty.
    pub fn table(
        &mut self,
        x: f32,
        top: f32,
        column_widths: &[f32],
        row_height: f32,
        size: f32,
        rows: &[&[&str]],
    ) -> &mut Self {
        let total_width: f32 = column_widths.iter().sum();
        let bottom = top - row_height * rows.len() as f32;

        for row in 0..=rows.len() {
            let y = top - row_height * row as f32;
            self.line(x, y, x + total_width, y);
        }
        let mut column_x = x;
        self.line(column_x, top, column_x, bottom);
        for width in column_widths {
            column_x += width;
            self.line(column_x, top, column_x, bottom);
        }

        for (row_index, row) in rows.iter().enumerate() {
            let baseline = top - row_height * (row_index as f32 + 1.0) + (row_height - size) / 2.0 + 0.2 * size;
            let mut cell_x = x;
            for (cell, width) in row.iter().zip(column_widths) {
                if !cell.is_empty() {
                    self.text(cell_x + 2.0, baseline, size, cell);
                }
                cell_x += width;
            }
        }
        self
    }
}

/// Creates new PDF documents page by page.
#[derive(Debug)]
pub struct PdfWriter {
    /// Page width in points.
    width: f32,
    /// Page height in points.
    height: f32,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
    pages: Vec<PageBuilder>,
}

impl PdfWriter {
    /// Create a new writer with the given page size in points.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            title: None,
            pages: Vec::new(),
        }
    }

    /// US Letter, 612 × 792 points.
    pub fn letter() -> Self {
        Self::new(612.0, 792.0)
    }

    /// A4, 595 × 842 points.
    pub fn a4() -> Self {
        Self::new(595.0, 842.0)
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Append a blank page and return it for drawing.
    pub fn add_page(&mut self) -> &mut PageBuilder {
        self.pages.push(PageBuilder::default());
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Serialise the document.
    #[instrument(skip(self), fields(pages = self.pages.len()))]
    pub fn to_bytes(&self) -> Result<Vec<u8>, MedparseError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let content = Content {
                operations: page.operations.clone(),
            };
            let encoded = content.encode().map_err(|err| {
                MedparseError::PdfError(format!("failed to encode page content: {}", err))
            })?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
                "Resources" => resources_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(self.width),
                    Object::Real(self.height),
                ],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if let Some(title) = &self.title {
            let info_id = doc.add_object(dictionary! {
                "Title" => Object::string_literal(title.as_str()),
            });
            doc.trailer.set("Info", info_id);
        }

        let mut output = Vec::new();
        doc.save_to(&mut output).map_err(|err| {
            MedparseError::PdfError(format!("failed to serialise PDF: {}", err))
        })?;

        debug!(output_bytes = output.len(), "PDF written");
        Ok(output)
    }

    /// Serialise the document to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MedparseError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path.as_ref(), bytes)?;
        info!(path = %path.as_ref().display(), "PDF saved");
        Ok(())
    }
}

/// Map text to WinAnsi bytes; characters outside Latin-1 become `?`.
fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match u32::from(ch) {
            code @ 0x20..=0x7e | code @ 0xa0..=0xff => code as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_a_loadable_document() {
        let mut writer = PdfWriter::a4();
        writer.set_title("Discharge summary");
        writer.add_page().text(72.0, 760.0, 11.0, "Discharge summary");
        writer.add_page();

        let bytes = writer.to_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn font_relies_on_standard_metrics() {
        let mut writer = PdfWriter::letter();
        writer.add_page().text(72.0, 700.0, 10.0, "ill");
        let doc = Document::load_mem(&writer.to_bytes().unwrap()).unwrap();

        let fonts: Vec<_> = doc
            .objects
            .values()
            .filter_map(|obj| obj.as_dict().ok())
            .filter(|dict| dict.get(b"Type").and_then(Object::as_name).ok() == Some(b"Font".as_slice()))
            .collect();
        assert_eq!(fonts.len(), 1);
        assert_eq!(fonts[0].get(b"BaseFont").and_then(Object::as_name).unwrap(), b"Helvetica");
        assert!(fonts[0].get(b"Widths").is_err());
    }

    #[test]
    fn winansi_encoding_keeps_latin1() {
        assert_eq!(encode_winansi("5 µg"), vec![b'5', b' ', 0xb5, b'g']);
        assert_eq!(encode_winansi("≥"), vec![b'?']);
    }

    #[test]
    fn table_draws_a_ruled_grid() {
        let mut writer = PdfWriter::letter();
        writer
            .add_page()
            .table(50.0, 700.0, &[100.0, 80.0], 20.0, 10.0, &[&["Drug", "Dose"], &["Heparin", "5000 units"]]);
        let page = &writer.pages[0];

        let strokes = page.operations.iter().filter(|op| op.operator == "S").count();
        // Three horizontal rules and three vertical rules.
        assert_eq!(strokes, 6);
        let texts = page.operations.iter().filter(|op| op.operator == "Tj").count();
        assert_eq!(texts, 4);
    }
}
