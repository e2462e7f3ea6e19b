//! Monospaced text-grid document sink.
//!
//! The shipped artifact backend: pages are character grids, bold renders as
//! uppercase, and the saved document separates pages with a form feed. The
//! page reports A4-landscape-like dimensions so the layout geometry matches
//! the printable original.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ReportError;
use crate::sink::{Align, DocumentSink, TextStyle};

const PAGE_W: f32 = 297.0;
const PAGE_H: f32 = 210.0;

/// Character cells per horizontal unit; one text column spans 2.5 units.
const X_SCALE: f32 = 0.4;
/// Text lines per vertical unit; a 10-unit table row is two lines.
const Y_SCALE: f32 = 0.2;

/// Plain-text page renderer writing into an output directory.
#[derive(Debug)]
pub struct TextSink {
    out_dir: PathBuf,
    pages: Vec<Vec<Vec<char>>>,
    saved_path: Option<PathBuf>,
}

impl TextSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            pages: vec![Self::blank_page()],
            saved_path: None,
        }
    }

    /// Full path of the written artifact, once saved.
    pub fn saved_path(&self) -> Option<&Path> {
        self.saved_path.as_deref()
    }

    fn blank_page() -> Vec<Vec<char>> {
        let cols = (PAGE_W * X_SCALE).ceil() as usize + 1;
        let lines = (PAGE_H * Y_SCALE).ceil() as usize + 1;
        vec![vec![' '; cols]; lines]
    }

    fn render_document(&self) -> String {
        let mut out = String::new();
        for (i, page) in self.pages.iter().enumerate() {
            if i > 0 {
                out.push('\u{c}');
                out.push('\n');
            }
            for line in page {
                let text: String = line.iter().collect();
                out.push_str(text.trim_end());
                out.push('\n');
            }
        }
        out
    }
}

impl DocumentSink for TextSink {
    fn page_size(&self) -> (f32, f32) {
        (PAGE_W, PAGE_H)
    }

    fn text_width(&self, text: &str, _style: TextStyle) -> f32 {
        text.chars().count() as f32 / X_SCALE
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle, align: Align) {
        let rendered: String = if style.bold {
            text.to_uppercase()
        } else {
            text.to_string()
        };

        let width = self.text_width(&rendered, style);
        let left = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
        };

        let line = (y * Y_SCALE).round() as usize;
        let col = (left.max(0.0) * X_SCALE).round() as usize;

        // Last started page is always current; pages is never empty.
        let page = self.pages.last_mut().expect("at least one page");
        let Some(cells) = page.get_mut(line) else {
            return;
        };
        for (offset, ch) in rendered.chars().enumerate() {
            if let Some(cell) = cells.get_mut(col + offset) {
                *cell = ch;
            }
        }
    }

    fn start_page(&mut self) {
        self.pages.push(Self::blank_page());
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn save(&mut self, filename: &str) -> Result<(), ReportError> {
        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join(filename);
        fs::write(&path, self.render_document())?;
        self.saved_path = Some(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ReportLayout;
    use chrono::NaiveDate;
    use stocktake_inventory::Item;

    fn test_item(name: &str, exposed: u32, deposit: u32, system: Option<u32>) -> Item {
        Item {
            name: name.to_string(),
            exposed_qty: exposed,
            deposit_qty: deposit,
            system_qty: system,
        }
    }

    #[test]
    fn export_writes_a_readable_page() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = TextSink::new(dir.path());
        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();

        let filename = ReportLayout::default()
            .render(&[test_item("Soda", 5, 3, Some(10))], date, &mut sink)
            .unwrap();

        assert_eq!(filename, "Stock_06-08-2026.txt");
        let path = sink.saved_path().unwrap();
        let content = fs::read_to_string(path).unwrap();

        assert!(content.contains("STOCK"));
        assert!(content.contains("Date: 06/08/2026"));
        // Headers are bold, so the grid carries them uppercased.
        assert!(content.contains("PRODUCT"));
        assert!(content.contains("Soda"));
        assert!(content.contains("Missing 2 unit(s)"));
        // Single page: no form feed.
        assert!(!content.contains('\u{c}'));
    }

    #[test]
    fn long_inventories_produce_form_fed_pages() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = TextSink::new(dir.path());
        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let items: Vec<Item> = (0..40)
            .map(|i| test_item(&format!("item-{i}"), 1, 1, None))
            .collect();

        ReportLayout::default()
            .render(&items, date, &mut sink)
            .unwrap();

        let content = fs::read_to_string(sink.saved_path().unwrap()).unwrap();
        assert_eq!(content.matches('\u{c}').count(), 2);
        assert!(content.contains("item-0"));
        assert!(content.contains("item-39"));
    }
}
