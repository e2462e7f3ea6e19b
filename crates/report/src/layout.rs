//! Table layout and pagination.
//!
//! The engine never creates an infinite canvas: it walks the inventory row
//! by row against a page of known dimensions, asks "does this row still
//! fit?", and when it does not, opens a fresh page and repeats the header
//! row before continuing.

use chrono::NaiveDate;

use stocktake_inventory::{Item, StatusTemplates};

use crate::error::ReportError;
use crate::sink::{Align, DocumentSink, TextStyle};

// Title block geometry (first page only).
const TITLE_Y: f32 = 20.0;
const DATE_Y: f32 = 30.0;
const ORG_Y: f32 = 40.0;
const TITLE_SIZE: f32 = 16.0;
const DATE_SIZE: f32 = 12.0;
const ORG_SIZE: f32 = 14.0;

// Table geometry.
const FIRST_PAGE_TABLE_TOP: f32 = 50.0;
const PAGE_TOP: f32 = 20.0;
const HEADER_GAP: f32 = 15.0;
const ROW_HEIGHT: f32 = 10.0;
const BOTTOM_MARGIN: f32 = 20.0;
const BODY_SIZE: f32 = 12.0;

/// Product column tracks the longest name; the other five are fixed.
const NAME_WIDTH_FACTOR: f32 = 1.5;
const FIXED_WIDTHS: [f32; 5] = [30.0, 30.0, 30.0, 30.0, 50.0];

/// Report wording and naming. All of it is configuration, none of it a
/// hard-coded contract.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Report title, first line of the title block.
    pub title: String,
    /// Label in front of the generation date line.
    pub date_label: String,
    /// Organization line of the title block.
    pub org_label: String,
    /// Prefix of the saved filename.
    pub file_prefix: String,
    /// Column header labels: product, exposed, deposit, total, system, status.
    pub headers: [String; 6],
    /// Status wording shared with the on-screen view.
    pub templates: StatusTemplates,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "STOCK".to_string(),
            date_label: "Date".to_string(),
            org_label: "Stocktake".to_string(),
            file_prefix: "Stock".to_string(),
            headers: [
                "Product".to_string(),
                "Exposed".to_string(),
                "Deposit".to_string(),
                "Total".to_string(),
                "System".to_string(),
                "Status".to_string(),
            ],
            templates: StatusTemplates::default(),
        }
    }
}

/// Lays out the inventory as a paginated six-column report.
#[derive(Debug, Clone, Default)]
pub struct ReportLayout {
    config: ReportConfig,
}

impl ReportLayout {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Render every item, in inventory order, into `sink` and save the
    /// document. Returns the filename the artifact was saved under:
    /// `<prefix>_<date with slashes replaced by dashes>.<sink extension>`.
    ///
    /// The generation date is a parameter so tests stay deterministic.
    pub fn render<S: DocumentSink>(
        &self,
        items: &[Item],
        date: NaiveDate,
        sink: &mut S,
    ) -> Result<String, ReportError> {
        let (page_w, page_h) = sink.page_size();
        let usable_h = page_h - BOTTOM_MARGIN;
        let body = TextStyle::regular(BODY_SIZE);
        let emphasis = TextStyle::bold(BODY_SIZE);

        let widths = self.column_widths(items, sink);
        let table_w: f32 = widths.iter().sum();
        let table_x = (page_w - table_w) / 2.0;

        let date_text = format_date(date);
        self.draw_title_block(sink, page_w, &date_text);

        let mut y = FIRST_PAGE_TABLE_TOP;
        self.draw_header_row(sink, table_x, &widths, y, emphasis);
        y += HEADER_GAP;

        for item in items {
            if y + ROW_HEIGHT > usable_h {
                sink.start_page();
                y = PAGE_TOP;
                self.draw_header_row(sink, table_x, &widths, y, emphasis);
                y += HEADER_GAP;
            }

            let recon = item.reconcile();
            let cells = [
                item.name.clone(),
                item.exposed_qty.to_string(),
                item.deposit_qty.to_string(),
                recon.total.to_string(),
                item.system_qty.map(|n| n.to_string()).unwrap_or_default(),
                self.config.templates.render(recon.status),
            ];

            let mut x = table_x;
            for (cell, width) in cells.iter().zip(widths) {
                sink.draw_text(cell, x + width / 2.0, y, body, Align::Center);
                x += width;
            }
            y += ROW_HEIGHT;
        }

        let filename = format!(
            "{}_{}.{}",
            self.config.file_prefix,
            date_text.replace('/', "-"),
            sink.extension()
        );
        sink.save(&filename)?;
        tracing::info!(%filename, items = items.len(), "report saved");
        Ok(filename)
    }

    /// Six column widths: measured longest product name scaled by 1.5, then
    /// the five fixed spans.
    fn column_widths<S: DocumentSink>(&self, items: &[Item], sink: &S) -> [f32; 6] {
        let body = TextStyle::regular(BODY_SIZE);
        let longest = items
            .iter()
            .map(|item| sink.text_width(&item.name, body))
            .fold(0.0_f32, f32::max);

        let [w1, w2, w3, w4, w5] = FIXED_WIDTHS;
        [longest * NAME_WIDTH_FACTOR, w1, w2, w3, w4, w5]
    }

    /// Title, generation date and organization label, centered; first page only.
    fn draw_title_block<S: DocumentSink>(&self, sink: &mut S, page_w: f32, date_text: &str) {
        let center = page_w / 2.0;
        sink.draw_text(
            &self.config.title,
            center,
            TITLE_Y,
            TextStyle::bold(TITLE_SIZE),
            Align::Center,
        );
        sink.draw_text(
            &format!("{}: {}", self.config.date_label, date_text),
            center,
            DATE_Y,
            TextStyle::regular(DATE_SIZE),
            Align::Center,
        );
        sink.draw_text(
            &self.config.org_label,
            center,
            ORG_Y,
            TextStyle::regular(ORG_SIZE),
            Align::Center,
        );
    }

    /// One bold header label centered within each column span.
    fn draw_header_row<S: DocumentSink>(
        &self,
        sink: &mut S,
        table_x: f32,
        widths: &[f32; 6],
        y: f32,
        style: TextStyle,
    ) {
        let mut x = table_x;
        for (header, width) in self.config.headers.iter().zip(widths) {
            sink.draw_text(header, x + width / 2.0, y, style, Align::Center);
            x += width;
        }
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{DrawOp, RecordingSink, RECORDING_CHAR_WIDTH};

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    fn test_item(name: &str, exposed: u32, deposit: u32, system: Option<u32>) -> Item {
        Item {
            name: name.to_string(),
            exposed_qty: exposed,
            deposit_qty: deposit,
            system_qty: system,
        }
    }

    fn render(items: &[Item]) -> RecordingSink {
        let mut sink = RecordingSink::new();
        ReportLayout::default()
            .render(items, test_date(), &mut sink)
            .unwrap();
        sink
    }

    fn row_ops<'a>(sink: &'a RecordingSink, name: &str) -> Vec<&'a DrawOp> {
        sink.ops.iter().filter(|op| op.text == name).collect()
    }

    #[test]
    fn filename_derives_from_date_and_sink_extension() {
        let mut sink = RecordingSink::new();
        let filename = ReportLayout::default()
            .render(&[test_item("Soda", 5, 3, None)], test_date(), &mut sink)
            .unwrap();

        assert_eq!(filename, "Stock_06-08-2026.pdf");
        assert_eq!(sink.saved_as.as_deref(), Some("Stock_06-08-2026.pdf"));
    }

    #[test]
    fn title_block_appears_on_first_page_only() {
        let items: Vec<Item> = (0..40)
            .map(|i| test_item(&format!("item-{i}"), 1, 1, None))
            .collect();
        let sink = render(&items);

        assert!(sink.page_count() > 1);
        let titles = row_ops(&sink, "STOCK");
        assert_eq!(titles.len(), 1);
        assert_eq!(titles[0].page, 0);
        assert!(titles[0].style.bold);
        assert_eq!(titles[0].y, 20.0);

        let dates = row_ops(&sink, "Date: 06/08/2026");
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].page, 0);
    }

    #[test]
    fn table_is_horizontally_centered() {
        let sink = render(&[test_item("Soda", 5, 3, None)]);

        // Longest name "Soda" measures 8 units, scaled to a 12-unit product
        // column; 12 + 30*4 + 50 = 182 on a 297-unit page.
        let name_w = 4.0 * RECORDING_CHAR_WIDTH * 1.5;
        let table_w = name_w + 30.0 * 4.0 + 50.0;
        let table_x = (297.0 - table_w) / 2.0;

        let product_header = row_ops(&sink, "Product")[0];
        assert_eq!(product_header.x, table_x + name_w / 2.0);
        assert!(product_header.style.bold);

        let exposed_header = row_ops(&sink, "Exposed")[0];
        assert_eq!(exposed_header.x, table_x + name_w + 15.0);
    }

    #[test]
    fn row_renders_derived_values_and_status_text() {
        let sink = render(&[test_item("Soda", 5, 3, Some(10))]);

        let row_y = 65.0; // first-page table top 50 + header gap 15
        let texts: Vec<&str> = sink
            .ops
            .iter()
            .filter(|op| op.y == row_y)
            .map(|op| op.text.as_str())
            .collect();
        assert_eq!(texts, ["Soda", "5", "3", "8", "10", "Missing 2 unit(s)"]);
    }

    #[test]
    fn absent_system_qty_renders_blank_cell() {
        let sink = render(&[test_item("Soda", 5, 3, None)]);

        let blanks: Vec<&DrawOp> = sink
            .ops
            .iter()
            .filter(|op| op.y == 65.0 && op.text.is_empty())
            .collect();
        // System column and status column are both blank.
        assert_eq!(blanks.len(), 2);
    }

    #[test]
    fn pagination_breaks_when_a_row_would_cross_the_bottom_margin() {
        // 40 one-row items; usable height 190, first-page rows start at 65,
        // later pages at 35, rows 10 apart: 12 + 15 + 13 rows.
        let items: Vec<Item> = (0..40)
            .map(|i| test_item(&format!("item-{i}"), 1, 1, None))
            .collect();
        let sink = render(&items);

        assert_eq!(sink.page_count(), 3);

        let rows_on = |page: usize| -> Vec<String> {
            sink.ops_on_page(page)
                .iter()
                .filter(|op| op.text.starts_with("item-"))
                .map(|op| op.text.clone())
                .collect()
        };

        assert_eq!(rows_on(0).len(), 12);
        assert_eq!(rows_on(1).len(), 15);
        assert_eq!(rows_on(2).len(), 13);

        // No row sits past the usable height, and every item appears exactly
        // once, in inventory order.
        assert!(sink.ops.iter().all(|op| op.y + 10.0 <= 190.0));
        let mut seen: Vec<String> = Vec::new();
        for page in 0..sink.page_count() {
            seen.extend(rows_on(page));
        }
        let expected: Vec<String> = (0..40).map(|i| format!("item-{i}")).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn headers_are_re_emitted_on_every_page() {
        let items: Vec<Item> = (0..40)
            .map(|i| test_item(&format!("item-{i}"), 1, 1, None))
            .collect();
        let sink = render(&items);

        for page in 0..sink.page_count() {
            let headers: Vec<&DrawOp> = sink
                .ops_on_page(page)
                .into_iter()
                .filter(|op| op.text == "Product")
                .collect();
            assert_eq!(headers.len(), 1, "page {page} is missing its header row");
            let expected_y = if page == 0 { 50.0 } else { 20.0 };
            assert_eq!(headers[0].y, expected_y);
        }
    }

    #[test]
    fn sink_save_failure_propagates() {
        struct FailingSink(RecordingSink);

        impl DocumentSink for FailingSink {
            fn page_size(&self) -> (f32, f32) {
                self.0.page_size()
            }
            fn text_width(&self, text: &str, style: TextStyle) -> f32 {
                self.0.text_width(text, style)
            }
            fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle, align: Align) {
                self.0.draw_text(text, x, y, style, align);
            }
            fn start_page(&mut self) {
                self.0.start_page();
            }
            fn extension(&self) -> &'static str {
                self.0.extension()
            }
            fn save(&mut self, _filename: &str) -> Result<(), ReportError> {
                Err(ReportError::sink("disk full"))
            }
        }

        let mut sink = FailingSink(RecordingSink::new());
        let err = ReportLayout::default()
            .render(&[test_item("Soda", 1, 1, None)], test_date(), &mut sink)
            .unwrap_err();
        assert!(matches!(err, ReportError::Sink(_)));
    }
}
