//! Commands the view surface invokes.
//!
//! Each action runs to completion before the next begins; a mutating command
//! persists through the store and hands back the refreshed table view.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use stocktake_infra::InventoryStore;
use stocktake_inventory::{ItemField, UnknownField};
use stocktake_report::{ReportConfig, ReportLayout, TextSink};

use crate::view::{TableView, table_view};

/// Application state held for the process lifetime.
pub struct AppState {
    store: InventoryStore,
    report: ReportConfig,
}

impl AppState {
    /// The report config also carries the status wording, so the screen view
    /// and the report render status text through the same templates.
    pub fn new(store: InventoryStore, report: ReportConfig) -> Self {
        Self { store, report }
    }

    /// Current table view (rows in inventory order plus grand total).
    pub fn table(&self) -> TableView {
        table_view(self.store.items(), &self.report.templates)
    }

    /// Record a new item from the form inputs.
    pub fn add_item(
        &mut self,
        name: &str,
        exposed: &str,
        deposit: &str,
    ) -> Result<TableView, String> {
        self.store
            .add(name, exposed, deposit)
            .map_err(|e| format!("Failed to save inventory: {e}"))?;
        Ok(self.table())
    }

    /// Apply a single cell edit: `field` is one of name/exposed/deposit/system.
    pub fn update_item_field(
        &mut self,
        index: usize,
        field: &str,
        value: &str,
    ) -> Result<TableView, String> {
        let field: ItemField = field.parse().map_err(|e: UnknownField| e.to_string())?;
        self.store
            .update_field(index, field, value)
            .map_err(|e| format!("Failed to save inventory: {e}"))?;
        Ok(self.table())
    }

    /// Delete the row at `index`.
    pub fn delete_item(&mut self, index: usize) -> Result<TableView, String> {
        self.store
            .remove(index)
            .map_err(|e| format!("Failed to save inventory: {e}"))?;
        Ok(self.table())
    }

    /// Empty the working set.
    pub fn clear_all(&mut self) -> Result<TableView, String> {
        self.store
            .clear()
            .map_err(|e| format!("Failed to save inventory: {e}"))?;
        Ok(self.table())
    }

    /// Export the paginated report into `out_dir` for the given generation
    /// date. Returns the path of the written artifact.
    ///
    /// Export never mutates the store; a failure here fails this action only.
    pub fn export_report(&self, out_dir: &Path, date: NaiveDate) -> Result<PathBuf, String> {
        tracing::info!(items = self.store.len(), "exporting report");

        let mut sink = TextSink::new(out_dir);
        ReportLayout::new(self.report.clone())
            .render(self.store.items(), date, &mut sink)
            .map_err(|e| format!("Export failed: {e}"))?;

        sink.saved_path()
            .map(Path::to_path_buf)
            .ok_or_else(|| "Export produced no artifact".to_string())
    }
}
