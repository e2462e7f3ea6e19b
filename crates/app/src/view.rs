//! Table view projection: the on-screen consumer of the derived fields.

use serde::Serialize;

use stocktake_inventory::{Item, Status, StatusTemplates};

/// One rendered table row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRow {
    pub index: usize,
    pub name: String,
    pub exposed_qty: u32,
    pub deposit_qty: u32,
    pub total: u64,
    pub system_qty: Option<u32>,
    pub status: Status,
    pub status_text: String,
}

/// The refreshed table: rows in inventory order plus the running grand total.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub rows: Vec<ItemRow>,
    pub grand_total: u64,
}

/// Project the working set through the shared derivation.
pub fn table_view(items: &[Item], templates: &StatusTemplates) -> TableView {
    let mut grand_total = 0u64;
    let rows = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let recon = item.reconcile();
            grand_total += recon.total;
            ItemRow {
                index,
                name: item.name.clone(),
                exposed_qty: item.exposed_qty,
                deposit_qty: item.deposit_qty,
                total: recon.total,
                system_qty: item.system_qty,
                status: recon.status,
                status_text: templates.render(recon.status),
            }
        })
        .collect();

    TableView { rows, grand_total }
}
