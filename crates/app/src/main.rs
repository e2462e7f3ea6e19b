//! Command-line entry point.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use stocktake_app::{AppState, TableView};
use stocktake_infra::{InventoryStore, SqliteSnapshotStore, default_db_path};
use stocktake_report::ReportConfig;

#[derive(Parser, Debug)]
#[command(name = "stocktake", version, about = "Single-user inventory reconciliation")]
struct Cli {
    /// Snapshot database path.
    #[arg(long, env = "STOCKTAKE_DB")]
    db: Option<PathBuf>,

    /// Organization label printed in the report title block.
    #[arg(long)]
    org: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new item.
    Add {
        name: String,
        exposed: String,
        deposit: String,
    },
    /// Print the current table and grand total.
    List,
    /// Edit one field of an item: name, exposed, deposit or system.
    Set {
        index: usize,
        field: String,
        value: String,
    },
    /// Delete the item at the given position.
    Delete { index: usize },
    /// Empty the working set.
    Clear,
    /// Export the paginated report.
    Export {
        /// Output directory for the artifact.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    stocktake_observability::init();

    let cli = Cli::parse();

    let db_path = match cli.db {
        Some(path) => path,
        None => default_db_path().context("failed to resolve snapshot database path")?,
    };
    let snapshots = SqliteSnapshotStore::open(&db_path)
        .with_context(|| format!("failed to open snapshot database at {}", db_path.display()))?;
    let store = InventoryStore::open(Box::new(snapshots));

    let mut report = ReportConfig::default();
    if let Some(org) = cli.org {
        report.org_label = org;
    }
    let mut state = AppState::new(store, report);

    match cli.command {
        Command::Add {
            name,
            exposed,
            deposit,
        } => {
            let view = state
                .add_item(&name, &exposed, &deposit)
                .map_err(anyhow::Error::msg)?;
            print_table(&view);
        }
        Command::List => print_table(&state.table()),
        Command::Set {
            index,
            field,
            value,
        } => {
            let view = state
                .update_item_field(index, &field, &value)
                .map_err(anyhow::Error::msg)?;
            print_table(&view);
        }
        Command::Delete { index } => {
            let view = state.delete_item(index).map_err(anyhow::Error::msg)?;
            print_table(&view);
        }
        Command::Clear => {
            let view = state.clear_all().map_err(anyhow::Error::msg)?;
            print_table(&view);
        }
        Command::Export { out } => {
            let date = chrono::Local::now().date_naive();
            let path = state
                .export_report(&out, date)
                .map_err(anyhow::Error::msg)?;
            println!("Report saved to {}", path.display());
        }
    }

    Ok(())
}

fn print_table(view: &TableView) {
    println!(
        "{:>3}  {:<24} {:>8} {:>8} {:>8} {:>8}  {}",
        "#", "Product", "Exposed", "Deposit", "Total", "System", "Status"
    );
    for row in &view.rows {
        let system = row.system_qty.map(|n| n.to_string()).unwrap_or_default();
        println!(
            "{:>3}  {:<24} {:>8} {:>8} {:>8} {:>8}  {}",
            row.index, row.name, row.exposed_qty, row.deposit_qty, row.total, system, row.status_text
        );
    }
    println!("Grand total: {}", view.grand_total);
}
