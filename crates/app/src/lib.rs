//! Operator-facing application layer.
//!
//! The command functions here are the boundary the view surface calls; every
//! mutating command answers with the refreshed table view, which is the
//! explicit "store mutated, redraw now" signal.

pub mod commands;
pub mod view;

pub use commands::AppState;
pub use view::{ItemRow, TableView, table_view};
