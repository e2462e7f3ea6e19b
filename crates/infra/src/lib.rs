//! Infrastructure: durable snapshot persistence and the owning store.

pub mod snapshot;
pub mod store;

pub use snapshot::{
    InMemorySnapshotStore, SnapshotError, SnapshotStore, SqliteSnapshotStore, default_db_path,
};
pub use store::InventoryStore;
