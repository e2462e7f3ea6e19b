//! The owning inventory store: in-memory working set plus its durable mirror.

use stocktake_inventory::{Inventory, Item, ItemField};

use crate::snapshot::{SnapshotError, SnapshotStore};

/// The single durable key the working set lives under.
const SNAPSHOT_KEY: &str = "inventory";

/// Authoritative holder of the item sequence.
///
/// Callers hold one instance for the process lifetime. Every mutation
/// synchronously persists the full snapshot before returning, so the durable
/// store and the in-memory store never diverge as observed by the caller.
/// The caller is expected to refresh its view after each mutating call;
/// there is no subscription mechanism.
pub struct InventoryStore {
    inventory: Inventory,
    snapshots: Box<dyn SnapshotStore>,
}

impl InventoryStore {
    /// Open the store, restoring the persisted snapshot.
    ///
    /// An absent or unparseable snapshot starts an empty inventory; this
    /// never fails the caller.
    pub fn open(snapshots: Box<dyn SnapshotStore>) -> Self {
        let inventory = match snapshots.load(SNAPSHOT_KEY) {
            Ok(Some(payload)) => match serde_json::from_str::<Vec<Item>>(&payload) {
                Ok(items) => {
                    tracing::debug!(items = items.len(), "snapshot restored");
                    Inventory::from_items(items)
                }
                Err(err) => {
                    tracing::warn!(%err, "snapshot is unparseable, starting empty");
                    Inventory::new()
                }
            },
            Ok(None) => Inventory::new(),
            Err(err) => {
                tracing::warn!(%err, "snapshot load failed, starting empty");
                Inventory::new()
            }
        };

        Self {
            inventory,
            snapshots,
        }
    }

    pub fn items(&self) -> &[Item] {
        self.inventory.items()
    }

    pub fn len(&self) -> usize {
        self.inventory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }

    pub fn grand_total(&self) -> u64 {
        self.inventory.grand_total()
    }

    /// Append a new item from raw operator input; returns the updated count.
    ///
    /// No input can make this fail; quantities that fail coercion become 0.
    /// The only error source is the durable write itself.
    pub fn add(
        &mut self,
        name: &str,
        exposed_raw: &str,
        deposit_raw: &str,
    ) -> Result<usize, SnapshotError> {
        let count = self.inventory.add(name, exposed_raw, deposit_raw);
        self.persist()?;
        tracing::info!(name, count, "item added");
        Ok(count)
    }

    /// Mutate one field of the item at `index`. Out-of-range is a no-op.
    pub fn update_field(
        &mut self,
        index: usize,
        field: ItemField,
        raw: &str,
    ) -> Result<(), SnapshotError> {
        if index >= self.inventory.len() {
            tracing::warn!(index, "update for an index that no longer exists");
            return Ok(());
        }
        self.inventory.update_field(index, field, raw);
        self.persist()?;
        tracing::info!(index, ?field, "item field updated");
        Ok(())
    }

    /// Remove the item at `index`, shifting later items down one position.
    /// Out-of-range is a no-op.
    pub fn remove(&mut self, index: usize) -> Result<(), SnapshotError> {
        if index >= self.inventory.len() {
            tracing::warn!(index, "delete for an index that no longer exists");
            return Ok(());
        }
        self.inventory.remove(index);
        self.persist()?;
        tracing::info!(index, "item removed");
        Ok(())
    }

    /// Reset to the empty sequence.
    pub fn clear(&mut self) -> Result<(), SnapshotError> {
        self.inventory.clear();
        self.persist()?;
        tracing::info!("inventory cleared");
        Ok(())
    }

    fn persist(&self) -> Result<(), SnapshotError> {
        let payload = serde_json::to_string(self.inventory.items())?;
        self.snapshots.save(SNAPSHOT_KEY, &payload)
    }
}
