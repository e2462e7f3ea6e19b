use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::item::{Item, coerce_qty};

/// An independently editable field of an [`Item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemField {
    Name,
    Exposed,
    Deposit,
    System,
}

/// Unknown field name supplied by the view surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown item field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for ItemField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "exposed" => Ok(Self::Exposed),
            "deposit" => Ok(Self::Deposit),
            "system" => Ok(Self::System),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// The ordered working set of items.
///
/// Insertion order is display order is persisted order. Items are addressed
/// by positional index; there is no stable id. Out-of-range indices on update
/// and remove are defensive no-ops: the view only ever issues indices it
/// just rendered, and a stale index must not crash it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the sequence from a restored snapshot.
    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a new item built from raw operator input.
    ///
    /// Quantity input that fails numeric coercion becomes 0; the expected
    /// count starts absent. Returns the updated item count.
    pub fn add(&mut self, name: &str, exposed_raw: &str, deposit_raw: &str) -> usize {
        self.items.push(Item::new(name, exposed_raw, deposit_raw));
        self.items.len()
    }

    /// Mutate one field of the item at `index` in place.
    ///
    /// The name is stored verbatim (empty string allowed). Numeric fields go
    /// through coercion; a failed coercion stores 0. For the system quantity
    /// this means `Some(0)`, since only creation leaves it absent.
    pub fn update_field(&mut self, index: usize, field: ItemField, raw: &str) {
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        match field {
            ItemField::Name => item.name = raw.to_string(),
            ItemField::Exposed => item.exposed_qty = coerce_qty(raw),
            ItemField::Deposit => item.deposit_qty = coerce_qty(raw),
            ItemField::System => item.system_qty = Some(coerce_qty(raw)),
        }
    }

    /// Remove the item at `index`, shifting later items down one position.
    pub fn remove(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    /// Reset to the empty sequence.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Running grand total of derived totals across all items.
    pub fn grand_total(&self) -> u64 {
        self.items.iter().map(|item| item.reconcile().total).sum()
    }
}
