use serde::{Deserialize, Serialize};

/// One tracked product: observed counts plus the optional expected count.
///
/// Field names in the serialized form match the persisted snapshot shape
/// (`exposedQty`, `depositQty`, `systemQty` absent when not yet compared).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Operator-supplied label. Stored verbatim; may be empty or duplicated.
    pub name: String,
    /// Units counted in the display/sales area.
    #[serde(rename = "exposedQty")]
    pub exposed_qty: u32,
    /// Units counted in the storage area.
    #[serde(rename = "depositQty")]
    pub deposit_qty: u32,
    /// Expected unit count per the external system record.
    ///
    /// `None` means "not yet compared". `Some(0)` counts as set: zero is a
    /// real baseline, distinct from absence.
    #[serde(rename = "systemQty", default, skip_serializing_if = "Option::is_none")]
    pub system_qty: Option<u32>,
}

impl Item {
    /// Create an item from raw operator input. The expected count starts absent.
    pub fn new(name: impl Into<String>, exposed_raw: &str, deposit_raw: &str) -> Self {
        Self {
            name: name.into(),
            exposed_qty: coerce_qty(exposed_raw),
            deposit_qty: coerce_qty(deposit_raw),
            system_qty: None,
        }
    }

    /// Recompute the derived fields for this item.
    ///
    /// This is the single shared derivation: both the on-screen table and the
    /// report layout go through here.
    pub fn reconcile(&self) -> Reconciliation {
        let total = u64::from(self.exposed_qty) + u64::from(self.deposit_qty);
        let status = match self.system_qty {
            None => Status::Unset,
            Some(system) => {
                let system = u64::from(system);
                if total < system {
                    Status::Shortage(system - total)
                } else if total > system {
                    Status::Surplus(total - system)
                } else {
                    Status::Balanced
                }
            }
        };
        Reconciliation { total, status }
    }
}

/// Derived fields of an [`Item`]; recomputed on every read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    /// Sum of the two observed counts.
    pub total: u64,
    /// Outcome of comparing the total against the expected count.
    pub status: Status,
}

/// Comparison outcome between the observed total and the system quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// No system quantity recorded yet.
    Unset,
    /// Observed total is below the expected count by this many units.
    Shortage(u64),
    /// Observed total is above the expected count by this many units.
    Surplus(u64),
    /// Observed total matches the expected count.
    Balanced,
}

/// Coerce raw operator input to a non-negative quantity.
///
/// Parses the leading run of ASCII digits after trimming. Anything else
/// (empty input, no leading digits, overflow) coerces to 0. A non-numeric
/// quantity is never stored.
pub fn coerce_qty(raw: &str) -> u32 {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Status wording, as templates with an `{n}` placeholder.
///
/// The wording is configuration, not a hard-coded contract; the same
/// templates are applied by every consumer of the derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTemplates {
    pub shortage: String,
    pub surplus: String,
    pub balanced: String,
}

impl Default for StatusTemplates {
    fn default() -> Self {
        Self {
            shortage: "Missing {n} unit(s)".to_string(),
            surplus: "Surplus {n} unit(s)".to_string(),
            balanced: "OK".to_string(),
        }
    }
}

impl StatusTemplates {
    /// Render a status to display text. `Unset` renders as the empty string.
    pub fn render(&self, status: Status) -> String {
        match status {
            Status::Unset => String::new(),
            Status::Shortage(n) => self.shortage.replace("{n}", &n.to_string()),
            Status::Surplus(n) => self.surplus.replace("{n}", &n.to_string()),
            Status::Balanced => self.balanced.clone(),
        }
    }
}
