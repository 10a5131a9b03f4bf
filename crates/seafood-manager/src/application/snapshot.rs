//! Flat stored records, one list per entity type.
//!
//! A snapshot is what the storage layer hands back after reading: plain data
//! with references expressed as identifiers.  Records are turned into
//! entities by [`load_snapshot`](super::load_snapshot::load_snapshot).
//!
//! Every list defaults to empty, so a snapshot file only needs the sections
//! it actually has records for:
//!
//! ```toml
//! [[countries]]
//! id = 1
//! name = "Norway"
//!
//! [[seafood]]
//! id = "S01"
//! name = "Salmon"
//! price = 21.5
//! country = 1          # present → foreign seafood
//!
//! [[customers]]
//! id = "C01"
//! name = "Lan"
//! phone = "0901234567"
//! email = "lan@example.com"
//! role = "purchaser"
//! purchaser_type = "Restaurant"
//! ```

use serde::{Deserialize, Serialize};

/// All stored records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    #[serde(default)]
    pub countries: Vec<NamedRecord>,
    #[serde(default)]
    pub seafood_types: Vec<NamedRecord>,
    #[serde(default)]
    pub preservers: Vec<NamedRecord>,
    #[serde(default)]
    pub seafood: Vec<SeafoodRecord>,
    #[serde(default)]
    pub customers: Vec<CustomerRecord>,
    #[serde(default)]
    pub order_rows: Vec<OrderRowRecord>,
    #[serde(default)]
    pub tables: Vec<OrderTableRecord>,
    #[serde(default)]
    pub bills: Vec<BillRecord>,
    #[serde(default)]
    pub imports: Vec<ImportRecord>,
    #[serde(default)]
    pub exports: Vec<ExportRecord>,
}

impl Snapshot {
    /// Total number of records across all lists.
    pub fn record_count(&self) -> usize {
        self.countries.len()
            + self.seafood_types.len()
            + self.preservers.len()
            + self.seafood.len()
            + self.customers.len()
            + self.order_rows.len()
            + self.tables.len()
            + self.bills.len()
            + self.imports.len()
            + self.exports.len()
    }
}

/// A catalog record: country, seafood type or preserver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamedRecord {
    pub id: u64,
    pub name: String,
}

/// A seafood item.  Items with a `country` are foreign.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeafoodRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Seafood type identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seafood_type: Option<u64>,
    /// Country identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<u64>,
}

/// Stored customer role.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoleRecord {
    #[default]
    Customer,
    Seller,
    Purchaser,
}

/// A customer, seller or purchaser.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    /// Country identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<u64>,
    #[serde(default)]
    pub role: RoleRecord,
    /// Only read for purchasers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchaser_type: Option<String>,
}

/// One order row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRowRecord {
    pub id: u64,
    /// Seafood identifier.
    pub seafood: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_kg: Option<f64>,
    /// Owning table identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
}

/// An order table.  Its rows point at it through [`OrderRowRecord::table`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderTableRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A bill.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillRecord {
    pub id: String,
    pub name: String,
    /// Customer identifier.
    pub customer: String,
    /// Table identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
}

/// An import transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportRecord {
    pub id: u64,
    pub seafood: String,
    pub customer: String,
    /// Preserver identifier.
    pub preserver: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    /// `dd/mm/yyyy`.
    pub date: String,
}

/// An export transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportRecord {
    pub id: u64,
    pub seafood: String,
    pub customer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    /// `dd/mm/yyyy`.
    pub date: String,
}
