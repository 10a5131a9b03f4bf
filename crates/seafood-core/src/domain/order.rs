//! Order rows and the tables that group them.
//!
//! An [`OrderRow`] is one line of a bill: a seafood item, a weight in kilos
//! and a price per kilo.  Its `price` is derived (kilos × price per kilo) and
//! is recomputed by every setter of either source.
//!
//! An [`OrderTable`] owns its rows.  The row count and table total are derived
//! from the row collection on demand and cannot be set directly.

use std::fmt;
use std::sync::Arc;

use crate::derived::DerivedAttribute;
use crate::domain::entity::{identity_by_id, Entity};
use crate::domain::seafood::Seafood;
use crate::domain::{BillId, NumericId, TableId};
use crate::error::EntityError;
use crate::identity::{EntityAllocators, IdAllocator, Numeric, Prefixed};

// ── OrderRow ──────────────────────────────────────────────────────────────────

/// One line of an order.
#[derive(Debug, Clone)]
pub struct OrderRow {
    id: NumericId,
    seafood: Arc<Seafood>,
    quantity_kg: Option<f64>,
    price_per_kg: Option<f64>,
    price: DerivedAttribute,
    /// Identifier of the table this row belongs to, stamped by the table.
    table: Option<TableId>,
}

impl OrderRow {
    /// Creates a row from form input with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::IdSpaceExhausted`] if the row sequence has no
    /// identifier left.
    pub fn new(
        allocators: &EntityAllocators,
        seafood: Arc<Seafood>,
        quantity_kg: Option<f64>,
        price_per_kg: Option<f64>,
    ) -> Result<Self, EntityError> {
        let id = allocators.order_rows.allocate(None)?;
        Ok(Self::assemble(id, seafood, quantity_kg, price_per_kg, None))
    }

    /// Rebuilds a stored row.
    ///
    /// # Errors
    ///
    /// Never fails for numeric identifiers; the `Result` keeps the signature
    /// uniform with [`new`](Self::new).
    pub fn restore(
        allocators: &EntityAllocators,
        id: NumericId,
        seafood: Arc<Seafood>,
        quantity_kg: Option<f64>,
        price_per_kg: Option<f64>,
        table: Option<TableId>,
    ) -> Result<Self, EntityError> {
        let id = allocators.order_rows.allocate(Some(id))?;
        Ok(Self::assemble(id, seafood, quantity_kg, price_per_kg, table))
    }

    fn assemble(
        id: NumericId,
        seafood: Arc<Seafood>,
        quantity_kg: Option<f64>,
        price_per_kg: Option<f64>,
        table: Option<TableId>,
    ) -> Self {
        let mut row = Self {
            id,
            seafood,
            quantity_kg,
            price_per_kg,
            price: DerivedAttribute::new("price"),
            table,
        };
        row.update_price();
        row
    }

    fn update_price(&mut self) {
        self.price.recompute(self.quantity_kg, self.price_per_kg);
    }

    pub fn id(&self) -> NumericId {
        self.id
    }

    pub fn seafood(&self) -> &Arc<Seafood> {
        &self.seafood
    }

    pub fn quantity_kg(&self) -> Option<f64> {
        self.quantity_kg
    }

    pub fn price_per_kg(&self) -> Option<f64> {
        self.price_per_kg
    }

    /// The table this row belongs to, if any.
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// The derived row price; `0.0` until both sources are set.
    pub fn price(&self) -> f64 {
        self.price.value()
    }

    /// The derived row price, current or cached.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::CacheMiss`] if `use_cache` is set and no prior
    /// price exists.
    pub fn price_with_cache(&self, use_cache: bool) -> Result<f64, EntityError> {
        self.price.get(use_cache)
    }

    pub fn set_seafood(&mut self, seafood: Arc<Seafood>) {
        self.seafood = seafood;
    }

    pub fn set_quantity_kg(&mut self, quantity_kg: Option<f64>) {
        self.quantity_kg = quantity_kg;
        self.update_price();
    }

    pub fn set_price_per_kg(&mut self, price_per_kg: Option<f64>) {
        self.price_per_kg = price_per_kg;
        self.update_price();
    }

    pub(crate) fn set_table(&mut self, table: Option<TableId>) {
        self.table = table;
    }
}

impl Entity for OrderRow {
    type Format = Numeric;
    const KIND: &'static str = "OrderRow";

    fn allocator(allocators: &EntityAllocators) -> &IdAllocator<Numeric> {
        &allocators.order_rows
    }

    fn id(&self) -> &NumericId {
        &self.id
    }
}

identity_by_id!(OrderRow);

impl fmt::Display for OrderRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Order({}, Seafood({})", self.id, self.seafood.id())?;
        match self.quantity_kg {
            Some(kg) => write!(f, ", {kg}kg")?,
            None => f.write_str(", -")?,
        }
        write!(f, ", {})", self.price())
    }
}

// ── OrderTable ────────────────────────────────────────────────────────────────

/// A group of order rows belonging to at most one bill.
#[derive(Debug, Clone)]
pub struct OrderTable {
    id: TableId,
    name: Option<String>,
    /// Identifier of the owning bill, stamped by the bill.
    bill: Option<BillId>,
    rows: Vec<OrderRow>,
}

impl OrderTable {
    /// Creates an empty table from form input with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::IdSpaceExhausted`] if the table sequence has no
    /// identifier left.
    pub fn new(allocators: &EntityAllocators, name: Option<String>) -> Result<Self, EntityError> {
        let id = allocators.tables.allocate(None)?;
        Ok(Self::assemble(id, name, None))
    }

    /// Rebuilds a stored table.  Rows are attached afterwards with
    /// [`add_row`](Self::add_row).
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidIdentifier`] if `id` is not a valid
    /// table identifier.
    pub fn restore(
        allocators: &EntityAllocators,
        id: TableId,
        name: Option<String>,
    ) -> Result<Self, EntityError> {
        let id = allocators.tables.allocate(Some(id))?;
        Ok(Self::assemble(id, name, None))
    }

    fn assemble(id: TableId, name: Option<String>, bill: Option<BillId>) -> Self {
        Self {
            id,
            name,
            bill,
            rows: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The bill this table belongs to, if any.
    pub fn bill(&self) -> Option<&str> {
        self.bill.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub(crate) fn set_bill(&mut self, bill: Option<BillId>) {
        self.bill = bill;
    }

    /// Adds a row and stamps this table's identifier onto it.
    ///
    /// Returns `false` (and drops `row`) if a row with the same identifier is
    /// already present.
    pub fn add_row(&mut self, mut row: OrderRow) -> bool {
        if self.rows.iter().any(|r| r.id == row.id) {
            return false;
        }
        row.set_table(Some(self.id.clone()));
        self.rows.push(row);
        true
    }

    /// Adds several rows; returns how many were actually added.
    pub fn add_rows(&mut self, rows: impl IntoIterator<Item = OrderRow>) -> usize {
        let mut added = 0;
        for row in rows {
            if self.add_row(row) {
                added += 1;
            }
        }
        added
    }

    /// Detaches and returns the row with the given identifier.
    pub fn remove_row(&mut self, id: NumericId) -> Option<OrderRow> {
        let index = self.rows.iter().position(|r| r.id == id)?;
        let mut row = self.rows.remove(index);
        row.set_table(None);
        Some(row)
    }

    pub fn rows(&self) -> &[OrderRow] {
        &self.rows
    }

    /// Mutable access to one row, e.g. to change its quantity.
    pub fn row_mut(&mut self, id: NumericId) -> Option<&mut OrderRow> {
        self.rows.iter_mut().find(|r| r.id == id)
    }

    /// Number of rows in this table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Sum of all row prices.
    pub fn total(&self) -> f64 {
        self.rows.iter().map(OrderRow::price).sum()
    }

    /// Rows ordered by seafood identifier.
    pub fn rows_by_seafood(&self) -> Vec<&OrderRow> {
        let mut rows: Vec<&OrderRow> = self.rows.iter().collect();
        rows.sort_by(|a, b| a.seafood.id().cmp(b.seafood.id()));
        rows
    }
}

impl Entity for OrderTable {
    type Format = Prefixed;
    const KIND: &'static str = "OrderTable";

    fn allocator(allocators: &EntityAllocators) -> &IdAllocator<Prefixed> {
        &allocators.tables
    }

    fn id(&self) -> &TableId {
        &self.id
    }
}

identity_by_id!(OrderTable);

impl fmt::Display for OrderTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "Table({},{},{} rows)", self.id, name, self.rows.len()),
            None => write!(f, "Table({},{} rows)", self.id, self.rows.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seafood::SeafoodFields;

    fn seafood(allocs: &EntityAllocators, name: &str) -> Arc<Seafood> {
        Arc::new(Seafood::new(allocs, SeafoodFields::named(name)).unwrap())
    }

    // ── OrderRow ──────────────────────────────────────────────────────────────

    #[test]
    fn test_row_price_is_computed_at_construction() {
        let allocs = EntityAllocators::new();

        let row = OrderRow::new(&allocs, seafood(&allocs, "Shrimp"), Some(3.0), Some(4.5)).unwrap();

        assert_eq!(row.id(), 1);
        assert_eq!(row.price(), 13.5);
    }

    #[test]
    fn test_setter_recomputes_and_caches_previous_price() {
        // Arrange
        let allocs = EntityAllocators::new();
        let mut row = OrderRow::new(&allocs, seafood(&allocs, "Shrimp"), Some(3.0), Some(4.5)).unwrap();

        // Act
        row.set_quantity_kg(Some(5.0));

        // Assert
        assert_eq!(row.price_with_cache(false), Ok(22.5));
        assert_eq!(row.price_with_cache(true), Ok(13.5));
    }

    #[test]
    fn test_row_without_price_reads_zero_and_has_no_cache() {
        let allocs = EntityAllocators::new();

        let row = OrderRow::new(&allocs, seafood(&allocs, "Crab"), Some(2.0), None).unwrap();

        assert_eq!(row.price(), 0.0);
        assert_eq!(row.price_with_cache(true), Err(EntityError::CacheMiss("price")));
    }

    #[test]
    fn test_clearing_a_source_keeps_last_price() {
        let allocs = EntityAllocators::new();
        let mut row = OrderRow::new(&allocs, seafood(&allocs, "Crab"), Some(2.0), Some(10.0)).unwrap();

        row.set_price_per_kg(None);

        assert_eq!(row.price(), 20.0);
    }

    #[test]
    fn test_restored_row_advances_sequence() {
        let allocs = EntityAllocators::new();
        let item = seafood(&allocs, "Squid");

        OrderRow::restore(&allocs, 17, Arc::clone(&item), Some(1.0), Some(1.0), None).unwrap();
        let fresh = OrderRow::new(&allocs, item, None, None).unwrap();

        assert_eq!(fresh.id(), 18);
    }

    // ── OrderTable ────────────────────────────────────────────────────────────

    #[test]
    fn test_add_row_stamps_table_and_updates_count() {
        // Arrange
        let allocs = EntityAllocators::new();
        let mut table = OrderTable::new(&allocs, Some("Lunch".to_string())).unwrap();
        let row = OrderRow::new(&allocs, seafood(&allocs, "Shrimp"), Some(2.0), Some(5.0)).unwrap();
        let row_id = row.id();

        // Act
        let added = table.add_row(row);

        // Assert
        assert!(added);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.rows()[0].table(), Some("T01"));
        assert_eq!(table.row_mut(row_id).map(|r| r.id()), Some(row_id));
    }

    #[test]
    fn test_duplicate_row_is_not_added_twice() {
        let allocs = EntityAllocators::new();
        let mut table = OrderTable::new(&allocs, None).unwrap();
        let row = OrderRow::new(&allocs, seafood(&allocs, "Shrimp"), Some(2.0), Some(5.0)).unwrap();

        table.add_row(row.clone());
        let added_again = table.add_row(row);

        assert!(!added_again);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_add_rows_counts_only_new_rows() {
        let allocs = EntityAllocators::new();
        let mut table = OrderTable::new(&allocs, None).unwrap();
        let item = seafood(&allocs, "Shrimp");
        let a = OrderRow::new(&allocs, Arc::clone(&item), Some(1.0), Some(1.0)).unwrap();
        let b = OrderRow::new(&allocs, item, Some(1.0), Some(1.0)).unwrap();

        let added = table.add_rows(vec![a.clone(), b, a]);

        assert_eq!(added, 2);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_remove_row_detaches_it() {
        let allocs = EntityAllocators::new();
        let mut table = OrderTable::new(&allocs, None).unwrap();
        let row = OrderRow::new(&allocs, seafood(&allocs, "Shrimp"), Some(2.0), Some(5.0)).unwrap();
        let id = row.id();
        table.add_row(row);

        let removed = table.remove_row(id).expect("row must be present");

        assert_eq!(removed.table(), None);
        assert_eq!(table.row_count(), 0);
        assert!(table.remove_row(id).is_none());
    }

    #[test]
    fn test_total_follows_row_changes() {
        let allocs = EntityAllocators::new();
        let mut table = OrderTable::new(&allocs, None).unwrap();
        let item = seafood(&allocs, "Shrimp");
        let a = OrderRow::new(&allocs, Arc::clone(&item), Some(2.0), Some(5.0)).unwrap();
        let b = OrderRow::new(&allocs, item, Some(1.0), Some(3.0)).unwrap();
        let b_id = b.id();
        table.add_rows([a, b]);
        assert_eq!(table.total(), 13.0);

        table.row_mut(b_id).unwrap().set_quantity_kg(Some(2.0));

        assert_eq!(table.total(), 16.0);
    }

    #[test]
    fn test_rows_by_seafood_orders_by_seafood_id() {
        let allocs = EntityAllocators::new();
        let first = seafood(&allocs, "Shrimp");
        let second = seafood(&allocs, "Crab");
        let mut table = OrderTable::new(&allocs, None).unwrap();
        table.add_row(OrderRow::new(&allocs, second, Some(1.0), Some(1.0)).unwrap());
        table.add_row(OrderRow::new(&allocs, first, Some(1.0), Some(1.0)).unwrap());

        let ordered: Vec<&str> = table.rows_by_seafood().iter().map(|r| r.seafood().id()).collect();

        assert_eq!(ordered, vec!["S01", "S02"]);
    }

    #[test]
    fn test_table_ids_are_prefixed() {
        let allocs = EntityAllocators::new();
        OrderTable::restore(&allocs, "T09".to_string(), None).unwrap();

        let fresh = OrderTable::new(&allocs, None).unwrap();

        assert_eq!(fresh.id(), "T10");
    }
}
