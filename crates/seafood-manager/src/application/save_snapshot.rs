//! SaveSnapshotUseCase: flattens an [`EntityStore`] back into a [`Snapshot`].
//!
//! This is the inverse of [`load_snapshot`](super::load_snapshot::load_snapshot).
//! References become identifiers again and every row is written once, whether
//! it sits loose, in an unclaimed table or in a bill's table.  Loading the
//! result with fresh allocators yields the same entities and counters that
//! continue past every saved identifier.

use seafood_core::{Customer, CustomerRole, ExportSeafood, ImportSeafood, OrderRow, OrderTable, Seafood, SeafoodBill};

use super::load_snapshot::EntityStore;
use super::snapshot::{
    BillRecord, CustomerRecord, ExportRecord, ImportRecord, NamedRecord, OrderRowRecord,
    OrderTableRecord, RoleRecord, SeafoodRecord, Snapshot,
};

impl EntityStore {
    /// Builds the stored form of every entity in the store.
    pub fn to_snapshot(&self) -> Snapshot {
        let claimed_tables = self.bills.values().filter_map(SeafoodBill::table);
        let tables: Vec<&OrderTable> = self.tables.values().chain(claimed_tables).collect();

        let mut order_rows: Vec<OrderRowRecord> = self
            .loose_rows
            .iter()
            .chain(tables.iter().flat_map(|t| t.rows()))
            .map(row_record)
            .collect();
        order_rows.sort_by_key(|r| r.id);

        Snapshot {
            countries: named(self.countries.values().map(|c| (c.id(), c.name()))),
            seafood_types: named(self.seafood_types.values().map(|t| (t.id(), t.name()))),
            preservers: named(self.preservers.values().map(|p| (p.id(), p.name()))),
            seafood: self.seafood.values().map(|s| seafood_record(s)).collect(),
            customers: self.customers.values().map(|c| customer_record(c)).collect(),
            order_rows,
            tables: tables
                .iter()
                .map(|t| OrderTableRecord {
                    id: t.id().to_string(),
                    name: t.name().map(str::to_string),
                })
                .collect(),
            bills: self.bills.values().map(bill_record).collect(),
            imports: self.imports.iter().map(|i| import_record(i)).collect(),
            exports: self.exports.iter().map(|e| export_record(e)).collect(),
        }
    }
}

fn named<'a>(entries: impl Iterator<Item = (u64, &'a str)>) -> Vec<NamedRecord> {
    entries
        .map(|(id, name)| NamedRecord {
            id,
            name: name.to_string(),
        })
        .collect()
}

fn seafood_record(item: &Seafood) -> SeafoodRecord {
    SeafoodRecord {
        id: item.id().to_string(),
        name: item.name().to_string(),
        weight: item.weight(),
        price: item.price(),
        seafood_type: item.kind().map(|k| k.id()),
        country: item.country().map(|c| c.id()),
    }
}

fn customer_record(customer: &Customer) -> CustomerRecord {
    let (role, purchaser_type) = match customer.role() {
        CustomerRole::Customer => (RoleRecord::Customer, None),
        CustomerRole::Seller => (RoleRecord::Seller, None),
        CustomerRole::Purchaser { purchaser_type } => (RoleRecord::Purchaser, Some(purchaser_type.clone())),
    };
    CustomerRecord {
        id: customer.id().to_string(),
        name: customer.name().to_string(),
        phone: customer.phone().to_string(),
        email: customer.email().to_string(),
        country: customer.country().map(|c| c.id()),
        role,
        purchaser_type,
    }
}

fn row_record(row: &OrderRow) -> OrderRowRecord {
    OrderRowRecord {
        id: row.id(),
        seafood: row.seafood().id().to_string(),
        quantity_kg: row.quantity_kg(),
        price_per_kg: row.price_per_kg(),
        table: row.table().map(str::to_string),
    }
}

fn bill_record(bill: &SeafoodBill) -> BillRecord {
    BillRecord {
        id: bill.id().to_string(),
        name: bill.name().to_string(),
        customer: bill.customer().id().to_string(),
        table: bill.table().map(|t| t.id().to_string()),
    }
}

fn import_record(import: &ImportSeafood) -> ImportRecord {
    ImportRecord {
        id: import.id(),
        seafood: import.seafood().id().to_string(),
        customer: import.customer().id().to_string(),
        preserver: import.preserver().id(),
        quantity: import.quantity(),
        unit_price: import.unit_price(),
        date: import.date().to_string(),
    }
}

fn export_record(export: &ExportSeafood) -> ExportRecord {
    ExportRecord {
        id: export.id(),
        seafood: export.seafood().id().to_string(),
        customer: export.customer().id().to_string(),
        quantity: export.quantity(),
        unit_price: export.unit_price(),
        date: export.date().to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
