//! LoadSnapshotUseCase: rebuilds every stored entity from a snapshot.
//!
//! The main entry point is [`load_snapshot`], which takes a [`Snapshot`]
//! (typically read from a TOML file by a [`SnapshotSource`]) and returns an
//! [`EntityStore`] holding the rehydrated entities.
//!
//! # Why synchronize before rehydrating? (for beginners)
//!
//! Each entity type hands out fresh identifiers from a counter.  When records
//! come back from storage, the counter must first be moved past the largest
//! stored identifier; otherwise the next record a user creates could reuse an
//! identifier that already exists on disk.  So for every batch the loader:
//!
//! ```text
//! 1. finds the smallest and largest identifier in the batch
//! 2. allocator.synchronize(min, max)      ← counter jumps past the batch
//! 3. Entity::restore(id, fields) for each record
//! ```
//!
//! Batches run in dependency order so every reference can be resolved by
//! identifier against entities that already exist:
//!
//! ```text
//! catalogs → seafood → customers → order rows → tables → bills → imports → exports
//! ```

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use seafood_core::{
    Country, Customer, CustomerFields, CustomerRole, Entity, EntityAllocators, EntityError,
    EntityId, ExportSeafood, IdFormat, ImportSeafood, OrderRow, OrderTable, Origin, Preserver,
    Seafood, SeafoodBill, SeafoodFields, SeafoodType, TradeDetails,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::snapshot::{
    BillRecord, CustomerRecord, ExportRecord, ImportRecord, NamedRecord, OrderRowRecord,
    OrderTableRecord, RoleRecord, SeafoodRecord, Snapshot,
};

/// Error type for snapshot loading.
#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    /// The snapshot could not be read from its source.
    #[error("snapshot source failed: {0}")]
    Source(String),

    /// A record refers to an entity that is not in the snapshot.
    #[error("{kind} {id} refers to missing {target} {reference}")]
    DanglingReference {
        kind: &'static str,
        id: String,
        target: &'static str,
        reference: String,
    },

    /// Two records of one type share an identifier.
    #[error("duplicate {kind} identifier {id}")]
    DuplicateId { kind: &'static str, id: String },

    /// Two bills name the same table.
    #[error("SeafoodBill {bill} claims table {table}, already held by {holder}")]
    TableAlreadyClaimed {
        bill: String,
        table: String,
        holder: String,
    },

    /// An entity constructor rejected a record.
    #[error("invalid stored record: {0}")]
    Entity(#[from] EntityError),
}

/// Anything that can produce a snapshot.
///
/// The infrastructure implementation reads a TOML file; tests use a mock.
#[cfg_attr(test, mockall::automock)]
pub trait SnapshotSource {
    /// Reads all stored records.
    fn load(&self) -> Result<Snapshot, LoadError>;
}

/// The rehydrated entities.
///
/// Tables that belong to a bill live inside that bill; `tables` only holds
/// tables no bill has claimed.  Likewise `loose_rows` holds rows that name no
/// table.
#[derive(Debug, Default)]
pub struct EntityStore {
    pub countries: BTreeMap<u64, Arc<Country>>,
    pub seafood_types: BTreeMap<u64, Arc<SeafoodType>>,
    pub preservers: BTreeMap<u64, Arc<Preserver>>,
    pub seafood: BTreeMap<String, Arc<Seafood>>,
    pub customers: BTreeMap<String, Arc<Customer>>,
    pub loose_rows: Vec<OrderRow>,
    pub tables: BTreeMap<String, OrderTable>,
    pub bills: BTreeMap<String, SeafoodBill>,
    pub imports: Vec<Arc<ImportSeafood>>,
    pub exports: Vec<Arc<ExportSeafood>>,
}

impl EntityStore {
    /// `(type name, number of entities)` for every kind, for logging.
    pub fn counts(&self) -> Vec<(&'static str, usize)> {
        let attached_tables = self.bills.values().filter(|b| b.table().is_some()).count();
        let rows = self.loose_rows.len()
            + self.tables.values().map(OrderTable::row_count).sum::<usize>()
            + self
                .bills
                .values()
                .filter_map(SeafoodBill::table)
                .map(OrderTable::row_count)
                .sum::<usize>();
        vec![
            (Country::KIND, self.countries.len()),
            (SeafoodType::KIND, self.seafood_types.len()),
            (Preserver::KIND, self.preservers.len()),
            (Seafood::KIND, self.seafood.len()),
            (Customer::KIND, self.customers.len()),
            (OrderRow::KIND, rows),
            (OrderTable::KIND, self.tables.len() + attached_tables),
            (SeafoodBill::KIND, self.bills.len()),
            (ImportSeafood::KIND, self.imports.len()),
            (ExportSeafood::KIND, self.exports.len()),
        ]
    }
}

/// Reads a snapshot from `source` and loads it.
///
/// # Errors
///
/// Returns whatever the source or [`load_snapshot`] reports.
pub fn load_from_source(
    source: &dyn SnapshotSource,
    allocators: &EntityAllocators,
) -> Result<EntityStore, LoadError> {
    let snapshot = source.load()?;
    load_snapshot(snapshot, allocators)
}

/// Synchronizes every allocator and rehydrates every record of `snapshot`.
///
/// On error, allocators synchronized by earlier batches stay advanced.  That
/// is harmless: counters only ever move up.
///
/// # Errors
///
/// - [`LoadError::DanglingReference`] if a record names a missing entity.
/// - [`LoadError::DuplicateId`] if a batch repeats an identifier.
/// - [`LoadError::TableAlreadyClaimed`] if two bills name the same table.
/// - [`LoadError::Entity`] if a constructor rejects a record (bad identifier
///   or date).
pub fn load_snapshot(snapshot: Snapshot, allocators: &EntityAllocators) -> Result<EntityStore, LoadError> {
    let mut store = EntityStore::default();

    store.countries = load_catalog(allocators, &snapshot.countries, |a, id, name| Country::restore(a, id, name))?;
    store.seafood_types =
        load_catalog(allocators, &snapshot.seafood_types, |a, id, name| SeafoodType::restore(a, id, name))?;
    store.preservers = load_catalog(allocators, &snapshot.preservers, |a, id, name| Preserver::restore(a, id, name))?;

    store.seafood = load_seafood(allocators, snapshot.seafood, &store)?;
    store.customers = load_customers(allocators, snapshot.customers, &store)?;

    let pending_rows = load_rows(allocators, snapshot.order_rows, &store)?;
    let (tables, loose_rows) = load_tables(allocators, snapshot.tables, pending_rows)?;
    store.tables = tables;
    store.loose_rows = loose_rows;

    let bills = load_bills(allocators, snapshot.bills, &mut store)?;
    store.bills = bills;
    store.imports = load_imports(allocators, snapshot.imports, &store)?;
    store.exports = load_exports(allocators, snapshot.exports, &store)?;

    Ok(store)
}

// ── Batch synchronization ─────────────────────────────────────────────────────

/// Finds the smallest and largest identifier of a batch and runs the
/// allocator's synchronize hook with them.
///
/// Bounds are chosen by numeric value, so `C09` < `C10`.  Duplicates are
/// detected on the same numeric value.  An empty batch synchronizes with
/// neither bound, which is a no-op.
fn synchronize_batch<'a, E>(
    allocators: &EntityAllocators,
    ids: impl IntoIterator<Item = &'a EntityId<E>>,
) -> Result<(), LoadError>
where
    E: Entity,
    EntityId<E>: 'a + ToString,
{
    let allocator = E::allocator(allocators);
    let mut seen = HashSet::new();
    let mut bounds: Option<((u64, &EntityId<E>), (u64, &EntityId<E>))> = None;

    for id in ids {
        let value = allocator.id_format().parse(id).map_err(|e| {
            warn!("{}: stored identifier {} rejected", E::KIND, id.to_string());
            e
        })?;
        if !seen.insert(value) {
            return Err(LoadError::DuplicateId {
                kind: E::KIND,
                id: id.to_string(),
            });
        }
        bounds = Some(match bounds {
            None => ((value, id), (value, id)),
            Some((lo, hi)) => (
                if value < lo.0 { (value, id) } else { lo },
                if value > hi.0 { (value, id) } else { hi },
            ),
        });
    }

    let (min, max) = match bounds {
        Some(((_, min), (_, max))) => (Some(min), Some(max)),
        None => (None, None),
    };
    allocator.synchronize(min, max)?;
    info!(
        "{}: synchronized {} records, counter at {}",
        E::KIND,
        seen.len(),
        allocator.current()
    );
    Ok(())
}

// ── Reference lookups ─────────────────────────────────────────────────────────

/// Looks up a referenced entity by identifier.
///
/// `kind` and `id` name the referring record for the error message.
fn resolve<K, Q, V>(
    map: &BTreeMap<K, Arc<V>>,
    key: &Q,
    kind: &'static str,
    id: &dyn ToString,
    target: &'static str,
) -> Result<Arc<V>, LoadError>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ToString + ?Sized,
{
    map.get(key).cloned().ok_or_else(|| LoadError::DanglingReference {
        kind,
        id: id.to_string(),
        target,
        reference: key.to_string(),
    })
}

// ── Batches ───────────────────────────────────────────────────────────────────

fn load_catalog<E, F>(
    allocators: &EntityAllocators,
    records: &[NamedRecord],
    restore: F,
) -> Result<BTreeMap<u64, Arc<E>>, LoadError>
where
    E: Entity<Format = seafood_core::Numeric>,
    F: Fn(&EntityAllocators, u64, String) -> Result<E, EntityError>,
{
    synchronize_batch::<E>(allocators, records.iter().map(|r| &r.id))?;
    records
        .iter()
        .map(|r| -> Result<_, LoadError> { Ok((r.id, Arc::new(restore(allocators, r.id, r.name.clone())?))) })
        .collect()
}

fn load_seafood(
    allocators: &EntityAllocators,
    records: Vec<SeafoodRecord>,
    store: &EntityStore,
) -> Result<BTreeMap<String, Arc<Seafood>>, LoadError> {
    synchronize_batch::<Seafood>(allocators, records.iter().map(|r| &r.id))?;

    let mut loaded = BTreeMap::new();
    for record in records {
        let kind = record
            .seafood_type
            .map(|t| resolve(&store.seafood_types, &t, Seafood::KIND, &record.id, SeafoodType::KIND))
            .transpose()?;
        let origin = match record.country {
            Some(c) => Origin::Foreign(resolve(&store.countries, &c, Seafood::KIND, &record.id, Country::KIND)?),
            None => Origin::Domestic,
        };
        let fields = SeafoodFields {
            name: record.name,
            weight: record.weight,
            price: record.price,
            kind,
            origin,
        };
        let seafood = Seafood::restore(allocators, record.id, fields)?;
        loaded.insert(seafood.id().to_string(), Arc::new(seafood));
    }
    Ok(loaded)
}

fn load_customers(
    allocators: &EntityAllocators,
    records: Vec<CustomerRecord>,
    store: &EntityStore,
) -> Result<BTreeMap<String, Arc<Customer>>, LoadError> {
    synchronize_batch::<Customer>(allocators, records.iter().map(|r| &r.id))?;

    let mut loaded = BTreeMap::new();
    for record in records {
        let country = record
            .country
            .map(|c| resolve(&store.countries, &c, Customer::KIND, &record.id, Country::KIND))
            .transpose()?;
        let role = match record.role {
            RoleRecord::Customer => CustomerRole::Customer,
            RoleRecord::Seller => CustomerRole::Seller,
            RoleRecord::Purchaser => CustomerRole::Purchaser {
                purchaser_type: record.purchaser_type.unwrap_or_default(),
            },
        };
        let fields = CustomerFields {
            name: record.name,
            phone: record.phone,
            email: record.email,
            country,
            role,
        };
        let customer = Customer::restore(allocators, record.id, fields)?;
        loaded.insert(customer.id().to_string(), Arc::new(customer));
    }
    Ok(loaded)
}

/// Rehydrates rows; each keeps the table identifier it was stored with.
fn load_rows(
    allocators: &EntityAllocators,
    records: Vec<OrderRowRecord>,
    store: &EntityStore,
) -> Result<Vec<OrderRow>, LoadError> {
    synchronize_batch::<OrderRow>(allocators, records.iter().map(|r| &r.id))?;

    records
        .into_iter()
        .map(|record| -> Result<_, LoadError> {
            let seafood = resolve(&store.seafood, &record.seafood, OrderRow::KIND, &record.id, Seafood::KIND)?;
            Ok(OrderRow::restore(
                allocators,
                record.id,
                seafood,
                record.quantity_kg,
                record.price_per_kg,
                record.table,
            )?)
        })
        .collect()
}

/// Rehydrates tables and moves each pending row into the table it names.
///
/// Returns the tables plus the rows that name no table.
fn load_tables(
    allocators: &EntityAllocators,
    records: Vec<OrderTableRecord>,
    rows: Vec<OrderRow>,
) -> Result<(BTreeMap<String, OrderTable>, Vec<OrderRow>), LoadError> {
    synchronize_batch::<OrderTable>(allocators, records.iter().map(|r| &r.id))?;

    let mut tables = BTreeMap::new();
    for record in records {
        let table = OrderTable::restore(allocators, record.id, record.name)?;
        tables.insert(table.id().to_string(), table);
    }

    let mut loose = Vec::new();
    for row in rows {
        let Some(table_id) = row.table().map(str::to_string) else {
            loose.push(row);
            continue;
        };
        let table = tables
            .get_mut(&table_id)
            .ok_or_else(|| LoadError::DanglingReference {
                kind: OrderRow::KIND,
                id: row.id().to_string(),
                target: OrderTable::KIND,
                reference: table_id.clone(),
            })?;
        if !table.add_row(row) {
            debug!("{table_id}: skipped repeated row");
        }
    }
    Ok((tables, loose))
}

/// Rehydrates bills, moving each claimed table out of `store.tables`.
fn load_bills(
    allocators: &EntityAllocators,
    records: Vec<BillRecord>,
    store: &mut EntityStore,
) -> Result<BTreeMap<String, SeafoodBill>, LoadError> {
    synchronize_batch::<SeafoodBill>(allocators, records.iter().map(|r| &r.id))?;

    let mut loaded = BTreeMap::new();
    // table id -> bill id
    let mut claimed: HashMap<String, String> = HashMap::new();
    for record in records {
        let customer = resolve(&store.customers, &record.customer, SeafoodBill::KIND, &record.id, Customer::KIND)?;
        let mut bill = SeafoodBill::restore(allocators, record.id, record.name, customer)?;
        if let Some(table_id) = record.table {
            let Some(table) = store.tables.remove(&table_id) else {
                return Err(match claimed.remove(&table_id) {
                    Some(holder) => LoadError::TableAlreadyClaimed {
                        bill: bill.id().to_string(),
                        table: table_id,
                        holder,
                    },
                    None => LoadError::DanglingReference {
                        kind: SeafoodBill::KIND,
                        id: bill.id().to_string(),
                        target: OrderTable::KIND,
                        reference: table_id,
                    },
                });
            };
            claimed.insert(table_id, bill.id().to_string());
            bill.attach_table(table);
        }
        loaded.insert(bill.id().to_string(), bill);
    }
    Ok(loaded)
}

/// Resolves the seafood and customer a transaction record refers to.
fn trade_parties(
    store: &EntityStore,
    kind: &'static str,
    id: u64,
    seafood: &str,
    customer: &str,
) -> Result<(Arc<Seafood>, Arc<Customer>), LoadError> {
    Ok((
        resolve(&store.seafood, seafood, kind, &id, Seafood::KIND)?,
        resolve(&store.customers, customer, kind, &id, Customer::KIND)?,
    ))
}

fn load_imports(
    allocators: &EntityAllocators,
    records: Vec<ImportRecord>,
    store: &EntityStore,
) -> Result<Vec<Arc<ImportSeafood>>, LoadError> {
    synchronize_batch::<ImportSeafood>(allocators, records.iter().map(|r| &r.id))?;

    records
        .into_iter()
        .map(|r| -> Result<_, LoadError> {
            let preserver = resolve(&store.preservers, &r.preserver, ImportSeafood::KIND, &r.id, Preserver::KIND)?;
            let (seafood, customer) = trade_parties(store, ImportSeafood::KIND, r.id, &r.seafood, &r.customer)?;
            let details = TradeDetails {
                seafood,
                customer,
                quantity: r.quantity,
                unit_price: r.unit_price,
                date: r.date,
            };
            Ok(Arc::new(ImportSeafood::restore(allocators, r.id, preserver, details)?))
        })
        .collect()
}

fn load_exports(
    allocators: &EntityAllocators,
    records: Vec<ExportRecord>,
    store: &EntityStore,
) -> Result<Vec<Arc<ExportSeafood>>, LoadError> {
    synchronize_batch::<ExportSeafood>(allocators, records.iter().map(|r| &r.id))?;

    records
        .into_iter()
        .map(|r| -> Result<_, LoadError> {
            let (seafood, customer) = trade_parties(store, ExportSeafood::KIND, r.id, &r.seafood, &r.customer)?;
            let details = TradeDetails {
                seafood,
                customer,
                quantity: r.quantity,
                unit_price: r.unit_price,
                date: r.date,
            };
            Ok(Arc::new(ExportSeafood::restore(allocators, r.id, details)?))
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn named(id: u64, name: &str) -> NamedRecord {
        NamedRecord {
            id,
            name: name.to_string(),
        }
    }

    fn customer(id: &str, name: &str) -> CustomerRecord {
        CustomerRecord {
            id: id.to_string(),
            name: name.to_string(),
            phone: "0900000000".to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            country: None,
            role: RoleRecord::Customer,
            purchaser_type: None,
        }
    }

    fn seafood(id: &str, name: &str) -> SeafoodRecord {
        SeafoodRecord {
            id: id.to_string(),
            name: name.to_string(),
            weight: None,
            price: Some(10.0),
            seafood_type: None,
            country: None,
        }
    }

    fn row(id: u64, seafood: &str, table: Option<&str>) -> OrderRowRecord {
        OrderRowRecord {
            id,
            seafood: seafood.to_string(),
            quantity_kg: Some(2.0),
            price_per_kg: Some(10.0),
            table: table.map(str::to_string),
        }
    }

    // ── synchronization ───────────────────────────────────────────────────────

    #[test]
    fn test_fresh_customer_after_load_follows_max_stored_id() {
        // Arrange
        let allocs = EntityAllocators::new();
        let snapshot = Snapshot {
            customers: vec![customer("C12", "Lan"), customer("C03", "Minh"), customer("C09", "Tuan")],
            ..Snapshot::default()
        };

        // Act
        let store = load_snapshot(snapshot, &allocs).expect("load must succeed");
        let fresh = Customer::new(&allocs, CustomerFields {
            name: "Hoa".to_string(),
            phone: String::new(),
            email: String::new(),
            country: None,
            role: CustomerRole::Customer,
        }).unwrap();

        // Assert
        assert_eq!(store.customers.len(), 3);
        assert_eq!(fresh.id(), "C13");
    }

    #[test]
    fn test_batch_bounds_are_numeric_not_lexicographic() {
        let allocs = EntityAllocators::new();
        let snapshot = Snapshot {
            seafood: vec![seafood("S99", "Clam"), seafood("S100", "Crab")],
            ..Snapshot::default()
        };

        load_snapshot(snapshot, &allocs).unwrap();

        assert_eq!(allocs.seafood.current(), 100);
    }

    #[test]
    fn test_empty_snapshot_leaves_counters_at_zero() {
        let allocs = EntityAllocators::new();

        let store = load_snapshot(Snapshot::default(), &allocs).unwrap();

        assert!(allocs.counters().iter().all(|(_, value)| *value == 0));
        assert!(store.counts().iter().all(|(_, count)| *count == 0));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let allocs = EntityAllocators::new();
        let snapshot = Snapshot {
            countries: vec![named(1, "Vietnam"), named(1, "Japan")],
            ..Snapshot::default()
        };

        let result = load_snapshot(snapshot, &allocs);

        assert_eq!(
            result.err(),
            Some(LoadError::DuplicateId {
                kind: "Country",
                id: "1".to_string()
            })
        );
    }

    #[test]
    fn test_malformed_stored_id_is_an_entity_error() {
        let allocs = EntityAllocators::new();
        let snapshot = Snapshot {
            customers: vec![customer("X01", "Lan")],
            ..Snapshot::default()
        };

        let result = load_snapshot(snapshot, &allocs);

        assert_eq!(
            result.err(),
            Some(LoadError::Entity(EntityError::InvalidIdentifier("X01".to_string())))
        );
        assert_eq!(allocs.customers.current(), 0);
    }

    #[test]
    fn test_two_spellings_of_one_id_cannot_both_load() {
        // Arrange – S1 and S01 would both carry numeric id 1
        let allocs = EntityAllocators::new();
        let snapshot = Snapshot {
            seafood: vec![seafood("S01", "Clam"), seafood("S1", "Crab")],
            ..Snapshot::default()
        };

        // Act
        let result = load_snapshot(snapshot, &allocs);

        // Assert
        assert_eq!(
            result.err(),
            Some(LoadError::Entity(EntityError::InvalidIdentifier("S1".to_string())))
        );
        assert_eq!(allocs.seafood.current(), 0);
    }

    // ── references ────────────────────────────────────────────────────────────

    #[test]
    fn test_foreign_seafood_resolves_country() {
        let allocs = EntityAllocators::new();
        let mut salmon = seafood("S01", "Salmon");
        salmon.country = Some(4);
        let snapshot = Snapshot {
            countries: vec![named(4, "Norway")],
            seafood: vec![salmon],
            ..Snapshot::default()
        };

        let store = load_snapshot(snapshot, &allocs).unwrap();

        let loaded = &store.seafood["S01"];
        assert_eq!(loaded.country().map(|c| c.name()), Some("Norway"));
    }

    #[test]
    fn test_missing_reference_is_dangling() {
        let allocs = EntityAllocators::new();
        let snapshot = Snapshot {
            order_rows: vec![row(1, "S07", None)],
            ..Snapshot::default()
        };

        let result = load_snapshot(snapshot, &allocs);

        assert_eq!(
            result.err(),
            Some(LoadError::DanglingReference {
                kind: "OrderRow",
                id: "1".to_string(),
                target: "Seafood",
                reference: "S07".to_string(),
            })
        );
    }

    #[test]
    fn test_rows_tables_and_bills_are_assembled() {
        // Arrange
        let allocs = EntityAllocators::new();
        let snapshot = Snapshot {
            seafood: vec![seafood("S01", "Shrimp")],
            customers: vec![customer("C01", "Lan")],
            order_rows: vec![row(1, "S01", Some("T02")), row(2, "S01", Some("T02")), row(3, "S01", None)],
            tables: vec![
                OrderTableRecord {
                    id: "T02".to_string(),
                    name: Some("Window".to_string()),
                },
                OrderTableRecord {
                    id: "T05".to_string(),
                    name: None,
                },
            ],
            bills: vec![BillRecord {
                id: "B01".to_string(),
                name: "Dinner".to_string(),
                customer: "C01".to_string(),
                table: Some("T02".to_string()),
            }],
            ..Snapshot::default()
        };

        // Act
        let store = load_snapshot(snapshot, &allocs).unwrap();

        // Assert
        let bill = &store.bills["B01"];
        let table = bill.table().expect("T02 attached to B01");
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.bill(), Some("B01"));
        assert_eq!(bill.total(), 40.0);
        assert_eq!(store.tables.keys().collect::<Vec<_>>(), vec!["T05"]);
        assert_eq!(store.loose_rows.len(), 1);
        assert_eq!(allocs.tables.current(), 5);
    }

    #[test]
    fn test_bill_naming_missing_table_is_dangling() {
        let allocs = EntityAllocators::new();
        let snapshot = Snapshot {
            customers: vec![customer("C01", "Lan")],
            bills: vec![BillRecord {
                id: "B01".to_string(),
                name: "Dinner".to_string(),
                customer: "C01".to_string(),
                table: Some("T09".to_string()),
            }],
            ..Snapshot::default()
        };

        let result = load_snapshot(snapshot, &allocs);

        assert!(matches!(
            result,
            Err(LoadError::DanglingReference { target: "OrderTable", .. })
        ));
    }

    #[test]
    fn test_second_bill_claiming_a_held_table_is_rejected() {
        // Arrange – B01 and B02 both name T01
        let allocs = EntityAllocators::new();
        let bill = |id: &str| BillRecord {
            id: id.to_string(),
            name: "Dinner".to_string(),
            customer: "C01".to_string(),
            table: Some("T01".to_string()),
        };
        let snapshot = Snapshot {
            customers: vec![customer("C01", "Lan")],
            tables: vec![OrderTableRecord {
                id: "T01".to_string(),
                name: None,
            }],
            bills: vec![bill("B01"), bill("B02")],
            ..Snapshot::default()
        };

        // Act
        let result = load_snapshot(snapshot, &allocs);

        // Assert
        assert_eq!(
            result.err(),
            Some(LoadError::TableAlreadyClaimed {
                bill: "B02".to_string(),
                table: "T01".to_string(),
                holder: "B01".to_string(),
            })
        );
    }

    // ── transactions ──────────────────────────────────────────────────────────

    #[test]
    fn test_stored_import_with_bad_date_fails() {
        let allocs = EntityAllocators::new();
        let snapshot = Snapshot {
            preservers: vec![named(1, "Frozen")],
            seafood: vec![seafood("S01", "Squid")],
            customers: vec![customer("C01", "Binh")],
            imports: vec![ImportRecord {
                id: 1,
                seafood: "S01".to_string(),
                customer: "C01".to_string(),
                preserver: 1,
                quantity: Some(1.0),
                unit_price: Some(1.0),
                date: "31/02/2024".to_string(),
            }],
            ..Snapshot::default()
        };

        let result = load_snapshot(snapshot, &allocs);

        assert_eq!(
            result.err(),
            Some(LoadError::Entity(EntityError::InvalidDate {
                value: "31/02/2024".to_string()
            }))
        );
    }

    #[test]
    fn test_exports_carry_computed_totals() {
        let allocs = EntityAllocators::new();
        let snapshot = Snapshot {
            seafood: vec![seafood("S01", "Tuna")],
            customers: vec![customer("C02", "Hoa")],
            exports: vec![ExportRecord {
                id: 6,
                seafood: "S01".to_string(),
                customer: "C02".to_string(),
                quantity: Some(3.0),
                unit_price: Some(4.5),
                date: "01/01/2024".to_string(),
            }],
            ..Snapshot::default()
        };

        let store = load_snapshot(snapshot, &allocs).unwrap();

        assert_eq!(store.exports[0].total(), 13.5);
        assert_eq!(allocs.exports.current(), 6);
    }

    // ── sources ───────────────────────────────────────────────────────────────

    #[test]
    fn test_load_from_source_uses_source_snapshot() {
        // Arrange
        let mut source = MockSnapshotSource::new();
        source.expect_load().times(1).returning(|| {
            Ok(Snapshot {
                countries: vec![named(2, "Chile")],
                ..Snapshot::default()
            })
        });
        let allocs = EntityAllocators::new();

        // Act
        let store = load_from_source(&source, &allocs).unwrap();

        // Assert
        assert_eq!(store.countries[&2].name(), "Chile");
        assert_eq!(Country::new(&allocs, "Peru").unwrap().id(), 3);
    }

    #[test]
    fn test_source_failure_is_propagated() {
        let mut source = MockSnapshotSource::new();
        source
            .expect_load()
            .returning(|| Err(LoadError::Source("disk unplugged".to_string())));

        let result = load_from_source(&source, &EntityAllocators::new());

        assert_eq!(result.err(), Some(LoadError::Source("disk unplugged".to_string())));
    }
}
