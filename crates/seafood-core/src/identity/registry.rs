//! The process-wide set of identifier allocators, one per entity type.

use super::allocator::{IdAllocator, Numeric, Prefixed};

/// Prefix letters for the entity types that use text identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPrefixes {
    pub customer: char,
    pub seafood: char,
    pub bill: char,
    pub table: char,
}

impl Default for IdPrefixes {
    fn default() -> Self {
        Self {
            customer: 'C',
            seafood: 'S',
            bill: 'B',
            table: 'T',
        }
    }
}

/// One allocator per entity type.
///
/// Create this once at startup and share it by reference (or `Arc`) with
/// everything that constructs entities.  Sub-kinds share the allocator of
/// their family: domestic and foreign seafood both draw from `seafood`;
/// sellers and purchasers both draw from `customers`.
#[derive(Debug)]
pub struct EntityAllocators {
    pub countries: IdAllocator<Numeric>,
    pub seafood_types: IdAllocator<Numeric>,
    pub preservers: IdAllocator<Numeric>,
    pub seafood: IdAllocator<Prefixed>,
    pub customers: IdAllocator<Prefixed>,
    pub order_rows: IdAllocator<Numeric>,
    pub tables: IdAllocator<Prefixed>,
    pub bills: IdAllocator<Prefixed>,
    pub imports: IdAllocator<Numeric>,
    pub exports: IdAllocator<Numeric>,
    pub seafood_by_name_reports: IdAllocator<Numeric>,
    pub customer_by_name_reports: IdAllocator<Numeric>,
    pub import_by_date_reports: IdAllocator<Numeric>,
    pub export_by_date_reports: IdAllocator<Numeric>,
    pub import_by_price_reports: IdAllocator<Numeric>,
    pub export_by_price_reports: IdAllocator<Numeric>,
}

impl EntityAllocators {
    /// Creates all allocators with the default prefixes.
    pub fn new() -> Self {
        Self::with_prefixes(IdPrefixes::default())
    }

    /// Creates all allocators with custom prefix letters.
    pub fn with_prefixes(prefixes: IdPrefixes) -> Self {
        Self {
            countries: IdAllocator::new("Country", Numeric),
            seafood_types: IdAllocator::new("SeafoodType", Numeric),
            preservers: IdAllocator::new("Preserver", Numeric),
            seafood: IdAllocator::new("Seafood", Prefixed::new(prefixes.seafood)),
            customers: IdAllocator::new("Customer", Prefixed::new(prefixes.customer)),
            order_rows: IdAllocator::new("OrderRow", Numeric),
            tables: IdAllocator::new("OrderTable", Prefixed::new(prefixes.table)),
            bills: IdAllocator::new("SeafoodBill", Prefixed::new(prefixes.bill)),
            imports: IdAllocator::new("ImportSeafood", Numeric),
            exports: IdAllocator::new("ExportSeafood", Numeric),
            seafood_by_name_reports: IdAllocator::new("SeafoodByNameReport", Numeric),
            customer_by_name_reports: IdAllocator::new("CustomerByNameReport", Numeric),
            import_by_date_reports: IdAllocator::new("ImportSeafoodByDateReport", Numeric),
            export_by_date_reports: IdAllocator::new("ExportSeafoodByDateReport", Numeric),
            import_by_price_reports: IdAllocator::new("ImportSeafoodByPriceReport", Numeric),
            export_by_price_reports: IdAllocator::new("ExportSeafoodByPriceReport", Numeric),
        }
    }

    /// Returns `(entity type, counter)` for every stored entity type.
    ///
    /// Report allocators are omitted because reports are never persisted.
    pub fn counters(&self) -> Vec<(&'static str, u64)> {
        let numeric = [
            &self.countries,
            &self.seafood_types,
            &self.preservers,
            &self.order_rows,
            &self.imports,
            &self.exports,
        ];
        let prefixed = [&self.seafood, &self.customers, &self.tables, &self.bills];

        numeric
            .iter()
            .map(|a| (a.kind(), a.current()))
            .chain(prefixed.iter().map(|a| (a.kind(), a.current())))
            .collect()
    }
}

impl Default for EntityAllocators {
    fn default() -> Self {
        Self::new()
    }
}
