//! Report entities.
//!
//! A report holds one query input and a derived output: the records matching
//! that input and their count.  Reports do not read storage themselves; the
//! caller passes the candidate records to [`Report::run`] or
//! [`Report::set_query`] and the report keeps the ones that match.
//!
//! ```text
//! let mut report = SeafoodByNameReport::new(&allocs, NameQuery::new("sal"), &seafood).unwrap();
//! report.count();                                  // matches for "sal"
//! report.set_query(NameQuery::new("crab"), &seafood);
//! ```
//!
//! Each report kind draws identifiers from its own numeric allocator.

pub mod query;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::domain::customer::Customer;
use crate::domain::entity::Entity;
use crate::domain::seafood::Seafood;
use crate::domain::transaction::{ExportSeafood, ImportSeafood};
use crate::domain::NumericId;
use crate::error::EntityError;
use crate::identity::{EntityAllocators, IdAllocator, Numeric};

pub use query::{DateQuery, NameQuery, Named, PriceQuery, Traded};

/// The input of one report kind.
pub trait ReportQuery: fmt::Display {
    /// The record type this query filters.
    type Subject: fmt::Debug;

    /// Report name, used in logs and `Display`.
    const REPORT: &'static str;

    /// Selects this report kind's allocator from the registry.
    fn allocator(allocators: &EntityAllocators) -> &IdAllocator<Numeric>;

    fn is_match(&self, subject: &Self::Subject) -> bool;
}

macro_rules! report_kind {
    ($query:ty, $subject:ty, $report:literal, $field:ident) => {
        impl ReportQuery for $query {
            type Subject = $subject;
            const REPORT: &'static str = $report;

            fn allocator(allocators: &EntityAllocators) -> &IdAllocator<Numeric> {
                &allocators.$field
            }

            fn is_match(&self, subject: &Self::Subject) -> bool {
                self.matches(subject)
            }
        }
    };
}

report_kind!(NameQuery<Seafood>, Seafood, "SeafoodByNameReport", seafood_by_name_reports);
report_kind!(NameQuery<Customer>, Customer, "CustomerByNameReport", customer_by_name_reports);
report_kind!(DateQuery<ImportSeafood>, ImportSeafood, "ImportSeafoodByDateReport", import_by_date_reports);
report_kind!(DateQuery<ExportSeafood>, ExportSeafood, "ExportSeafoodByDateReport", export_by_date_reports);
report_kind!(PriceQuery<ImportSeafood>, ImportSeafood, "ImportSeafoodByPriceReport", import_by_price_reports);
report_kind!(PriceQuery<ExportSeafood>, ExportSeafood, "ExportSeafoodByPriceReport", export_by_price_reports);

/// Seafood whose name contains the input, ignoring case.
pub type SeafoodByNameReport = Report<NameQuery<Seafood>>;
/// Customers whose name contains the input, ignoring case.
pub type CustomerByNameReport = Report<NameQuery<Customer>>;
/// Imports on the input date.
pub type ImportByDateReport = Report<DateQuery<ImportSeafood>>;
/// Exports on the input date.
pub type ExportByDateReport = Report<DateQuery<ExportSeafood>>;
/// Imports at the input unit price.
pub type ImportByPriceReport = Report<PriceQuery<ImportSeafood>>;
/// Exports at the input unit price.
pub type ExportByPriceReport = Report<PriceQuery<ExportSeafood>>;

/// A query plus the records that matched it on the last run.
#[derive(Debug, Clone)]
pub struct Report<Q: ReportQuery> {
    id: NumericId,
    query: Q,
    results: Vec<Arc<Q::Subject>>,
}

impl<Q: ReportQuery> Report<Q> {
    /// Creates a report with a fresh identifier and runs it once.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::IdSpaceExhausted`] if the report sequence has
    /// no identifier left.
    pub fn new<'a, I>(allocators: &EntityAllocators, query: Q, candidates: I) -> Result<Self, EntityError>
    where
        I: IntoIterator<Item = &'a Arc<Q::Subject>>,
        Q::Subject: 'a,
    {
        let id = Q::allocator(allocators).allocate(None)?;
        let mut report = Self {
            id,
            query,
            results: Vec::new(),
        };
        report.run(candidates);
        Ok(report)
    }

    pub fn id(&self) -> NumericId {
        self.id
    }

    pub fn query(&self) -> &Q {
        &self.query
    }

    /// Records that matched on the last run.
    pub fn results(&self) -> &[Arc<Q::Subject>] {
        &self.results
    }

    /// Number of matched records.
    pub fn count(&self) -> usize {
        self.results.len()
    }

    /// Re-evaluates the query against `candidates`; returns the new count.
    pub fn run<'a, I>(&mut self, candidates: I) -> usize
    where
        I: IntoIterator<Item = &'a Arc<Q::Subject>>,
        Q::Subject: 'a,
    {
        self.results = candidates
            .into_iter()
            .filter(|c| self.query.is_match(c))
            .cloned()
            .collect();
        self.results.len()
    }

    /// Replaces the input and re-runs; returns the new count.
    pub fn set_query<'a, I>(&mut self, query: Q, candidates: I) -> usize
    where
        I: IntoIterator<Item = &'a Arc<Q::Subject>>,
        Q::Subject: 'a,
    {
        self.query = query;
        self.run(candidates)
    }
}

impl<Q: ReportQuery> Entity for Report<Q> {
    type Format = Numeric;
    const KIND: &'static str = Q::REPORT;

    fn allocator(allocators: &EntityAllocators) -> &IdAllocator<Numeric> {
        Q::allocator(allocators)
    }

    fn id(&self) -> &NumericId {
        &self.id
    }
}

impl<Q: ReportQuery> PartialEq for Report<Q> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<Q: ReportQuery> Eq for Report<Q> {}

impl<Q: ReportQuery> Hash for Report<Q> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<Q: ReportQuery> fmt::Display for Report<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {}, {} matches)", Q::REPORT, self.id, self.query, self.results.len())
    }
}
