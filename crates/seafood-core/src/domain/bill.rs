//! Seafood bills.

use std::fmt;
use std::sync::Arc;

use crate::domain::customer::Customer;
use crate::domain::entity::{identity_by_id, Entity};
use crate::domain::order::OrderTable;
use crate::domain::BillId;
use crate::error::EntityError;
use crate::identity::{EntityAllocators, IdAllocator, Prefixed};

/// A bill issued to a customer.  It owns at most one order table.
#[derive(Debug, Clone)]
pub struct SeafoodBill {
    id: BillId,
    name: String,
    customer: Arc<Customer>,
    table: Option<OrderTable>,
}

impl SeafoodBill {
    /// Creates a bill from form input with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::IdSpaceExhausted`] if the bill sequence has no
    /// identifier left.
    pub fn new(
        allocators: &EntityAllocators,
        name: impl Into<String>,
        customer: Arc<Customer>,
    ) -> Result<Self, EntityError> {
        let id = allocators.bills.allocate(None)?;
        Ok(Self::assemble(id, name.into(), customer))
    }

    /// Rebuilds a stored bill.  The table is attached afterwards with
    /// [`attach_table`](Self::attach_table).
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidIdentifier`] if `id` is not a valid bill
    /// identifier.
    pub fn restore(
        allocators: &EntityAllocators,
        id: BillId,
        name: impl Into<String>,
        customer: Arc<Customer>,
    ) -> Result<Self, EntityError> {
        let id = allocators.bills.allocate(Some(id))?;
        Ok(Self::assemble(id, name.into(), customer))
    }

    fn assemble(id: BillId, name: String, customer: Arc<Customer>) -> Self {
        Self {
            id,
            name,
            customer,
            table: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn customer(&self) -> &Arc<Customer> {
        &self.customer
    }

    pub fn table(&self) -> Option<&OrderTable> {
        self.table.as_ref()
    }

    pub fn table_mut(&mut self) -> Option<&mut OrderTable> {
        self.table.as_mut()
    }

    /// The bill total: the table total, or `0.0` without a table.
    pub fn total(&self) -> f64 {
        self.table.as_ref().map_or(0.0, OrderTable::total)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_customer(&mut self, customer: Arc<Customer>) {
        self.customer = customer;
    }

    /// Attaches `table` to this bill and stamps the bill identifier onto it.
    ///
    /// Any previously attached table is detached and returned.
    pub fn attach_table(&mut self, mut table: OrderTable) -> Option<OrderTable> {
        table.set_bill(Some(self.id.clone()));
        let mut previous = self.table.replace(table);
        if let Some(old) = previous.as_mut() {
            old.set_bill(None);
        }
        previous
    }

    /// Detaches and returns the current table.
    pub fn detach_table(&mut self) -> Option<OrderTable> {
        let mut table = self.table.take()?;
        table.set_bill(None);
        Some(table)
    }
}

impl Entity for SeafoodBill {
    type Format = Prefixed;
    const KIND: &'static str = "SeafoodBill";

    fn allocator(allocators: &EntityAllocators) -> &IdAllocator<Prefixed> {
        &allocators.bills
    }

    fn id(&self) -> &BillId {
        &self.id
    }
}

identity_by_id!(SeafoodBill);

impl fmt::Display for SeafoodBill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bill({}, {}, Customer({})", self.id, self.name, self.customer.id())?;
        if let Some(table) = &self.table {
            write!(f, ", Table({})", table.id())?;
        }
        f.write_str(")")
    }
}
