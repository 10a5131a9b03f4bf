//! Customers, sellers and purchasers.

use std::fmt;
use std::sync::Arc;

use crate::domain::catalog::Country;
use crate::domain::entity::{identity_by_id, Entity};
use crate::domain::CustomerId;
use crate::error::EntityError;
use crate::identity::{EntityAllocators, IdAllocator, Prefixed};

/// The role a customer plays in trade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerRole {
    /// A plain customer.
    Customer,
    /// Sells seafood to the business.
    Seller,
    /// Buys seafood from the business, e.g. a "Restaurant" or "Wholesaler".
    Purchaser { purchaser_type: String },
}

impl CustomerRole {
    fn label(&self) -> &'static str {
        match self {
            CustomerRole::Customer => "Customer",
            CustomerRole::Seller => "Seller",
            CustomerRole::Purchaser { .. } => "Purchaser",
        }
    }
}

/// User-supplied fields of a customer.
#[derive(Debug, Clone)]
pub struct CustomerFields {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub country: Option<Arc<Country>>,
    pub role: CustomerRole,
}

/// A customer.  All roles share one identifier sequence (`C01`, `C02`, …).
#[derive(Debug, Clone)]
pub struct Customer {
    id: CustomerId,
    name: String,
    phone: String,
    email: String,
    country: Option<Arc<Country>>,
    role: CustomerRole,
}

impl Customer {
    /// Creates a customer from form input with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::IdSpaceExhausted`] if the customer sequence has no
    /// identifier left.
    pub fn new(allocators: &EntityAllocators, fields: CustomerFields) -> Result<Self, EntityError> {
        Self::init(allocators, None, fields)
    }

    /// Rebuilds a stored customer.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidIdentifier`] if `id` is not a valid
    /// customer identifier.
    pub fn restore(
        allocators: &EntityAllocators,
        id: CustomerId,
        fields: CustomerFields,
    ) -> Result<Self, EntityError> {
        Self::init(allocators, Some(id), fields)
    }

    fn init(
        allocators: &EntityAllocators,
        id: Option<CustomerId>,
        fields: CustomerFields,
    ) -> Result<Self, EntityError> {
        let id = allocators.customers.allocate(id)?;
        Ok(Self::assemble(id, fields))
    }

    fn assemble(id: CustomerId, fields: CustomerFields) -> Self {
        Self {
            id,
            name: fields.name,
            phone: fields.phone,
            email: fields.email,
            country: fields.country,
            role: fields.role,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn country(&self) -> Option<&Arc<Country>> {
        self.country.as_ref()
    }

    pub fn role(&self) -> &CustomerRole {
        &self.role
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_country(&mut self, country: Option<Arc<Country>>) {
        self.country = country;
    }

    /// Changes the purchaser type.  Has no effect on other roles.
    pub fn set_purchaser_type(&mut self, value: impl Into<String>) {
        if let CustomerRole::Purchaser { purchaser_type } = &mut self.role {
            *purchaser_type = value.into();
        }
    }
}

impl Entity for Customer {
    type Format = Prefixed;
    const KIND: &'static str = "Customer";

    fn allocator(allocators: &EntityAllocators) -> &IdAllocator<Prefixed> {
        &allocators.customers
    }

    fn id(&self) -> &CustomerId {
        &self.id
    }
}

identity_by_id!(Customer);

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({},{},{}", self.role.label(), self.id, self.name, self.phone)?;
        match &self.country {
            Some(country) => write!(f, ",{country}")?,
            None => f.write_str(",-")?,
        }
        write!(f, ",{}", self.email)?;
        if let CustomerRole::Purchaser { purchaser_type } = &self.role {
            write!(f, ",{purchaser_type}")?;
        }
        f.write_str(")")
    }
}
