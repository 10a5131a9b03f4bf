//! Seafood items, domestic or foreign.

use std::fmt;
use std::sync::Arc;

use crate::domain::catalog::{Country, SeafoodType};
use crate::domain::entity::{identity_by_id, Entity};
use crate::domain::SeafoodId;
use crate::error::EntityError;
use crate::identity::{EntityAllocators, IdAllocator, Prefixed};

/// Where a seafood item comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    Domestic,
    /// Imported from the given country.
    Foreign(Arc<Country>),
}

/// User-supplied fields of a seafood item.
#[derive(Debug, Clone)]
pub struct SeafoodFields {
    pub name: String,
    /// Weight in kilos.
    pub weight: Option<f64>,
    /// Price per kilo.
    pub price: Option<f64>,
    pub kind: Option<Arc<SeafoodType>>,
    pub origin: Origin,
}

impl SeafoodFields {
    /// Domestic item with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight: None,
            price: None,
            kind: None,
            origin: Origin::Domestic,
        }
    }
}

/// A seafood item.  Domestic and foreign items share one identifier
/// sequence (`S01`, `S02`, …).
#[derive(Debug, Clone)]
pub struct Seafood {
    id: SeafoodId,
    name: String,
    weight: Option<f64>,
    price: Option<f64>,
    kind: Option<Arc<SeafoodType>>,
    origin: Origin,
}

impl Seafood {
    /// Creates a seafood item from form input with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::IdSpaceExhausted`] if the seafood sequence has no
    /// identifier left.
    pub fn new(allocators: &EntityAllocators, fields: SeafoodFields) -> Result<Self, EntityError> {
        Self::init(allocators, None, fields)
    }

    /// Rebuilds a stored seafood item.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::InvalidIdentifier`] if `id` is not a valid
    /// seafood identifier.
    pub fn restore(
        allocators: &EntityAllocators,
        id: SeafoodId,
        fields: SeafoodFields,
    ) -> Result<Self, EntityError> {
        Self::init(allocators, Some(id), fields)
    }

    fn init(
        allocators: &EntityAllocators,
        id: Option<SeafoodId>,
        fields: SeafoodFields,
    ) -> Result<Self, EntityError> {
        let id = allocators.seafood.allocate(id)?;
        Ok(Self::assemble(id, fields))
    }

    fn assemble(id: SeafoodId, fields: SeafoodFields) -> Self {
        Self {
            id,
            name: fields.name,
            weight: fields.weight,
            price: fields.price,
            kind: fields.kind,
            origin: fields.origin,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }

    pub fn kind(&self) -> Option<&Arc<SeafoodType>> {
        self.kind.as_ref()
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// The country of a foreign item; `None` for domestic items.
    pub fn country(&self) -> Option<&Arc<Country>> {
        match &self.origin {
            Origin::Foreign(country) => Some(country),
            Origin::Domestic => None,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_weight(&mut self, weight: Option<f64>) {
        self.weight = weight;
    }

    pub fn set_price(&mut self, price: Option<f64>) {
        self.price = price;
    }

    pub fn set_kind(&mut self, kind: Option<Arc<SeafoodType>>) {
        self.kind = kind;
    }

    /// Changes the country of a foreign item.  Has no effect on domestic items.
    pub fn set_country(&mut self, country: Arc<Country>) {
        if let Origin::Foreign(current) = &mut self.origin {
            *current = country;
        }
    }
}

impl Entity for Seafood {
    type Format = Prefixed;
    const KIND: &'static str = "Seafood";

    fn allocator(allocators: &EntityAllocators) -> &IdAllocator<Prefixed> {
        &allocators.seafood
    }

    fn id(&self) -> &SeafoodId {
        &self.id
    }
}

identity_by_id!(Seafood);

impl fmt::Display for Seafood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.origin {
            Origin::Domestic => "DomesticSeafood",
            Origin::Foreign(_) => "ForeignSeafood",
        };
        write!(f, "{label}({}, {}", self.id, self.name)?;
        if let Some(weight) = self.weight {
            write!(f, ", {weight}kg")?;
        }
        if let Some(price) = self.price {
            write!(f, ", {price}/kg")?;
        }
        if let Some(kind) = &self.kind {
            write!(f, ", {kind}")?;
        }
        if let Origin::Foreign(country) = &self.origin {
            write!(f, ", from {country}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domestic_and_foreign_share_one_sequence() {
        // Arrange
        let allocs = EntityAllocators::new();
        let norway = Arc::new(Country::new(&allocs, "Norway").unwrap());

        // Act
        let shrimp = Seafood::new(&allocs, SeafoodFields::named("Shrimp")).unwrap();
        let salmon = Seafood::new(
            &allocs,
            SeafoodFields {
                origin: Origin::Foreign(Arc::clone(&norway)),
                ..SeafoodFields::named("Salmon")
            },
        ).unwrap();

        // Assert
        assert_eq!(shrimp.id(), "S01");
        assert_eq!(salmon.id(), "S02");
        assert_eq!(salmon.country(), Some(&norway));
        assert!(shrimp.country().is_none());
    }

    #[test]
    fn test_restore_keeps_id_and_advances_sequence() {
        let allocs = EntityAllocators::new();

        let stored = Seafood::restore(&allocs, "S14".to_string(), SeafoodFields::named("Crab")).unwrap();
        let fresh = Seafood::new(&allocs, SeafoodFields::named("Squid")).unwrap();

        assert_eq!(stored.id(), "S14");
        assert_eq!(fresh.id(), "S15");
    }

    #[test]
    fn test_restore_rejects_foreign_prefix() {
        let allocs = EntityAllocators::new();

        let result = Seafood::restore(&allocs, "C01".to_string(), SeafoodFields::named("Crab"));

        assert!(matches!(result, Err(EntityError::InvalidIdentifier(_))));
        assert_eq!(allocs.seafood.current(), 0);
    }

    #[test]
    fn test_display_lists_set_fields() {
        let allocs = EntityAllocators::new();
        let shellfish = Arc::new(SeafoodType::new(&allocs, "Shellfish").unwrap());
        let lobster = Seafood::new(
            &allocs,
            SeafoodFields {
                weight: Some(1.5),
                price: Some(40.0),
                kind: Some(shellfish),
                ..SeafoodFields::named("Lobster")
            },
        ).unwrap();

        assert_eq!(lobster.to_string(), "DomesticSeafood(S01, Lobster, 1.5kg, 40/kg, Shellfish)");
    }

    #[test]
    fn test_set_country_ignores_domestic_items() {
        let allocs = EntityAllocators::new();
        let mut shrimp = Seafood::new(&allocs, SeafoodFields::named("Shrimp")).unwrap();

        shrimp.set_country(Arc::new(Country::new(&allocs, "Peru").unwrap()));

        assert_eq!(shrimp.origin(), &Origin::Domestic);
    }
}
