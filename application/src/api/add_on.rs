//! [`AddOn`]-related definitions.

use common::Money;
use derive_more::{AsRef, Display, From, Into};
use juniper::{GraphQLEnum, GraphQLObject, GraphQLScalar};
use service::domain;

use crate::api::scalar;

/// Optional service offered on top of a flooring installation.
#[derive(Clone, Debug, GraphQLObject)]
pub struct AddOn {
    /// Unique identifier of this `AddOn`.
    pub id: Id,

    /// Human-readable name of this `AddOn`.
    pub name: String,

    /// Description of this `AddOn`.
    pub description: String,

    /// Price of this `AddOn`, either flat or per square foot depending on
    /// its `pricing`.
    pub price: Money,

    /// Pricing scheme of this `AddOn`.
    pub pricing: Pricing,
}

impl From<&domain::AddOn> for AddOn {
    fn from(a: &domain::AddOn) -> Self {
        Self {
            id: a.id.clone().into(),
            name: a.name.clone(),
            description: a.description.clone(),
            price: a.unit_price,
            pricing: a.pricing.into(),
        }
    }
}

/// Unique identifier of an `AddOn`, like `removal`.
///
/// Only identifiers of the offered `AddOn`s are accepted.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "AddOnId", with = scalar::Via::<domain::add_on::Id>)]
pub struct Id(domain::add_on::Id);

/// Pricing scheme of an `AddOn`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "AddOnPricing")]
pub enum Pricing {
    /// Fixed price regardless of the floor area.
    Flat,

    /// Price per square foot of the floor area.
    PerSqFt,
}

impl From<domain::add_on::Pricing> for Pricing {
    fn from(pricing: domain::add_on::Pricing) -> Self {
        use domain::add_on::Pricing as P;
        match pricing {
            P::Flat => Self::Flat,
            P::PerArea => Self::PerSqFt,
        }
    }
}
