//! [`Material`]-related definitions.

use common::Money;
use derive_more::{AsRef, Display, From, Into};
use juniper::{GraphQLEnum, GraphQLObject, GraphQLScalar};
use service::domain;

use crate::api::scalar;

/// Flooring material offered for installation.
#[derive(Clone, Debug, GraphQLObject)]
pub struct Material {
    /// Unique identifier of this `Material`.
    pub id: Id,

    /// Human-readable name of this `Material`.
    pub name: String,

    /// Description of this `Material`.
    pub description: String,

    /// Category of this `Material`.
    pub category: Category,

    /// Variant of this `Material` inside its category, like `Oak`.
    pub variant: Option<String>,

    /// Price of this `Material` per square foot.
    pub price_per_sq_ft: Money,

    /// Installation labor price per square foot.
    pub labor_per_sq_ft: Money,

    /// Durability rating from 1 to 5.
    pub durability: i32,

    /// Maintenance effort required by this `Material`.
    pub maintenance: Maintenance,
}

impl From<&domain::Material> for Material {
    fn from(m: &domain::Material) -> Self {
        Self {
            id: m.id.clone().into(),
            name: m.name.clone(),
            description: m.description.clone(),
            category: m.category.into(),
            variant: m.variant.clone(),
            price_per_sq_ft: m.price_per_area,
            labor_per_sq_ft: m.labor_per_area,
            durability: m.durability.rating().into(),
            maintenance: m.maintenance.into(),
        }
    }
}

/// Unique identifier of a `Material`, like `oak-hardwood`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "MaterialId", with = scalar::Via::<domain::material::Id>)]
pub struct Id(domain::material::Id);

/// Category of a `Material`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "MaterialCategory")]
pub enum Category {
    /// Solid hardwood planks.
    Hardwood,

    /// Laminate boards.
    Laminate,

    /// Porcelain or ceramic tiles.
    Tile,

    /// Wall-to-wall carpet.
    Carpet,

    /// Vinyl planks or sheets.
    Vinyl,
}

impl From<domain::material::Category> for Category {
    fn from(category: domain::material::Category) -> Self {
        use domain::material::Category as C;
        match category {
            C::Hardwood => Self::Hardwood,
            C::Laminate => Self::Laminate,
            C::Tile => Self::Tile,
            C::Carpet => Self::Carpet,
            C::Vinyl => Self::Vinyl,
        }
    }
}

/// Maintenance effort required by a `Material`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "MaterialMaintenance")]
pub enum Maintenance {
    /// Occasional cleaning only.
    Low,

    /// Regular care.
    Medium,

    /// Frequent deep cleaning.
    High,
}

impl From<domain::material::Maintenance> for Maintenance {
    fn from(maintenance: domain::material::Maintenance) -> Self {
        use domain::material::Maintenance as M;
        match maintenance {
            M::Low => Self::Low,
            M::Medium => Self::Medium,
            M::High => Self::High,
        }
    }
}
