//! GraphQL API definitions.

pub mod add_on;
pub mod estimate;
pub mod lead;
pub mod material;
mod mutation;
pub mod query;
pub mod quote;
pub mod scalar;

use juniper::EmptySubscription;

use crate::Context;

pub use self::{
    add_on::AddOn,
    estimate::RoomAnalysis,
    lead::Lead,
    material::Material,
    mutation::Mutation,
    query::Query,
    quote::Quote,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

