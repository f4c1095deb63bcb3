//! [`Query`] collection related to multiple [`Material`]s.

use std::convert::Infallible;

use crate::{
    domain::{material, Material},
    Service,
};

use super::Query;

/// Queries all the [`Material`]s available for installation.
#[derive(Clone, Copy, Debug, Default)]
pub struct List;

impl<Db, Ai> Query<List> for Service<Db, Ai> {
    type Ok = &'static [Material];
    type Err = Infallible;

    async fn execute(&self, _: List) -> Result<Self::Ok, Self::Err> {
        Ok(material::catalog())
    }
}
