//! [`Query`] collection related to multiple [`AddOn`]s.

use std::convert::Infallible;

use crate::{
    domain::{add_on, AddOn},
    Service,
};

use super::Query;

/// Queries all the offered [`AddOn`]s, none of them selected.
#[derive(Clone, Copy, Debug, Default)]
pub struct List;

impl<Db, Ai> Query<List> for Service<Db, Ai> {
    type Ok = &'static [AddOn];
    type Err = Infallible;

    async fn execute(&self, _: List) -> Result<Self::Ok, Self::Err> {
        Ok(add_on::catalog())
    }
}
