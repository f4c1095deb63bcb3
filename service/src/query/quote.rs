//! [`Query`] computing a price [`Breakdown`].

use common::{Feet, SquareFeet};
use derive_more::{Display, Error};
use tracerr::Traced;

use crate::{
    domain::{
        add_on,
        lead::QuoteSnapshot,
        material,
        project::Flow,
        quote::Breakdown,
        room, Material, Project,
    },
    Service,
};

use super::Query;

/// [`Query`] computing a price [`Breakdown`] of a flooring project.
///
/// Prices are always taken from the catalogs, so any total computed by a
/// client is never trusted.
#[derive(Clone, Debug)]
pub struct Quote {
    /// [`AreaSource`] of the floor area to quote.
    pub area: AreaSource,

    /// ID of the [`Material`] to install, if selected already.
    pub material: Option<material::Id>,

    /// IDs of the selected [`AddOn`]s.
    ///
    /// [`AddOn`]: crate::domain::AddOn
    pub add_ons: Vec<add_on::Id>,
}

/// Source of a floor area to quote.
#[derive(Clone, Debug)]
pub enum AreaSource {
    /// [`MeasuredRoom`]s summed up.
    Rooms(Vec<MeasuredRoom>),

    /// Area estimated from a room photo.
    Estimated(SquareFeet),
}

/// Room measured by a customer.
#[derive(Clone, Debug)]
pub struct MeasuredRoom {
    /// [`room::Name`] of the room.
    pub name: room::Name,

    /// Length of the room.
    pub length: Feet,

    /// Width of the room.
    pub width: Feet,
}

impl Quote {
    /// Computes the [`QuoteSnapshot`] of this [`Quote`].
    ///
    /// # Errors
    ///
    /// If the selected [`Material`] doesn't exist.
    pub fn snapshot(&self) -> Result<QuoteSnapshot, ExecutionError> {
        use ExecutionError as E;

        let material = self
            .material
            .as_ref()
            .map(|id| {
                Material::find(id)
                    .ok_or_else(|| E::MaterialNotExists(id.clone()))
            })
            .transpose()?;

        let mut project = Project::new(Flow::Manual);
        project.select_material(material);
        for id in &self.add_ons {
            let selected = project
                .add_ons()
                .iter()
                .any(|a| a.id == *id && a.is_selected());
            if !selected {
                _ = project.toggle_add_on(id);
            }
        }

        let (area, breakdown) = match &self.area {
            AreaSource::Rooms(rooms) => {
                for r in rooms {
                    _ = project.add_room(r.name.clone(), r.length, r.width);
                }
                (project.area(), project.quote())
            }
            AreaSource::Estimated(area) => {
                let breakdown = Breakdown::compute(
                    *area,
                    project.material(),
                    project.add_ons(),
                );
                (*area, breakdown)
            }
        };

        Ok(QuoteSnapshot {
            material: self.material.clone(),
            area,
            breakdown,
        })
    }
}

impl<Db, Ai> Query<Quote> for Service<Db, Ai> {
    type Ok = QuoteSnapshot;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: Quote) -> Result<Self::Ok, Self::Err> {
        query.snapshot().map_err(tracerr::wrap!())
    }
}

/// Error of [`Quote`] [`Query`] execution.
#[derive(Debug, Display, Error)]
pub enum ExecutionError {
    /// [`Material`] doesn't exist.
    #[display("`Material(id: {_0})` does not exist")]
    MaterialNotExists(#[error(not(source))] material::Id),
}
