//! [`Quote`]-related definitions.

use common::{Feet, Money, SquareFeet};
use derive_more::{AsRef, Display, From, Into};
use juniper::{
    graphql_object, GraphQLInputObject, GraphQLObject, GraphQLScalar,
};
use service::{
    domain::{self, lead::QuoteSnapshot},
    query,
};

use crate::{
    api::{self, scalar},
    define_error, Context, Error,
};

/// Price quote of a flooring project.
#[derive(Clone, Debug, From, Into)]
pub struct Quote(QuoteSnapshot);

/// Price quote of a flooring project.
#[graphql_object(context = Context)]
impl Quote {
    /// Quoted `Material`, if selected.
    pub fn material(&self) -> Option<api::Material> {
        self.0
            .material
            .as_ref()
            .and_then(domain::Material::find)
            .map(Into::into)
    }

    /// Total floor area quoted.
    pub fn area(&self) -> SquareFeet {
        self.0.area
    }

    /// Price breakdown of this `Quote`.
    pub fn breakdown(&self) -> Breakdown {
        self.0.breakdown.into()
    }
}

/// Price breakdown of a `Quote`.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(name = "QuoteBreakdown")]
pub struct Breakdown {
    /// Cost of the material.
    pub materials: Money,

    /// Cost of the installation labor.
    pub labor: Money,

    /// Cost of the selected `AddOn`s.
    pub add_ons: Money,

    /// Sales tax, charged on the material cost only.
    pub tax: Money,

    /// Grand total.
    pub total: Money,
}

impl From<domain::quote::Breakdown> for Breakdown {
    fn from(b: domain::quote::Breakdown) -> Self {
        let domain::quote::Breakdown {
            materials,
            labor,
            add_ons,
            tax,
            total,
        } = b;
        Self {
            materials,
            labor,
            add_ons,
            tax,
            total,
        }
    }
}

/// Flooring project to quote.
///
/// The floor area is either summed up from the measured `rooms`, or given as
/// an `estimatedArea` from a room photo, but not both. No area at all quotes
/// an empty floor.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct QuoteInput {
    /// Rooms measured by the customer.
    pub rooms: Option<Vec<RoomInput>>,

    /// Area estimated from a room photo.
    pub estimated_area: Option<SquareFeet>,

    /// `Material` to install, if selected.
    pub material: Option<api::material::Id>,

    /// Selected `AddOn`s.
    pub add_ons: Option<Vec<api::add_on::Id>>,
}

impl TryFrom<QuoteInput> for query::Quote {
    type Error = Error;

    fn try_from(input: QuoteInput) -> Result<Self, Self::Error> {
        let QuoteInput {
            rooms,
            estimated_area,
            material,
            add_ons,
        } = input;

        let area = match (rooms, estimated_area) {
            (Some(_), Some(_)) => return Err(AreaError::Ambiguous.into()),
            (Some(rooms), None) => query::quote::AreaSource::Rooms(
                rooms.into_iter().map(Into::into).collect(),
            ),
            (None, Some(area)) => query::quote::AreaSource::Estimated(area),
            (None, None) => query::quote::AreaSource::Rooms(vec![]),
        };

        Ok(Self {
            area,
            material: material.map(Into::into),
            add_ons: add_ons
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
        })
    }
}

/// Room measured by a customer.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct RoomInput {
    /// Name of the room.
    pub name: RoomName,

    /// Length of the room.
    pub length: Feet,

    /// Width of the room.
    pub width: Feet,
}

impl From<RoomInput> for query::quote::MeasuredRoom {
    fn from(input: RoomInput) -> Self {
        let RoomInput {
            name,
            length,
            width,
        } = input;
        Self {
            name: name.into(),
            length,
            width,
        }
    }
}

/// Name of a room, like `Kitchen` or `Master Bedroom`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "RoomName", with = scalar::Via::<domain::room::Name>)]
pub struct RoomName(domain::room::Name);

define_error! {
    enum AreaError {
        #[code = "AMBIGUOUS_AREA"]
        #[status = BAD_REQUEST]
        #[message = "Either `rooms` or `estimatedArea` must be provided, \
                     not both"]
        Ambiguous,
    }
}

#[cfg(test)]
mod spec {
    use service::query;

    use super::{QuoteInput, RoomInput};

    fn input() -> QuoteInput {
        QuoteInput {
            rooms: None,
            estimated_area: None,
            material: Some(
                "luxury-vinyl".parse::<service::domain::material::Id>()
                    .unwrap()
                    .into(),
            ),
            add_ons: None,
        }
    }

    #[test]
    fn rejects_ambiguous_area() {
        let err = query::Quote::try_from(QuoteInput {
            rooms: Some(vec![]),
            estimated_area: Some("120".parse().unwrap()),
            ..input()
        })
        .unwrap_err();

        assert_eq!(err.code, "AMBIGUOUS_AREA");
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn converts_rooms() {
        let quote = query::Quote::try_from(QuoteInput {
            rooms: Some(vec![RoomInput {
                name: "Kitchen"
                    .parse::<service::domain::room::Name>()
                    .unwrap()
                    .into(),
                length: "12".parse().unwrap(),
                width: "10".parse().unwrap(),
            }]),
            add_ons: Some(vec![
                "removal".parse::<service::domain::add_on::Id>()
                    .unwrap()
                    .into(),
            ]),
            ..input()
        })
        .unwrap();

        assert!(matches!(
            &quote.area,
            query::quote::AreaSource::Rooms(rooms) if rooms.len() == 1,
        ));
        assert_eq!(quote.add_ons.len(), 1);
        assert!(quote.material.is_some());
    }

    #[test]
    fn defaults_to_empty_floor() {
        let quote = query::Quote::try_from(input()).unwrap();

        assert!(matches!(
            &quote.area,
            query::quote::AreaSource::Rooms(rooms) if rooms.is_empty(),
        ));
        assert!(quote.add_ons.is_empty());
    }
}
