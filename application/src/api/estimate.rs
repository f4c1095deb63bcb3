//! [`RoomAnalysis`]-related definitions.

use common::{Feet, SquareFeet};
use juniper::{GraphQLEnum, GraphQLObject};
use service::domain;

use crate::define_error;

/// Room estimated from a photo.
#[derive(Clone, Debug, GraphQLObject)]
pub struct RoomAnalysis {
    /// Kind of the room, like `Kitchen`.
    pub room_type: String,

    /// Estimated length of the room.
    pub length: Feet,

    /// Estimated width of the room.
    pub width: Feet,

    /// Estimated floor area of the room.
    pub area: SquareFeet,

    /// Flooring currently installed in the room.
    pub current_floor_type: String,

    /// Condition of the current flooring.
    pub condition: Condition,

    /// Free-form notes about the room.
    pub notes: String,

    /// Indicator whether the photo couldn't be analyzed, so placeholder
    /// values are returned.
    pub is_fallback: bool,
}

impl From<domain::Analysis> for RoomAnalysis {
    fn from(analysis: domain::Analysis) -> Self {
        let domain::Analysis {
            estimate,
            is_fallback,
        } = analysis;
        Self {
            length: estimate.length(),
            width: estimate.width(),
            area: estimate.area(),
            condition: estimate.condition.into(),
            room_type: estimate.room_type,
            current_floor_type: estimate.current_floor_type,
            notes: estimate.notes,
            is_fallback,
        }
    }
}

/// Condition of a floor.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "FloorCondition")]
pub enum Condition {
    /// No visible wear.
    Good,

    /// Some wear, still serviceable.
    Fair,

    /// Heavily worn or damaged.
    Poor,
}

impl From<domain::estimate::Condition> for Condition {
    fn from(condition: domain::estimate::Condition) -> Self {
        use domain::estimate::Condition as C;
        match condition {
            C::Good => Self::Good,
            C::Fair => Self::Fair,
            C::Poor => Self::Poor,
        }
    }
}

define_error! {
    enum ImageError {
        #[code = "NO_IMAGE"]
        #[status = BAD_REQUEST]
        #[message = "No image provided"]
        NoImage,
    }
}

#[cfg(test)]
mod spec {
    use service::domain::Analysis;

    use super::{Condition, RoomAnalysis};

    #[test]
    fn converts_fallback() {
        let analysis = RoomAnalysis::from(Analysis::fallback());

        assert!(analysis.is_fallback);
        assert_eq!(analysis.room_type, "Living Room");
        assert_eq!(analysis.area.to_string(), "252");
        assert!(matches!(analysis.condition, Condition::Fair));
    }
}
