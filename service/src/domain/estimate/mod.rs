//! [`RoomEstimate`] definitions.

pub mod ingest;

use common::{define_kind, Feet, SquareFeet};
use rust_decimal::Decimal;

pub use self::ingest::ingest;

/// Room measurements and observations estimated from a photo.
///
/// Always fully populated: missing or malformed data is substituted with
/// defaults during [`ingest`]ion.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoomEstimate {
    /// Type of the room, like `Kitchen`.
    pub room_type: String,

    /// Estimated length of the room.
    length: Feet,

    /// Estimated width of the room.
    width: Feet,

    /// Floor area of the room, always equal to `length × width`.
    area: SquareFeet,

    /// Type of the floor currently installed in the room, like `Carpet`.
    pub current_floor_type: String,

    /// [`Condition`] of the current floor.
    pub condition: Condition,

    /// Free-form observations about the room.
    pub notes: String,
}

impl RoomEstimate {
    /// Creates a new [`RoomEstimate`] out of the provided values.
    #[must_use]
    pub fn new(
        room_type: impl Into<String>,
        length: Feet,
        width: Feet,
        current_floor_type: impl Into<String>,
        condition: Condition,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            room_type: room_type.into(),
            length,
            width,
            area: length * width,
            current_floor_type: current_floor_type.into(),
            condition,
            notes: notes.into(),
        }
    }

    /// Returns the estimated length of the room.
    #[must_use]
    pub fn length(&self) -> Feet {
        self.length
    }

    /// Returns the estimated width of the room.
    #[must_use]
    pub fn width(&self) -> Feet {
        self.width
    }

    /// Returns the estimated floor area of the room.
    #[must_use]
    pub fn area(&self) -> SquareFeet {
        self.area
    }

    /// Overwrites the estimated dimensions with the ones provided by the
    /// customer.
    pub fn resize(&mut self, length: Option<Feet>, width: Option<Feet>) {
        if let Some(length) = length {
            self.length = length;
        }
        if let Some(width) = width {
            self.width = width;
        }
        self.area = self.length * self.width;
    }
}

define_kind! {
    #[doc = "Condition of a floor."]
    enum Condition {
        #[doc = "No visible wear."]
        Good = 1,

        #[doc = "Some wear, still serviceable."]
        Fair = 2,

        #[doc = "Heavily worn or damaged."]
        Poor = 3,
    }
}

/// Outcome of analyzing a room photo.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Analysis {
    /// Estimated [`RoomEstimate`].
    pub estimate: RoomEstimate,

    /// Indicator whether the [`estimate`] consists of placeholder values
    /// because the analysis didn't succeed.
    ///
    /// [`estimate`]: Analysis::estimate
    pub is_fallback: bool,
}

impl Analysis {
    /// Placeholder notes of a fallback [`Analysis`].
    pub const FALLBACK_NOTES: &'static str =
        "AI analysis unavailable. Using estimated values. For accurate \
         measurements, please schedule an in-person consultation.";

    /// Returns the placeholder [`Analysis`] used when a photo couldn't be
    /// analyzed.
    #[must_use]
    pub fn fallback() -> Self {
        #[expect(unsafe_code, reason = "positive constants")]
        let (length, width) = unsafe {
            (
                Feet::new_unchecked(Decimal::from(18)),
                Feet::new_unchecked(Decimal::from(14)),
            )
        };
        Self {
            estimate: RoomEstimate::new(
                "Living Room",
                length,
                width,
                "Carpet",
                Condition::Fair,
                Self::FALLBACK_NOTES,
            ),
            is_fallback: true,
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{Feet, SquareFeet};
    use rust_decimal::Decimal;

    use super::{Analysis, Condition};

    #[test]
    fn fallback_values() {
        let Analysis {
            estimate,
            is_fallback,
        } = Analysis::fallback();

        assert!(is_fallback);
        assert_eq!(estimate.room_type, "Living Room");
        assert_eq!(estimate.length(), Feet::new(Decimal::from(18)).unwrap());
        assert_eq!(estimate.width(), Feet::new(Decimal::from(14)).unwrap());
        assert_eq!(
            estimate.area(),
            SquareFeet::new(Decimal::from(252)).unwrap(),
        );
        assert_eq!(estimate.current_floor_type, "Carpet");
        assert_eq!(estimate.condition, Condition::Fair);
        assert_eq!(estimate.notes, Analysis::FALLBACK_NOTES);
    }

    #[test]
    fn customer_edits_recompute_area() {
        let mut estimate = Analysis::fallback().estimate;

        estimate.resize(Some(Feet::new(Decimal::from(20)).unwrap()), None);
        assert_eq!(
            estimate.area(),
            SquareFeet::new(Decimal::from(280)).unwrap(),
        );

        estimate.resize(None, Some(Feet::new(Decimal::from(10)).unwrap()));
        assert_eq!(
            estimate.area(),
            SquareFeet::new(Decimal::from(200)).unwrap(),
        );
    }

    #[test]
    fn condition_parses_exactly() {
        assert_eq!("good".parse::<Condition>().ok(), Some(Condition::Good));
        assert_eq!("poor".parse::<Condition>().ok(), Some(Condition::Poor));
        assert!("excellent".parse::<Condition>().is_err());
        assert!("Good".parse::<Condition>().is_err());
    }
}
