//! [`Room`] definitions.

use common::{Feet, SquareFeet};
use derive_more::{AsRef, Display, From, FromStr, Into};
use uuid::Uuid;

/// Room of a [`Project`] measured by the customer.
///
/// [`Project`]: crate::domain::Project
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Room {
    /// ID of this [`Room`].
    pub id: Id,

    /// [`Name`] of this [`Room`].
    pub name: Name,

    /// Length of this [`Room`].
    length: Feet,

    /// Width of this [`Room`].
    width: Feet,

    /// Floor area of this [`Room`], always equal to `length × width`.
    area: SquareFeet,
}

impl Room {
    /// Creates a new [`Room`] with the provided dimensions.
    #[must_use]
    pub fn new(name: Name, length: Feet, width: Feet) -> Self {
        Self {
            id: Id::new(),
            name,
            length,
            width,
            area: length * width,
        }
    }

    /// Returns the length of this [`Room`].
    #[must_use]
    pub fn length(&self) -> Feet {
        self.length
    }

    /// Returns the width of this [`Room`].
    #[must_use]
    pub fn width(&self) -> Feet {
        self.width
    }

    /// Returns the floor area of this [`Room`].
    #[must_use]
    pub fn area(&self) -> SquareFeet {
        self.area
    }

    /// Changes the provided dimensions of this [`Room`], keeping the omitted
    /// ones as is.
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

/// ID of a [`Room`].
#[derive(
    Clone, Copy, Debug, Display, Eq, From, FromStr, Hash, Into, PartialEq,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

/// Name of a [`Room`], like `Kitchen` or `Master Bedroom`.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 128
    }
}

impl std::str::FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `room::Name`")
    }
}
