//! [`Material`] definitions.

use std::sync::LazyLock;

use common::{define_kind, Money};
use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use rust_decimal::Decimal;

/// Flooring material offered for installation.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// ID of this [`Material`].
    pub id: Id,

    /// Human-readable name of this [`Material`].
    pub name: String,

    /// Description of this [`Material`].
    pub description: String,

    /// [`Category`] of this [`Material`].
    pub category: Category,

    /// Variant of this [`Material`] inside its [`Category`], if any.
    pub variant: Option<String>,

    /// Price of this [`Material`] per square foot.
    pub price_per_area: Money,

    /// Installation labor price per square foot.
    pub labor_per_area: Money,

    /// [`Durability`] of this [`Material`].
    pub durability: Durability,

    /// [`Maintenance`] effort required by this [`Material`].
    pub maintenance: Maintenance,
}

impl Material {
    /// Looks up a [`Material`] in the [`catalog()`] by its [`Id`].
    #[must_use]
    pub fn find(id: &Id) -> Option<&'static Self> {
        catalog().iter().find(|m| m.id == *id)
    }
}

/// Returns all the [`Material`]s available for installation.
#[must_use]
pub fn catalog() -> &'static [Material] {
    /// Fixed [`Material`]s catalog.
    static CATALOG: LazyLock<Vec<Material>> = LazyLock::new(|| {
        let usd = |cents| Money::usd(Decimal::new(cents, 2));
        let material = |id: &str,
                        name: &str,
                        category,
                        variant: Option<&str>,
                        (price, labor),
                        durability,
                        maintenance,
                        description: &str| Material {
            id: Id(id.into()),
            name: name.into(),
            description: description.into(),
            category,
            variant: variant.map(Into::into),
            price_per_area: usd(price),
            labor_per_area: usd(labor),
            durability: Durability(durability),
            maintenance,
        };

        vec![
            material(
                "oak-hardwood",
                "Classic Oak",
                Category::Hardwood,
                Some("Oak"),
                (850, 400),
                4,
                Maintenance::Medium,
                "Timeless American oak with beautiful grain patterns. \
                 Adds warmth and value to any home.",
            ),
            material(
                "walnut-hardwood",
                "Rich Walnut",
                Category::Hardwood,
                Some("Walnut"),
                (1200, 450),
                4,
                Maintenance::Medium,
                "Premium American walnut with deep, rich tones. \
                 The ultimate in luxury flooring.",
            ),
            material(
                "maple-hardwood",
                "Light Maple",
                Category::Hardwood,
                Some("Maple"),
                (900, 400),
                5,
                Maintenance::Medium,
                "Bright, clean maple that makes spaces feel larger and more \
                 inviting.",
            ),
            material(
                "premium-laminate",
                "Premium Laminate",
                Category::Laminate,
                None,
                (350, 250),
                4,
                Maintenance::Low,
                "High-quality laminate with realistic wood textures. \
                 Water-resistant and durable.",
            ),
            material(
                "porcelain-tile",
                "Porcelain Tile",
                Category::Tile,
                Some("Porcelain"),
                (600, 800),
                5,
                Maintenance::Low,
                "Elegant porcelain tiles. Perfect for kitchens, bathrooms, \
                 and high-traffic areas.",
            ),
            material(
                "ceramic-tile",
                "Ceramic Tile",
                Category::Tile,
                Some("Ceramic"),
                (400, 700),
                4,
                Maintenance::Low,
                "Classic ceramic tiles available in endless colors and \
                 patterns.",
            ),
            material(
                "plush-carpet",
                "Plush Carpet",
                Category::Carpet,
                None,
                (450, 150),
                3,
                Maintenance::High,
                "Soft, luxurious carpet that adds comfort and warmth to \
                 bedrooms and living spaces.",
            ),
            material(
                "luxury-vinyl",
                "Luxury Vinyl Plank",
                Category::Vinyl,
                None,
                (500, 200),
                4,
                Maintenance::Low,
                "Waterproof LVP with authentic wood looks. Ideal for any room \
                 including basements.",
            ),
        ]
    });

    &CATALOG
}

/// ID of a [`Material`], like `oak-hardwood`.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// Checks whether the given `id` is a valid [`Id`].
    fn check(id: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Id`] format: lowercase words
        /// separated by single hyphens.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid regex")
        });

        let id = id.as_ref();
        id.len() <= 64 && REGEX.is_match(id)
    }
}

impl std::str::FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `material::Id`")
    }
}

define_kind! {
    #[doc = "Category of a [`Material`]."]
    enum Category {
        #[doc = "Solid hardwood planks."]
        Hardwood = 1,

        #[doc = "Laminate boards."]
        Laminate = 2,

        #[doc = "Porcelain or ceramic tiles."]
        Tile = 3,

        #[doc = "Wall-to-wall carpet."]
        Carpet = 4,

        #[doc = "Vinyl planks or sheets."]
        Vinyl = 5,
    }
}

define_kind! {
    #[doc = "Maintenance effort required by a [`Material`]."]
    enum Maintenance {
        #[doc = "Occasional cleaning only."]
        Low = 1,

        #[doc = "Regular care."]
        Medium = 2,

        #[doc = "Frequent deep cleaning."]
        High = 3,
    }
}

/// Durability rating of a [`Material`] in the `[1, 5]` range.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Durability(u8);

impl Durability {
    /// Lowest possible [`Durability`].
    pub const MIN: u8 = 1;

    /// Highest possible [`Durability`].
    pub const MAX: u8 = 5;

    /// Creates a new [`Durability`] if the provided rating is in range.
    #[must_use]
    pub fn new(rating: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&rating)
            .then_some(Self(rating))
    }

    /// Returns the rating of this [`Durability`].
    #[must_use]
    pub const fn rating(self) -> u8 {
        self.0
    }
}
