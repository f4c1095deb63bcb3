//! [`AddOn`] definitions.

use std::sync::LazyLock;

use common::{define_kind, Money, SquareFeet};
use derive_more::{AsRef, Display};
use rust_decimal::Decimal;

/// Optional service offered on top of a flooring installation.
#[derive(Clone, Debug, PartialEq)]
pub struct AddOn {
    /// ID of this [`AddOn`].
    pub id: Id,

    /// Human-readable name of this [`AddOn`].
    pub name: String,

    /// Description of this [`AddOn`].
    pub description: String,

    /// Price of this [`AddOn`], either flat or per square foot depending on
    /// its [`Pricing`].
    pub unit_price: Money,

    /// [`Pricing`] of this [`AddOn`].
    pub pricing: Pricing,

    /// Indicator whether this [`AddOn`] is selected by the customer.
    selected: bool,
}

impl AddOn {
    /// Indicates whether this [`AddOn`] is selected.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Flips the selection of this [`AddOn`].
    pub fn toggle(&mut self) {
        self.selected = !self.selected;
    }

    /// Sets the selection of this [`AddOn`].
    pub fn select(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Returns the cost of this [`AddOn`] for the provided floor `area`,
    /// regardless of whether it's selected.
    #[must_use]
    pub fn cost(&self, area: SquareFeet) -> Money {
        match self.pricing {
            Pricing::Flat => self.unit_price,
            Pricing::PerArea => self.unit_price * area,
        }
    }
}

/// Returns all the [`AddOn`]s offered, none of them selected.
#[must_use]
pub fn catalog() -> &'static [AddOn] {
    /// Fixed [`AddOn`]s catalog.
    static CATALOG: LazyLock<Vec<AddOn>> = LazyLock::new(|| {
        let add_on =
            |id: &str, name: &str, cents, pricing, description: &str| AddOn {
                id: Id(id.into()),
                name: name.into(),
                description: description.into(),
                unit_price: Money::usd(Decimal::new(cents, 2)),
                pricing,
                selected: false,
            };

        vec![
            add_on(
                "removal",
                "Old Floor Removal",
                150,
                Pricing::PerArea,
                "Professional removal and disposal of existing flooring",
            ),
            add_on(
                "underlayment",
                "Premium Underlayment",
                75,
                Pricing::PerArea,
                "Sound-dampening and moisture-barrier underlayment",
            ),
            add_on(
                "furniture",
                "Furniture Moving",
                25000,
                Pricing::Flat,
                "We'll move and replace your furniture during installation",
            ),
            add_on(
                "baseboards",
                "Baseboard Installation",
                300,
                Pricing::PerArea,
                "New baseboards to complement your new floors",
            ),
        ]
    });

    &CATALOG
}

/// Returns a fresh copy of the [`catalog()`] to be selected from.
#[must_use]
pub fn defaults() -> Vec<AddOn> {
    catalog().to_vec()
}

/// ID of an [`AddOn`], like `removal`.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`] if it identifies an [`AddOn`] from the
    /// [`catalog()`].
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = Self(id.into());
        catalog().iter().any(|a| a.id == id).then_some(id)
    }
}

impl std::str::FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `add_on::Id`")
    }
}

define_kind! {
    #[doc = "Pricing scheme of an [`AddOn`]."]
    enum Pricing {
        #[doc = "Fixed price regardless of the floor area."]
        Flat = 1,

        #[doc = "Price per square foot of the floor area."]
        PerArea = 2,
    }
}

#[cfg(test)]
mod spec {
    use common::{Money, SquareFeet};
    use rust_decimal::Decimal;

    use super::{catalog, defaults, AddOn, Id, Pricing};

    fn find(id: &str) -> AddOn {
        defaults()
            .into_iter()
            .find(|a| a.id == Id::new(id).unwrap())
            .unwrap()
    }

    #[test]
    fn catalog_is_unselected() {
        assert_eq!(catalog().len(), 4);
        assert!(catalog().iter().all(|a| !a.is_selected()));
        assert!(catalog().iter().all(|a| a.unit_price.is_nonnegative()));
    }

    #[test]
    fn toggles_selection() {
        let mut removal = find("removal");
        removal.toggle();
        assert!(removal.is_selected());
        removal.toggle();
        assert!(!removal.is_selected());
        removal.select(true);
        assert!(removal.is_selected());

        assert!(catalog().iter().all(|a| !a.is_selected()));
    }

    #[test]
    fn costs_by_pricing() {
        let area = SquareFeet::new(Decimal::from(200)).unwrap();

        let furniture = find("furniture");
        assert_eq!(furniture.pricing, Pricing::Flat);
        assert_eq!(furniture.cost(area), Money::usd(Decimal::from(250)));
        assert_eq!(
            furniture.cost(SquareFeet::ZERO),
            Money::usd(Decimal::from(250)),
        );

        let removal = find("removal");
        assert_eq!(removal.pricing, Pricing::PerArea);
        assert_eq!(removal.cost(area), Money::usd(Decimal::from(300)));
        assert_eq!(
            removal.cost(SquareFeet::ZERO),
            Money::usd(Decimal::ZERO),
        );
    }

    #[test]
    fn only_catalog_ids_are_valid() {
        assert!(Id::new("baseboards").is_some());
        assert!(Id::new("carpet-cleaning").is_none());
        assert!("".parse::<Id>().is_err());
    }
}
