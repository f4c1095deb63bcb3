//! Quote pricing definitions.
//!
//! Everything here is a pure function of its inputs: no rounding is applied,
//! amounts are kept exact until presented.

use common::{money::Currency, Money, Percent, SquareFeet};
use rust_decimal::Decimal;

use super::{AddOn, Material, Room};

/// Sales tax rate applied to [`Subtotal::materials`] only.
#[expect(unsafe_code, reason = "constant within bounds")]
pub const TAX_RATE: Percent =
    unsafe { Percent::new_unchecked(Decimal::from_parts(8, 0, 0, false, 0)) };

/// Returns the total floor area of the provided [`Room`]s.
#[must_use]
pub fn total_area<'r>(rooms: impl IntoIterator<Item = &'r Room>) -> SquareFeet {
    rooms.into_iter().map(Room::area).sum()
}

/// Returns the tax charged for the provided `materials` cost.
#[must_use]
pub fn tax(materials: Money) -> Money {
    materials * TAX_RATE
}

/// Returns the total price of the provided [`Subtotal`] with its `tax`.
#[must_use]
pub fn total(subtotal: &Subtotal, tax: Money) -> Money {
    subtotal.materials + subtotal.labor + subtotal.add_ons + tax
}

/// Pre-tax costs of a quote.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Subtotal {
    /// Cost of the flooring [`Material`].
    pub materials: Money,

    /// Cost of the installation labor.
    pub labor: Money,

    /// Cost of the selected [`AddOn`]s.
    pub add_ons: Money,
}

impl Subtotal {
    /// Computes the [`Subtotal`] of covering the provided `area` with the
    /// provided [`Material`], including the selected [`AddOn`]s.
    ///
    /// Without a [`Material`] both materials and labor cost nothing.
    #[must_use]
    pub fn compute<'a>(
        area: SquareFeet,
        material: Option<&Material>,
        add_ons: impl IntoIterator<Item = &'a AddOn>,
    ) -> Self {
        let zero = Money::zero(Currency::Usd);
        let (materials, labor) = material.map_or((zero, zero), |m| {
            (m.price_per_area * area, m.labor_per_area * area)
        });
        let add_ons = add_ons
            .into_iter()
            .filter(|a| a.is_selected())
            .map(|a| a.cost(area))
            .fold(zero, |acc, cost| acc + cost);

        Self {
            materials,
            labor,
            add_ons,
        }
    }
}

/// Full price breakdown of a quote.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Breakdown {
    /// Cost of the flooring [`Material`].
    pub materials: Money,

    /// Cost of the installation labor.
    pub labor: Money,

    /// Cost of the selected [`AddOn`]s.
    pub add_ons: Money,

    /// Tax charged for the materials.
    pub tax: Money,

    /// Total price.
    pub total: Money,
}

impl Breakdown {
    /// Computes the [`Breakdown`] of covering the provided `area` with the
    /// provided [`Material`], including the selected [`AddOn`]s.
    #[must_use]
    pub fn compute<'a>(
        area: SquareFeet,
        material: Option<&Material>,
        add_ons: impl IntoIterator<Item = &'a AddOn>,
    ) -> Self {
        Self::from(Subtotal::compute(area, material, add_ons))
    }

    /// Returns the [`Subtotal`] part of this [`Breakdown`].
    #[must_use]
    pub fn subtotal(&self) -> Subtotal {
        Subtotal {
            materials: self.materials,
            labor: self.labor,
            add_ons: self.add_ons,
        }
    }
}

impl From<Subtotal> for Breakdown {
    fn from(subtotal: Subtotal) -> Self {
        let tax = tax(subtotal.materials);
        Self {
            materials: subtotal.materials,
            labor: subtotal.labor,
            add_ons: subtotal.add_ons,
            tax,
            total: total(&subtotal, tax),
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{Feet, Money, SquareFeet};
    use rust_decimal::Decimal;

    use crate::domain::{
        add_on::{self, AddOn},
        material::{self, Material},
        room, Room,
    };

    use super::{tax, total, total_area, Breakdown, Subtotal};

    fn usd(v: i64) -> Money {
        Money::usd(Decimal::from(v))
    }

    fn sqft(v: &str) -> SquareFeet {
        v.parse().unwrap()
    }

    fn room(l: i64, w: i64) -> Room {
        Room::new(
            room::Name::new("Room").unwrap(),
            Feet::new(Decimal::from(l)).unwrap(),
            Feet::new(Decimal::from(w)).unwrap(),
        )
    }

    fn vinyl() -> &'static Material {
        Material::find(&material::Id::new("luxury-vinyl").unwrap()).unwrap()
    }

    fn add_ons(selected: &[&str]) -> Vec<AddOn> {
        let mut add_ons = add_on::defaults();
        for a in &mut add_ons {
            let id: &str = a.id.as_ref();
            let is_selected = selected.contains(&id);
            a.select(is_selected);
        }
        add_ons
    }

    #[test]
    fn two_rooms_scenario() {
        let rooms = [room(10, 12), room(8, 10)];
        let area = total_area(&rooms);
        assert_eq!(area, sqft("200"));

        let add_ons = add_ons(&["removal", "furniture"]);
        let subtotal = Subtotal::compute(area, Some(vinyl()), &add_ons);
        assert_eq!(subtotal.materials, usd(1000));
        assert_eq!(subtotal.labor, usd(400));
        assert_eq!(subtotal.add_ons, usd(550));
        assert_eq!(tax(subtotal.materials), usd(80));
        assert_eq!(total(&subtotal, tax(subtotal.materials)), usd(2030));

        let breakdown = Breakdown::compute(area, Some(vinyl()), &add_ons);
        assert_eq!(breakdown.tax, usd(80));
        assert_eq!(breakdown.total, usd(2030));
        assert_eq!(breakdown.subtotal(), subtotal);
    }

    #[test]
    fn empty_rooms_have_no_area() {
        assert_eq!(total_area(&[]), SquareFeet::ZERO);
    }

    #[test]
    fn no_material_costs_nothing() {
        let breakdown =
            Breakdown::compute(sqft("200"), None, &add_ons(&["furniture"]));
        assert_eq!(breakdown.materials, usd(0));
        assert_eq!(breakdown.labor, usd(0));
        assert_eq!(breakdown.tax, usd(0));
        assert_eq!(breakdown.add_ons, usd(250));
        assert_eq!(breakdown.total, usd(250));
    }

    #[test]
    fn flat_add_ons_ignore_area() {
        let add_ons = add_ons(&["furniture"]);
        assert_eq!(
            Subtotal::compute(SquareFeet::ZERO, None, &add_ons).add_ons,
            usd(250),
        );
    }

    #[test]
    fn linear_in_area() {
        let add_ons = add_ons(&["removal", "underlayment", "baseboards"]);
        for material in material::catalog() {
            for a in ["0", "1", "12.5", "252", "1234.75"] {
                let one = Subtotal::compute(sqft(a), Some(material), &add_ons);
                let doubled = Subtotal::compute(
                    SquareFeet::new(Decimal::TWO * Decimal::from(sqft(a)))
                        .unwrap(),
                    Some(material),
                    &add_ons,
                );

                assert_eq!(doubled.materials, one.materials * Decimal::TWO);
                assert_eq!(doubled.labor, one.labor * Decimal::TWO);
                assert_eq!(doubled.add_ons, one.add_ons * Decimal::TWO);
            }
        }
    }

    #[test]
    fn total_is_exact_sum() {
        let add_ons = add_ons(&["removal", "furniture", "underlayment"]);
        for material in material::catalog() {
            for a in ["0", "0.1", "33.3", "252", "999.99"] {
                let b = Breakdown::compute(sqft(a), Some(material), &add_ons);
                assert_eq!(b.total, b.materials + b.labor + b.add_ons + b.tax);
                assert_eq!(b.tax, tax(b.materials));
                assert!(b.total.is_nonnegative());
            }
        }
    }

    #[test]
    fn tax_only_on_materials() {
        let area = sqft("100");
        let without = Breakdown::compute(area, Some(vinyl()), &add_ons(&[]));
        let with = Breakdown::compute(
            area,
            Some(vinyl()),
            &add_ons(&["removal", "underlayment", "furniture", "baseboards"]),
        );
        assert_eq!(without.tax, with.tax);
        assert_eq!(without.tax, usd(40));
    }
}
