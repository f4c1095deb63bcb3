//! [`Feet`] and [`SquareFeet`] definitions.

use std::{iter, ops, str::FromStr};

use derive_more::Display;
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::{prelude::FromPrimitive as _, Decimal};

use crate::Money;

/// Strictly positive length measured in feet, not exceeding [`Feet::MAX`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Feet(Decimal);

impl Feet {
    /// Maximum allowed [`Feet`].
    ///
    /// The product of any two [`Feet`] never exceeds [`SquareFeet::MAX`].
    pub const MAX: Self = Self(Decimal::from_parts(10_000, 0, 0, false, 0));

    /// Creates a new [`Feet`] if the provided value is greater than `0` and
    /// doesn't exceed [`Feet::MAX`].
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (val > Decimal::ZERO && val <= Self::MAX.0).then_some(Self(val))
    }

    /// Creates a new [`Feet`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided value must be greater than `0` and not exceed
    /// [`Feet::MAX`].
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub const unsafe fn new_unchecked(val: Decimal) -> Self {
        Self(val)
    }

    /// Creates a new [`Feet`] from the provided [`f64`], if it's finite and
    /// within `(0, Feet::MAX]`.
    #[must_use]
    pub fn from_f64(val: f64) -> Option<Self> {
        if !val.is_finite() {
            return None;
        }
        Decimal::from_f64(val).and_then(Self::new)
    }
}

impl AsRef<Decimal> for Feet {
    fn as_ref(&self) -> &Decimal {
        &self.0
    }
}

impl From<Feet> for Decimal {
    fn from(feet: Feet) -> Self {
        feet.0
    }
}

impl ops::Mul for Feet {
    type Output = SquareFeet;

    fn mul(self, rhs: Self) -> Self::Output {
        SquareFeet(self.0 * rhs.0)
    }
}

impl FromStr for Feet {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Feet`")
    }
}

/// Non-negative area measured in square feet, not exceeding
/// [`SquareFeet::MAX`].
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct SquareFeet(Decimal);

impl SquareFeet {
    /// Empty area.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Maximum allowed [`SquareFeet`].
    pub const MAX: Self =
        Self(Decimal::from_parts(100_000_000, 0, 0, false, 0));

    /// Creates a new [`SquareFeet`] if the provided value is not negative and
    /// doesn't exceed [`SquareFeet::MAX`].
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (val >= Decimal::ZERO && val <= Self::MAX.0).then_some(Self(val))
    }
}

impl AsRef<Decimal> for SquareFeet {
    fn as_ref(&self) -> &Decimal {
        &self.0
    }
}

impl From<SquareFeet> for Decimal {
    fn from(area: SquareFeet) -> Self {
        area.0
    }
}

impl ops::Add for SquareFeet {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl iter::Sum for SquareFeet {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, ops::Add::add)
    }
}

impl ops::Mul<SquareFeet> for Money {
    type Output = Self;

    fn mul(self, rhs: SquareFeet) -> Self::Output {
        self * rhs.0
    }
}

impl FromStr for SquareFeet {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `SquareFeet`")
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::{fmt, str::FromStr};

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};
    use rust_decimal::Decimal;

    /// Parses a decimal scalar given either as a string or as a number.
    fn parse<T, S>(name: &str, input: &InputValue<S>) -> Result<T, String>
    where
        T: FromStr,
        T::Err: fmt::Display,
        S: ScalarValue,
    {
        let s = if let Some(s) = input.as_string_value() {
            s.to_owned()
        } else if let Some(f) = input.as_float_value() {
            f.to_string()
        } else {
            return Err(format!(
                "Cannot parse `{name}` input scalar from non-numeric value: \
                 {input}",
            ));
        };
        s.parse()
            .map_err(|e| format!("Cannot parse `{name}` input scalar: {e}"))
    }

    /// Positive length in feet, for example `12` or `"10.5"`.
    #[graphql_scalar(with = Self, parse_token(String, f64, i32))]
    type Feet = super::Feet;

    impl Feet {
        fn to_output<S: ScalarValue>(v: &Feet) -> Value<S> {
            Value::scalar(Decimal::from(*v).normalize().to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            parse("Feet", input)
        }
    }

    /// Non-negative area in square feet, for example `252` or `"80.5"`.
    #[graphql_scalar(with = Self, parse_token(String, f64, i32))]
    type SquareFeet = super::SquareFeet;

    impl SquareFeet {
        fn to_output<S: ScalarValue>(v: &SquareFeet) -> Value<S> {
            Value::scalar(Decimal::from(*v).normalize().to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            parse("SquareFeet", input)
        }
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use crate::Money;

    use super::{Feet, SquareFeet};

    fn feet(s: &str) -> Feet {
        s.parse().unwrap()
    }

    #[test]
    fn feet_must_be_positive() {
        assert!(Feet::new(Decimal::ZERO).is_none());
        assert!(Feet::new(Decimal::NEGATIVE_ONE).is_none());
        assert!(Feet::new(Decimal::ONE).is_some());

        assert!(Feet::from_f64(f64::NAN).is_none());
        assert!(Feet::from_f64(f64::INFINITY).is_none());
        assert!(Feet::from_f64(-3.0).is_none());
        assert_eq!(Feet::from_f64(12.5), Some(feet("12.5")));

        assert!("".parse::<Feet>().is_err());
        assert!("abc".parse::<Feet>().is_err());
        assert_eq!("  8 ".parse::<Feet>().ok(), Some(feet("8")));
    }

    #[test]
    fn dimensions_are_bounded() {
        assert_eq!(Feet::new(Decimal::from(10_000)), Some(Feet::MAX));
        assert!(Feet::new(Decimal::from(10_001)).is_none());
        assert!(Feet::new(Decimal::MAX).is_none());
        assert!(Feet::from_f64(1e20).is_none());
        assert!("1e20".parse::<Feet>().is_err());
        assert!("100000".parse::<Feet>().is_err());

        assert_eq!(
            SquareFeet::new(Decimal::from(100_000_000)),
            Some(SquareFeet::MAX),
        );
        assert!(SquareFeet::new(Decimal::from(100_000_001)).is_none());
        assert!(SquareFeet::new(Decimal::MAX).is_none());
        assert!("79228162514264337593543950335".parse::<SquareFeet>().is_err());

        assert_eq!(Feet::MAX * Feet::MAX, SquareFeet::MAX);
    }

    #[test]
    fn area_of_dimensions() {
        assert_eq!(
            feet("10") * feet("12"),
            SquareFeet::new(Decimal::from(120)).unwrap(),
        );
        assert_eq!(
            feet("10.5") * feet("2"),
            SquareFeet::new(Decimal::from(21)).unwrap(),
        );
    }

    #[test]
    fn area_sums() {
        let total: SquareFeet = [feet("10") * feet("12"), feet("8") * feet("10")]
            .into_iter()
            .sum();
        assert_eq!(total, SquareFeet::new(Decimal::from(200)).unwrap());

        let empty: SquareFeet = std::iter::empty().sum();
        assert_eq!(empty, SquareFeet::ZERO);
    }

    #[test]
    fn prices_area() {
        let area = SquareFeet::new(Decimal::from(200)).unwrap();
        assert_eq!(
            Money::usd(Decimal::new(150, 2)) * area,
            Money::usd(Decimal::from(300)),
        );
    }
}
