//! [`Percent`]-related definitions.

use std::{ops, str::FromStr};

use derive_more::Display;
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

use crate::Money;

/// Floating-point percentage in the `[0, 100]` range.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Percent(Decimal);

impl Percent {
    /// Creates a new [`Percent`] by checking the provided value is not less
    /// than `0` and not greater than `100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        if val < Decimal::ZERO || val > Decimal::ONE_HUNDRED {
            return None;
        }

        #[expect(unsafe_code, reason = "invariants checked already")]
        let percent = unsafe { Self::new_unchecked(val) };
        Some(percent)
    }

    /// Creates a new [`Percent`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided value must not be less than `0` and not greater than
    /// `100`.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub const unsafe fn new_unchecked(val: Decimal) -> Self {
        Self(val)
    }

    /// Returns this [`Percent`] as a fraction of one (`8%` is `0.08`).
    #[must_use]
    pub fn ratio(self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }
}

impl AsRef<Decimal> for Percent {
    fn as_ref(&self) -> &Decimal {
        &self.0
    }
}

impl ops::Mul<Percent> for Money {
    type Output = Self;

    fn mul(self, rhs: Percent) -> Self::Output {
        self * rhs.ratio()
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim_end_matches('%'))
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Floating-point percentage, for example `8` or `8.25`.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Percent = super::Percent;

    impl Percent {
        fn to_output<S: ScalarValue>(m: &Percent) -> Value<S> {
            Value::scalar(m.0.normalize().to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Percent` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Percent` input scalar: {e}")
                    })
                })
        }
    }
}
