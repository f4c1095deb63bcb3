//! [`Money`]-related definitions.

use std::{fmt, ops, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Creates a new [`Money`] amount in [`Currency::Usd`].
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self {
            amount,
            currency: Currency::Usd,
        }
    }

    /// Creates a zero [`Money`] amount in the provided [`Currency`].
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Indicates whether this [`Money`] amount is not negative.
    #[must_use]
    pub fn is_nonnegative(&self) -> bool {
        !self.amount.is_sign_negative() || self.amount.is_zero()
    }
}

impl ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        debug_assert_eq!(
            self.currency, rhs.currency,
            "adding `Money` of different currencies",
        );
        Self {
            amount: self.amount + rhs.amount,
            currency: self.currency,
        }
    }
}

impl ops::Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self {
            amount: self.amount * rhs,
            currency: self.currency,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        let code = currency.code();
        if amount.is_integer() {
            write!(f, "{}{code}", amount.to_i128().expect("integer"))
        } else {
            write!(f, "{}{code}", amount.normalize())
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency = Currency::from_str(&currency.to_ascii_lowercase())
            .map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "US Dollar."]
        Usd = 1,
    }
}

impl Currency {
    /// Returns the ISO 4217 code of this [`Currency`].
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
        }
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Money in `{major}.{minor}{currency}` format, where:
    /// - `major` is an integer;
    /// - `minor` is an optional integer;
    /// - `currency` is a three-letter currency code.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("123.45USD").unwrap(),
            Money {
                amount: decimal("123.45"),
                currency: Currency::Usd,
            },
        );
        assert_eq!(
            Money::from_str("2030USD").unwrap(),
            Money::usd(decimal("2030")),
        );

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45Us").is_err());
        assert!(Money::from_str("123.45EUR").is_err());
        assert!(Money::from_str("123.45Usdollar").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(Money::usd(decimal("123.45")).to_string(), "123.45USD");
        assert_eq!(Money::usd(decimal("123.00")).to_string(), "123USD");
        assert_eq!(Money::usd(decimal("98.7600")).to_string(), "98.76USD");
        assert_eq!(Money::usd(decimal("123")).to_string(), "123USD");
    }

    #[test]
    fn arithmetic() {
        let sum = Money::usd(decimal("1000")) + Money::usd(decimal("0.5"));
        assert_eq!(sum, Money::usd(decimal("1000.5")));

        assert_eq!(
            Money::usd(decimal("1.50")) * decimal("200"),
            Money::usd(decimal("300")),
        );
        assert_eq!(
            Money::zero(Currency::Usd) + Money::usd(decimal("7")),
            Money::usd(decimal("7")),
        );
    }

    #[test]
    fn nonnegative() {
        assert!(Money::zero(Currency::Usd).is_nonnegative());
        assert!(Money::usd(decimal("0.01")).is_nonnegative());
        assert!(!Money::usd(decimal("-0.01")).is_nonnegative());
    }
}
