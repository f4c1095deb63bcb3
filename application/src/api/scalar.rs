//! GraphQL scalar definitions.

use std::{fmt, marker::PhantomData, str::FromStr};

use juniper::{
    GraphQLType, InputValue, ParseScalarResult, ParseScalarValue, ScalarToken,
    ScalarValue, Value,
};

/// Helper type to use in `#[graphql(with = ..)]` attribute of string scalars
/// wrapping a domain value.
///
/// The domain value `As` is rendered with its [`Display`] impl and parsed with
/// its [`FromStr`] impl, so the validation rules of the domain apply to the
/// GraphQL input as is.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<As>(PhantomData<As>);

impl<As> Via<As> {
    /// Renders the wrapped `As` value as a string scalar.
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        As: fmt::Display,
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::from(value.as_ref().to_string())
    }

    /// Parses the target type from a string scalar.
    ///
    /// # Errors
    ///
    /// If the input is not a string, or the domain rejects it.
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: FromStr,
        As::Err: fmt::Display,
        T: TryFrom<As> + GraphQLType<S, TypeInfo = ()>,
        T::Error: fmt::Display,
        S: ScalarValue,
    {
        let Some(s) = input.as_string_value() else {
            return Err(format!(
                "Cannot parse input scalar `{}`: expected string input \
                 value, found: {input}",
                name::<T, S>(),
            ));
        };
        let value = s.parse::<As>().map_err(|e| {
            format!(
                "Cannot parse input scalar `{}` from \"{s}\" string: {e}",
                name::<T, S>(),
            )
        })?;
        T::try_from(value).map_err(|e| {
            format!("Cannot parse input scalar `{}`: {e}", name::<T, S>())
        })
    }

    /// Parses the provided [`ScalarToken`] as a string.
    ///
    /// # Errors
    ///
    /// If the token is not a string.
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
    }
}

/// Returns the GraphQL name of the scalar `T`.
fn name<T, S>() -> &'static str
where
    T: GraphQLType<S, TypeInfo = ()>,
    S: ScalarValue,
{
    T::name(&()).unwrap_or("<unnamed>")
}

#[cfg(test)]
mod spec {
    use juniper::{DefaultScalarValue, InputValue, Value};

    use crate::api::material;

    use super::Via;

    type Scalar = Via<service::domain::material::Id>;

    #[test]
    fn parses_valid_input() {
        let id = Scalar::from_input::<material::Id, DefaultScalarValue>(
            &InputValue::scalar("oak-hardwood".to_owned()),
        )
        .unwrap();

        assert_eq!(
            Scalar::to_output::<_, DefaultScalarValue>(&id),
            Value::scalar("oak-hardwood".to_owned()),
        );
    }

    #[test]
    fn rejects_invalid_input() {
        let err = Scalar::from_input::<material::Id, DefaultScalarValue>(
            &InputValue::scalar("Oak Hardwood".to_owned()),
        )
        .unwrap_err();
        assert!(err.contains("MaterialId"), "{err}");

        let err = Scalar::from_input::<material::Id, DefaultScalarValue>(
            &InputValue::scalar(42),
        )
        .unwrap_err();
        assert!(err.contains("expected string"), "{err}");
    }
}
