//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{query, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns all the `Material`s available for installation.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "materials",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn materials(ctx: &Context) -> Result<Vec<api::Material>, Error> {
        ctx.service()
            .execute(query::materials::List)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|list| list.iter().map(Into::into).collect())
    }

    /// Returns all the `AddOn`s offered on top of an installation.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "addOns",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn add_ons(ctx: &Context) -> Result<Vec<api::AddOn>, Error> {
        ctx.service()
            .execute(query::add_ons::List)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|list| list.iter().map(Into::into).collect())
    }

    /// Computes the `Quote` of the provided flooring project.
    ///
    /// Prices are always taken from the catalogs.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AMBIGUOUS_AREA` - both `rooms` and `estimatedArea` are provided;
    /// - `MATERIAL_NOT_EXISTS` - the `Material` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "quote",
            material = ?input.material.as_ref().map(ToString::to_string),
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn quote(
        input: api::quote::QuoteInput,
        ctx: &Context,
    ) -> Result<api::Quote, Error> {
        let quote = query::Quote::try_from(input).map_err(ctx.error())?;
        ctx.service()
            .execute(quote)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Lead` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LEAD_NOT_EXISTS` - the `Lead` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "lead",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn lead(
        id: api::lead::Id,
        ctx: &Context,
    ) -> Result<api::Lead, Error> {
        ctx.service()
            .execute(query::lead::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| LeadError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }
}

impl AsError for query::quote::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "MATERIAL_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Material` with the specified ID does not exist"]
                MaterialNotExists,
            }
        }

        match self {
            Self::MaterialNotExists(_) => {
                Some(Error::MaterialNotExists.into())
            }
        }
    }
}

define_error! {
    enum LeadError {
        #[code = "LEAD_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Lead` with the specified ID does not exist"]
        NotExists,
    }
}
