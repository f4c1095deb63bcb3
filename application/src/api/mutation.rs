//! GraphQL [`Mutation`]s definitions.

use juniper::graphql_object;
use service::{command, infra::vision::Image, query, Command as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Estimates a room from its photo.
    ///
    /// Never fails once an image is provided: if the photo cannot be
    /// analyzed, placeholder values are returned with the `isFallback` flag.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NO_IMAGE` - the provided `image` is blank.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "analyzeRoom",
            image.len = image.len(),
            material = ?material,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn analyze_room(
        image: String,
        material: Option<String>,
        ctx: &Context,
    ) -> Result<api::RoomAnalysis, Error> {
        let image = Image::new(image)
            .ok_or_else(|| api::estimate::ImageError::NoImage.into())
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::AnalyzeRoom { image, material })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Captures a new `Lead` with the provided contact details and the last
    /// `Quote` shown, if any.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NO_CONTACT_INFO` - neither an email nor a phone is provided;
    /// - `AMBIGUOUS_AREA` - both `rooms` and `estimatedArea` are provided;
    /// - `MATERIAL_NOT_EXISTS` - the quoted `Material` does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            flow = ?flow,
            gql.name = "captureLead",
            otel.name = Self::SPAN_NAME,
            with_quote = quote.is_some(),
        ),
    )]
    pub async fn capture_lead(
        flow: api::lead::Flow,
        contact: api::lead::ContactInput,
        quote: Option<api::quote::QuoteInput>,
        ctx: &Context,
    ) -> Result<api::Lead, Error> {
        let quote = quote
            .map(query::Quote::try_from)
            .transpose()
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::CaptureLead {
                flow: flow.into(),
                contact: contact.into(),
                quote,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Books an `Appointment` for the `Lead` with the specified ID.
    ///
    /// Provided contact details overwrite the stored ones, and the provided
    /// `Quote` replaces the stored one. Booking again replaces the previous
    /// `Appointment`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LEAD_NOT_EXISTS` - the `Lead` with the specified ID does not exist;
    /// - `AMBIGUOUS_AREA` - both `rooms` and `estimatedArea` are provided;
    /// - `MATERIAL_NOT_EXISTS` - the quoted `Material` does not exist.
    #[expect(clippy::too_many_arguments, reason = "GraphQL arguments")]
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "bookAppointment",
            kind = ?kind,
            lead_id = %lead_id,
            otel.name = Self::SPAN_NAME,
            preferred_time = ?preferred_time,
        ),
    )]
    pub async fn book_appointment(
        lead_id: api::lead::Id,
        kind: api::lead::AppointmentKind,
        preferred_time: Option<api::lead::PreferredTime>,
        name: Option<api::lead::Name>,
        phone: Option<api::lead::Phone>,
        zip_code: Option<api::lead::ZipCode>,
        quote: Option<api::quote::QuoteInput>,
        ctx: &Context,
    ) -> Result<api::Lead, Error> {
        let quote = quote
            .map(query::Quote::try_from)
            .transpose()
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::BookAppointment {
                lead_id: lead_id.into(),
                kind: kind.into(),
                preferred_time: preferred_time.map(Into::into),
                name: name.map(Into::into),
                phone: phone.map(Into::into),
                zip_code: zip_code.map(Into::into),
                quote,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

impl AsError for command::capture_lead::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "NO_CONTACT_INFO"]
                #[status = BAD_REQUEST]
                #[message = "Either `LeadEmail` or `LeadPhone` must be \
                             provided"]
                NoContactInfo,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Quote(e) => e.try_as_error(),
            Self::NoContactInfo => Some(Error::NoContactInfo.into()),
        }
    }
}

impl AsError for command::book_appointment::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Quote(e) => e.try_as_error(),
            Self::LeadNotExists(_) => {
                Some(api::query::LeadError::NotExists.into())
            }
        }
    }
}
