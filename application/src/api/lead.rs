//! [`Lead`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{
    graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLObject,
    GraphQLScalar,
};
use service::domain;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    Context,
};

/// A customer interested in a flooring installation.
#[derive(Clone, Debug, From, Into)]
pub struct Lead(domain::Lead);

/// A customer interested in a flooring installation.
#[graphql_object(context = Context)]
impl Lead {
    /// Unique identifier of this `Lead`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Lead.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Way this `Lead` described the project.
    pub fn flow(&self) -> Flow {
        self.0.flow.into()
    }

    /// Contact details of this `Lead`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Lead.contact",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn contact(&self) -> Contact {
        self.0.contact.clone().into()
    }

    /// Last `Quote` shown to this `Lead`, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Lead.quote",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn quote(&self) -> Option<api::Quote> {
        self.0.quote.clone().map(Into::into)
    }

    /// `Appointment` booked by this `Lead`, if any.
    pub fn appointment(&self) -> Option<Appointment> {
        self.0.appointment.map(Into::into)
    }

    /// `DateTime` when this `Lead` was captured.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `Lead`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::lead::Id)]
#[into(domain::lead::Id)]
#[graphql(name = "LeadId", transparent)]
pub struct Id(Uuid);

/// Contact details of a `Lead`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "LeadContact")]
pub struct Contact {
    /// Name of the customer.
    pub name: Option<Name>,

    /// Email of the customer.
    pub email: Option<Email>,

    /// Phone of the customer.
    pub phone: Option<Phone>,

    /// Address of the flooring project.
    pub address: Option<Address>,

    /// ZIP code of the flooring project.
    pub zip_code: Option<ZipCode>,
}

impl From<domain::lead::Contact> for Contact {
    fn from(contact: domain::lead::Contact) -> Self {
        let domain::lead::Contact {
            name,
            email,
            phone,
            address,
            zip_code,
        } = contact;
        Self {
            name: name.map(Into::into),
            email: email.map(Into::into),
            phone: phone.map(Into::into),
            address: address.map(Into::into),
            zip_code: zip_code.map(Into::into),
        }
    }
}

/// Contact details left by a customer.
///
/// Either an `email` or a `phone` is required to capture a `Lead`.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "LeadContactInput")]
pub struct ContactInput {
    /// Name of the customer.
    pub name: Option<Name>,

    /// Email of the customer.
    pub email: Option<Email>,

    /// Phone of the customer.
    pub phone: Option<Phone>,

    /// Address of the flooring project.
    pub address: Option<Address>,

    /// ZIP code of the flooring project.
    pub zip_code: Option<ZipCode>,
}

impl From<ContactInput> for domain::lead::Contact {
    fn from(input: ContactInput) -> Self {
        let ContactInput {
            name,
            email,
            phone,
            address,
            zip_code,
        } = input;
        Self {
            name: name.map(Into::into),
            email: email.map(Into::into),
            phone: phone.map(Into::into),
            address: address.map(Into::into),
            zip_code: zip_code.map(Into::into),
        }
    }
}

/// Name of a `Lead`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "LeadName", with = scalar::Via::<domain::lead::Name>)]
pub struct Name(domain::lead::Name);

/// Email of a `Lead`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "LeadEmail", with = scalar::Via::<domain::lead::Email>)]
pub struct Email(domain::lead::Email);

/// Phone of a `Lead`, with at least 10 digits.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "LeadPhone", with = scalar::Via::<domain::lead::Phone>)]
pub struct Phone(domain::lead::Phone);

/// Address of a `Lead`'s flooring project.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "LeadAddress", with = scalar::Via::<domain::lead::Address>)]
pub struct Address(domain::lead::Address);

/// ZIP code of a `Lead`'s flooring project.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "LeadZipCode", with = scalar::Via::<domain::lead::ZipCode>)]
pub struct ZipCode(domain::lead::ZipCode);

/// Consultation booked by a `Lead`.
#[derive(Clone, Copy, Debug, GraphQLObject)]
pub struct Appointment {
    /// Kind of this `Appointment`.
    pub kind: AppointmentKind,

    /// Time of day preferred for this `Appointment`, if any.
    pub preferred_time: Option<PreferredTime>,

    /// `DateTime` when this `Appointment` was booked.
    pub booked_at: DateTime,
}

impl From<domain::lead::Appointment> for Appointment {
    fn from(appointment: domain::lead::Appointment) -> Self {
        let domain::lead::Appointment {
            kind,
            preferred_time,
            booked_at,
        } = appointment;
        Self {
            kind: kind.into(),
            preferred_time: preferred_time.map(Into::into),
            booked_at: booked_at.coerce(),
        }
    }
}

/// Way a flooring project is described by a customer.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "ProjectFlow")]
pub enum Flow {
    /// Rooms are measured manually.
    Manual,

    /// A single room is estimated from a photo.
    Ai,
}

impl From<domain::project::Flow> for Flow {
    fn from(flow: domain::project::Flow) -> Self {
        use domain::project::Flow as F;
        match flow {
            F::Manual => Self::Manual,
            F::Ai => Self::Ai,
        }
    }
}

impl From<Flow> for domain::project::Flow {
    fn from(flow: Flow) -> Self {
        match flow {
            Flow::Manual => Self::Manual,
            Flow::Ai => Self::Ai,
        }
    }
}

/// Kind of an `Appointment`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
pub enum AppointmentKind {
    /// In-home measurement and consultation.
    InPerson,

    /// Phone call.
    Call,

    /// Video call.
    Video,
}

impl From<domain::lead::AppointmentKind> for AppointmentKind {
    fn from(kind: domain::lead::AppointmentKind) -> Self {
        use domain::lead::AppointmentKind as K;
        match kind {
            K::InPerson => Self::InPerson,
            K::Call => Self::Call,
            K::Video => Self::Video,
        }
    }
}

impl From<AppointmentKind> for domain::lead::AppointmentKind {
    fn from(kind: AppointmentKind) -> Self {
        match kind {
            AppointmentKind::InPerson => Self::InPerson,
            AppointmentKind::Call => Self::Call,
            AppointmentKind::Video => Self::Video,
        }
    }
}

/// Time of day preferred for an `Appointment`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
pub enum PreferredTime {
    /// 8 AM to 12 PM.
    Morning,

    /// 12 PM to 5 PM.
    Afternoon,

    /// 5 PM to 8 PM.
    Evening,

    /// Saturday or Sunday.
    Weekend,
}

impl From<domain::lead::PreferredTime> for PreferredTime {
    fn from(time: domain::lead::PreferredTime) -> Self {
        use domain::lead::PreferredTime as T;
        match time {
            T::Morning => Self::Morning,
            T::Afternoon => Self::Afternoon,
            T::Evening => Self::Evening,
            T::Weekend => Self::Weekend,
        }
    }
}

impl From<PreferredTime> for domain::lead::PreferredTime {
    fn from(time: PreferredTime) -> Self {
        match time {
            PreferredTime::Morning => Self::Morning,
            PreferredTime::Afternoon => Self::Afternoon,
            PreferredTime::Evening => Self::Evening,
            PreferredTime::Weekend => Self::Weekend,
        }
    }
}

#[cfg(test)]
mod spec {
    use service::domain::{lead, project};

    use super::{AppointmentKind, ContactInput, Flow, PreferredTime};

    #[test]
    fn converts_contact_input() {
        let contact = lead::Contact::from(ContactInput {
            name: None,
            email: Some(
                "jane@example.com".parse::<lead::Email>().unwrap().into(),
            ),
            phone: None,
            address: None,
            zip_code: Some("10001".parse::<lead::ZipCode>().unwrap().into()),
        });

        assert!(contact.is_reachable());
        assert_eq!(contact.zip_code, Some("10001".parse().unwrap()));
        assert!(contact.name.is_none());
    }

    #[test]
    fn converts_enums_both_ways() {
        for flow in project::Flow::ALL {
            assert_eq!(project::Flow::from(Flow::from(*flow)), *flow);
        }
        for kind in lead::AppointmentKind::ALL {
            let back = lead::AppointmentKind::from(AppointmentKind::from(*kind));
            assert_eq!(back, *kind);
        }
        for time in lead::PreferredTime::ALL {
            let back = lead::PreferredTime::from(PreferredTime::from(*time));
            assert_eq!(back, *time);
        }
    }
}
