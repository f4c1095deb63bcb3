//! [`Command`] for booking an [`Appointment`] by a [`Lead`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        lead::{self, Appointment, AppointmentKind, Contact, PreferredTime},
        Lead,
    },
    infra::{database, Database},
    query::{quote, Quote},
    Service,
};

use super::Command;

/// [`Command`] for booking an [`Appointment`] by a [`Lead`].
///
/// Booking again replaces the previously booked [`Appointment`].
#[derive(Clone, Debug)]
pub struct BookAppointment {
    /// ID of the [`Lead`] booking the [`Appointment`].
    pub lead_id: lead::Id,

    /// [`AppointmentKind`] to book.
    pub kind: AppointmentKind,

    /// [`PreferredTime`] of the [`Appointment`], if any.
    pub preferred_time: Option<PreferredTime>,

    /// [`lead::Name`] to update the [`Lead`] with, if any.
    pub name: Option<lead::Name>,

    /// [`lead::Phone`] to update the [`Lead`] with, if any.
    pub phone: Option<lead::Phone>,

    /// [`lead::ZipCode`] to update the [`Lead`] with, if any.
    pub zip_code: Option<lead::ZipCode>,

    /// Latest [`Quote`] shown to the [`Lead`], if any.
    ///
    /// Replaces the stored one after being recomputed.
    pub quote: Option<Quote>,
}

impl<Db, Ai> Command<BookAppointment> for Service<Db, Ai>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Lead>, lead::Id>>,
            Ok = Option<Lead>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Lead, lead::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Lead>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Lead;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: BookAppointment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let BookAppointment {
            lead_id,
            kind,
            preferred_time,
            name,
            phone,
            zip_code,
            quote,
        } = cmd;

        let quote = quote
            .as_ref()
            .map(Quote::snapshot)
            .transpose()
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent bookings for the same `Lead`.
        tx.execute(Lock(By::new(lead_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut lead = tx
            .execute(Select(By::<Option<Lead>, _>::new(lead_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::LeadNotExists(lead_id))
            .map_err(tracerr::wrap!())?;

        lead.contact.merge(Contact {
            name,
            phone,
            zip_code,
            ..Contact::default()
        });
        if quote.is_some() {
            lead.quote = quote;
        }
        lead.appointment = Some(Appointment {
            kind,
            preferred_time,
            booked_at: DateTime::now().coerce(),
        });

        tx.execute(Update(lead.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(lead)
    }
}

/// Error of [`BookAppointment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Quote`] cannot be computed.
    #[display("`Quote` cannot be computed: {_0}")]
    Quote(quote::ExecutionError),

    /// [`Lead`] doesn't exist.
    #[display("`Lead(id: {_0})` does not exist")]
    #[from(ignore)]
    LeadNotExists(#[error(not(source))] lead::Id),
}

#[cfg(test)]
mod spec {
    use common::{Money, SquareFeet};
    use rust_decimal::Decimal;

    use crate::{
        command::CaptureLead,
        domain::{
            lead::{self, AppointmentKind, Contact, PreferredTime},
            project::Flow,
            Lead,
        },
        infra::database::memory::Memory,
        query::{
            quote::{AreaSource, MeasuredRoom},
            Quote,
        },
        Command as _, Config, Service,
    };

    use super::{BookAppointment, ExecutionError};

    fn service() -> Service<Memory, ()> {
        Service::new(Config::default(), Memory::default(), ())
    }

    async fn captured(service: &Service<Memory, ()>) -> Lead {
        service
            .execute(CaptureLead {
                flow: Flow::Manual,
                contact: Contact {
                    email: Some("jane@example.com".parse().unwrap()),
                    zip_code: Some("10001".parse().unwrap()),
                    ..Contact::default()
                },
                quote: None,
            })
            .await
            .unwrap()
    }

    fn booking(lead_id: lead::Id) -> BookAppointment {
        BookAppointment {
            lead_id,
            kind: AppointmentKind::InPerson,
            preferred_time: Some(PreferredTime::Morning),
            name: Some("Jane Doe".parse().unwrap()),
            phone: Some("555-123-4567".parse().unwrap()),
            zip_code: None,
            quote: None,
        }
    }

    #[tokio::test]
    async fn books_appointment() {
        let service = service();
        let lead = captured(&service).await;

        let booked = service.execute(booking(lead.id)).await.unwrap();

        assert_eq!(service.database().lead(lead.id), Some(booked.clone()));
        let appointment = booked.appointment.unwrap();
        assert_eq!(appointment.kind, AppointmentKind::InPerson);
        assert_eq!(appointment.preferred_time, Some(PreferredTime::Morning));

        let contact = booked.contact;
        assert_eq!(contact.name, Some("Jane Doe".parse().unwrap()));
        assert_eq!(contact.email, Some("jane@example.com".parse().unwrap()));
        assert_eq!(contact.phone, Some("555-123-4567".parse().unwrap()));
        assert_eq!(contact.zip_code, Some("10001".parse().unwrap()));
        assert!(booked.quote.is_none());
    }

    #[tokio::test]
    async fn replaces_quote() {
        let service = service();
        let lead = captured(&service).await;

        let booked = service
            .execute(BookAppointment {
                quote: Some(Quote {
                    area: AreaSource::Rooms(vec![MeasuredRoom {
                        name: "Office".parse().unwrap(),
                        length: "10".parse().unwrap(),
                        width: "10".parse().unwrap(),
                    }]),
                    material: Some("ceramic-tile".parse().unwrap()),
                    add_ons: vec![],
                }),
                ..booking(lead.id)
            })
            .await
            .unwrap();

        // 100 × 4.00 = 400, 100 × 7.00 = 700, 8% of 400 = 32.
        let quote = booked.quote.unwrap();
        assert_eq!(quote.area, SquareFeet::new(Decimal::from(100)).unwrap());
        assert_eq!(quote.breakdown.total, Money::usd(Decimal::from(1132)));
    }

    #[tokio::test]
    async fn rebooking_replaces_appointment() {
        let service = service();
        let lead = captured(&service).await;
        _ = service.execute(booking(lead.id)).await.unwrap();

        let booked = service
            .execute(BookAppointment {
                kind: AppointmentKind::Video,
                preferred_time: None,
                ..booking(lead.id)
            })
            .await
            .unwrap();

        let appointment = booked.appointment.unwrap();
        assert_eq!(appointment.kind, AppointmentKind::Video);
        assert_eq!(appointment.preferred_time, None);
    }

    #[tokio::test]
    async fn fails_for_unknown_lead() {
        let service = service();
        let lead_id = lead::Id::new();

        let err = service.execute(booking(lead_id)).await.unwrap_err();

        assert!(
            matches!(
                err.as_ref(),
                ExecutionError::LeadNotExists(id) if *id == lead_id,
            ),
            "wrong error: {err}",
        );
    }
}
