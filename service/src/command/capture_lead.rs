//! [`Command`] for capturing a new [`Lead`].

use common::{
    operations::{Commit, Insert, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        lead::{self, Contact},
        project::Flow,
        Lead,
    },
    infra::{database, Database},
    query::{quote, Quote},
    Service,
};

use super::Command;

/// [`Command`] for capturing a new [`Lead`].
#[derive(Clone, Debug)]
pub struct CaptureLead {
    /// [`Flow`] the [`Lead`] used to describe the project.
    pub flow: Flow,

    /// [`Contact`] details of the [`Lead`].
    pub contact: Contact,

    /// [`Quote`] the [`Lead`] has been shown, if any.
    ///
    /// It's recomputed before being stored.
    pub quote: Option<Quote>,
}

impl<Db, Ai> Command<CaptureLead> for Service<Db, Ai>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Lead>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Lead;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CaptureLead) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CaptureLead {
            flow,
            contact,
            quote,
        } = cmd;

        if !contact.is_reachable() {
            return Err(tracerr::new!(E::NoContactInfo));
        }

        let quote = quote
            .as_ref()
            .map(Quote::snapshot)
            .transpose()
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let lead = Lead {
            id: lead::Id::new(),
            flow,
            contact,
            quote,
            appointment: None,
            created_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(lead.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(lead)
    }
}

/// Error of [`CaptureLead`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Quote`] cannot be computed.
    #[display("`Quote` cannot be computed: {_0}")]
    Quote(quote::ExecutionError),

    /// Neither an email nor a phone is provided.
    #[display("No contact information provided")]
    #[from(ignore)]
    NoContactInfo,
}

#[cfg(test)]
mod spec {
    use common::Money;
    use rust_decimal::Decimal;

    use crate::{
        domain::{lead::Contact, project::Flow},
        infra::database::memory::Memory,
        query::{
            quote::{self, AreaSource},
            Quote,
        },
        Command as _, Config, Service,
    };

    use super::{CaptureLead, ExecutionError};

    fn service() -> Service<Memory, ()> {
        Service::new(Config::default(), Memory::default(), ())
    }

    fn quote_of(material: &str) -> Quote {
        Quote {
            area: AreaSource::Estimated("252".parse().unwrap()),
            material: Some(material.parse().unwrap()),
            add_ons: vec!["furniture".parse().unwrap()],
        }
    }

    #[tokio::test]
    async fn captures_lead_with_quote() {
        let service = service();

        let lead = service
            .execute(CaptureLead {
                flow: Flow::Ai,
                contact: Contact {
                    name: Some("Jane Doe".parse().unwrap()),
                    email: Some("jane@example.com".parse().unwrap()),
                    ..Contact::default()
                },
                quote: Some(quote_of("premium-laminate")),
            })
            .await
            .unwrap();

        assert_eq!(service.database().lead(lead.id), Some(lead.clone()));
        assert_eq!(lead.flow, Flow::Ai);
        assert!(lead.appointment.is_none());

        // 252 × 3.50 = 882, 252 × 2.50 = 630, 8% of 882 = 70.56.
        let quote = lead.quote.unwrap();
        assert_eq!(quote.breakdown.materials, Money::usd(Decimal::from(882)));
        assert_eq!(quote.breakdown.labor, Money::usd(Decimal::from(630)));
        assert_eq!(quote.breakdown.add_ons, Money::usd(Decimal::from(250)));
        assert_eq!(quote.breakdown.tax, Money::usd(Decimal::new(7056, 2)));
        assert_eq!(
            quote.breakdown.total,
            Money::usd(Decimal::new(183256, 2)),
        );
    }

    #[tokio::test]
    async fn captures_lead_by_phone_only() {
        let service = service();

        let lead = service
            .execute(CaptureLead {
                flow: Flow::Manual,
                contact: Contact {
                    phone: Some("(555) 123-4567".parse().unwrap()),
                    ..Contact::default()
                },
                quote: None,
            })
            .await
            .unwrap();

        assert!(lead.quote.is_none());
        assert_eq!(service.database().lead(lead.id), Some(lead));
    }

    #[tokio::test]
    async fn requires_contact_info() {
        let service = service();

        let err = service
            .execute(CaptureLead {
                flow: Flow::Manual,
                contact: Contact {
                    name: Some("Jane Doe".parse().unwrap()),
                    zip_code: Some("90210".parse().unwrap()),
                    ..Contact::default()
                },
                quote: None,
            })
            .await
            .unwrap_err();

        assert!(
            matches!(err.as_ref(), ExecutionError::NoContactInfo),
            "wrong error: {err}",
        );
    }

    #[tokio::test]
    async fn rejects_unknown_material() {
        let service = service();

        let err = service
            .execute(CaptureLead {
                flow: Flow::Ai,
                contact: Contact {
                    email: Some("jane@example.com".parse().unwrap()),
                    ..Contact::default()
                },
                quote: Some(quote_of("bamboo")),
            })
            .await
            .unwrap_err();

        assert!(
            matches!(
                err.as_ref(),
                ExecutionError::Quote(
                    quote::ExecutionError::MaterialNotExists(_),
                ),
            ),
            "wrong error: {err}",
        );
    }
}
