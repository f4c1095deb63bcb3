//! [`Lead`]-related [`Database`] implementations.

use common::{
    money::Currency,
    operations::{By, Insert, Lock, Select, Update},
    Money,
};
use rust_decimal::Decimal;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        lead::{self, Appointment, Contact, QuoteSnapshot},
        quote::Breakdown,
        Lead,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Lead>, lead::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Lead>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Lead>, lead::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: lead::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, flow, \
                   name, email, phone, address, zip_code, \
                   quote_material, quote_area, quote_currency, \
                   quote_materials, quote_labor, quote_add_ons, \
                   quote_tax, quote_total, \
                   appointment_kind, appointment_preferred_time, \
                   appointment_booked_at, \
                   created_at \
            FROM leads \
            WHERE id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(lead_from_row))
    }
}

/// Decodes a [`Lead`] from the provided `leads` table [`Row`].
fn lead_from_row(row: &Row) -> Lead {
    let quote = row
        .get::<_, Option<Currency>>("quote_currency")
        .map(|currency| {
            let money = |column: &str| Money {
                amount: row.get::<_, Decimal>(column),
                currency,
            };
            QuoteSnapshot {
                material: row.get("quote_material"),
                area: row.get("quote_area"),
                breakdown: Breakdown {
                    materials: money("quote_materials"),
                    labor: money("quote_labor"),
                    add_ons: money("quote_add_ons"),
                    tax: money("quote_tax"),
                    total: money("quote_total"),
                },
            }
        });
    let appointment = row
        .get::<_, Option<lead::AppointmentKind>>("appointment_kind")
        .map(|kind| Appointment {
            kind,
            preferred_time: row.get("appointment_preferred_time"),
            booked_at: row.get("appointment_booked_at"),
        });

    Lead {
        id: row.get("id"),
        flow: row.get("flow"),
        contact: Contact {
            name: row.get("name"),
            email: row.get("email"),
            phone: row.get("phone"),
            address: row.get("address"),
            zip_code: row.get("zip_code"),
        },
        quote,
        appointment,
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Insert<Lead>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Lead>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(lead): Insert<Lead>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(lead)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Lead>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(lead): Update<Lead>,
    ) -> Result<Self::Ok, Self::Err> {
        let Lead {
            id,
            flow,
            contact:
                Contact {
                    name,
                    email,
                    phone,
                    address,
                    zip_code,
                },
            quote,
            appointment,
            created_at,
        } = lead;

        let material = quote.as_ref().and_then(|q| q.material.clone());
        let area = quote.as_ref().map(|q| q.area);
        let breakdown = quote.as_ref().map(|q| q.breakdown);
        let currency = breakdown.map(|b| b.total.currency);
        let materials = breakdown.map(|b| b.materials.amount);
        let labor = breakdown.map(|b| b.labor.amount);
        let add_ons = breakdown.map(|b| b.add_ons.amount);
        let tax = breakdown.map(|b| b.tax.amount);
        let total = breakdown.map(|b| b.total.amount);
        let kind = appointment.map(|a| a.kind);
        let preferred_time = appointment.and_then(|a| a.preferred_time);
        let booked_at = appointment.map(|a| a.booked_at);

        const SQL: &str = "\
            INSERT INTO leads (\
                id, flow, \
                name, email, phone, address, zip_code, \
                quote_material, quote_area, quote_currency, \
                quote_materials, quote_labor, quote_add_ons, \
                quote_tax, quote_total, \
                appointment_kind, appointment_preferred_time, \
                appointment_booked_at, \
                created_at\
            ) \
            VALUES (\
                $1::UUID, $2::INT2, \
                $3::VARCHAR, $4::VARCHAR, $5::VARCHAR, \
                $6::VARCHAR, $7::VARCHAR, \
                $8::VARCHAR, $9::NUMERIC, $10::INT2, \
                $11::NUMERIC, $12::NUMERIC, $13::NUMERIC, \
                $14::NUMERIC, $15::NUMERIC, \
                $16::INT2, $17::INT2, $18::TIMESTAMPTZ, \
                $19::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET flow = EXCLUDED.flow, \
                name = EXCLUDED.name, \
                email = EXCLUDED.email, \
                phone = EXCLUDED.phone, \
                address = EXCLUDED.address, \
                zip_code = EXCLUDED.zip_code, \
                quote_material = EXCLUDED.quote_material, \
                quote_area = EXCLUDED.quote_area, \
                quote_currency = EXCLUDED.quote_currency, \
                quote_materials = EXCLUDED.quote_materials, \
                quote_labor = EXCLUDED.quote_labor, \
                quote_add_ons = EXCLUDED.quote_add_ons, \
                quote_tax = EXCLUDED.quote_tax, \
                quote_total = EXCLUDED.quote_total, \
                appointment_kind = EXCLUDED.appointment_kind, \
                appointment_preferred_time = \
                    EXCLUDED.appointment_preferred_time, \
                appointment_booked_at = EXCLUDED.appointment_booked_at, \
                created_at = EXCLUDED.created_at";
        self.exec(
            SQL,
            &[
                &id,
                &flow,
                &name,
                &email,
                &phone,
                &address,
                &zip_code,
                &material,
                &area,
                &currency,
                &materials,
                &labor,
                &add_ons,
                &tax,
                &total,
                &kind,
                &preferred_time,
                &booked_at,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Lead, lead::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Lead, lead::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: lead::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM leads \
            WHERE id = $1::UUID \
            FOR UPDATE";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
