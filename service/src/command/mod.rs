//! [`Command`] definition.

pub mod analyze_room;
pub mod book_appointment;
pub mod capture_lead;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    analyze_room::AnalyzeRoom, book_appointment::BookAppointment,
    capture_lead::CaptureLead,
};
