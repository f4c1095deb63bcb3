//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing an appointment booking.
#[derive(Clone, Copy, Debug)]
pub struct Booking;
