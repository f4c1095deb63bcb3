//! Domain definitions.

pub mod add_on;
pub mod estimate;
pub mod lead;
pub mod material;
pub mod project;
pub mod quote;
pub mod room;

pub use self::{
    add_on::AddOn,
    estimate::{Analysis, RoomEstimate},
    lead::Lead,
    material::Material,
    project::Project,
    room::Room,
};
