//! Infrastructure layer.

pub mod database;
pub mod vision;

pub use self::{database::Database, vision::Vision};
#[cfg(feature = "postgres")]
pub use self::database::{postgres, Postgres};
