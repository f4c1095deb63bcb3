//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler of `Args`.
///
/// Every seam of the service (commands, queries, database and vision-model
/// operations) is expressed as an implementation of this trait for a
/// dedicated argument type.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
