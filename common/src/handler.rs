//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler of an operation described by `Args`.
///
/// Commands, queries and external boundaries (like a price model) are all
/// expressed as [`Handler`]s of their own argument types.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided `args`.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
