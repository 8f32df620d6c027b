//! [`Query`] definition.

pub mod estimate;

/// [`Query`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Query;

pub use self::estimate::CurrentEstimate;
