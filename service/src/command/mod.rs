//! [`Command`] definition.

pub mod calculate;
pub mod start_new_calculation;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    calculate::Calculate, start_new_calculation::StartNewCalculation,
};
