//! Price [`Model`] boundary.

pub mod linear;

use derive_more::{Display, Error as StdError, From};

use crate::domain::FeatureRecord;

pub use self::linear::LinearModel;

/// Price model operation.
pub use common::Handler as Model;

/// Operation predicting the price of the flat described by a
/// [`FeatureRecord`].
#[derive(Clone, Debug)]
pub struct Predict(pub FeatureRecord);

/// [`Model`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`LinearModel`] error.
    Linear(linear::PredictError),
}
