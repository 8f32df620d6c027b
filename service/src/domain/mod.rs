//! Domain definitions.

pub mod estimate;
pub mod flat;
pub mod session;

pub use self::{
    estimate::Prediction,
    flat::{FeatureRecord, Inputs},
    session::Session,
};
