//! Infrastructure layer.

pub mod model;

pub use self::model::{LinearModel, Model};
