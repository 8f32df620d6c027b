//! Service contains the business logic of the flat price estimator.
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;

use common::money::Currency;
use derive_more::Debug;
use smart_default::SmartDefault;
// Used by `define_kind!` expansions.
use strum as _;

#[cfg(doc)]
use self::{domain::Prediction, infra::Model};

pub use self::{command::Command, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Year the building age is measured against.
    #[default(2026)]
    pub reference_year: i32,

    /// [`Currency`] of the predicted prices.
    #[default(Currency::Rub)]
    pub currency: Currency,
}

/// Domain service.
///
/// Holds the loaded price [`Model`], shared read-only by all the
/// interactions.
#[derive(Clone, Debug)]
pub struct Service<M> {
    /// Configuration of this [`Service`].
    config: Config,

    /// Price [`Model`] of this [`Service`].
    #[debug(skip)]
    model: M,
}

impl<M> Service<M> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, model: M) -> Self {
        Self { config, model }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the price [`Model`] of this [`Service`].
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }
}
