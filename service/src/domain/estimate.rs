//! [`Prediction`] definitions.

use common::Money;
use derive_more::{Display, Error};
use rust_decimal::Decimal;

use super::flat::FeatureRecord;

/// Price predicted for a flat along with the [`FeatureRecord`] it was
/// predicted from.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    /// Predicted market price.
    pub price: Money,

    /// [`FeatureRecord`] the price was predicted from.
    pub record: FeatureRecord,
}

impl Prediction {
    /// Summarizes this [`Prediction`] relative to the provided
    /// `reference_year`.
    ///
    /// # Errors
    ///
    /// Errors if the total area of the [`FeatureRecord`] cannot divide the
    /// price.
    pub fn summary(
        &self,
        reference_year: i32,
    ) -> Result<Summary, SummaryError> {
        let total_area = Decimal::try_from(self.record.total_area).map_err(
            |_| SummaryError::InvalidTotalArea(self.record.total_area),
        )?;
        let price_per_area = self
            .price
            .per(total_area)
            .ok_or(SummaryError::InvalidTotalArea(self.record.total_area))?;

        Ok(Summary {
            price: self.price,
            price_per_area,
            total_area: self.record.total_area,
            building_age: reference_year - i32::from(self.record.year),
        })
    }
}

/// Figures derived from a [`Prediction`] for display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    /// Predicted market price.
    pub price: Money,

    /// Price of a single m² of the total area.
    pub price_per_area: Money,

    /// Total area, m².
    pub total_area: f64,

    /// Age of the building, in years.
    pub building_age: i32,
}

/// Error of summarizing a [`Prediction`].
#[derive(Clone, Copy, Debug, Display, Error, PartialEq)]
pub enum SummaryError {
    /// Total area is zero or not representable as a decimal.
    #[display("total area `{_0}` cannot divide the price")]
    InvalidTotalArea(#[error(not(source))] f64),
}
