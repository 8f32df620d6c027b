//! [`LinearModel`] definitions.

use std::{collections::BTreeMap, fs, io, path::PathBuf};

use derive_more::{Display, Error};
use serde::Deserialize;
use serde_json::Value;
use tracerr::Traced;

use crate::domain::FeatureRecord;

use super::{Model, Predict};

/// Fitted linear regression over the fields of a [`FeatureRecord`].
///
/// Loaded from a JSON artifact:
/// ```json
/// {
///   "intercept": 10.9,
///   "target": "log",
///   "numeric": { "total_area": 0.012 },
///   "categorical": { "district_name": { "Nevskij": 0.0 } }
/// }
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LinearModel {
    /// Free term of the regression.
    intercept: f64,

    /// Transformation applied to the regression output.
    #[serde(default)]
    target: Target,

    /// Coefficients of the numeric fields.
    #[serde(default)]
    numeric: BTreeMap<String, f64>,

    /// Weights of the categories of the categorical fields.
    #[serde(default)]
    categorical: BTreeMap<String, BTreeMap<String, f64>>,
}

/// Transformation of the regression output into a price.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Regression predicts the price itself.
    #[default]
    Identity,

    /// Regression predicts the natural logarithm of the price.
    Log,
}

impl LinearModel {
    /// Loads a [`LinearModel`] from the JSON artifact at the provided `path`.
    ///
    /// # Errors
    ///
    /// Errors if the artifact cannot be read or is malformed.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, Traced<LoadError>> {
        let path = path.into();
        let bytes = fs::read(&path)
            .map_err(|source| LoadError::Io { path, source })
            .map_err(tracerr::wrap!())?;
        Self::from_json(&bytes).map_err(tracerr::wrap!())
    }

    /// Parses a [`LinearModel`] from the provided JSON `bytes`.
    ///
    /// # Errors
    ///
    /// Errors if the `bytes` don't describe a [`LinearModel`].
    pub fn from_json(bytes: &[u8]) -> Result<Self, Traced<LoadError>> {
        let model: Self = serde_json::from_slice(bytes)
            .map_err(LoadError::Format)
            .map_err(tracerr::wrap!())?;

        let mut coefficients = model.numeric.values().chain(
            model.categorical.values().flat_map(BTreeMap::values),
        );
        if !model.intercept.is_finite()
            || coefficients.any(|c| !c.is_finite())
        {
            return Err(tracerr::new!(LoadError::NonFinite));
        }

        Ok(model)
    }

    /// Predicts the price of the flat described by the provided `record`.
    ///
    /// # Errors
    ///
    /// Errors if the `record` misses a feature this [`LinearModel`] is fitted
    /// on, holds a value of a wrong kind or an unknown category, or if the
    /// predicted price is not a finite non-negative number.
    pub fn predict(&self, record: &FeatureRecord) -> Result<f64, PredictError> {
        use PredictError as E;

        let Value::Object(row) =
            serde_json::to_value(record).map_err(E::Encode)?
        else {
            return Err(E::NotFlat);
        };
        let feature = |name: &String| {
            row.get(name).ok_or_else(|| E::MissingFeature(name.clone()))
        };

        let mut output = self.intercept;
        for (name, coefficient) in &self.numeric {
            let value = feature(name)?
                .as_f64()
                .ok_or_else(|| E::NotNumeric(name.clone()))?;
            output += coefficient * value;
        }
        for (name, weights) in &self.categorical {
            let value = feature(name)?;
            let category = match value.as_str() {
                Some(s) => s.to_owned(),
                None if value.is_number() => value.to_string(),
                None => return Err(E::NotCategorical(name.clone())),
            };
            output += *weights.get(&category).ok_or_else(|| {
                E::UnknownCategory {
                    feature: name.clone(),
                    category: category.clone(),
                }
            })?;
        }

        let price = match self.target {
            Target::Identity => output,
            Target::Log => output.exp(),
        };
        if price.is_finite() && price >= 0.0 {
            Ok(price)
        } else {
            Err(E::InvalidOutput(price))
        }
    }
}

impl Model<Predict> for LinearModel {
    type Ok = f64;
    type Err = Traced<super::Error>;

    async fn execute(
        &self,
        Predict(record): Predict,
    ) -> Result<Self::Ok, Self::Err> {
        self.predict(&record)
            .map_err(super::Error::from)
            .map_err(tracerr::wrap!())
    }
}

/// Error of loading a [`LinearModel`].
#[derive(Debug, Display, Error)]
pub enum LoadError {
    /// Artifact cannot be read.
    #[display("cannot read model artifact `{}`: {source}", path.display())]
    Io {
        /// Path of the artifact.
        path: PathBuf,

        /// Underlying I/O error.
        source: io::Error,
    },

    /// Artifact is not a valid [`LinearModel`] description.
    #[display("malformed model artifact: {_0}")]
    Format(serde_json::Error),

    /// Artifact contains a non-finite coefficient.
    #[display("model artifact contains a non-finite coefficient")]
    NonFinite,
}

/// Error of predicting a price with a [`LinearModel`].
#[derive(Debug, Display, Error)]
pub enum PredictError {
    /// [`FeatureRecord`] cannot be encoded.
    #[display("cannot encode features: {_0}")]
    Encode(serde_json::Error),

    /// [`FeatureRecord`] is not encoded as a flat key-value map.
    #[display("features are not a flat key-value map")]
    NotFlat,

    /// Feature the model is fitted on is missing.
    #[display("missing feature `{_0}`")]
    MissingFeature(#[error(not(source))] String),

    /// Numeric feature holds a non-numeric value.
    #[display("feature `{_0}` is not numeric")]
    NotNumeric(#[error(not(source))] String),

    /// Categorical feature holds neither a text nor a number.
    #[display("feature `{_0}` is not categorical")]
    NotCategorical(#[error(not(source))] String),

    /// Categorical feature holds a category the model wasn't fitted on.
    #[display("unknown category `{category}` of feature `{feature}`")]
    UnknownCategory {
        /// Name of the feature.
        feature: String,

        /// Unknown category.
        category: String,
    },

    /// Predicted price is not a finite non-negative number.
    #[display("model produced an invalid price `{_0}`")]
    InvalidOutput(#[error(not(source))] f64),
}
