//! Raw [`Fields`] of the submitted estimator form.

use std::str::FromStr;

use serde::Deserialize;
use service::domain::Inputs;

/// Values of the estimator form controls, as submitted by a browser.
///
/// Empty or unparsable values stand for controls left without a value, and
/// absent toggles stand for the switched off ones.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Fields {
    /// Kitchen area, m².
    pub kitchen_area: Option<String>,

    /// Bathroom area, m².
    pub bath_area: Option<String>,

    /// Area of the other rooms, m².
    pub other_area: Option<String>,

    /// Balcony or loggia area, m².
    pub extra_area: Option<String>,

    /// Number of rooms.
    pub rooms_count: Option<String>,

    /// Number of bathrooms.
    pub bath_count: Option<String>,

    /// District name.
    pub district_name: Option<String>,

    /// Construction year.
    pub year: Option<String>,

    /// Ceiling height, m.
    pub ceil_height: Option<String>,

    /// Total number of floors in the building.
    pub floor_max: Option<String>,

    /// Floor of the flat.
    pub floor: Option<String>,

    /// Gas toggle.
    pub gas: Option<String>,

    /// Hot water toggle.
    pub hot_water: Option<String>,

    /// Central heating toggle.
    pub central_heating: Option<String>,

    /// Number of balconies or loggias.
    pub extra_area_count: Option<String>,

    /// Type of the balconies or loggias.
    pub extra_area_type_name: Option<String>,

    /// Requested [`Submit`] action.
    pub action: Submit,
}

/// Action requested by submitting the form.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Submit {
    /// Re-render the form with the submitted values.
    #[default]
    Refresh,

    /// Calculate the estimate.
    Calculate,
}

impl From<Fields> for Inputs {
    fn from(fields: Fields) -> Self {
        let Fields {
            kitchen_area,
            bath_area,
            other_area,
            extra_area,
            rooms_count,
            bath_count,
            district_name,
            year,
            ceil_height,
            floor_max,
            floor,
            gas,
            hot_water,
            central_heating,
            extra_area_count,
            extra_area_type_name,
            action: _,
        } = fields;

        Self {
            kitchen_area: parse(kitchen_area),
            bath_area: parse(bath_area),
            other_area: parse(other_area),
            extra_area: parse(extra_area),
            rooms_count: parse(rooms_count),
            bath_count: parse(bath_count),
            district: parse(district_name),
            year: parse(year),
            ceil_height: parse(ceil_height),
            floor_max: parse(floor_max),
            floor: parse(floor),
            gas: gas.is_some(),
            hot_water: hot_water.is_some(),
            central_heating: central_heating.is_some(),
            extra_area_count: parse(extra_area_count),
            extra_area_type: parse(extra_area_type_name),
        }
    }
}

/// Parses the provided raw `value`, if any.
fn parse<T: FromStr>(value: Option<String>) -> Option<T> {
    value?.trim().parse().ok()
}

#[cfg(test)]
mod spec {
    use service::domain::{
        flat::{District, ExtraAreaType},
        Inputs,
    };

    use super::{Fields, Submit};

    fn fields(query: &str) -> Fields {
        serde_urlencoded::from_str(query).unwrap()
    }

    #[test]
    fn parses_submitted_values() {
        let f = fields(
            "kitchen_area=15&bath_area=7&other_area=35.5&extra_area=5\
             &rooms_count=2&bath_count=1&district_name=Nevskij&year=2005\
             &ceil_height=3.5&floor_max=14&floor=8&gas=on\
             &extra_area_count=1&extra_area_type_name=loggia\
             &action=calculate",
        );
        assert_eq!(f.action, Submit::Calculate);

        let inputs = Inputs::from(f);
        assert_eq!(inputs.other_area, Some(35.5));
        assert_eq!(inputs.district, Some(District::Nevskij));
        assert_eq!(inputs.extra_area_type, Some(ExtraAreaType::Loggia));
        assert!(inputs.gas);
        assert!(!inputs.hot_water);
        assert!(!inputs.central_heating);
        assert!(inputs.collect().is_ok());
    }

    #[test]
    fn treats_empty_values_as_missing() {
        let inputs = Inputs::from(fields("kitchen_area=&year=soon"));

        assert_eq!(inputs.kitchen_area, None);
        assert_eq!(inputs.year, None);
        assert!(inputs.collect().is_err());
    }

    #[test]
    fn refreshes_by_default() {
        assert_eq!(fields("kitchen_area=10").action, Submit::Refresh);
    }
}
