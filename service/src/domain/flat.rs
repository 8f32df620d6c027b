//! Flat attributes and the [`FeatureRecord`] collected from them.

use std::ops::RangeInclusive;

use common::define_kind;
use derive_more::{Display, Error};
use serde::Serialize;

define_kind! {
    #[doc = "District of St. Petersburg a flat is located in."]
    enum District {
        #[doc = "Central district."]
        Centralnyj => "Centralnyj",

        #[doc = "Kirovsky district."]
        Kirovskij => "Kirovskij",

        #[doc = "Krasnoselsky district."]
        Krasnoselskij => "Krasnoselskij",

        #[doc = "Moskovsky district."]
        Moskovskij => "Moskovskij",

        #[doc = "Nevsky district."]
        Nevskij => "Nevskij",

        #[doc = "Petrogradsky district."]
        Petrogradskij => "Petrogradskij",

        #[doc = "Vyborgsky district."]
        Vyborgskij => "Vyborgskij",
    }
}

define_kind! {
    #[doc = "Type of the extra (outdoor) area of a flat."]
    enum ExtraAreaType {
        #[doc = "Open balcony."]
        Balcony => "balcony",

        #[doc = "Enclosed loggia."]
        Loggia => "loggia",

        #[doc = "No extra area at all."]
        Absent => "none",
    }
}

define_kind! {
    #[doc = "Presence of a utility, encoded the way the price model expects."]
    enum Flag {
        #[doc = "Utility is present."]
        Yes => "Yes",

        #[doc = "Utility is absent."]
        No => "No",
    }
}

impl From<bool> for Flag {
    fn from(on: bool) -> Self {
        if on {
            Self::Yes
        } else {
            Self::No
        }
    }
}

impl From<Flag> for bool {
    fn from(flag: Flag) -> Self {
        matches!(flag, Flag::Yes)
    }
}

/// Bounded input control of a numeric flat attribute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Control<T> {
    /// Minimal accepted value.
    pub min: T,

    /// Maximal accepted value.
    pub max: T,

    /// Granularity of the accepted values.
    pub step: T,

    /// Value the control is initialized with.
    pub default: T,
}

impl Control<u16> {
    /// Brings the provided `value` into the bounds of this [`Control`].
    #[must_use]
    pub fn clamp(&self, value: u16) -> u16 {
        value.clamp(self.min, self.max)
    }
}

impl Control<f64> {
    /// Snaps the provided `value` to the step of this [`Control`] and brings
    /// it into the bounds.
    ///
    /// Non-finite values fall back to the default one.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.default;
        }
        let scale = self.step.recip().round();
        ((value * scale).round() / scale).clamp(self.min, self.max)
    }
}

pub mod control {
    //! [`Control`]s of the flat attributes.

    use super::Control;

    /// Kitchen area, m².
    pub const KITCHEN_AREA: Control<f64> = Control {
        min: 7.0,
        max: 26.0,
        step: 1.0,
        default: 15.0,
    };

    /// Bathroom area, m².
    pub const BATH_AREA: Control<f64> = Control {
        min: 7.0,
        max: 36.0,
        step: 1.0,
        default: 7.0,
    };

    /// Area of all the other rooms, m².
    pub const OTHER_AREA: Control<f64> = Control {
        min: 11.0,
        max: 95.0,
        step: 0.5,
        default: 35.0,
    };

    /// Balcony or loggia area, m².
    pub const EXTRA_AREA: Control<f64> = Control {
        min: 0.0,
        max: 20.0,
        step: 1.0,
        default: 5.0,
    };

    /// Number of rooms.
    pub const ROOMS_COUNT: Control<u16> = Control {
        min: 0,
        max: 9,
        step: 1,
        default: 2,
    };

    /// Number of bathrooms.
    pub const BATH_COUNT: Control<u16> = Control {
        min: 1,
        max: 2,
        step: 1,
        default: 1,
    };

    /// Construction year of the building.
    pub const YEAR: Control<u16> = Control {
        min: 1900,
        max: 2020,
        step: 1,
        default: 2005,
    };

    /// Ceiling height, m.
    pub const CEIL_HEIGHT: Control<f64> = Control {
        min: 2.5,
        max: 5.0,
        step: 0.1,
        default: 3.5,
    };

    /// Total number of floors in the building.
    pub const FLOOR_MAX: Control<u16> = Control {
        min: 1,
        max: 25,
        step: 1,
        default: 14,
    };

    /// Number of balconies or loggias.
    pub const EXTRA_AREA_COUNT: Control<u16> = Control {
        min: 0,
        max: 2,
        step: 1,
        default: 1,
    };

    /// Floor preselected when the building is tall enough.
    pub const PREFERRED_FLOOR: u16 = 8;
}

/// Total area range considered plausible for a flat, m².
pub const PLAUSIBLE_TOTAL_AREA: RangeInclusive<f64> = 20.0..=300.0;

/// Computes the total area of a flat, counting the `extra` area (balconies,
/// loggias) as one third.
#[must_use]
pub fn compute_total_area(
    kitchen: f64,
    bath: f64,
    other: f64,
    extra: f64,
) -> f64 {
    kitchen + bath + other + extra / 3.0
}

/// Checks whether the provided `total` area is plausible.
///
/// The returned advisory never blocks an estimation.
#[must_use]
pub fn validate_total_area(total: f64) -> Option<UnusualTotalArea> {
    (!PLAUSIBLE_TOTAL_AREA.contains(&total)).then_some(UnusualTotalArea(total))
}

/// Advisory about a total area outside of [`PLAUSIBLE_TOTAL_AREA`].
#[derive(Clone, Copy, Debug, Display, PartialEq)]
#[display("Total area {_0:.2} m² seems unusual. Please verify your inputs.")]
pub struct UnusualTotalArea(pub f64);

/// Default floor of a flat in a building with `floor_max` floors.
#[must_use]
pub fn default_floor(floor_max: u16) -> u16 {
    control::PREFERRED_FLOOR.min(floor_max)
}

/// Resolves the floor of a flat in a building with `floor_max` floors.
///
/// A single-floor building always yields the first floor, whatever is
/// `requested`.
#[must_use]
pub fn resolve_floor(floor_max: u16, requested: Option<u16>) -> u16 {
    let floor_max = floor_max.max(1);
    if floor_max == 1 {
        return 1;
    }
    requested
        .unwrap_or_else(|| default_floor(floor_max))
        .clamp(1, floor_max)
}

/// Raw state of the input controls describing a flat.
///
/// [`None`] stands for a control left without a value.
#[derive(Clone, Debug, PartialEq)]
pub struct Inputs {
    /// Kitchen area, m².
    pub kitchen_area: Option<f64>,

    /// Bathroom area, m².
    pub bath_area: Option<f64>,

    /// Area of the other rooms, m².
    pub other_area: Option<f64>,

    /// Balcony or loggia area, m².
    pub extra_area: Option<f64>,

    /// Number of rooms.
    pub rooms_count: Option<u16>,

    /// Number of bathrooms.
    pub bath_count: Option<u16>,

    /// [`District`] of the flat.
    pub district: Option<District>,

    /// Construction year of the building.
    pub year: Option<u16>,

    /// Ceiling height, m.
    pub ceil_height: Option<f64>,

    /// Total number of floors in the building.
    pub floor_max: Option<u16>,

    /// Floor of the flat. Ignored for single-floor buildings.
    pub floor: Option<u16>,

    /// Whether gas is supplied.
    pub gas: bool,

    /// Whether hot water is supplied.
    pub hot_water: bool,

    /// Whether central heating is supplied.
    pub central_heating: bool,

    /// Number of balconies or loggias.
    pub extra_area_count: Option<u16>,

    /// Selected [`ExtraAreaType`].
    pub extra_area_type: Option<ExtraAreaType>,
}

impl Default for Inputs {
    fn default() -> Self {
        use control as C;

        Self {
            kitchen_area: Some(C::KITCHEN_AREA.default),
            bath_area: Some(C::BATH_AREA.default),
            other_area: Some(C::OTHER_AREA.default),
            extra_area: Some(C::EXTRA_AREA.default),
            rooms_count: Some(C::ROOMS_COUNT.default),
            bath_count: Some(C::BATH_COUNT.default),
            district: District::ALL.first().copied(),
            year: Some(C::YEAR.default),
            ceil_height: Some(C::CEIL_HEIGHT.default),
            floor_max: Some(C::FLOOR_MAX.default),
            floor: Some(default_floor(C::FLOOR_MAX.default)),
            gas: true,
            hot_water: true,
            central_heating: true,
            extra_area_count: Some(C::EXTRA_AREA_COUNT.default),
            extra_area_type: Some(ExtraAreaType::Balcony),
        }
    }
}

impl Inputs {
    /// Returns these [`Inputs`] with every present value brought into the
    /// bounds of its [`Control`].
    #[must_use]
    pub fn normalized(&self) -> Self {
        use control as C;

        let floor_max = self.floor_max.map(|v| C::FLOOR_MAX.clamp(v));
        Self {
            kitchen_area: self.kitchen_area.map(|v| C::KITCHEN_AREA.clamp(v)),
            bath_area: self.bath_area.map(|v| C::BATH_AREA.clamp(v)),
            other_area: self.other_area.map(|v| C::OTHER_AREA.clamp(v)),
            extra_area: self.extra_area.map(|v| C::EXTRA_AREA.clamp(v)),
            rooms_count: self.rooms_count.map(|v| C::ROOMS_COUNT.clamp(v)),
            bath_count: self.bath_count.map(|v| C::BATH_COUNT.clamp(v)),
            district: self.district,
            year: self.year.map(|v| C::YEAR.clamp(v)),
            ceil_height: self.ceil_height.map(|v| C::CEIL_HEIGHT.clamp(v)),
            floor_max,
            floor: floor_max.map(|max| resolve_floor(max, self.floor)),
            gas: self.gas,
            hot_water: self.hot_water,
            central_heating: self.central_heating,
            extra_area_count: self
                .extra_area_count
                .map(|v| C::EXTRA_AREA_COUNT.clamp(v)),
            extra_area_type: self.extra_area_type,
        }
    }

    /// Computes the total area out of the current (normalized) area inputs.
    ///
    /// [`None`] is returned if any of the area controls has no value.
    #[must_use]
    pub fn total_area(&self) -> Option<f64> {
        let Self {
            kitchen_area,
            bath_area,
            other_area,
            extra_area,
            ..
        } = self.normalized();
        Some(compute_total_area(
            kitchen_area?,
            bath_area?,
            other_area?,
            extra_area?,
        ))
    }

    /// Indicates whether the floor of the flat can be chosen, which is only
    /// possible in multi-floor buildings.
    #[must_use]
    pub fn floor_selectable(&self) -> bool {
        self.normalized().floor_max.is_some_and(|max| max > 1)
    }

    /// Collects a [`FeatureRecord`] out of these [`Inputs`].
    ///
    /// # Errors
    ///
    /// Errors if a required control has no value.
    pub fn collect(&self) -> Result<FeatureRecord, MissingControl> {
        let n = self.normalized();

        let kitchen_area = require(n.kitchen_area, "kitchen_area")?;
        let bath_area = require(n.bath_area, "bath_area")?;
        let other_area = require(n.other_area, "other_area")?;
        let extra_area = require(n.extra_area, "extra_area")?;
        let floor_max = require(n.floor_max, "floor_max")?;
        let extra_area_count =
            require(n.extra_area_count, "extra_area_count")?;

        let extra_area_type_name = match (extra_area_count, n.extra_area_type) {
            (0, _) => ExtraAreaType::Absent,
            (_, Some(ExtraAreaType::Absent) | None) => ExtraAreaType::Balcony,
            (_, Some(kind)) => kind,
        };

        Ok(FeatureRecord {
            kitchen_area,
            bath_area,
            other_area,
            extra_area,
            total_area: compute_total_area(
                kitchen_area,
                bath_area,
                other_area,
                extra_area,
            ),
            rooms_count: require(n.rooms_count, "rooms_count")?,
            bath_count: require(n.bath_count, "bath_count")?,
            district_name: require(n.district, "district_name")?,
            year: require(n.year, "year")?,
            ceil_height: require(n.ceil_height, "ceil_height")?,
            floor_max,
            floor: resolve_floor(floor_max, n.floor),
            gas: n.gas.into(),
            hot_water: n.hot_water.into(),
            central_heating: n.central_heating.into(),
            extra_area_count,
            extra_area_type_name,
        })
    }
}

/// Unwraps the value of the control named `name`.
fn require<T>(
    value: Option<T>,
    name: &'static str,
) -> Result<T, MissingControl> {
    value.ok_or(MissingControl(name))
}

/// Error of a required control having no value.
#[derive(Clone, Copy, Debug, Display, Error, PartialEq)]
#[display("`{_0}` control has no value")]
pub struct MissingControl(#[error(not(source))] pub &'static str);

/// Complete description of a flat handed to the price model.
///
/// Serializes into the flat key-value shape expected by the model.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeatureRecord {
    /// Kitchen area, m².
    pub kitchen_area: f64,

    /// Bathroom area, m².
    pub bath_area: f64,

    /// Area of the other rooms, m².
    pub other_area: f64,

    /// Balcony or loggia area, m².
    pub extra_area: f64,

    /// Total area, m², derived from the other areas.
    pub total_area: f64,

    /// Number of rooms.
    pub rooms_count: u16,

    /// Number of bathrooms.
    pub bath_count: u16,

    /// [`District`] of the flat.
    pub district_name: District,

    /// Construction year of the building.
    pub year: u16,

    /// Ceiling height, m.
    pub ceil_height: f64,

    /// Total number of floors in the building.
    pub floor_max: u16,

    /// Floor of the flat.
    pub floor: u16,

    /// Whether gas is supplied.
    pub gas: Flag,

    /// Whether hot water is supplied.
    pub hot_water: Flag,

    /// Whether central heating is supplied.
    pub central_heating: Flag,

    /// Number of balconies or loggias.
    pub extra_area_count: u16,

    /// [`ExtraAreaType`] of the balconies or loggias.
    pub extra_area_type_name: ExtraAreaType,
}

impl FeatureRecord {
    /// Returns the advisory about an implausible total area, if any.
    #[must_use]
    pub fn advisory(&self) -> Option<UnusualTotalArea> {
        validate_total_area(self.total_area)
    }
}

#[cfg(test)]
mod spec {
    use super::{
        compute_total_area, resolve_floor, validate_total_area, District,
        ExtraAreaType, Flag, Inputs, MissingControl,
    };

    const EPSILON: f64 = 1e-9;

    #[test]
    fn total_area_counts_a_third_of_extra() {
        for (kitchen, bath, other, extra) in [
            (15.0, 7.0, 35.0, 5.0),
            (7.0, 7.0, 11.0, 0.0),
            (26.0, 36.0, 95.0, 20.0),
            (10.0, 8.0, 40.5, 3.0),
        ] {
            let total = compute_total_area(kitchen, bath, other, extra);
            let expected = kitchen + bath + other + extra / 3.0;
            assert!((total - expected).abs() < EPSILON);
            let reordered = compute_total_area(other, kitchen, bath, extra);
            assert!((total - reordered).abs() < EPSILON);
        }

        let total = compute_total_area(15.0, 7.0, 35.0, 5.0);
        assert!((total - (57.0 + 5.0 / 3.0)).abs() < EPSILON);
        assert_eq!(format!("{total:.4}"), "58.6667");

        let total = compute_total_area(7.0, 7.0, 11.0, 0.0);
        assert!((total - 25.0).abs() < EPSILON);
    }

    #[test]
    fn advises_only_outside_plausible_range() {
        assert!(validate_total_area(58.666_666_7).is_none());
        assert!(validate_total_area(25.0).is_none());
        assert!(validate_total_area(20.0).is_none());
        assert!(validate_total_area(300.0).is_none());

        assert!(validate_total_area(19.99).is_some());
        assert!(validate_total_area(300.01).is_some());
        assert_eq!(
            validate_total_area(310.0).unwrap().to_string(),
            "Total area 310.00 m² seems unusual. Please verify your inputs.",
        );
    }

    #[test]
    fn single_floor_building_fixes_floor() {
        for requested in [None, Some(0), Some(1), Some(5), Some(25)] {
            assert_eq!(resolve_floor(1, requested), 1);
        }

        let inputs = Inputs {
            floor_max: Some(1),
            floor: Some(7),
            ..Inputs::default()
        };
        assert!(!inputs.floor_selectable());
        assert_eq!(inputs.collect().unwrap().floor, 1);
    }

    #[test]
    fn floor_defaults_and_clamps() {
        assert_eq!(resolve_floor(14, None), 8);
        assert_eq!(resolve_floor(5, None), 5);
        assert_eq!(resolve_floor(14, Some(20)), 14);
        assert_eq!(resolve_floor(14, Some(0)), 1);
        assert_eq!(resolve_floor(14, Some(3)), 3);
    }

    #[test]
    fn extra_type_is_none_without_extras() {
        for kind in [
            Some(ExtraAreaType::Loggia),
            Some(ExtraAreaType::Balcony),
            None,
        ] {
            let record = Inputs {
                extra_area_count: Some(0),
                extra_area_type: kind,
                ..Inputs::default()
            }
            .collect()
            .unwrap();
            assert_eq!(record.extra_area_type_name, ExtraAreaType::Absent);
        }
    }

    #[test]
    fn extra_type_falls_back_to_balcony() {
        let record = Inputs {
            extra_area_count: Some(2),
            extra_area_type: None,
            ..Inputs::default()
        }
        .collect()
        .unwrap();
        assert_eq!(record.extra_area_type_name, ExtraAreaType::Balcony);

        let record = Inputs {
            extra_area_count: Some(1),
            extra_area_type: Some(ExtraAreaType::Loggia),
            ..Inputs::default()
        }
        .collect()
        .unwrap();
        assert_eq!(record.extra_area_type_name, ExtraAreaType::Loggia);
    }

    #[test]
    fn collects_defaults() {
        let record = Inputs::default().collect().unwrap();

        assert!((record.total_area - (57.0 + 5.0 / 3.0)).abs() < EPSILON);
        assert_eq!(record.rooms_count, 2);
        assert_eq!(record.bath_count, 1);
        assert_eq!(record.district_name, District::Centralnyj);
        assert_eq!(record.year, 2005);
        assert_eq!(record.floor_max, 14);
        assert_eq!(record.floor, 8);
        assert_eq!(record.gas, Flag::Yes);
        assert_eq!(record.extra_area_count, 1);
        assert_eq!(record.extra_area_type_name, ExtraAreaType::Balcony);
        assert!(record.advisory().is_none());
    }

    #[test]
    fn clamps_raw_values_into_controls() {
        let record = Inputs {
            kitchen_area: Some(100.0),
            other_area: Some(35.3),
            ceil_height: Some(3.14),
            year: Some(1800),
            rooms_count: Some(12),
            ..Inputs::default()
        }
        .collect()
        .unwrap();

        assert!((record.kitchen_area - 26.0).abs() < EPSILON);
        assert!((record.other_area - 35.5).abs() < EPSILON);
        assert!((record.ceil_height - 3.1).abs() < EPSILON);
        assert_eq!(record.year, 1900);
        assert_eq!(record.rooms_count, 9);
    }

    #[test]
    fn fails_on_missing_control() {
        let err = Inputs {
            bath_area: None,
            ..Inputs::default()
        }
        .collect()
        .unwrap_err();
        assert_eq!(err, MissingControl("bath_area"));

        assert!(Inputs {
            district: None,
            ..Inputs::default()
        }
        .total_area()
        .is_some());
    }

    #[test]
    fn encodes_record_for_model() {
        let record = Inputs {
            hot_water: false,
            district: Some(District::Nevskij),
            extra_area_count: Some(0),
            ..Inputs::default()
        }
        .collect()
        .unwrap();

        let value = serde_json::to_value(&record).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 17);
        assert_eq!(map["gas"], "Yes");
        assert_eq!(map["hot_water"], "No");
        assert_eq!(map["central_heating"], "Yes");
        assert_eq!(map["district_name"], "Nevskij");
        assert_eq!(map["extra_area_type_name"], "none");
        assert_eq!(map["floor"], 8);
    }

    #[test]
    fn districts_are_alphabetical() {
        let names: Vec<_> = District::ALL.iter().map(|d| d.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 7);
    }
}
