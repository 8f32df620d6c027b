//! HTML pages of the estimator screens.

use std::fmt::Display;

use itertools::Itertools as _;
use service::{
    domain::{
        estimate::Summary,
        flat::{
            control, default_floor, validate_total_area, Control, District,
            ExtraAreaType, FeatureRecord,
        },
        Inputs,
    },
    Config,
};

use crate::Error;

/// Title shown on top of the form.
const TITLE: &str = "St. Petersburg Flat Price Predictor";

/// Control leaving the results [`Screen`].
///
/// [`Screen`]: service::domain::session::Screen
const NEW_CALCULATION: &str = "<form method=\"post\" action=\"/reset\">\
                               <button type=\"submit\">New Calculation\
                               </button></form>";

/// Minimal layout rules. Theming is up to the deployment.
const STYLE: &str = "\
    body{font-family:sans-serif;max-width:60rem;margin:2rem auto;\
    padding:0 1rem}fieldset{margin-bottom:1rem}\
    label{display:inline-block;margin:.25rem 1rem .25rem 0}\
    .total-area{font-size:2rem;font-weight:900}\
    .price{font-size:3rem;font-weight:900}.warning{color:#b36b00}\
    .error{color:#c00}.metrics span{margin-right:2rem}";

/// Renders the form [`Screen`] with the provided [`Inputs`].
///
/// [`Screen`]: service::domain::session::Screen
#[must_use]
pub fn form(inputs: &Inputs, error: Option<&Error>, config: &Config) -> String {
    let inputs = inputs.normalized();
    let total_area = inputs.total_area();

    let mut body = format!(
        "<div class=\"main-header\"><h1>{TITLE}</h1></div>{}",
        error.map(error_box).unwrap_or_default(),
    );
    body.push_str(
        "<form method=\"post\" action=\"/\" onchange=\"this.requestSubmit()\" \
         onsubmit=\"if (event.submitter && event.submitter.value === \
         'calculate') this.querySelector('.pending').hidden = false\">",
    );

    body.push_str("<fieldset><legend>Space &amp; Layout (m²)</legend>");
    body.push_str(&number(
        "kitchen_area",
        "Kitchen Area",
        &control::KITCHEN_AREA,
        inputs.kitchen_area,
    ));
    body.push_str(&number(
        "bath_area",
        "Bathroom Area",
        &control::BATH_AREA,
        inputs.bath_area,
    ));
    body.push_str(&number(
        "other_area",
        "Other Area",
        &control::OTHER_AREA,
        inputs.other_area,
    ));
    body.push_str(&number(
        "extra_area",
        "Extra Area (balcony/loggia size, counts as 1/3 of living area)",
        &control::EXTRA_AREA,
        inputs.extra_area,
    ));
    body.push_str(&format!(
        "<div class=\"total-area\">Total Area <span>{}</span> m²</div>",
        total_area.map_or_else(|| "-".to_owned(), |a| format!("{a:.2}")),
    ));
    if let Some(advisory) = total_area.and_then(validate_total_area) {
        body.push_str(&format!(
            "<p class=\"warning\">{}</p>",
            escape(&advisory.to_string()),
        ));
    }
    body.push_str(&select(
        "rooms_count",
        "Number of Rooms",
        (control::ROOMS_COUNT.min..=control::ROOMS_COUNT.max)
            .map(|n| n.to_string()),
        inputs.rooms_count.map(|n| n.to_string()).as_deref(),
    ));
    body.push_str(&radio(
        "bath_count",
        "Bathrooms",
        (control::BATH_COUNT.min..=control::BATH_COUNT.max)
            .map(|n| (n.to_string(), n.to_string())),
        inputs.bath_count.map(|n| n.to_string()).as_deref(),
    ));
    body.push_str("</fieldset>");

    body.push_str("<fieldset><legend>Building &amp; Location</legend>");
    body.push_str(&select(
        "district_name",
        "District",
        District::ALL.iter().map(|d| d.as_str().to_owned()),
        inputs.district.map(District::as_str),
    ));
    body.push_str(&number("year", "Year Built", &control::YEAR, inputs.year));
    body.push_str(&number(
        "ceil_height",
        "Ceiling Height (m)",
        &control::CEIL_HEIGHT,
        inputs.ceil_height,
    ));
    body.push_str(&number(
        "floor_max",
        "Total Floors in Building",
        &control::FLOOR_MAX,
        inputs.floor_max,
    ));
    match inputs.floor_max {
        Some(max) if inputs.floor_selectable() => {
            body.push_str(&number(
                "floor",
                "Flat Floor",
                &Control {
                    min: 1,
                    max,
                    step: 1,
                    default: default_floor(max),
                },
                inputs.floor,
            ));
        }
        Some(_) => {
            body.push_str("<p class=\"info\">Only 1 floor available.</p>");
        }
        None => {}
    }
    body.push_str("</fieldset>");

    body.push_str("<fieldset><legend>Utilities &amp; Extras</legend>");
    body.push_str(&toggle("gas", "Gas", inputs.gas));
    body.push_str(&toggle("hot_water", "Hot Water", inputs.hot_water));
    body.push_str(&toggle(
        "central_heating",
        "Central Heating",
        inputs.central_heating,
    ));
    body.push_str(&number(
        "extra_area_count",
        "Extra Count",
        &control::EXTRA_AREA_COUNT,
        inputs.extra_area_count,
    ));
    body.push_str(&radio(
        "extra_area_type_name",
        "Extra Type",
        [ExtraAreaType::Balcony, ExtraAreaType::Loggia]
            .map(|t| (t.as_str().to_owned(), t.as_str().to_owned())),
        inputs.extra_area_type.map(ExtraAreaType::as_str),
    ));
    body.push_str("</fieldset>");

    if let Ok(record) = inputs.collect() {
        body.push_str(&review(&record, config));
    }

    body.push_str(
        "<button type=\"submit\" name=\"action\" value=\"refresh\">Update\
         </button> <button type=\"submit\" name=\"action\" \
         value=\"calculate\" class=\"primary\">Calculate Market Value\
         </button><p class=\"pending\" hidden>Analyzing market data...</p>\
         </form>",
    );

    layout(&body)
}

/// Renders the results [`Screen`] out of the provided [`Summary`].
///
/// [`Screen`]: service::domain::session::Screen
#[must_use]
pub fn results(summary: &Summary) -> String {
    let Summary {
        price,
        price_per_area,
        total_area,
        building_age,
    } = summary;

    layout(&format!(
        "<section class=\"results\"><h2>Estimated Market Value</h2>\
         <div class=\"price-display price\">{} {}</div>\
         <div class=\"metrics\">\
         <span>Total Area <strong>{total_area:.0} m²</strong></span>\
         <span>Price per m² <strong>{} {}</strong></span>\
         <span>Building Age <strong>{building_age} yrs</strong></span>\
         </div></section>{NEW_CALCULATION}",
        price.grouped(),
        price.currency.sign(),
        price_per_area.grouped(),
        price_per_area.currency.sign(),
    ))
}

/// Renders the results [`Screen`] whose estimate cannot be shown, leaving
/// only the way to start a new calculation.
///
/// [`Screen`]: service::domain::session::Screen
#[must_use]
pub fn broken_results(error: &Error) -> String {
    layout(&format!(
        "<section class=\"results\"><h2>Estimated Market Value</h2>{}\
         </section>{NEW_CALCULATION}",
        error_box(error),
    ))
}

/// Renders the blocking page shown instead of any screen when no estimate
/// can be produced at all.
#[must_use]
pub fn unavailable(error: &Error) -> String {
    layout(&format!(
        "<div class=\"main-header\"><h1>{TITLE}</h1></div>\
         <p class=\"error\">Model not available, no estimate can be \
         produced.</p>{}",
        error_box(error),
    ))
}

/// Renders the "Review Inputs" panel of the provided [`FeatureRecord`].
fn review(record: &FeatureRecord, config: &Config) -> String {
    let utilities = [
        (record.gas, "Gas"),
        (record.hot_water, "Hot Water"),
        (record.central_heating, "Central Heating"),
    ]
    .into_iter()
    .filter_map(|(flag, name)| bool::from(flag).then_some(name))
    .join(", ");

    let mut items = vec![
        format!("<b>Total Area:</b> {:.2} m²", record.total_area),
        format!(
            "<b>Rooms:</b> {} rooms, {} bathroom(s)",
            record.rooms_count, record.bath_count,
        ),
        format!(
            "<b>Location:</b> {}, Floor {}/{}",
            record.district_name, record.floor, record.floor_max,
        ),
        format!(
            "<b>Built:</b> {} ({} years old)",
            record.year,
            config.reference_year - i32::from(record.year),
        ),
        format!("<b>Ceiling Height:</b> {} m", record.ceil_height),
        format!(
            "<b>Utilities:</b> {}",
            if utilities.is_empty() {
                "None"
            } else {
                utilities.as_str()
            },
        ),
    ];
    if record.extra_area_count > 0 {
        items.push(format!(
            "<b>Extras:</b> {} {}(s)",
            record.extra_area_count, record.extra_area_type_name,
        ));
    }

    format!(
        "<details><summary>Review Inputs</summary><ul>{}</ul></details>",
        items.iter().format_with("", |i, f| f(&format_args!("<li>{i}</li>"))),
    )
}

/// Wraps the provided `body` into a complete HTML document.
fn layout(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{TITLE}</title><style>{STYLE}</style></head>\
         <body>{body}</body></html>",
    )
}

/// Renders the provided [`Error`] inline.
fn error_box(error: &Error) -> String {
    format!("<p class=\"error\">{}</p>", escape(&error.message))
}

/// Renders a numeric input bounded by the provided [`Control`].
fn number<T: Copy + Display>(
    name: &str,
    label: &str,
    control: &Control<T>,
    value: Option<T>,
) -> String {
    format!(
        "<label>{label} <input type=\"number\" name=\"{name}\" min=\"{}\" \
         max=\"{}\" step=\"{}\" value=\"{}\" required></label>",
        control.min,
        control.max,
        control.step,
        value.map(|v| v.to_string()).unwrap_or_default(),
    )
}

/// Renders a drop-down list of the provided `options`.
fn select(
    name: &str,
    label: &str,
    options: impl IntoIterator<Item = String>,
    selected: Option<&str>,
) -> String {
    format!(
        "<label>{label} <select name=\"{name}\">{}</select></label>",
        options.into_iter().format_with("", |o, f| {
            let mark = if Some(o.as_str()) == selected {
                " selected"
            } else {
                ""
            };
            f(&format_args!("<option value=\"{o}\"{mark}>{o}</option>"))
        }),
    )
}

/// Renders a group of radio buttons out of the provided `(value, label)`
/// `options`.
fn radio(
    name: &str,
    label: &str,
    options: impl IntoIterator<Item = (String, String)>,
    selected: Option<&str>,
) -> String {
    format!(
        "<span>{label}: {}</span>",
        options.into_iter().format_with(" ", |(value, text), f| {
            let mark = if Some(value.as_str()) == selected {
                " checked"
            } else {
                ""
            };
            f(&format_args!(
                "<label><input type=\"radio\" name=\"{name}\" \
                 value=\"{value}\"{mark}> {text}</label>",
            ))
        }),
    )
}

/// Renders an on/off switch.
fn toggle(name: &str, label: &str, on: bool) -> String {
    format!(
        "<label><input type=\"checkbox\" name=\"{name}\"{}> {label}</label>",
        if on { " checked" } else { "" },
    )
}

/// Escapes the provided `text` for HTML.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, Money};
    use rust_decimal::Decimal;
    use service::{
        domain::{estimate::Summary, Inputs},
        Config,
    };

    use super::{broken_results, escape, form, results, unavailable};
    use crate::Error;

    #[test]
    fn renders_default_form() {
        let page = form(&Inputs::default(), None, &Config::default());

        assert!(page.contains("name=\"kitchen_area\""));
        assert!(page.contains("value=\"15\""));
        assert!(page.contains("<span>58.67</span> m²"));
        assert!(page.contains("name=\"floor\""));
        assert!(page.contains("<option value=\"Centralnyj\" selected>"));
        assert!(page.contains("Built:</b> 2005 (21 years old)"));
        assert!(
            page.contains("Utilities:</b> Gas, Hot Water, Central Heating"),
        );
        assert!(page.contains("Extras:</b> 1 balcony(s)"));
        assert!(!page.contains("class=\"warning\""));
        assert!(!page.contains("class=\"error\""));
    }

    #[test]
    fn hides_floor_control_in_single_floor_building() {
        let inputs = Inputs {
            floor_max: Some(1),
            ..Inputs::default()
        };
        let page = form(&inputs, None, &Config::default());

        assert!(!page.contains("name=\"floor\""));
        assert!(page.contains("Only 1 floor available."));
        assert!(page.contains("Floor 1/1"));
    }

    #[test]
    fn keeps_entered_values_with_inline_error() {
        let inputs = Inputs {
            kitchen_area: Some(20.0),
            gas: false,
            ..Inputs::default()
        };
        let error = Error::new(
            "PREDICTION_FAILED",
            http::StatusCode::UNPROCESSABLE_ENTITY,
            &"Prediction Error: <boom>",
        );
        let page = form(&inputs, Some(&error), &Config::default());

        assert!(page.contains("value=\"20\""));
        assert!(page.contains("Prediction Error: &lt;boom&gt;"));
        assert!(page.contains("Utilities:</b> Hot Water, Central Heating"));
    }

    #[test]
    fn renders_results() {
        let rub = |amount: i64| Money {
            amount: Decimal::from(amount),
            currency: Currency::Rub,
        };
        let page = results(&Summary {
            price: rub(9_000_000),
            price_per_area: rub(150_000),
            total_area: 60.0,
            building_age: 21,
        });

        assert!(page.contains("9,000,000 ₽"));
        assert!(page.contains("150,000 ₽"));
        assert!(page.contains("60 m²"));
        assert!(page.contains("21 yrs"));
        assert!(page.contains("action=\"/reset\""));
        assert!(!page.contains("name=\"kitchen_area\""));
    }

    #[test]
    fn renders_broken_results_with_way_out() {
        let page = broken_results(&Error::internal(&"cannot divide by `0`"));

        assert!(page.contains("cannot divide by `0`"));
        assert!(page.contains("action=\"/reset\""));
        assert!(page.contains("New Calculation"));
        assert!(!page.contains("name=\"action\""));
    }

    #[test]
    fn renders_blocking_error() {
        let page = unavailable(&Error::internal(&"no `model.json`"));

        assert!(page.contains("Model not available"));
        assert!(page.contains("no `model.json`"));
        assert!(!page.contains("<form"));
    }

    #[test]
    fn escapes_html() {
        assert_eq!(
            escape("<a href=\"x\">&'"),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;",
        );
    }
}
