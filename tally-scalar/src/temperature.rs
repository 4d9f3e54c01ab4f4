//! Temperature scales
//!
//! Not a linear factor table like the unit pages: every conversion pivots
//! through Celsius with an offset.

use std::fmt;
use serde::{Deserialize, Serialize};
use tally_plugin::prelude::*;

use crate::helpers::extract_choice;

/// Decimal places a converted temperature is shown with
pub const TEMPERATURE_PLACES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scale {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl Scale {
    pub const ALL: [Scale; 3] = [Scale::Celsius, Scale::Fahrenheit, Scale::Kelvin];

    pub fn label(self) -> &'static str {
        match self {
            Scale::Celsius => "Celsius",
            Scale::Fahrenheit => "Fahrenheit",
            Scale::Kelvin => "Kelvin",
        }
    }

    fn to_celsius(self, value: f64) -> f64 {
        match self {
            Scale::Celsius => value,
            Scale::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            Scale::Kelvin => value - 273.15,
        }
    }

    fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            Scale::Celsius => celsius,
            Scale::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            Scale::Kelvin => celsius + 273.15,
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Convert between scales, rounded to four decimals
pub fn convert_temperature(value: f64, from: Scale, to: Scale) -> f64 {
    round_to(to.from_celsius(from.to_celsius(value)), TEMPERATURE_PLACES)
}

pub struct TemperatureConverter;

static TEMPERATURE_EXAMPLES: [&str; 2] = [
    "0 Celsius → Fahrenheit = 32.0  Fahrenheit",
    "212 Fahrenheit → Celsius = 100.0  Celsius",
];

fn scale_options() -> [(&'static str, Scale); 3] {
    Scale::ALL.map(|s| (s.label(), s))
}

impl ConverterPlugin for TemperatureConverter {
    fn meta(&self) -> ConverterMeta {
        let labels: Vec<&'static str> = Scale::ALL.iter().map(|s| s.label()).collect();
        ConverterMeta {
            name: "temperature",
            title: "Temperature",
            icon: "🌡",
            description: "Convert between Celsius, Fahrenheit and Kelvin",
            fields: vec![
                FieldMeta::entry("value", "Value"),
                FieldMeta::choice("from", "From", labels.clone()),
                FieldMeta::choice("to", "To", labels),
            ],
            failure: "Invalid input",
            examples: &TEMPERATURE_EXAMPLES,
            category: "units",
        }
    }

    fn compute(&self, fields: &Fields, _ctx: &ConvertContext) -> Result<String, TallyError> {
        let value = fields.real("value")?;
        let from = extract_choice(fields, "from", &scale_options())?;
        let to = extract_choice(fields, "to", &scale_options())?;
        Ok(format!("{}  {}", format_real(convert_temperature(value, from, to)), to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(value: &str, from: &str, to: &str) -> String {
        let fields = Fields::new().with("value", value).with("from", from).with("to", to);
        TemperatureConverter.calculate(&fields, &ConvertContext::new())
    }

    #[test]
    fn test_reference_points() {
        assert_eq!(convert_temperature(0.0, Scale::Celsius, Scale::Fahrenheit), 32.0);
        assert_eq!(convert_temperature(212.0, Scale::Fahrenheit, Scale::Celsius), 100.0);
        assert_eq!(convert_temperature(-40.0, Scale::Fahrenheit, Scale::Celsius), -40.0);
        assert_eq!(convert_temperature(0.0, Scale::Celsius, Scale::Kelvin), 273.15);
        assert_eq!(convert_temperature(300.0, Scale::Kelvin, Scale::Celsius), 26.85);
    }

    #[test]
    fn test_rounds_to_four_places() {
        assert_eq!(convert_temperature(0.0, Scale::Fahrenheit, Scale::Kelvin), 255.3722);
        assert_eq!(convert_temperature(98.6, Scale::Fahrenheit, Scale::Celsius), 37.0);
    }

    #[test]
    fn test_identity() {
        for scale in Scale::ALL {
            assert_eq!(convert_temperature(21.5, scale, scale), 21.5);
        }
    }

    #[test]
    fn test_page_text() {
        assert_eq!(page("0", "Celsius", "Fahrenheit"), "32.0  Fahrenheit");
        assert_eq!(page("212", "Fahrenheit", "Celsius"), "100.0  Celsius");
        assert_eq!(page("warm", "Celsius", "Kelvin"), "Invalid input");
        assert_eq!(page("10", "Celsius", "Rankine"), "Invalid input");
    }

    #[test]
    fn test_populate_defaults() {
        let fields = TemperatureConverter.populate();
        assert_eq!(fields.get("from"), Some("Celsius"));
        assert_eq!(fields.get("to"), Some("Celsius"));
    }
}
