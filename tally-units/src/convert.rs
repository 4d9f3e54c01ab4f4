//! Conversion engine and the unit converter pages

use tally_plugin::prelude::*;
use crate::{Category, ConversionError, UNITS};

/// Decimal places a converted value is rounded to for display
pub const PRESENTATION_PLACES: usize = 8;

/// Express `value` (in `unit`) in the category's base unit
pub fn to_base(value: f64, unit: &str, category: Category) -> Result<f64, ConversionError> {
    Ok(UNITS.unit(category, unit)?.to_base(value))
}

/// Express a base-unit `value` in `unit`
pub fn from_base(value: f64, unit: &str, category: Category) -> Result<f64, ConversionError> {
    Ok(UNITS.unit(category, unit)?.from_base(value))
}

/// Convert through the base unit. Full precision, no rounding.
pub fn convert(value: f64, from: &str, to: &str, category: Category) -> Result<f64, ConversionError> {
    let base = to_base(value, from, category)?;
    from_base(base, to, category)
}

/// Convert a value typed as text
pub fn convert_text(input: &str, from: &str, to: &str, category: Category) -> Result<f64, TallyError> {
    let value = parse_real(input)?;
    Ok(convert(value, from, to, category)?)
}

// ============ unit pages ============

/// The page for one unit category
pub struct UnitConverter {
    category: Category,
}

impl UnitConverter {
    pub fn new(category: Category) -> Self {
        Self { category }
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

static UNIT_EXAMPLES: [&str; 3] = [
    "1 km → m = 1000.0  m",
    "1 byte → bit = 8.0  bit",
    "2 hour → minute = 120.0  minute",
];

impl ConverterPlugin for UnitConverter {
    fn meta(&self) -> ConverterMeta {
        let labels = UNITS.labels(self.category);
        ConverterMeta {
            name: self.category.key(),
            title: self.category.title(),
            icon: self.category.icon(),
            description: "Convert a value between units of one category",
            fields: vec![
                FieldMeta::entry("value", "Value"),
                FieldMeta::choice("from", "From", labels.clone()),
                FieldMeta::choice("to", "To", labels),
            ],
            failure: "Invalid input",
            examples: &UNIT_EXAMPLES,
            category: "units",
        }
    }

    fn compute(&self, fields: &Fields, _ctx: &ConvertContext) -> Result<String, TallyError> {
        let value = fields.real("value")?;
        let from = fields.require("from")?;
        let to = fields.require("to")?;

        let result = convert(value, from, to, self.category)?;
        Ok(format!("{}  {}", format_real(round_to(result, PRESENTATION_PLACES)), to))
    }
}
