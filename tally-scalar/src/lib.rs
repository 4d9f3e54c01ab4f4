//! Tally Scalar - One-shot calculators
//!
//! Each page is a pure function of typed inputs plus a converter plugin
//! that parses its fields and renders the result text:
//! - BMI and weight band
//! - Age from a date of birth
//! - Discounted price
//! - Temperature scales
//! - Date difference
//! - Numeral bases

mod helpers;
mod bmi;
mod age;
mod discount;
mod temperature;
mod dates;
mod numeral;

pub use helpers::{parse_iso_date, ISO_DATE};
pub use bmi::{bmi, Bmi, BmiBand, BmiConverter};
pub use age::{age, Age, AgeConverter};
pub use discount::{discount, Discount, DiscountConverter};
pub use temperature::{convert_temperature, Scale, TemperatureConverter, TEMPERATURE_PLACES};
pub use dates::{date_difference, DateSpan, DateDifferenceConverter, DAYS_PER_MONTH};
pub use numeral::{convert_numeral, Numeral, NumeralBase, NumeralConverter};

use tally_plugin::ConverterRegistry;

/// Load the scalar calculator pages into registry
pub fn load_scalar_library(registry: ConverterRegistry) -> ConverterRegistry {
    registry
        // Health and money
        .with_converter(BmiConverter)
        .with_converter(DiscountConverter)

        // Calendar
        .with_converter(AgeConverter)
        .with_converter(DateDifferenceConverter)

        // Scales and bases
        .with_converter(TemperatureConverter)
        .with_converter(NumeralConverter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_scalar_library() {
        let registry = load_scalar_library(ConverterRegistry::new());
        assert_eq!(
            registry.names(),
            vec!["age", "bmi", "dates", "discount", "numeral", "temperature"]
        );
    }
}
