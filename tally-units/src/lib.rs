//! Tally Units - Linear unit conversion
//!
//! Every category converts through its base unit. Factors are tabulated
//! one of two ways (see `Scaling`):
//! - Length, Mass, Speed, Area, Volume: target units per base unit
//! - Data, Time: base units per target unit
//!
//! Temperature is not linear and lives in `tally-scalar`.

mod unit;
mod units;
mod convert;

pub use unit::{Category, Scaling, Unit, ConversionError};
pub use units::{UNITS, UnitRegistry};
pub use convert::{convert, convert_text, to_base, from_base, UnitConverter, PRESENTATION_PLACES};

use tally_plugin::ConverterRegistry;

/// Load one converter page per unit category into the registry
pub fn load_units_library(registry: ConverterRegistry) -> ConverterRegistry {
    Category::ALL
        .into_iter()
        .fold(registry, |registry, category| registry.with_converter(UnitConverter::new(category)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_registers_every_category() {
        let registry = load_units_library(ConverterRegistry::new());
        assert_eq!(registry.len(), Category::ALL.len());
        for category in Category::ALL {
            assert!(registry.get_converter(category.key()).is_some(), "{}", category);
        }
    }
}
