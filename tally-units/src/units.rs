//! Unit tables, one per category, in dropdown order

use std::collections::HashMap;
use std::sync::LazyLock;
use crate::{Category, ConversionError, Unit};

/// Global unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Registry of every unit table.
///
/// The first unit registered in a category is its base unit (factor 1).
pub struct UnitRegistry {
    tables: HashMap<Category, Vec<Unit>>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = UnitRegistry { tables: HashMap::new() };
        registry.register_all_units();
        registry
    }

    /// Look up a unit by its exact label
    pub fn get(&self, category: Category, label: &str) -> Option<&Unit> {
        self.units(category).iter().find(|u| u.label == label)
    }

    /// Same as `get`, as an error for absent labels
    pub fn unit(&self, category: Category, label: &str) -> Result<&Unit, ConversionError> {
        self.get(category, label).ok_or_else(|| ConversionError::UnknownUnit {
            category,
            unit: label.to_string(),
        })
    }

    pub fn factor(&self, category: Category, label: &str) -> Result<f64, ConversionError> {
        self.unit(category, label).map(|u| u.factor)
    }

    /// Units of a category in dropdown order
    pub fn units(&self, category: Category) -> &[Unit] {
        self.tables.get(&category).map(|t| t.as_slice()).unwrap_or(&[])
    }

    pub fn labels(&self, category: Category) -> Vec<&'static str> {
        self.units(category).iter().map(|u| u.label).collect()
    }

    pub fn base_unit(&self, category: Category) -> Option<&Unit> {
        self.units(category).first()
    }

    fn register(&mut self, category: Category, label: &'static str, name: &'static str, factor: f64) {
        debug_assert!(factor.is_finite() && factor > 0.0, "bad factor for {}", label);
        self.tables
            .entry(category)
            .or_default()
            .push(Unit::new(label, name, factor, category));
    }

    fn register_all_units(&mut self) {
        self.register_speed_units();
        self.register_length_units();
        self.register_mass_units();
        self.register_area_units();
        self.register_volume_units();
        self.register_data_units();
        self.register_time_units();
    }

    fn register_speed_units(&mut self) {
        let c = Category::Speed;
        self.register(c, "m/s", "meter per second", 1.0);
        self.register(c, "km/h", "kilometer per hour", 3.6);
        self.register(c, "mph", "mile per hour", 2.23694);
        self.register(c, "knots", "knot", 1.94384);
        self.register(c, "ft/s", "foot per second", 3.28084);
    }

    fn register_length_units(&mut self) {
        let c = Category::Length;
        self.register(c, "m", "meter", 1.0);
        self.register(c, "km", "kilometer", 0.001);
        self.register(c, "cm", "centimeter", 100.0);
        self.register(c, "mm", "millimeter", 1000.0);
        self.register(c, "mile", "mile", 0.000621371);
        self.register(c, "yard", "yard", 1.09361);
        self.register(c, "foot", "foot", 3.28084);
        self.register(c, "inch", "inch", 39.3701);
        // nautical mile
        self.register(c, "nm", "nautical mile", 0.000539957);
    }

    fn register_mass_units(&mut self) {
        let c = Category::Mass;
        self.register(c, "kg", "kilogram", 1.0);
        self.register(c, "g", "gram", 1000.0);
        self.register(c, "mg", "milligram", 1e6);
        self.register(c, "lb", "pound", 2.20462);
        self.register(c, "oz", "ounce", 35.274);
        // metric tonne
        self.register(c, "ton", "tonne", 0.001);
        self.register(c, "stone", "stone", 0.157473);
    }

    fn register_area_units(&mut self) {
        let c = Category::Area;
        self.register(c, "m²", "square meter", 1.0);
        self.register(c, "km²", "square kilometer", 1e-6);
        self.register(c, "cm²", "square centimeter", 1e4);
        self.register(c, "mm²", "square millimeter", 1e6);
        self.register(c, "hectare", "hectare", 1e-4);
        self.register(c, "acre", "acre", 0.000247105);
        self.register(c, "ft²", "square foot", 10.7639);
        self.register(c, "in²", "square inch", 1550.0);
        self.register(c, "yd²", "square yard", 1.19599);
    }

    fn register_volume_units(&mut self) {
        let c = Category::Volume;
        self.register(c, "L", "liter", 1.0);
        self.register(c, "mL", "milliliter", 1000.0);
        self.register(c, "m³", "cubic meter", 0.001);
        self.register(c, "cm³", "cubic centimeter", 1000.0);
        // US liquid measures
        self.register(c, "gallon", "gallon", 0.264172);
        self.register(c, "quart", "quart", 1.05669);
        self.register(c, "pint", "pint", 2.11338);
        self.register(c, "cup", "cup", 4.22675);
        self.register(c, "fl oz", "fluid ounce", 33.814);
    }

    fn register_data_units(&mut self) {
        // Decimal prefixes, base unit is the bit
        let c = Category::Data;
        self.register(c, "bit", "bit", 1.0);
        self.register(c, "byte", "byte", 8.0);
        self.register(c, "KB", "kilobyte", 8e3);
        self.register(c, "MB", "megabyte", 8e6);
        self.register(c, "GB", "gigabyte", 8e9);
        self.register(c, "TB", "terabyte", 8e12);
        self.register(c, "PB", "petabyte", 8e15);
    }

    fn register_time_units(&mut self) {
        let c = Category::Time;
        self.register(c, "second", "second", 1.0);
        self.register(c, "minute", "minute", 60.0);
        self.register(c, "hour", "hour", 3600.0);
        self.register(c, "day", "day", 86400.0);
        self.register(c, "week", "week", 604800.0);
        // average month and year
        self.register(c, "month", "month", 2.628e6);
        self.register(c, "year", "year", 3.156e7);
        self.register(c, "millisecond", "millisecond", 0.001);
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}
