//! Unit representation with conversion factors

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use tally_core::TallyError;
use thiserror::Error;

/// Which way a category's factors point.
///
/// Two conventions exist in the unit tables and both are kept as tabulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scaling {
    /// factor = target units per one base unit (length, mass, ...)
    PerBase,
    /// factor = base units per one target unit (data, time)
    BasePer,
}

impl Scaling {
    pub fn to_base(self, value: f64, factor: f64) -> f64 {
        match self {
            Scaling::PerBase => value / factor,
            Scaling::BasePer => value * factor,
        }
    }

    pub fn from_base(self, value: f64, factor: f64) -> f64 {
        match self {
            Scaling::PerBase => value * factor,
            Scaling::BasePer => value / factor,
        }
    }
}

/// A unit category, one converter page each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Length,
    Mass,
    Speed,
    Area,
    Volume,
    Data,
    Time,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Length,
        Category::Mass,
        Category::Speed,
        Category::Area,
        Category::Volume,
        Category::Data,
        Category::Time,
    ];

    /// Registry key
    pub fn key(self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Mass => "mass",
            Category::Speed => "speed",
            Category::Area => "area",
            Category::Volume => "volume",
            Category::Data => "data",
            Category::Time => "time",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Mass => "Mass",
            Category::Speed => "Speed",
            Category::Area => "Area",
            Category::Volume => "Volume",
            Category::Data => "Data",
            Category::Time => "Time",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Length => "📏",
            Category::Mass => "🏋",
            Category::Speed => "🚀",
            Category::Area => "📐",
            Category::Volume => "🧪",
            Category::Data => "💾",
            Category::Time => "⏱",
        }
    }

    pub fn scaling(self) -> Scaling {
        match self {
            Category::Data | Category::Time => Scaling::BasePer,
            _ => Scaling::PerBase,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl FromStr for Category {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL.iter()
            .copied()
            .find(|c| c.key() == wanted)
            .ok_or_else(|| ConversionError::UnknownCategory(s.to_string()))
    }
}

/// A unit label and its factor relative to the category's base unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unit {
    /// Label as shown in the dropdown (e.g., "km", "fl oz")
    pub label: &'static str,
    /// Long name (e.g., "kilometer")
    pub name: &'static str,
    pub factor: f64,
    pub category: Category,
}

impl Unit {
    pub fn new(label: &'static str, name: &'static str, factor: f64, category: Category) -> Self {
        Unit { label, name, factor, category }
    }

    pub fn is_base(&self) -> bool {
        self.factor == 1.0
    }

    pub fn to_base(&self, value: f64) -> f64 {
        self.category.scaling().to_base(value, self.factor)
    }

    pub fn from_base(&self, value: f64) -> f64 {
        self.category.scaling().from_base(value, self.factor)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Errors that can occur during unit conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("unknown {category} unit: {unit}")]
    UnknownUnit { category: Category, unit: String },

    #[error("unknown unit category: {0}")]
    UnknownCategory(String),
}

impl From<ConversionError> for TallyError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::UnknownUnit { category, unit } => {
                TallyError::unknown_unit(category.key(), &unit)
            }
            ConversionError::UnknownCategory(name) => {
                TallyError::invalid_input(format!("unknown unit category '{}'", name))
                    .with_input(name)
            }
        }
    }
}
