//! Field values handed to a converter

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tally_core::{parse_real, NumberError, TallyError};

use crate::FieldMeta;

/// Current contents of a page's input fields, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields {
    values: BTreeMap<String, String>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every field at its default value
    pub fn defaults(meta: &[FieldMeta]) -> Self {
        meta.iter()
            .map(|f| (f.name, f.default_value()))
            .collect()
    }

    /// Builder: set one field
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|s| s.as_str())
    }

    /// Raw text of a field that must be present
    pub fn require(&self, name: &str) -> Result<&str, TallyError> {
        self.get(name).ok_or_else(|| {
            TallyError::invalid_input(format!("missing field '{}'", name)).in_field(name)
        })
    }

    /// Field parsed as a finite real
    pub fn real(&self, name: &str) -> Result<f64, TallyError> {
        let raw = self.require(name)?;
        parse_real(raw).map_err(|e| match e {
            NumberError::ParseError(_) => TallyError::not_a_number(name, raw.trim()),
            other => TallyError::from(other).in_field(name),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::codes;

    #[test]
    fn test_defaults_pick_first_option() {
        let meta = vec![
            FieldMeta::entry("value", "Value"),
            FieldMeta::choice("from", "From", vec!["m", "km"]),
        ];
        let fields = Fields::defaults(&meta);
        assert_eq!(fields.get("value"), Some(""));
        assert_eq!(fields.get("from"), Some("m"));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_real_parses_and_names_field() {
        let fields = Fields::new().with("weight", " 70 ").with("height", "tall");
        assert_eq!(fields.real("weight").unwrap(), 70.0);

        let err = fields.real("height").unwrap_err();
        assert_eq!(err.code, codes::INVALID_INPUT);
        assert!(err.suggestion.is_some());
        let context = err.context.unwrap();
        assert_eq!(context.field, Some("height".to_string()));
        assert_eq!(context.input, Some("tall".to_string()));

        let err = Fields::new().with("price", "  ").real("price").unwrap_err();
        assert_eq!(err.context.unwrap().field, Some("price".to_string()));
    }

    #[test]
    fn test_missing_field() {
        let err = Fields::new().require("dob").unwrap_err();
        assert_eq!(err.code, codes::INVALID_INPUT);
    }
}
