//! Converter plugin traits

use serde::Serialize;
use tally_core::TallyError;
use tracing::debug;

use crate::{ConvertContext, Fields};

/// How a field is edited on the page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "options", rename_all = "lowercase")]
pub enum FieldKind {
    /// Free-text entry
    Entry,
    /// Dropdown over a fixed list; the first option is the default
    Choice(Vec<&'static str>),
}

/// Metadata about a converter input field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMeta {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldMeta {
    pub fn entry(name: &'static str, label: &'static str) -> Self {
        Self { name, label, kind: FieldKind::Entry }
    }

    pub fn choice(name: &'static str, label: &'static str, options: Vec<&'static str>) -> Self {
        Self { name, label, kind: FieldKind::Choice(options) }
    }

    /// Value the field holds before the user touches it
    pub fn default_value(&self) -> &'static str {
        match &self.kind {
            FieldKind::Entry => "",
            FieldKind::Choice(options) => options.first().copied().unwrap_or(""),
        }
    }
}

/// Metadata for a converter page
#[derive(Debug, Clone, Serialize)]
pub struct ConverterMeta {
    pub name: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub fields: Vec<FieldMeta>,
    /// Fixed text shown when the inputs cannot be used
    pub failure: &'static str,
    pub examples: &'static [&'static str],
    pub category: &'static str,
}

/// A converter page: inputs in, one display string out
pub trait ConverterPlugin: Send + Sync {
    fn meta(&self) -> ConverterMeta;

    /// Validate the fields and produce the result text
    fn compute(&self, fields: &Fields, ctx: &ConvertContext) -> Result<String, TallyError>;

    /// Initial field values for the page
    fn populate(&self) -> Fields {
        Fields::defaults(&self.meta().fields)
    }

    /// Result text for the page; failures collapse to the page's fixed message
    fn calculate(&self, fields: &Fields, ctx: &ConvertContext) -> String {
        match self.compute(fields, ctx) {
            Ok(text) => text,
            Err(err) => {
                let meta = self.meta();
                debug!(converter = meta.name, error = %err, "calculation rejected");
                meta.failure.to_string()
            }
        }
    }
}
