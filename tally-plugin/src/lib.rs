//! Tally Plugin System
//!
//! Every converter page (unit categories and scalar calculators) is a
//! `ConverterPlugin`: it describes its input fields, fills them with
//! defaults, and turns field values into one display string.

mod traits;
mod fields;
mod registry;
mod context;

pub use traits::{ConverterPlugin, ConverterMeta, FieldMeta, FieldKind};
pub use fields::Fields;
pub use registry::ConverterRegistry;
pub use context::ConvertContext;

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{
        ConverterPlugin, ConverterMeta, FieldMeta, FieldKind,
        Fields, ConverterRegistry, ConvertContext,
    };
    pub use tally_core::prelude::*;
}
