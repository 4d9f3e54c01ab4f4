//! Tally Core - Fundamental types
//!
//! This crate provides the core types used throughout Tally:
//! - `TallyError`: Structured errors with machine-readable codes
//! - `format_number`: the calculator's single display formatter
//! - `parse_real` / `round_to`: field parsing and presentation rounding

mod error;
mod format;
mod number;

pub use error::{TallyError, ErrorContext, codes};
pub use format::{format_number, format_general, format_real, round_to, DISPLAY_SIGFIGS};
pub use number::{parse_real, NumberError};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{TallyError, format_number, format_real, round_to, parse_real};
    pub use crate::error::codes;
}
