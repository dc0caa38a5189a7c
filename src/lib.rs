//! Input mask and cursor navigation for a card expiration (`MM / YY`) text field.
//!
//! The crate holds no UI. A binding layer forwards each interaction as a
//! [`FieldEvent`] together with the current [`FieldState`] to
//! [`ExpirationField::handle`] and writes the returned state back to the
//! widget. Validation errors go to an injected [`ErrorDisplay`].

mod clock;
mod config;
mod consts;
mod controller;
mod cursor;
mod mask;
mod prelude;
mod state;
mod types;
mod validate;

pub use clock::{Clock, FixedClock, SystemClock, Today};
pub use config::ValidationPolicy;
pub use consts::*;
pub use controller::{ErrorDisplay, ExpirationField, FieldEvent, FieldScope, Key};
pub use cursor::{
    Direction, normalize_cursor, raw_index_to_value, skip_separator, step, value_index_to_raw,
};
pub use mask::{format, get_raw, set_value};
pub use state::FieldState;
pub use types::{ExpirationDate, Month, RawValue, Year};
pub use validate::{get_error, validate};

use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// Errors constructing the validated date newtypes
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid expiration year: {_0}")]
    InvalidYear(u16),
}

impl std::error::Error for ParseError {}

/// Advisory validation failures surfaced to the user when the field loses
/// focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpirationError {
    /// Fewer than four digits were entered.
    #[error("Expiration date is required")]
    ExpirationDateRequired,

    /// Month out of range, or the date is past or too far ahead.
    #[error("Expiration date is invalid")]
    ExpirationInvalid,
}

impl ExpirationError {
    /// Stable identifier for the error display, e.g. `expirationInvalid`
    pub const fn code(self) -> &'static str {
        match self {
            Self::ExpirationDateRequired => CODE_DATE_REQUIRED,
            Self::ExpirationInvalid => CODE_INVALID,
        }
    }
}
