//! Conversion between the raw digit string and the text shown in the field.

use crate::consts::{DISPLAY_SEPARATOR, MONTH_DIGITS};
use crate::state::FieldState;
use crate::types::RawValue;

/// Recovers the raw value from whatever the field currently displays
pub fn get_raw(displayed: &str) -> RawValue {
    RawValue::from_display(displayed)
}

/// Formats a raw value for display.
///
/// Up to two digits are shown as typed; from the third digit on the
/// separator is inserted after the month, e.g. `"123"` becomes `"12 / 3"`.
pub fn format(raw: &RawValue) -> String {
    if raw.len() <= MONTH_DIGITS {
        return raw.as_str().to_owned();
    }
    let mut out = String::with_capacity(raw.len() + DISPLAY_SEPARATOR.len());
    out.push_str(raw.month_digits());
    out.push_str(DISPLAY_SEPARATOR);
    out.push_str(raw.year_digits());
    out
}

/// Writes `format(raw)` into the field. The selection is left as is;
/// callers reposition the cursor explicitly.
#[must_use]
pub fn set_value(state: &FieldState, raw: &RawValue) -> FieldState {
    FieldState {
        value:        format(raw),
        cursor_start: state.cursor_start,
        cursor_end:   state.cursor_end,
    }
}
