/// Maximum number of digits in a raw value (MMYY)
pub const MAX_RAW_DIGITS: usize = 4;

/// Number of raw digits that make up the month
pub const MONTH_DIGITS: usize = 2;

/// Separator inserted between month and year in the displayed value
pub const DISPLAY_SEPARATOR: &str = " / ";

/// Length of `DISPLAY_SEPARATOR` in display positions
pub const SEPARATOR_LEN: usize = DISPLAY_SEPARATOR.len();

/// Display index of the first separator position (right after the month)
pub const SEPARATOR_START: usize = MONTH_DIGITS;

/// Last display index that still counts as inside the separator span
pub const SEPARATOR_END: usize = MONTH_DIGITS + SEPARATOR_LEN - 1;

/// Display index immediately after the separator
pub const AFTER_SEPARATOR: usize = MONTH_DIGITS + SEPARATOR_LEN;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Two-digit years are read relative to this century
pub const DEFAULT_CENTURY_BASE: u16 = 2000;

/// How many years past the current one an expiration may lie (inclusive)
pub const DEFAULT_MAX_YEARS_AHEAD: u16 = 20;

/// Stable code for an incomplete value
pub const CODE_DATE_REQUIRED: &str = "expirationDateRequired";

/// Stable code for an out-of-range or past-dated value
pub const CODE_INVALID: &str = "expirationInvalid";
