//! Calendar plausibility checks for a complete raw value.

use crate::ExpirationError;
use crate::clock::Today;
use crate::config::ValidationPolicy;
use crate::consts::MAX_RAW_DIGITS;
use crate::types::{ExpirationDate, Month, RawValue, Year};

impl ValidationPolicy {
    /// Parses `raw` as `MMYY` and checks it against `today`.
    ///
    /// The expiration is valid from the current month up to December of
    /// `today.year() + max_years_ahead`.
    ///
    /// # Errors
    /// - `ExpirationError::ExpirationDateRequired` if `raw` is not exactly
    ///   four digits.
    /// - `ExpirationError::ExpirationInvalid` if the month is out of range or
    ///   the date lies in the past or too far in the future.
    pub fn validate(
        &self,
        raw: &RawValue,
        today: Today,
    ) -> Result<ExpirationDate, ExpirationError> {
        if raw.len() != MAX_RAW_DIGITS {
            return Err(ExpirationError::ExpirationDateRequired);
        }

        let month_num = parse_digits(raw.month_digits())?;
        let year_num = parse_digits(raw.year_digits())?;

        let month = u8::try_from(month_num)
            .ok()
            .and_then(|m| Month::new(m).ok())
            .ok_or(ExpirationError::ExpirationInvalid)?;

        let year = Year::from_two_digit(self.century_base, year_num)
            .map_err(|_| ExpirationError::ExpirationInvalid)?;
        let full_year = i32::from(year.get());
        let current_year = today.year();

        if full_year < current_year
            || full_year > current_year + i32::from(self.max_years_ahead)
            || (full_year == current_year && month.get() < today.month())
        {
            return Err(ExpirationError::ExpirationInvalid);
        }

        Ok(ExpirationDate::new(year, month))
    }

    /// Returns the error `validate` would report, if any
    pub fn get_error(&self, raw: &RawValue, today: Today) -> Option<ExpirationError> {
        self.validate(raw, today).err()
    }
}

/// Validates `raw` with the default policy
///
/// # Errors
/// See [`ValidationPolicy::validate`].
pub fn validate(raw: &RawValue, today: Today) -> Result<ExpirationDate, ExpirationError> {
    ValidationPolicy::default().validate(raw, today)
}

/// Returns the validation error for `raw` under the default policy, if any
pub fn get_error(raw: &RawValue, today: Today) -> Option<ExpirationError> {
    ValidationPolicy::default().get_error(raw, today)
}

fn parse_digits(digits: &str) -> Result<u16, ExpirationError> {
    digits
        .parse::<u16>()
        .map_err(|_| ExpirationError::ExpirationInvalid)
}
