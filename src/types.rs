use crate::ParseError;
use crate::consts::{MAX_MONTH, MAX_RAW_DIGITS, MONTH_DIGITS};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// The canonical content of the field: 0 to `MAX_RAW_DIGITS` ASCII digits,
/// month digits first, year digits after.
///
/// Built from arbitrary text by discarding everything that is not a digit,
/// so any displayed value (formatted or pasted) maps back to a raw value.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, Deref, Display, Into, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub struct RawValue(String);

impl RawValue {
    /// Creates an empty raw value
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// Strips all non-digit characters from `text` and keeps at most
    /// `MAX_RAW_DIGITS` of them.
    pub fn from_display(text: &str) -> Self {
        Self(
            text.chars()
                .filter(char::is_ascii_digit)
                .take(MAX_RAW_DIGITS)
                .collect(),
        )
    }

    /// Returns true once all `MAX_RAW_DIGITS` digits are present
    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_RAW_DIGITS
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Month digits typed so far (0 to 2 characters)
    pub fn month_digits(&self) -> &str {
        &self.0[..self.0.len().min(MONTH_DIGITS)]
    }

    /// Year digits typed so far (0 to 2 characters)
    pub fn year_digits(&self) -> &str {
        &self.0[self.0.len().min(MONTH_DIGITS)..]
    }

    /// Returns a copy with `digit` spliced in at `index`.
    ///
    /// `index` past the end appends. Returns `None` when the value is
    /// already full or `digit` is not an ASCII digit.
    pub fn insert(&self, index: usize, digit: char) -> Option<Self> {
        if self.is_full() || !digit.is_ascii_digit() {
            return None;
        }
        let mut next = self.0.clone();
        next.insert(index.min(self.0.len()), digit);
        Some(Self(next))
    }

    /// Splices the digits of `text` in at `index`, stopping once the value
    /// is full.
    ///
    /// Returns the new value and how many digits went in, or `None` if
    /// nothing could be inserted.
    pub fn insert_digits(&self, index: usize, text: &str) -> Option<(Self, usize)> {
        let mut next = self.clone();
        let mut at = index.min(self.0.len());
        for digit in text.chars().filter(char::is_ascii_digit) {
            let Some(spliced) = next.insert(at, digit) else {
                break;
            };
            next = spliced;
            at += 1;
        }
        let inserted = next.0.len() - self.0.len();
        (inserted > 0).then_some((next, inserted))
    }

    /// Returns a copy without the digit at `index`, or `None` if there is
    /// no digit there.
    pub fn remove(&self, index: usize) -> Option<Self> {
        if index >= self.0.len() {
            return None;
        }
        let mut next = self.0.clone();
        next.remove(index);
        Some(Self(next))
    }
}

impl From<String> for RawValue {
    fn from(text: String) -> Self {
        Self::from_display(&text)
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        Self::from_display(text)
    }
}

/// Calendar month of an expiration, `1..=MAX_MONTH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NonZeroU8);

impl Month {
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        NonZeroU8::new(value)
            .filter(|m| m.get() <= MAX_MONTH)
            .map(Self)
            .ok_or(ParseError::InvalidMonth(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

/// Full year of an expiration: the two typed digits plus the policy's
/// century base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Year(NonZeroU16);

impl Year {
    /// Widens the two-digit year `yy` with `century_base`.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the sum overflows or is 0.
    pub fn from_two_digit(century_base: u16, yy: u16) -> Result<Self, ParseError> {
        century_base
            .checked_add(yy)
            .and_then(NonZeroU16::new)
            .map(Self)
            .ok_or(ParseError::InvalidYear(yy))
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

/// A card expiration that passed validation.
///
/// Ordered by year, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:02}/{:04}", "month.get()", "year.get()")]
pub struct ExpirationDate {
    year:  Year,
    month: Month,
}

impl ExpirationDate {
    pub const fn new(year: Year, month: Month) -> Self {
        Self { year, month }
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }
}
