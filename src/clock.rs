use crate::ParseError;
use crate::prelude::*;
use crate::types::Month;
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

/// The calendar month validation is measured against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize,
)]
#[display(fmt = "{:04}-{:02}", year, month)]
pub struct Today {
    year:  i32,
    month: u8,
}

impl Today {
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if `month` is not in `1..=12`.
    pub fn new(year: i32, month: u8) -> Result<Self, ParseError> {
        let month = Month::new(month)?;
        Ok(Self {
            year,
            month: month.get(),
        })
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    /// 1-based month
    pub const fn month(&self) -> u8 {
        self.month
    }
}

impl From<NaiveDate> for Today {
    #[allow(clippy::cast_possible_truncation)]
    fn from(date: NaiveDate) -> Self {
        // chrono months are always 1..=12
        Self {
            year:  date.year(),
            month: date.month() as u8,
        }
    }
}

/// Source of the current date for expiration checks
pub trait Clock {
    fn today(&self) -> Today;
}

/// Reads the local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Today {
        Today::from(Local::now().date_naive())
    }
}

/// Always reports the same date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Today);

impl Clock for FixedClock {
    fn today(&self) -> Today {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> Today {
        (**self).today()
    }
}
