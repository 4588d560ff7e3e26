use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("Invalid month {month} (expected 1-12)")]
    InvalidMonth { month: u32 },
    #[error("Invalid date {year}-{month}-{date}")]
    InvalidDate { year: i32, month: u32, date: u32 },
}

/// One calendar day as shown in a view.
///
/// The weekday is derived from the date and cannot be set independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateCell", into = "RawDateCell")]
pub struct DateCell {
    date: NaiveDate,
    id: Option<usize>,
}

#[derive(Serialize, Deserialize)]
struct RawDateCell {
    year: i32,
    month: u32,
    date: u32,
    #[serde(default, skip_deserializing)]
    day: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<usize>,
}

impl TryFrom<RawDateCell> for DateCell {
    type Error = DateError;

    fn try_from(raw: RawDateCell) -> Result<Self, Self::Error> {
        let cell = DateCell::new(raw.year, raw.month, raw.date)?;
        Ok(match raw.id {
            Some(id) => cell.with_id(id),
            None => cell,
        })
    }
}

impl From<DateCell> for RawDateCell {
    fn from(cell: DateCell) -> Self {
        Self {
            year: cell.year(),
            month: cell.month(),
            date: cell.date(),
            day: cell.day(),
            id: cell.id,
        }
    }
}

impl DateCell {
    pub fn new(year: i32, month: u32, date: u32) -> Result<Self, DateError> {
        if !(1..=12).contains(&month) {
            return Err(DateError::InvalidMonth { month });
        }
        NaiveDate::from_ymd_opt(year, month, date)
            .map(Self::from_naive)
            .ok_or(DateError::InvalidDate { year, month, date })
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self { date, id: None }
    }

    /// Positional id inside a week view (0..7).
    pub fn with_id(mut self, id: usize) -> Self {
        self.id = Some(id);
        self
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Day of the month, starting at 1.
    pub fn date(&self) -> u32 {
        self.date.day()
    }

    /// Day of the week, 0 = Sunday.
    pub fn day(&self) -> u32 {
        self.date.weekday().num_days_from_sunday()
    }

    pub fn id(&self) -> Option<usize> {
        self.id
    }

    pub fn naive_date(&self) -> NaiveDate {
        self.date
    }

    /// Canonical lookup key, e.g. `2024-1-5`.
    pub fn to_time_str(&self) -> String {
        format!("{}-{}-{}", self.year(), self.month(), self.date())
    }

    pub fn same_day(&self, other: &DateCell) -> bool {
        self.to_time_str() == other.to_time_str()
    }

    pub fn in_month(&self, year: i32, month: u32) -> bool {
        self.year() == year && self.month() == month
    }
}
