use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::date_cell::{DateCell, DateError};

/// A year/month pair used as navigation context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthInfo {
    pub year: i32,
    pub month: u32,
}

impl MonthInfo {
    pub fn new(year: i32, month: u32) -> Result<Self, DateError> {
        if !(1..=12).contains(&month) {
            return Err(DateError::InvalidMonth { month });
        }
        Ok(Self { year, month })
    }

    pub fn of(cell: &DateCell) -> Self {
        Self {
            year: cell.year(),
            month: cell.month(),
        }
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, DateError> {
    if !(1..=12).contains(&month) {
        return Err(DateError::InvalidMonth { month });
    }
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(DateError::InvalidDate { year, month, date: 1 })
}

pub fn dates_count_of_month(year: i32, month: u32) -> Result<u32, DateError> {
    let first = first_of_month(year, month)?;
    let next = MonthInfo { year, month }.next();
    let next_first = first_of_month(next.year, next.month)?;
    Ok(next_first.signed_duration_since(first).num_days() as u32)
}

/// Weekday of the given day, 0 = Sunday.
pub fn day_of_week(year: i32, month: u32, date: u32) -> Result<u32, DateError> {
    NaiveDate::from_ymd_opt(year, month, date)
        .map(|d| d.weekday().num_days_from_sunday())
        .ok_or(DateError::InvalidDate { year, month, date })
}

/// Every day of the month in ascending order; index `i` holds day `i + 1`.
pub fn calc_dates(year: i32, month: u32) -> Result<Vec<DateCell>, DateError> {
    let first = first_of_month(year, month)?;
    let count = dates_count_of_month(year, month)?;
    Ok(first
        .iter_days()
        .take(count as usize)
        .map(DateCell::from_naive)
        .collect())
}
