use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::date_util::{calc_dates, dates_count_of_month, day_of_week};
use crate::calendar::{CalendarConfig, DateCell, DateError, FirstDayOfWeek, MonthInfo};

pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeekError {
    #[error(transparent)]
    Date(#[from] DateError),
    #[error("A week needs 7 dates, got {0}")]
    WrongLength(usize),
    #[error("Week dates are not consecutive at {0}")]
    NotConsecutive(String),
    #[error("Date {0} is not part of its month grid")]
    MissingFromMonth(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Next,
    Prev,
}

impl Direction {
    /// Swiping left reveals the following week.
    pub fn from_swipe(swipe: &str) -> Self {
        if swipe == "left" {
            Direction::Next
        } else {
            Direction::Prev
        }
    }
}

/// Seven consecutive days plus the month the user is navigating in.
///
/// `cur_year`/`cur_month` is the navigation context; a week spanning two
/// months belongs to exactly one of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWeekState")]
pub struct WeekState {
    dates: Vec<DateCell>,
    cur_year: i32,
    cur_month: u32,
}

#[derive(Deserialize)]
struct RawWeekState {
    dates: Vec<DateCell>,
    cur_year: i32,
    cur_month: u32,
}

impl TryFrom<RawWeekState> for WeekState {
    type Error = WeekError;

    fn try_from(raw: RawWeekState) -> Result<Self, Self::Error> {
        WeekState::new(raw.dates, raw.cur_year, raw.cur_month)
    }
}

impl WeekState {
    pub fn new(dates: Vec<DateCell>, cur_year: i32, cur_month: u32) -> Result<Self, WeekError> {
        MonthInfo::new(cur_year, cur_month)?;
        if dates.len() != DAYS_PER_WEEK {
            return Err(WeekError::WrongLength(dates.len()));
        }
        for pair in dates.windows(2) {
            if pair[0].naive_date().succ_opt() != Some(pair[1].naive_date()) {
                return Err(WeekError::NotConsecutive(pair[1].to_time_str()));
            }
        }
        Ok(Self { dates, cur_year, cur_month })
    }

    fn in_context(dates: Vec<DateCell>, context: MonthInfo) -> Result<Self, WeekError> {
        Self::new(dates, context.year, context.month)
    }

    pub fn dates(&self) -> &[DateCell] {
        &self.dates
    }

    pub fn cur_year(&self) -> i32 {
        self.cur_year
    }

    pub fn cur_month(&self) -> u32 {
        self.cur_month
    }

    pub fn context(&self) -> MonthInfo {
        MonthInfo { year: self.cur_year, month: self.cur_month }
    }

    pub fn first(&self) -> &DateCell {
        &self.dates[0]
    }

    pub fn last(&self) -> &DateCell {
        &self.dates[DAYS_PER_WEEK - 1]
    }

    pub fn contains(&self, target: &DateCell) -> bool {
        date_is_in_dates_range(target, &self.dates)
    }

    /// Same dates tagged with their position in the week.
    pub fn with_ids(mut self) -> Self {
        for (idx, cell) in self.dates.iter_mut().enumerate() {
            *cell = cell.with_id(idx);
        }
        self
    }
}

/// Days of `month_dates` that share a week with the 1st of the month.
pub fn first_week_in_month(
    month: MonthInfo,
    month_dates: &[DateCell],
    config: &CalendarConfig,
) -> Result<Vec<DateCell>, DateError> {
    let first_day = day_of_week(month.year, month.month, 1)?;
    let len = match config.first_day_of_week {
        FirstDayOfWeek::Sun => 7 - first_day,
        // A Sunday 1st closes the previous Monday-first week.
        FirstDayOfWeek::Mon => {
            let first_day = if first_day == 0 { 7 } else { first_day };
            7 - first_day + 1
        }
    };
    let len = (len as usize).min(month_dates.len());
    Ok(month_dates[..len].to_vec())
}

/// Days of `month_dates` that share a week with the last day of the month.
pub fn last_week_in_month(
    month: MonthInfo,
    month_dates: &[DateCell],
    config: &CalendarConfig,
) -> Result<Vec<DateCell>, DateError> {
    let last_date = dates_count_of_month(month.year, month.month)?;
    let last_day = day_of_week(month.year, month.month, last_date)?;
    let len = match config.first_day_of_week {
        FirstDayOfWeek::Sun => last_day + 1,
        FirstDayOfWeek::Mon => {
            if last_day == 0 {
                7
            } else {
                last_day
            }
        }
    };
    let len = (len as usize).min(month_dates.len());
    Ok(month_dates[month_dates.len() - len..].to_vec())
}

pub fn date_is_in_dates_range(target: &DateCell, dates: &[DateCell]) -> bool {
    let key = target.to_time_str();
    dates.iter().any(|d| d.to_time_str() == key)
}

fn dates_when_target_in_first_week(
    month: MonthInfo,
    first_week: Vec<DateCell>,
) -> Result<Vec<DateCell>, DateError> {
    let missing = DAYS_PER_WEEK - first_week.len();
    let prev = month.prev();
    let prev_dates = calc_dates(prev.year, prev.month)?;
    let mut dates = prev_dates[prev_dates.len() - missing..].to_vec();
    dates.extend(first_week);
    Ok(dates)
}

fn dates_when_target_in_last_week(
    month: MonthInfo,
    last_week: Vec<DateCell>,
) -> Result<Vec<DateCell>, DateError> {
    let missing = DAYS_PER_WEEK - last_week.len();
    let next = month.next();
    let mut dates = last_week;
    for date in 1..=missing as u32 {
        dates.push(DateCell::new(next.year, next.month, date)?);
    }
    Ok(dates)
}

fn interior_week_dates(
    target: &DateCell,
    month_dates: &[DateCell],
    config: &CalendarConfig,
) -> Result<Vec<DateCell>, WeekError> {
    let offset = config.first_day_of_week.offset_of(target.day());
    let start_idx = (target.date() - 1)
        .checked_sub(offset)
        .ok_or_else(|| WeekError::MissingFromMonth(target.to_time_str()))?
        as usize;
    month_dates
        .get(start_idx..start_idx + DAYS_PER_WEEK)
        .map(<[DateCell]>::to_vec)
        .ok_or_else(|| WeekError::MissingFromMonth(target.to_time_str()))
}

/// The seven dates of the week holding `target`, in `target`'s month context.
pub fn compute_week_dates(
    target: &DateCell,
    config: &CalendarConfig,
) -> Result<WeekState, WeekError> {
    let month = MonthInfo::of(target);
    let month_dates = calc_dates(month.year, month.month)?;
    let first_week = first_week_in_month(month, &month_dates, config)?;
    let last_week = last_week_in_month(month, &month_dates, config)?;

    let dates = if date_is_in_dates_range(target, &first_week) {
        dates_when_target_in_first_week(month, first_week)?
    } else if date_is_in_dates_range(target, &last_week) {
        dates_when_target_in_last_week(month, last_week)?
    } else {
        interior_week_dates(target, &month_dates, config)?
    };

    tracing::debug!(
        anchor = %target.to_time_str(),
        first = %dates[0].to_time_str(),
        "computed week dates"
    );
    WeekState::in_context(dates, month)
}

fn index_in(cell: &DateCell, month_dates: &[DateCell]) -> Result<usize, WeekError> {
    month_dates
        .iter()
        .position(|d| d.same_day(cell))
        .ok_or_else(|| WeekError::MissingFromMonth(cell.to_time_str()))
}

pub fn next_week_dates(state: &WeekState) -> Result<WeekState, WeekError> {
    let last = state.last();
    // The last day may already sit in the month after the tracked one.
    let current = MonthInfo::of(last);
    let month_dates = calc_dates(current.year, current.month)?;
    let remaining = dates_count_of_month(current.year, current.month)? - last.date();
    let start_idx = index_in(last, &month_dates)? + 1;

    if remaining as usize >= DAYS_PER_WEEK {
        let dates = month_dates[start_idx..start_idx + DAYS_PER_WEEK].to_vec();
        return WeekState::in_context(dates, current);
    }

    let next = current.next();
    let next_dates = calc_dates(next.year, next.month)?;
    let mut dates = month_dates[start_idx..].to_vec();
    let missing = DAYS_PER_WEEK - dates.len();
    dates.extend_from_slice(&next_dates[..missing]);
    tracing::debug!(year = next.year, month = next.month, "week crossed into next month");
    WeekState::in_context(dates, next)
}

pub fn prev_week_dates(state: &WeekState) -> Result<WeekState, WeekError> {
    let first = state.first();
    let current = MonthInfo::of(first);
    let month_dates = calc_dates(current.year, current.month)?;
    let first_idx = index_in(first, &month_dates)?;

    if first_idx >= DAYS_PER_WEEK {
        let dates = month_dates[first_idx - DAYS_PER_WEEK..first_idx].to_vec();
        return WeekState::in_context(dates, current);
    }

    let prev = current.prev();
    let prev_dates = calc_dates(prev.year, prev.month)?;
    let remain = &month_dates[..first_idx];
    let missing = DAYS_PER_WEEK - remain.len();
    let mut dates = prev_dates[prev_dates.len() - missing..].to_vec();
    dates.extend_from_slice(remain);
    tracing::debug!(year = prev.year, month = prev.month, "week crossed into previous month");
    WeekState::in_context(dates, prev)
}

pub fn compute_adjacent_week(
    direction: Direction,
    state: &WeekState,
) -> Result<WeekState, WeekError> {
    match direction {
        Direction::Next => next_week_dates(state),
        Direction::Prev => prev_week_dates(state),
    }
}
