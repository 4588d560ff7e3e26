use serde::{Deserialize, Serialize};

use crate::calendar::date_util::calc_dates;
use crate::calendar::{CalendarConfig, DateCell, DateError, MonthInfo};
use crate::ui::week_view::DAYS_PER_WEEK;

/// Month view: the days of one month plus the neighbouring days that fill
/// its first and last rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub cur_year: i32,
    pub cur_month: u32,
    pub dates: Vec<DateCell>,
    pub prev_month_grids: Vec<DateCell>,
    pub next_month_grids: Vec<DateCell>,
}

impl MonthGrid {
    pub fn context(&self) -> MonthInfo {
        MonthInfo { year: self.cur_year, month: self.cur_month }
    }

    /// Every cell of the grid, padding included.
    pub fn cells(&self) -> impl Iterator<Item = &DateCell> {
        self.prev_month_grids
            .iter()
            .chain(&self.dates)
            .chain(&self.next_month_grids)
    }

    pub fn rows(&self) -> Vec<Vec<DateCell>> {
        let cells: Vec<DateCell> = self.cells().copied().collect();
        cells.chunks(DAYS_PER_WEEK).map(<[DateCell]>::to_vec).collect()
    }

    /// Whether `target` is one of the month's own days.
    pub fn contains(&self, target: &DateCell) -> bool {
        self.dates.iter().any(|d| d.same_day(target))
    }
}

/// Month grid for the month holding `anchor`.
pub fn calc_jump_data(anchor: &DateCell, config: &CalendarConfig) -> Result<MonthGrid, DateError> {
    let month = MonthInfo::of(anchor);
    let dates = calc_dates(month.year, month.month)?;

    let (Some(first), Some(last)) = (dates.first(), dates.last()) else {
        return Err(DateError::InvalidDate { year: month.year, month: month.month, date: 1 });
    };

    let days_before = config.first_day_of_week.offset_of(first.day()) as usize;
    let prev = month.prev();
    let prev_dates = calc_dates(prev.year, prev.month)?;
    let prev_month_grids = prev_dates[prev_dates.len() - days_before..].to_vec();

    let days_after = DAYS_PER_WEEK - 1 - config.first_day_of_week.offset_of(last.day()) as usize;
    let next = month.next();
    let next_month_grids = calc_dates(next.year, next.month)?
        .into_iter()
        .take(days_after)
        .collect();

    tracing::debug!(
        year = month.year,
        month = month.month,
        days_before,
        days_after,
        "computed month grid"
    );

    Ok(MonthGrid {
        cur_year: month.year,
        cur_month: month.month,
        dates,
        prev_month_grids,
        next_month_grids,
    })
}
