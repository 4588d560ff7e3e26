use chrono::NaiveDate;

use crate::calendar::{DateCell, FirstDayOfWeek, MonthInfo};
use crate::ui::month_view::MonthGrid;
use crate::ui::week_view::WeekState;

const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn weekday_header(first_day_of_week: FirstDayOfWeek) -> String {
    let start = match first_day_of_week {
        FirstDayOfWeek::Sun => 0,
        FirstDayOfWeek::Mon => 1,
    };
    (0..7)
        .map(|i| format!(" {} ", WEEKDAY_NAMES[(start + i) % 7]))
        .collect::<String>()
        .trim_end()
        .to_string()
}

fn month_title(month: MonthInfo) -> String {
    NaiveDate::from_ymd_opt(month.year, month.month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", month.year, month.month))
}

/// Days outside the month in context are wrapped in parentheses.
fn format_row(cells: &[DateCell], month: MonthInfo) -> String {
    cells
        .iter()
        .map(|cell| {
            if cell.in_month(month.year, month.month) {
                format!(" {:>2}  ", cell.date())
            } else {
                format!("({:>2}) ", cell.date())
            }
        })
        .collect::<String>()
        .trim_end()
        .to_string()
}

pub fn render_week(week: &WeekState, first_day_of_week: FirstDayOfWeek) -> String {
    let range = format!(
        "{} - {}",
        week.first().naive_date().format("%b %d"),
        week.last().naive_date().format("%b %d, %Y")
    );
    [
        month_title(week.context()),
        range,
        weekday_header(first_day_of_week),
        format_row(week.dates(), week.context()),
    ]
    .join("\n")
}

pub fn render_month(grid: &MonthGrid, first_day_of_week: FirstDayOfWeek) -> String {
    let mut lines = vec![month_title(grid.context()), weekday_header(first_day_of_week)];
    lines.extend(grid.rows().iter().map(|row| format_row(row, grid.context())));
    lines.join("\n")
}
