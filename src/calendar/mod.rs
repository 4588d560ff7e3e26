pub mod calendar_config;
pub mod date_cell;
pub mod date_util;

pub use calendar_config::{CalendarConfig, FirstDayOfWeek};
pub use date_cell::{DateCell, DateError};
pub use date_util::MonthInfo;
