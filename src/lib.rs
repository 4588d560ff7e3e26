pub mod app;
pub mod calendar;
pub mod storage;
pub mod ui;

pub use app::{CalendarData, CalendarHost, ViewError, ViewState, ViewType, ViewUpdate, WeekPlugin};
pub use calendar::{CalendarConfig, DateCell, DateError, FirstDayOfWeek, MonthInfo};
pub use ui::month_view::calc_jump_data;
pub use ui::week_view::{compute_adjacent_week, compute_week_dates};
pub use ui::{Direction, MonthGrid, WeekError, WeekState};
