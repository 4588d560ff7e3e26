pub mod month_view;
pub mod text_view;
pub mod week_view;

pub use month_view::MonthGrid;
pub use week_view::{Direction, WeekError, WeekState};
