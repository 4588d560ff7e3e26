use serde::{Deserialize, Serialize};

/// Which weekday opens a row in the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FirstDayOfWeek {
    #[default]
    Sun,
    Mon,
}

impl FirstDayOfWeek {
    /// Position of a weekday (0 = Sunday) within a row.
    pub fn offset_of(self, day: u32) -> u32 {
        match self {
            FirstDayOfWeek::Sun => day % 7,
            FirstDayOfWeek::Mon => (day + 6) % 7,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "sun" | "sunday" => Some(FirstDayOfWeek::Sun),
            "mon" | "monday" => Some(FirstDayOfWeek::Mon),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub first_day_of_week: FirstDayOfWeek,
    /// Multi-date selection. Week view is unavailable while it is on.
    pub multi: bool,
    pub week_mode: bool,
}

impl CalendarConfig {
    pub fn with_week_mode(mut self, week_mode: bool) -> Self {
        self.week_mode = week_mode;
        self
    }
}
