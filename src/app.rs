use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::{CalendarConfig, DateCell, DateError, MonthInfo};
use crate::ui::month_view::{self, MonthGrid};
use crate::ui::week_view::{self, Direction, WeekError, WeekState};

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("No calendar data to switch views from")]
    MissingCalendarData,
    #[error("No date available to anchor the view")]
    NoAnchor,
    #[error(transparent)]
    Week(#[from] WeekError),
    #[error(transparent)]
    Date(#[from] DateError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    Month,
    Week,
}

impl ViewType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "month" => Some(ViewType::Month),
            "week" => Some(ViewType::Week),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum ViewState {
    Month(MonthGrid),
    Week(WeekState),
}

/// What the calendar currently displays, plus state that survives view changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarData {
    pub selected_dates: Vec<DateCell>,
    pub view: ViewState,
}

impl CalendarData {
    pub fn new(view: ViewState) -> Self {
        Self { selected_dates: Vec::new(), view }
    }

    pub fn with_selected_dates(mut self, selected_dates: Vec<DateCell>) -> Self {
        self.selected_dates = selected_dates;
        self
    }

    pub fn view_type(&self) -> ViewType {
        match self.view {
            ViewState::Month(_) => ViewType::Month,
            ViewState::Week(_) => ViewType::Week,
        }
    }

    /// Days displayed by the current view, without month grid padding.
    pub fn dates(&self) -> &[DateCell] {
        match &self.view {
            ViewState::Month(grid) => &grid.dates,
            ViewState::Week(week) => week.dates(),
        }
    }

    pub fn context(&self) -> MonthInfo {
        match &self.view {
            ViewState::Month(grid) => grid.context(),
            ViewState::Week(week) => week.context(),
        }
    }

    pub fn cur_year(&self) -> i32 {
        self.context().year
    }

    pub fn cur_month(&self) -> u32 {
        self.context().month
    }

    /// Anchor used when switching views without an explicit target: the
    /// latest selection inside the displayed month, else the first displayed
    /// day of that month.
    pub fn default_anchor(&self) -> Option<DateCell> {
        let context = self.context();
        let in_context = |d: &&DateCell| d.in_month(context.year, context.month);
        self.selected_dates
            .iter()
            .rev()
            .find(in_context)
            .or_else(|| self.dates().iter().find(in_context))
            .or_else(|| self.dates().first())
            .copied()
    }
}

/// Accessors and render sink provided by whatever hosts the calendar.
pub trait CalendarHost {
    fn calendar_config(&self) -> CalendarConfig;
    fn calendar_data(&self) -> Option<&CalendarData>;
    fn render(&mut self, data: CalendarData, config: CalendarConfig);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewUpdate {
    pub data: CalendarData,
    pub config: CalendarConfig,
}

/// Week view support: lifecycle hooks plus the month/week switch.
#[derive(Debug, Default, Clone, Copy)]
pub struct WeekPlugin;

impl WeekPlugin {
    pub const NAME: &'static str = "week";

    pub fn new() -> Self {
        Self
    }

    pub fn before_render(&self, data: CalendarData, _config: &CalendarConfig) -> CalendarData {
        data
    }

    /// Moves a week view one week forward or back; other views pass through.
    pub fn on_switch_calendar(
        &self,
        direction: Direction,
        data: CalendarData,
        config: &CalendarConfig,
    ) -> Result<CalendarData, ViewError> {
        if !config.week_mode {
            return Ok(data);
        }
        let ViewState::Week(week) = &data.view else {
            return Ok(data);
        };
        let week = week_view::compute_adjacent_week(direction, week)?.with_ids();
        tracing::debug!(?direction, first = %week.first().to_time_str(), "week navigation");
        Ok(CalendarData { view: ViewState::Week(week), ..data })
    }

    pub fn calc_dates_when_switch_view(
        &self,
        view: ViewType,
        target: Option<DateCell>,
        host: &impl CalendarHost,
    ) -> Result<Option<ViewUpdate>, ViewError> {
        let config = host.calendar_config();
        if config.multi {
            tracing::warn!("Cannot switch between week and month view in multi-select mode");
            return Ok(None);
        }
        let existing = host.calendar_data().ok_or(ViewError::MissingCalendarData)?;
        let anchor = match target {
            Some(target) => target,
            None => existing.default_anchor().ok_or(ViewError::NoAnchor)?,
        };

        let (view, week_mode) = match view {
            ViewType::Week => {
                let week = week_view::compute_week_dates(&anchor, &config)?.with_ids();
                (ViewState::Week(week), true)
            }
            ViewType::Month => (ViewState::Month(month_view::calc_jump_data(&anchor, &config)?), false),
        };
        tracing::info!(anchor = %anchor.to_time_str(), week_mode, "switched calendar view");

        Ok(Some(ViewUpdate {
            data: CalendarData { view, ..existing.clone() },
            config: config.with_week_mode(week_mode),
        }))
    }

    /// Recomputes the view and hands it to the host. Returns whether anything
    /// was rendered.
    pub fn switch_view(
        &self,
        view: ViewType,
        target: Option<DateCell>,
        host: &mut impl CalendarHost,
    ) -> Result<bool, ViewError> {
        match self.calc_dates_when_switch_view(view, target, host)? {
            Some(ViewUpdate { data, config }) => {
                host.render(data, config);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::FirstDayOfWeek;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> DateCell {
        DateCell::new(year, month, day).unwrap()
    }

    struct TestHost {
        config: CalendarConfig,
        data: Option<CalendarData>,
        renders: usize,
    }

    impl TestHost {
        fn month_of(anchor: DateCell, config: CalendarConfig) -> Self {
            let grid = month_view::calc_jump_data(&anchor, &config).unwrap();
            Self {
                config,
                data: Some(CalendarData::new(ViewState::Month(grid))),
                renders: 0,
            }
        }
    }

    impl CalendarHost for TestHost {
        fn calendar_config(&self) -> CalendarConfig {
            self.config
        }

        fn calendar_data(&self) -> Option<&CalendarData> {
            self.data.as_ref()
        }

        fn render(&mut self, data: CalendarData, config: CalendarConfig) {
            self.data = Some(data);
            self.config = config;
            self.renders += 1;
        }
    }

    fn monday_first() -> CalendarConfig {
        CalendarConfig { first_day_of_week: FirstDayOfWeek::Mon, ..CalendarConfig::default() }
    }

    #[test]
    fn switch_to_week_uses_first_displayed_date_without_selection() {
        let mut host = TestHost::month_of(date(2024, 1, 20), monday_first());

        let rendered = WeekPlugin::new().switch_view(ViewType::Week, None, &mut host).unwrap();

        assert!(rendered);
        let data = host.data.as_ref().unwrap();
        assert_eq!(data.view_type(), ViewType::Week);
        assert_eq!(data.dates()[0].to_time_str(), "2024-1-1");
        assert_eq!((data.cur_year(), data.cur_month()), (2024, 1));
        assert!(host.config.week_mode);
    }

    #[test]
    fn switch_to_week_assigns_positional_ids() {
        let mut host = TestHost::month_of(date(2024, 1, 20), monday_first());

        WeekPlugin::new().switch_view(ViewType::Week, Some(date(2024, 1, 17)), &mut host).unwrap();

        let ids: Vec<_> = host.data.as_ref().unwrap().dates().iter().map(DateCell::id).collect();
        assert_eq!(ids, (0..7).map(Some).collect::<Vec<_>>());
    }

    #[test]
    fn latest_selected_date_in_current_month_is_the_anchor() {
        let mut host = TestHost::month_of(date(2024, 1, 20), monday_first());
        let selected = vec![date(2024, 1, 3), date(2024, 1, 24), date(2024, 2, 14)];
        host.data = host.data.map(|d| d.with_selected_dates(selected.clone()));

        let update = WeekPlugin::new()
            .calc_dates_when_switch_view(ViewType::Week, None, &host)
            .unwrap()
            .unwrap();

        assert_eq!(update.data.dates()[0].to_time_str(), "2024-1-22");
        assert_eq!(update.data.selected_dates, selected);
    }

    #[test]
    fn explicit_target_wins_over_selection() {
        let mut host = TestHost::month_of(date(2024, 1, 20), monday_first());
        host.data = host.data.map(|d| d.with_selected_dates(vec![date(2024, 1, 24)]));

        let update = WeekPlugin::new()
            .calc_dates_when_switch_view(ViewType::Week, Some(date(2024, 3, 5)), &host)
            .unwrap()
            .unwrap();

        assert_eq!(update.data.dates()[0].to_time_str(), "2024-3-4");
        assert_eq!((update.data.cur_year(), update.data.cur_month()), (2024, 3));
    }

    #[test]
    fn month_week_month_round_trip_keeps_anchor_visible() {
        let mut host = TestHost::month_of(date(2024, 5, 9), CalendarConfig::default());
        let anchor = host.data.as_ref().unwrap().default_anchor().unwrap();
        let plugin = WeekPlugin::new();

        plugin.switch_view(ViewType::Week, None, &mut host).unwrap();
        plugin.switch_view(ViewType::Month, None, &mut host).unwrap();

        let data = host.data.as_ref().unwrap();
        let ViewState::Month(grid) = &data.view else {
            panic!("expected month view");
        };
        assert!(grid.contains(&anchor));
        assert!(!host.config.week_mode);
        assert_eq!(host.renders, 2);
    }

    #[test]
    fn week_anchor_skips_padding_from_previous_month() {
        let config = CalendarConfig::default();
        let week = week_view::compute_week_dates(&date(2024, 5, 1), &config).unwrap();
        assert_eq!(week.first().to_time_str(), "2024-4-28");

        let data = CalendarData::new(ViewState::Week(week));

        assert_eq!(data.default_anchor(), Some(date(2024, 5, 1)));
    }

    #[test]
    fn multi_select_mode_produces_no_update() {
        let config = CalendarConfig { multi: true, ..CalendarConfig::default() };
        let mut host = TestHost::month_of(date(2024, 1, 20), config);
        let before = host.data.clone();

        let rendered = WeekPlugin::new().switch_view(ViewType::Week, None, &mut host).unwrap();

        assert!(!rendered);
        assert_eq!(host.renders, 0);
        assert_eq!(host.data, before);
    }

    #[test]
    fn missing_calendar_data_is_an_error() {
        let mut host = TestHost::month_of(date(2024, 1, 20), CalendarConfig::default());
        host.data = None;

        let result = WeekPlugin::new().switch_view(ViewType::Week, None, &mut host);

        assert!(matches!(result, Err(ViewError::MissingCalendarData)));
    }

    #[test]
    fn switch_calendar_in_week_mode_moves_one_week() {
        let config = monday_first().with_week_mode(true);
        let week = week_view::compute_week_dates(&date(2024, 1, 30), &config).unwrap();
        let data = CalendarData::new(ViewState::Week(week))
            .with_selected_dates(vec![date(2024, 1, 2)]);

        let next = WeekPlugin::new()
            .on_switch_calendar(Direction::Next, data, &config)
            .unwrap();

        assert_eq!(next.dates()[0].to_time_str(), "2024-2-5");
        assert_eq!((next.cur_year(), next.cur_month()), (2024, 2));
        assert_eq!(next.selected_dates, vec![date(2024, 1, 2)]);
        assert_eq!(next.dates()[6].id(), Some(6));
    }

    #[test]
    fn switch_calendar_outside_week_mode_passes_through() {
        let host = TestHost::month_of(date(2024, 1, 20), CalendarConfig::default());
        let data = host.data.clone().unwrap();

        let result = WeekPlugin::new()
            .on_switch_calendar(Direction::Next, data.clone(), &host.config)
            .unwrap();

        assert_eq!(result, data);
    }

    #[test]
    fn before_render_returns_data_unchanged() {
        let host = TestHost::month_of(date(2024, 1, 20), CalendarConfig::default());
        let data = host.data.clone().unwrap();

        assert_eq!(WeekPlugin::new().before_render(data.clone(), &host.config), data);
    }

    #[test]
    fn view_type_parses_case_insensitively() {
        assert_eq!(ViewType::parse("Week"), Some(ViewType::Week));
        assert_eq!(ViewType::parse("month"), Some(ViewType::Month));
        assert_eq!(ViewType::parse("day"), None);
    }
}
