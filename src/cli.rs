use std::env;

use chrono::{Local, NaiveDate};
use thiserror::Error;

use weekcal::{
    app::{CalendarData, CalendarHost, ViewError, ViewState, ViewType, WeekPlugin},
    calendar::{CalendarConfig, DateCell, FirstDayOfWeek},
    storage::config::{Config, ConfigError},
    ui::{month_view, text_view, Direction},
};

pub const USAGE: &str =
    "Usage: weekcal [--week|--month] [DATE] [--first-day Sun|Mon] [--next N] [--prev N] [--json]";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("Invalid date '{input}'. Use {format}.")]
    InvalidDate { input: String, format: String },
    #[error("--next/--prev need the week view")]
    NavigationNeedsWeekView,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    View(#[from] ViewError),
    #[error("Failed to encode view: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    pub view: Option<ViewType>,
    pub date: Option<String>,
    pub first_day_of_week: Option<FirstDayOfWeek>,
    /// Weeks to move after switching; negative goes back.
    pub weeks: i64,
    pub json: bool,
}

pub enum CliMode {
    Help,
    Show(CliOptions),
}

fn parse_count(flag: &str, value: Option<String>) -> Result<i64, CliError> {
    let value = value.ok_or_else(|| CliError::Usage(format!("{flag} needs a number")))?;
    value
        .parse::<i64>()
        .map_err(|_| CliError::Usage(format!("{flag} needs a number, got '{value}'")))
}

pub fn parse_cli_mode<I>(args: I) -> Result<CliMode, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut options = CliOptions::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--week" => options.view = Some(ViewType::Week),
            "--month" => options.view = Some(ViewType::Month),
            "--json" => options.json = true,
            "--first-day" => {
                let value = args.next().unwrap_or_default();
                let first_day = FirstDayOfWeek::parse(&value).ok_or_else(|| {
                    CliError::Usage(format!("Unknown first day '{value}'. Use Sun or Mon."))
                })?;
                options.first_day_of_week = Some(first_day);
            }
            "--next" => options.weeks += parse_count("--next", args.next())?,
            "--prev" => options.weeks -= parse_count("--prev", args.next())?,
            "--help" | "-h" => return Ok(CliMode::Help),
            other if !other.starts_with("--") && options.date.is_none() => {
                options.date = Some(other.to_string());
            }
            _ => return Err(CliError::Usage(format!("Unknown argument: {}", arg))),
        }
    }

    Ok(CliMode::Show(options))
}

pub fn parse_cli_mode_from_env() -> Result<CliMode, CliError> {
    parse_cli_mode(env::args().skip(1))
}

/// Host that keeps the last rendered view for printing.
struct TerminalHost {
    config: CalendarConfig,
    data: Option<CalendarData>,
}

impl CalendarHost for TerminalHost {
    fn calendar_config(&self) -> CalendarConfig {
        self.config
    }

    fn calendar_data(&self) -> Option<&CalendarData> {
        self.data.as_ref()
    }

    fn render(&mut self, data: CalendarData, config: CalendarConfig) {
        tracing::debug!(view = ?data.view_type(), "render");
        self.data = Some(data);
        self.config = config;
    }
}

fn resolve_date(input: Option<&str>, format: &str) -> Result<NaiveDate, CliError> {
    match input {
        Some(value) => NaiveDate::parse_from_str(value, format).map_err(|_| CliError::InvalidDate {
            input: value.to_string(),
            format: format.to_string(),
        }),
        None => Ok(Local::now().date_naive()),
    }
}

/// Runs the CLI and returns the text to print.
pub fn run_show_mode(options: CliOptions, config: Config) -> Result<String, CliError> {
    let mut calendar = config.calendar;
    if let Some(first_day) = options.first_day_of_week {
        calendar.first_day_of_week = first_day;
    }
    let view = options.view.unwrap_or(config.ui.default_view);
    if options.weeks != 0 && view != ViewType::Week {
        return Err(CliError::NavigationNeedsWeekView);
    }

    let target = DateCell::from_naive(resolve_date(options.date.as_deref(), &config.ui.date_format)?);
    let initial = month_view::calc_jump_data(&target, &calendar).map_err(ViewError::from)?;
    let mut host = TerminalHost {
        config: calendar.with_week_mode(false),
        data: Some(CalendarData::new(ViewState::Month(initial))),
    };

    let plugin = WeekPlugin::new();
    plugin.switch_view(view, Some(target), &mut host)?;

    let direction = if options.weeks > 0 { Direction::Next } else { Direction::Prev };
    for _ in 0..options.weeks.unsigned_abs() {
        if let Some(data) = host.data.take() {
            host.data = Some(plugin.on_switch_calendar(direction, data, &host.config)?);
        }
    }

    let Some(data) = host.data else {
        return Ok(String::new());
    };
    let data = plugin.before_render(data, &host.config);

    if options.json {
        return Ok(serde_json::to_string_pretty(&data)?);
    }
    Ok(match &data.view {
        ViewState::Week(week) => text_view::render_week(week, host.config.first_day_of_week),
        ViewState::Month(grid) => text_view::render_month(grid, host.config.first_day_of_week),
    })
}

pub fn run(options: CliOptions) -> Result<String, CliError> {
    let config = Config::load_or_create()?;
    run_show_mode(options, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn options(values: &[&str]) -> CliOptions {
        match parse_cli_mode(args(values)).unwrap() {
            CliMode::Show(options) => options,
            CliMode::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn parses_view_date_and_navigation() {
        let parsed = options(&["--week", "2024/01/01", "--first-day", "Mon", "--next", "3", "--prev", "1"]);

        assert_eq!(parsed.view, Some(ViewType::Week));
        assert_eq!(parsed.date.as_deref(), Some("2024/01/01"));
        assert_eq!(parsed.first_day_of_week, Some(FirstDayOfWeek::Mon));
        assert_eq!(parsed.weeks, 2);
    }

    #[test]
    fn rejects_unknown_flags_and_bad_counts() {
        assert!(matches!(parse_cli_mode(args(&["--day"])), Err(CliError::Usage(_))));
        assert!(matches!(parse_cli_mode(args(&["--next", "x"])), Err(CliError::Usage(_))));
        assert!(matches!(
            parse_cli_mode(args(&["--first-day", "Fri"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn help_flag_short_circuits() {
        assert!(matches!(parse_cli_mode(args(&["--week", "--help"])), Ok(CliMode::Help)));
    }

    #[test]
    fn week_view_for_new_year_2024() {
        let output = run_show_mode(options(&["--week", "2024/01/01"]), Config::default()).unwrap();

        assert!(output.contains("Dec 31 - Jan 06, 2024"));
    }

    #[test]
    fn navigation_moves_week_view() {
        let output = run_show_mode(
            options(&["2024/01/24", "--first-day", "Mon", "--next", "1"]),
            Config::default(),
        )
        .unwrap();

        assert!(output.starts_with("February 2024\nJan 29 - Feb 04, 2024"));
    }

    #[test]
    fn navigation_requires_week_view() {
        let result = run_show_mode(options(&["--month", "--next", "1"]), Config::default());

        assert!(matches!(result, Err(CliError::NavigationNeedsWeekView)));
    }

    #[test]
    fn invalid_date_reports_expected_format() {
        let result = run_show_mode(options(&["2024-01-01"]), Config::default());

        assert!(matches!(result, Err(CliError::InvalidDate { .. })));
    }

    #[test]
    fn json_output_tags_the_view() {
        let output =
            run_show_mode(options(&["--month", "2024/02/10", "--json"]), Config::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["view"]["view"], "month");
        assert_eq!(value["view"]["cur_month"], 2);
    }
}
