//! Calendar projection of assignments onto a month grid.
//!
//! Start and end are pure calendar dates. Anything that arrives as text is
//! reduced to its `YYYY-MM-DD` prefix first, so a timestamp never shifts an
//! event into the neighbouring day.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::workflow::AssignmentStatus;

/// Maximum number of events rendered inside one day cell.
pub const MAX_EVENTS_PER_CELL: usize = 4;

/// Parse the date-only prefix of `raw` (`2025-12-17`, `2025-12-17T03:00:00Z`,
/// `2025-12-17 10:00:00-03`).
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let prefix = raw.split(['T', ' ']).next().unwrap_or(raw);
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// One assignment as seen by the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CalendarEvent {
    pub id: Uuid,
    pub title: String,
    pub machine: String,
    pub location: Option<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub status: AssignmentStatus,
    pub technician_id: Uuid,
    pub technician_name: String,
    pub service_type: String,
}

impl CalendarEvent {
    /// Whether `day` lies in `[start, end]`. An event whose end precedes its
    /// start covers no day at all.
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

/// Visible days of a month: from the Monday on or before the 1st to the
/// Sunday on or after the last day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
}

impl MonthGrid {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let month_start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        let month_end = next_month - Duration::days(1);

        let lead = month_start.weekday().num_days_from_monday() as i64;
        let trail = 6 - month_end.weekday().num_days_from_monday() as i64;

        Some(Self {
            year,
            month,
            first_day: month_start - Duration::days(lead),
            last_day: month_end + Duration::days(trail),
        })
    }

    /// Grid for the month containing `day`.
    pub fn containing(day: NaiveDate) -> Self {
        // A date's own year/month always forms a valid grid.
        Self::new(day.year(), day.month()).unwrap_or(Self {
            year: day.year(),
            month: day.month(),
            first_day: day,
            last_day: day,
        })
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.first_day
            .iter_days()
            .take_while(move |d| *d <= self.last_day)
    }

    pub fn weeks(&self) -> usize {
        ((self.last_day - self.first_day).num_days() as usize + 1) / 7
    }

    pub fn is_current_month(&self, day: NaiveDate) -> bool {
        day.year() == self.year && day.month() == self.month
    }
}

/// Events covering `day`, in the order supplied.
pub fn events_for_day<'a>(events: &'a [CalendarEvent], day: NaiveDate) -> Vec<&'a CalendarEvent> {
    events.iter().filter(|e| e.covers(day)).collect()
}

/// Keep only the events of one technician when a filter is given.
pub fn filter_by_technician(
    events: Vec<CalendarEvent>,
    technician: Option<Uuid>,
) -> Vec<CalendarEvent> {
    match technician {
        Some(id) => events
            .into_iter()
            .filter(|e| e.technician_id == id)
            .collect(),
        None => events,
    }
}

/// An event placed inside a day cell.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CellEvent {
    pub id: Uuid,
    pub status: AssignmentStatus,
    /// First name of the technician followed by the client.
    pub label: String,
    pub is_start: bool,
    pub is_end: bool,
    /// Labels are drawn on the first day of the event and on Mondays.
    pub show_label: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub is_today: bool,
    pub events: Vec<CellEvent>,
    /// Events beyond [`MAX_EVENTS_PER_CELL`].
    pub hidden_count: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    pub weeks: usize,
    pub days: Vec<DayCell>,
}

fn cell_label(event: &CalendarEvent) -> String {
    let first_name = event
        .technician_name
        .split_whitespace()
        .next()
        .unwrap_or(&event.technician_name);
    format!("{}: {}", first_name, event.title)
}

/// Project `events` onto every visible day of `grid`.
pub fn project_month(events: &[CalendarEvent], grid: &MonthGrid, today: NaiveDate) -> MonthView {
    let days = grid
        .days()
        .map(|day| {
            let covering = events_for_day(events, day);
            let hidden_count = covering.len().saturating_sub(MAX_EVENTS_PER_CELL);
            let events = covering
                .into_iter()
                .take(MAX_EVENTS_PER_CELL)
                .map(|e| {
                    let is_start = e.start == day;
                    CellEvent {
                        id: e.id,
                        status: e.status,
                        label: cell_label(e),
                        is_start,
                        is_end: e.end == day,
                        show_label: is_start || day.weekday() == Weekday::Mon,
                    }
                })
                .collect();

            DayCell {
                date: day,
                in_current_month: grid.is_current_month(day),
                is_today: day == today,
                events,
                hidden_count,
            }
        })
        .collect();

    MonthView {
        year: grid.year,
        month: grid.month,
        first_day: grid.first_day,
        last_day: grid.last_day,
        weeks: grid.weeks(),
        days,
    }
}

/// Query for the month and day views.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CalendarQuery {
    /// Any date (or timestamp) inside the wanted month / the wanted day.
    pub date: Option<String>,
    pub technician_id: Option<Uuid>,
}

/// All events of a single day, for the day-details view.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DayDetails {
    pub date: NaiveDate,
    pub events: Vec<CalendarEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(start: NaiveDate, end: NaiveDate) -> CalendarEvent {
        CalendarEvent {
            id: Uuid::new_v4(),
            title: "Estancia La Paz".to_string(),
            machine: "Plantor".to_string(),
            location: None,
            start,
            end,
            status: AssignmentStatus::Open,
            technician_id: Uuid::new_v4(),
            technician_name: "Carlos Gómez".to_string(),
            service_type: "Puesta en Marcha".to_string(),
        }
    }

    #[test]
    fn test_parse_calendar_date_uses_prefix_only() {
        assert_eq!(parse_calendar_date("2025-12-17"), Some(date(2025, 12, 17)));
        assert_eq!(
            parse_calendar_date("2025-12-17T23:30:00-03:00"),
            Some(date(2025, 12, 17))
        );
        assert_eq!(
            parse_calendar_date("2025-12-17T00:30:00Z"),
            Some(date(2025, 12, 17))
        );
        assert_eq!(
            parse_calendar_date("2025-12-17 12:00:00+00"),
            Some(date(2025, 12, 17))
        );
        assert_eq!(parse_calendar_date("17/12/2025"), None);
        assert_eq!(parse_calendar_date(""), None);
    }

    #[test]
    fn test_month_grid_extends_to_full_weeks() {
        // December 2025 starts on a Monday and ends on a Wednesday.
        let grid = MonthGrid::new(2025, 12).unwrap();
        assert_eq!(grid.first_day, date(2025, 12, 1));
        assert_eq!(grid.last_day, date(2026, 1, 4));
        assert_eq!(grid.weeks(), 5);
        assert_eq!(grid.days().count(), 35);

        // March 2026 starts on a Sunday: six rows.
        let grid = MonthGrid::new(2026, 3).unwrap();
        assert_eq!(grid.first_day, date(2026, 2, 23));
        assert_eq!(grid.last_day, date(2026, 4, 5));
        assert_eq!(grid.weeks(), 6);

        assert!(MonthGrid::new(2025, 13).is_none());
    }

    #[test]
    fn test_event_appears_only_in_its_days() {
        let e = event(date(2025, 12, 15), date(2025, 12, 17));
        let grid = MonthGrid::new(2025, 12).unwrap();
        let view = project_month(std::slice::from_ref(&e), &grid, date(2025, 12, 1));

        let days_with_event: Vec<NaiveDate> = view
            .days
            .iter()
            .filter(|c| c.events.iter().any(|ce| ce.id == e.id))
            .map(|c| c.date)
            .collect();

        assert_eq!(
            days_with_event,
            vec![date(2025, 12, 15), date(2025, 12, 16), date(2025, 12, 17)]
        );
    }

    #[test]
    fn test_cell_flags() {
        // Sunday 14th to Tuesday 16th: Monday 15th shows the label again.
        let e = event(date(2025, 12, 14), date(2025, 12, 16));
        let grid = MonthGrid::new(2025, 12).unwrap();
        let view = project_month(std::slice::from_ref(&e), &grid, date(2025, 12, 16));

        let cell = |d: u32| {
            view.days
                .iter()
                .find(|c| c.date == date(2025, 12, d))
                .unwrap()
        };

        let first = &cell(14).events[0];
        assert!(first.is_start && !first.is_end && first.show_label);
        assert_eq!(first.label, "Carlos: Estancia La Paz");

        let monday = &cell(15).events[0];
        assert!(!monday.is_start && !monday.is_end && monday.show_label);

        let last = &cell(16).events[0];
        assert!(last.is_end && !last.show_label);
        assert!(cell(16).is_today);
        assert!(!cell(15).is_today);
    }

    #[test]
    fn test_cell_truncates_after_four_events() {
        let day = date(2025, 12, 10);
        let events: Vec<CalendarEvent> = (0..6).map(|_| event(day, day)).collect();
        let grid = MonthGrid::new(2025, 12).unwrap();
        let view = project_month(&events, &grid, day);

        let cell = view.days.iter().find(|c| c.date == day).unwrap();
        assert_eq!(cell.events.len(), MAX_EVENTS_PER_CELL);
        assert_eq!(cell.hidden_count, 2);
        // Supplied order is kept.
        let shown: Vec<Uuid> = cell.events.iter().map(|e| e.id).collect();
        let expected: Vec<Uuid> = events.iter().take(4).map(|e| e.id).collect();
        assert_eq!(shown, expected);
    }

    #[test]
    fn test_inverted_range_is_excluded_everywhere() {
        let e = event(date(2025, 12, 17), date(2025, 12, 15));
        let grid = MonthGrid::new(2025, 12).unwrap();
        let view = project_month(std::slice::from_ref(&e), &grid, date(2025, 12, 1));
        assert!(view.days.iter().all(|c| c.events.is_empty()));
    }

    #[test]
    fn test_out_of_month_days_are_marked() {
        let grid = MonthGrid::new(2025, 12).unwrap();
        let view = project_month(&[], &grid, date(2025, 12, 1));
        let jan = view.days.iter().find(|c| c.date == date(2026, 1, 2)).unwrap();
        assert!(!jan.in_current_month);
        assert!(view.days[0].in_current_month);
    }

    #[test]
    fn test_filter_by_technician() {
        let a = event(date(2025, 12, 1), date(2025, 12, 1));
        let b = event(date(2025, 12, 2), date(2025, 12, 2));
        let tech = a.technician_id;

        let filtered = filter_by_technician(vec![a.clone(), b.clone()], Some(tech));
        assert_eq!(filtered, vec![a.clone()]);
        assert_eq!(filter_by_technician(vec![a, b], None).len(), 2);
    }
}
