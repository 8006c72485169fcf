//! Calendar resolution logic for the clinic planner.
//!
//! Decides, for any (year, month), whether an event is occurring and whether
//! it is inside its preparation window. Everything here is a pure function of
//! an immutable event snapshot; the planner service calls it once per
//! rendered month.
//!
//! ## Occurrence rules
//!
//! - Single-month events occur only in their start (year, month).
//! - Non-recurring multi-month events occur on the inclusive span from start
//!   to end, compared chronologically by (year, month). A span that crosses
//!   December needs no special case.
//! - Recurring events occur every year from their start year on, matched by
//!   month only. A recurring span whose end month is before its start month
//!   wraps around the new year (November to February covers 11, 12, 1, 2).
//!
//! ## Preparation rules
//!
//! - Only non-recurring events with `prep_start_date` or a positive
//!   `prep_months_needed` have a preparation window.
//! - The window runs from the prep start month up to, but excluding, the
//!   event start month. `prep_start_date` wins over `prep_months_needed`.
//! - A month in which the event occurs never shows preparation.
//!
//! Malformed records (no resolvable start, months outside 1-12) are not
//! rejected here. They simply never match.

use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;

use crate::domain::models::event::Event;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun",
    "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month with chronological ordering (year first, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    fn index(self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    fn from_index(index: i64) -> Self {
        Self::new(index.div_euclid(12) as i32, (index.rem_euclid(12) + 1) as u32)
    }

    /// Move forward by `months`, rolling into following years
    pub fn add_months(self, months: u32) -> Self {
        Self::from_index(self.index() + months as i64)
    }

    /// Move back by `months`, rolling into previous years
    pub fn sub_months(self, months: u32) -> Self {
        Self::from_index(self.index() - months as i64)
    }
}

/// Effective start of an event, preferring `start_month`/`start_year` and
/// falling back to the legacy `month`/`year` fields one by one.
pub fn resolve_start(event: &Event) -> Option<YearMonth> {
    let month = event.start_month.or(event.month)?;
    let year = event.start_year.or(event.year)?;
    Some(YearMonth::new(year, month))
}

/// Absolute end of a non-recurring span.
///
/// Records without an `end_year` end in the start year, or in the following
/// year when the end month is before the start month.
fn resolve_end(event: &Event, start: YearMonth) -> Option<YearMonth> {
    let end_month = event.end_month?;
    let end_year = match event.end_year {
        Some(year) => year,
        None if end_month < start.month => start.year.checked_add(1)?,
        None => start.year,
    };
    Some(YearMonth::new(end_year, end_month))
}

/// Non-recurring occurrence check against an already resolved start.
fn occurs_in_span(event: &Event, start: YearMonth, target: YearMonth) -> bool {
    match resolve_end(event, start) {
        Some(end) => start <= target && target <= end,
        None => target == start,
    }
}

/// Whether `event` is happening during `target_month` of `target_year`.
pub fn occurs_in_month(event: &Event, target_year: i32, target_month: u32) -> bool {
    let Some(start) = resolve_start(event) else {
        return false;
    };

    if event.is_recurring {
        if target_year < start.year {
            return false;
        }

        return match event.end_month {
            // Wraps past December, so the span is matched modulo the year
            Some(end_month) if end_month < start.month => {
                target_month >= start.month || target_month <= end_month
            }
            Some(end_month) => start.month <= target_month && target_month <= end_month,
            None => target_month == start.month,
        };
    }

    occurs_in_span(event, start, YearMonth::new(target_year, target_month))
}

/// First month of the preparation window. Date beats months.
fn prep_window_start(event: &Event, start: YearMonth) -> Option<YearMonth> {
    if let Some(date) = event.prep_start_date {
        return Some(YearMonth::from_date(date));
    }

    match event.prep_months_needed {
        Some(months) if months > 0 => Some(start.sub_months(months)),
        _ => None,
    }
}

/// Whether `event` should be flagged for preparation in the target month.
pub fn prep_in_month(event: &Event, target_year: i32, target_month: u32) -> bool {
    let needs_prep = event.prep_months_needed.is_some_and(|months| months > 0)
        || event.prep_start_date.is_some();
    if !needs_prep || event.is_recurring {
        return false;
    }

    let Some(start) = resolve_start(event) else {
        return false;
    };

    let target = YearMonth::new(target_year, target_month);
    if occurs_in_span(event, start, target) {
        return false;
    }

    match prep_window_start(event, start) {
        Some(window_start) => window_start <= target && target < start,
        None => false,
    }
}

/// Short label describing an event's preparation need.
///
/// `"Mar 5, 2026"` for an explicit prep date, `"3mo"` for a month count,
/// otherwise empty.
pub fn format_prep_label(event: &Event) -> String {
    if let Some(date) = event.prep_start_date {
        return format!(
            "{} {}, {}",
            month_abbreviation(date.month()),
            date.day(),
            date.year()
        );
    }

    match event.prep_months_needed {
        Some(months) if months > 0 => format!("{}mo", months),
        _ => String::new(),
    }
}

/// Events occurring in the given month, in snapshot order
pub fn events_for_month(events: &[Event], year: i32, month: u32) -> Vec<&Event> {
    events
        .iter()
        .filter(|event| occurs_in_month(event, year, month))
        .collect()
}

/// Events preparing in the given month, in snapshot order
pub fn prep_events_for_month(events: &[Event], year: i32, month: u32) -> Vec<&Event> {
    events
        .iter()
        .filter(|event| prep_in_month(event, year, month))
        .collect()
}

/// Whether any month of `year` can show the event, either occurring or in
/// preparation. Planner snapshots are filtered with this before the
/// per-month checks run.
pub fn touches_year(event: &Event, year: i32) -> bool {
    let Some(start) = resolve_start(event) else {
        return event.matches_year_filter(year);
    };

    if event.is_recurring {
        return start.year <= year;
    }

    let first = prep_window_start(event, start)
        .map_or(start, |window_start| window_start.min(start));
    let last = resolve_end(event, start).map_or(start, |end| end.max(start));

    first.year <= year && year <= last.year
}

/// Order events by effective start, then title. Events without a
/// resolvable start go last.
pub fn compare_by_start(a: &Event, b: &Event) -> Ordering {
    let start_a = resolve_start(a);
    let start_b = resolve_start(b);
    start_a
        .is_none()
        .cmp(&start_b.is_none())
        .then(start_a.cmp(&start_b))
        .then_with(|| a.title.cmp(&b.title))
}

/// Get the human-readable name for a month number
pub fn month_name(month: u32) -> &'static str {
    match month {
        1..=12 => MONTH_NAMES[(month - 1) as usize],
        _ => "Invalid Month",
    }
}

/// Three-letter English abbreviation, empty for out-of-range months
pub fn month_abbreviation(month: u32) -> &'static str {
    match month {
        1..=12 => MONTH_ABBREVIATIONS[(month - 1) as usize],
        _ => "",
    }
}

/// Months belonging to quarter 1-4
pub fn quarter_months(quarter: u32) -> Option<[u32; 3]> {
    match quarter {
        1..=4 => {
            let first = (quarter - 1) * 3 + 1;
            Some([first, first + 1, first + 2])
        }
        _ => None,
    }
}

/// Quarter (1-4) containing `month`
pub fn quarter_of(month: u32) -> Option<u32> {
    match month {
        1..=12 => Some((month - 1) / 3 + 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn base_event() -> Event {
        Event {
            id: "event::test".to_string(),
            title: "Flu shot drive".to_string(),
            description: None,
            start_month: None,
            start_year: None,
            month: None,
            year: None,
            end_month: None,
            end_year: None,
            is_recurring: false,
            prep_months_needed: None,
            prep_start_date: None,
            outreach_angles: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn single_month(year: i32, month: u32) -> Event {
        Event {
            start_month: Some(month),
            start_year: Some(year),
            ..base_event()
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_year_month_arithmetic() {
        let feb = YearMonth::new(2025, 2);
        assert_eq!(feb.sub_months(3), YearMonth::new(2024, 11));
        assert_eq!(feb.add_months(11), YearMonth::new(2026, 1));
        assert_eq!(YearMonth::new(2025, 1).sub_months(1), YearMonth::new(2024, 12));
        assert_eq!(feb.sub_months(0), feb);
    }

    #[test]
    fn test_year_month_ordering_is_chronological() {
        assert!(YearMonth::new(2025, 12) < YearMonth::new(2026, 1));
        assert!(YearMonth::new(2025, 3) < YearMonth::new(2025, 4));
        assert!(YearMonth::new(2024, 12) > YearMonth::new(2024, 1));
    }

    #[test]
    fn test_resolve_start_prefers_canonical_fields() {
        let event = Event {
            start_month: Some(5),
            start_year: Some(2026),
            month: Some(1),
            year: Some(2020),
            ..base_event()
        };
        assert_eq!(resolve_start(&event), Some(YearMonth::new(2026, 5)));

        let legacy = Event {
            month: Some(9),
            year: Some(2024),
            ..base_event()
        };
        assert_eq!(resolve_start(&legacy), Some(YearMonth::new(2024, 9)));

        let mixed = Event {
            start_month: Some(3),
            year: Some(2025),
            ..base_event()
        };
        assert_eq!(resolve_start(&mixed), Some(YearMonth::new(2025, 3)));

        assert_eq!(resolve_start(&base_event()), None);
    }

    #[test]
    fn test_single_month_event_occurs_only_in_start_month() {
        let event = single_month(2025, 6);

        for year in 2024..=2026 {
            for month in 1..=12 {
                let expected = year == 2025 && month == 6;
                assert_eq!(occurs_in_month(&event, year, month), expected, "{}-{}", year, month);
            }
        }
    }

    #[test]
    fn test_multi_month_event_spans_year_boundary() {
        let event = Event {
            start_month: Some(11),
            start_year: Some(2025),
            end_month: Some(2),
            end_year: Some(2026),
            ..base_event()
        };

        assert!(occurs_in_month(&event, 2025, 11));
        assert!(occurs_in_month(&event, 2025, 12));
        assert!(occurs_in_month(&event, 2026, 1));
        assert!(occurs_in_month(&event, 2026, 2));
        assert!(!occurs_in_month(&event, 2025, 10));
        assert!(!occurs_in_month(&event, 2026, 3));
        // Month-only matching would wrongly accept these
        assert!(!occurs_in_month(&event, 2026, 11));
        assert!(!occurs_in_month(&event, 2025, 1));
    }

    #[test]
    fn test_non_recurring_span_without_end_year() {
        let same_year = Event {
            start_month: Some(3),
            start_year: Some(2025),
            end_month: Some(5),
            ..base_event()
        };
        assert!(occurs_in_month(&same_year, 2025, 4));
        assert!(!occurs_in_month(&same_year, 2025, 6));

        let wrapping = Event {
            start_month: Some(12),
            start_year: Some(2025),
            end_month: Some(1),
            ..base_event()
        };
        assert!(occurs_in_month(&wrapping, 2025, 12));
        assert!(occurs_in_month(&wrapping, 2026, 1));
        assert!(!occurs_in_month(&wrapping, 2025, 1));
    }

    #[test]
    fn test_recurring_single_month_event() {
        let event = Event {
            start_month: Some(6),
            start_year: Some(2024),
            is_recurring: true,
            ..base_event()
        };

        assert!(occurs_in_month(&event, 2024, 6));
        assert!(!occurs_in_month(&event, 2023, 6));
        assert!(occurs_in_month(&event, 2030, 6));
        assert!(!occurs_in_month(&event, 2030, 7));
    }

    #[test]
    fn test_recurring_wraparound_event() {
        let event = Event {
            start_month: Some(11),
            start_year: Some(2024),
            end_month: Some(2),
            end_year: Some(2025),
            is_recurring: true,
            ..base_event()
        };

        for year in [2024, 2025, 2031] {
            for month in [11, 12, 1, 2] {
                assert!(occurs_in_month(&event, year, month), "{}-{}", year, month);
            }
            for month in 3..=10 {
                assert!(!occurs_in_month(&event, year, month), "{}-{}", year, month);
            }
        }

        assert!(!occurs_in_month(&event, 2023, 12));
    }

    #[test]
    fn test_recurring_span_ignores_end_year() {
        let event = Event {
            start_month: Some(4),
            start_year: Some(2024),
            end_month: Some(6),
            end_year: Some(2024),
            is_recurring: true,
            ..base_event()
        };

        assert!(occurs_in_month(&event, 2028, 5));
        assert!(occurs_in_month(&event, 2028, 6));
        assert!(!occurs_in_month(&event, 2028, 7));
        assert!(!occurs_in_month(&event, 2028, 3));
    }

    #[test]
    fn test_event_without_start_never_occurs() {
        let event = Event {
            end_month: Some(5),
            is_recurring: true,
            ..base_event()
        };
        assert!(!occurs_in_month(&event, 2025, 5));
        assert!(!prep_in_month(&event, 2025, 4));
    }

    #[test]
    fn test_prep_months_window() {
        let event = Event {
            prep_months_needed: Some(2),
            ..single_month(2025, 3)
        };

        assert!(prep_in_month(&event, 2025, 1));
        assert!(prep_in_month(&event, 2025, 2));
        assert!(!prep_in_month(&event, 2025, 3));
        assert!(!prep_in_month(&event, 2024, 12));
        assert!(!prep_in_month(&event, 2025, 4));
    }

    #[test]
    fn test_prep_months_roll_back_across_year() {
        let event = Event {
            prep_months_needed: Some(3),
            ..single_month(2025, 2)
        };

        assert!(!prep_in_month(&event, 2024, 10));
        assert!(prep_in_month(&event, 2024, 11));
        assert!(prep_in_month(&event, 2024, 12));
        assert!(prep_in_month(&event, 2025, 1));
        assert!(!prep_in_month(&event, 2025, 2));
    }

    #[test]
    fn test_prep_start_date_window() {
        let event = Event {
            prep_start_date: Some(date("2025-09-15")),
            ..single_month(2025, 11)
        };

        assert!(!prep_in_month(&event, 2025, 8));
        assert!(prep_in_month(&event, 2025, 9));
        assert!(prep_in_month(&event, 2025, 10));
        assert!(!prep_in_month(&event, 2025, 11));
    }

    #[test]
    fn test_prep_start_date_beats_prep_months() {
        let event = Event {
            prep_start_date: Some(date("2025-10-01")),
            prep_months_needed: Some(6),
            ..single_month(2025, 12)
        };

        assert!(!prep_in_month(&event, 2025, 7));
        assert!(prep_in_month(&event, 2025, 10));
        assert!(prep_in_month(&event, 2025, 11));
        assert_eq!(format_prep_label(&event), "Oct 1, 2025");
    }

    #[test]
    fn test_prep_start_date_after_event_start_is_empty() {
        let event = Event {
            prep_start_date: Some(date("2026-02-01")),
            ..single_month(2025, 12)
        };

        for month in 1..=12 {
            assert!(!prep_in_month(&event, 2025, month));
            assert!(!prep_in_month(&event, 2026, month));
        }
    }

    #[test]
    fn test_recurring_events_have_no_prep_window() {
        let event = Event {
            start_month: Some(6),
            start_year: Some(2024),
            is_recurring: true,
            prep_months_needed: Some(2),
            ..base_event()
        };

        assert!(!prep_in_month(&event, 2024, 4));
        assert!(!prep_in_month(&event, 2025, 5));
    }

    #[test]
    fn test_zero_prep_months_means_no_prep() {
        let event = Event {
            prep_months_needed: Some(0),
            ..single_month(2025, 6)
        };

        assert!(!prep_in_month(&event, 2025, 5));
        assert_eq!(format_prep_label(&event), "");
    }

    #[test]
    fn test_prep_is_suppressed_while_multi_month_event_occurs() {
        let event = Event {
            start_month: Some(11),
            start_year: Some(2025),
            end_month: Some(2),
            end_year: Some(2026),
            prep_months_needed: Some(2),
            ..base_event()
        };

        assert!(prep_in_month(&event, 2025, 9));
        assert!(prep_in_month(&event, 2025, 10));
        for (year, month) in [(2025, 11), (2025, 12), (2026, 1), (2026, 2)] {
            assert!(occurs_in_month(&event, year, month));
            assert!(!prep_in_month(&event, year, month));
        }
    }

    #[test]
    fn test_occurrence_suppresses_prep_for_every_month() {
        let events = vec![
            Event {
                prep_months_needed: Some(4),
                ..single_month(2025, 3)
            },
            Event {
                prep_start_date: Some(date("2024-11-20")),
                ..single_month(2025, 1)
            },
            Event {
                start_month: Some(10),
                start_year: Some(2025),
                end_month: Some(1),
                end_year: Some(2026),
                prep_months_needed: Some(5),
                ..base_event()
            },
        ];

        for event in &events {
            for year in 2024..=2026 {
                for month in 1..=12 {
                    if occurs_in_month(event, year, month) {
                        assert!(!prep_in_month(event, year, month));
                    }
                }
            }
        }
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let event = Event {
            prep_months_needed: Some(2),
            ..single_month(2025, 3)
        };

        let first: Vec<(bool, bool)> = (1..=12)
            .map(|m| (occurs_in_month(&event, 2025, m), prep_in_month(&event, 2025, m)))
            .collect();
        let second: Vec<(bool, bool)> = (1..=12)
            .map(|m| (occurs_in_month(&event, 2025, m), prep_in_month(&event, 2025, m)))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_format_prep_label() {
        let months_only = Event {
            prep_months_needed: Some(4),
            ..single_month(2026, 5)
        };
        assert_eq!(format_prep_label(&months_only), "4mo");

        let dated = Event {
            prep_start_date: Some(date("2026-01-02")),
            ..single_month(2026, 5)
        };
        assert_eq!(format_prep_label(&dated), "Jan 2, 2026");

        let march = Event {
            prep_start_date: Some(date("2026-03-05")),
            ..single_month(2026, 5)
        };
        assert_eq!(format_prep_label(&march), "Mar 5, 2026");

        assert_eq!(format_prep_label(&single_month(2026, 5)), "");
    }

    #[test]
    fn test_events_for_month_keeps_snapshot_order() {
        let events = vec![
            Event { id: "a".to_string(), ..single_month(2025, 4) },
            Event { id: "b".to_string(), ..single_month(2025, 5) },
            Event {
                id: "c".to_string(),
                start_month: Some(4),
                start_year: Some(2020),
                is_recurring: true,
                ..base_event()
            },
            Event { id: "d".to_string(), prep_months_needed: Some(1), ..single_month(2025, 5) },
        ];

        let april: Vec<&str> = events_for_month(&events, 2025, 4)
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(april, vec!["a", "c"]);

        let april_prep: Vec<&str> =
            prep_events_for_month(&events, 2025, 4).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(april_prep, vec!["d"]);
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "Invalid Month");
        assert_eq!(month_abbreviation(9), "Sep");
        assert_eq!(month_abbreviation(0), "");
    }

    #[test]
    fn test_quarters() {
        assert_eq!(quarter_months(1), Some([1, 2, 3]));
        assert_eq!(quarter_months(4), Some([10, 11, 12]));
        assert_eq!(quarter_months(5), None);
        assert_eq!(quarter_months(0), None);
        assert_eq!(quarter_of(3), Some(1));
        assert_eq!(quarter_of(10), Some(4));
        assert_eq!(quarter_of(13), None);
    }

    #[test]
    fn test_touches_year_covers_spans_and_prep_across_years() {
        let winter = Event {
            end_month: Some(2),
            end_year: Some(2026),
            ..single_month(2025, 11)
        };
        assert!(touches_year(&winter, 2025));
        assert!(touches_year(&winter, 2026));
        assert!(!touches_year(&winter, 2024));
        assert!(!touches_year(&winter, 2027));

        let february = Event {
            prep_months_needed: Some(3),
            ..single_month(2026, 2)
        };
        assert!(touches_year(&february, 2025));
        assert!(touches_year(&february, 2026));
        assert!(!touches_year(&february, 2024));

        let dated = Event {
            prep_start_date: Some(date("2024-06-01")),
            ..single_month(2026, 1)
        };
        assert!(touches_year(&dated, 2024));
        assert!(touches_year(&dated, 2025));

        let recurring = Event {
            is_recurring: true,
            ..single_month(2023, 6)
        };
        assert!(touches_year(&recurring, 2030));
        assert!(!touches_year(&recurring, 2022));
    }

    #[test]
    fn test_touches_year_falls_back_to_literal_filter() {
        let no_start = Event {
            year: Some(2025),
            ..base_event()
        };
        assert!(touches_year(&no_start, 2025));
        assert!(!touches_year(&no_start, 2026));
    }

    #[test]
    fn test_compare_by_start_puts_unscheduled_last() {
        let mut events = vec![
            Event {
                title: "Unscheduled".to_string(),
                ..base_event()
            },
            Event {
                title: "Zumba".to_string(),
                ..single_month(2025, 5)
            },
            Event {
                title: "Art walk".to_string(),
                ..single_month(2025, 5)
            },
            Event {
                title: "New year".to_string(),
                ..single_month(2025, 1)
            },
        ];
        events.sort_by(compare_by_start);

        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["New year", "Art walk", "Zumba", "Unscheduled"]);
    }

    #[test]
    fn test_extreme_years_do_not_panic() {
        let event = Event {
            end_month: Some(1),
            prep_months_needed: Some(2),
            ..single_month(i32::MAX, 5)
        };

        assert!(occurs_in_month(&event, i32::MAX, 5));
        assert!(!occurs_in_month(&event, i32::MAX, 6));
        assert!(!prep_in_month(&event, i32::MAX, 6));
        assert!(touches_year(&event, i32::MAX));
        assert!(touches_year(&single_month(i32::MIN, 1), i32::MIN));
    }
}
