//! Calendar arithmetic for the month and week grids.
//!
//! Everything here is pure. Malformed input never panics: lengths of invalid
//! months come back as `None`, unparseable strings as `None`.

use std::fmt::Display;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use super::event::Event;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Number of days in `month` (January -> 1) of `year`, or `None` when the
/// month is outside 1..=12.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }?;
    Some(next.signed_duration_since(first).num_days() as u32)
}

/// Sunday through Saturday of the week containing `date`.
pub fn week_dates(date: NaiveDate) -> [NaiveDate; 7] {
    let sunday = date - Duration::days(date.weekday().num_days_from_sunday() as i64);
    std::array::from_fn(|i| sunday + Duration::days(i as i64))
}

/// Sunday-aligned rows of day-of-month cells for the month of `date`.
/// Cells outside the month are `None`.
pub fn month_grid(date: NaiveDate) -> Vec<[Option<u32>; 7]> {
    let (first, last) = month_bounds(date);
    let days = last.day() as i32;
    let mut current_day = 1 - first.weekday().num_days_from_sunday() as i32;

    let mut weeks = Vec::new();
    while current_day <= days {
        let mut row = [None; 7];
        for cell in row.iter_mut() {
            if current_day >= 1 && current_day <= days {
                *cell = Some(current_day as u32);
            }
            current_day += 1;
        }
        weeks.push(row);
    }
    weeks
}

/// First and last day of the month of `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date - Duration::days(date.day0() as i64);
    let len = days_in_month(date.year(), date.month()).unwrap_or(1);
    (first, first + Duration::days(len as i64 - 1))
}

/// Events whose date has day-of-month `day`.
///
/// Only the day component is compared: month and year are ignored, so the
/// caller must pass events already scoped to the month being rendered. Use
/// [`events_on_date`] when that is not the case.
pub fn events_on_day<'a>(events: impl IntoIterator<Item = &'a Event>, day: u32) -> Vec<&'a Event> {
    events
        .into_iter()
        .filter(|e| parse_date(&e.date).is_some_and(|d| d.day() == day))
        .collect()
}

pub fn events_on_date<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    date: NaiveDate,
) -> Vec<&'a Event> {
    events
        .into_iter()
        .filter(|e| parse_date(&e.date) == Some(date))
        .collect()
}

/// `"YYYY년 M월 W주"`. The week belongs to the month holding its Thursday, and
/// W counts that month's Thursdays up to and including this one.
pub fn format_week_label(date: NaiveDate) -> String {
    let offset = date.weekday().num_days_from_sunday() as i64;
    let thursday = date + Duration::days(4 - offset);
    let week = (thursday.day() - 1) / 7 + 1;
    format!("{}년 {}월 {}주", thursday.year(), thursday.month(), week)
}

pub fn format_month_label(date: NaiveDate) -> String {
    format!("{}년 {}월", date.year(), date.month())
}

/// Inclusive on both ends. An inverted range contains nothing.
pub fn date_in_range(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    start <= date && date <= end
}

/// Left-pads the decimal representation of `value` with zeros up to `size`
/// characters. Longer values are returned untouched.
pub fn zero_pad<T: Display>(value: T, size: usize) -> String {
    format!("{:0>width$}", value.to_string(), width = size)
}

/// `YYYY-MM-DD` from the year and month of `date` and either its own day or
/// `day`.
pub fn format_date(date: NaiveDate, day: Option<u32>) -> String {
    format!(
        "{}-{}-{}",
        date.year(),
        zero_pad(date.month(), 2),
        zero_pad(day.unwrap_or_else(|| date.day()), 2)
    )
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Parses `"<date>T<time>"`, e.g. `2025-05-13` + `10:00`.
pub fn parse_date_time(date: &str, time: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&format!("{}T{}", date.trim(), time.trim()), DATE_TIME_FORMAT)
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn event(id: &str, date: &str) -> Event {
        Event {
            id: id.into(),
            title: format!("event{}", id),
            date: date.into(),
            start_time: "10:00".into(),
            end_time: "11:00".into(),
            description: String::new(),
            location: String::new(),
            category: String::new(),
            repeat: Default::default(),
            notification_time: 0,
        }
    }

    #[test]
    fn month_lengths_follow_gregorian_calendar() {
        let lengths_2025 = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (i, len) in lengths_2025.iter().enumerate() {
            assert_eq!(days_in_month(2025, i as u32 + 1), Some(*len));
        }
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(1900, 2), Some(28));
    }

    #[test]
    fn invalid_months_have_no_length() {
        assert_eq!(days_in_month(2025, 0), None);
        assert_eq!(days_in_month(2025, 13), None);
    }

    #[test]
    fn week_runs_sunday_to_saturday() {
        for date in [d(2025, 7, 16), d(2025, 7, 13), d(2025, 7, 19), d(2024, 2, 29)] {
            let week = week_dates(date);
            assert_eq!(week[0].weekday(), Weekday::Sun);
            assert_eq!(week[6].weekday(), Weekday::Sat);
            assert!(week.windows(2).all(|w| w[1] == w[0].succ_opt().unwrap()));
            assert!(date_in_range(date, week[0], week[6]));
        }
    }

    #[test]
    fn week_rolls_over_the_year() {
        let week = week_dates(d(2024, 12, 31));
        assert_eq!(week[0], d(2024, 12, 29));
        assert_eq!(week[6], d(2025, 1, 4));
    }

    #[test]
    fn month_grid_is_sunday_aligned() {
        // July 2025 starts on a Tuesday.
        let grid = month_grid(d(2025, 7, 10));
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0], [None, None, Some(1), Some(2), Some(3), Some(4), Some(5)]);
        assert_eq!(grid[4], [Some(27), Some(28), Some(29), Some(30), Some(31), None, None]);
    }

    #[test]
    fn month_grid_holds_every_day_once() {
        for (y, m) in [(2025, 2), (2024, 2), (2026, 2), (2025, 11), (2025, 8)] {
            let grid = month_grid(d(y, m, 1));
            let cells: Vec<u32> = grid.iter().flatten().flatten().copied().collect();
            assert_eq!(cells.len() as u32, days_in_month(y, m).unwrap());
            assert_eq!(cells, (1..=cells.len() as u32).collect::<Vec<_>>());
        }
    }

    #[test]
    fn february_starting_on_sunday_fills_four_rows() {
        let grid = month_grid(d(2026, 2, 14));
        assert_eq!(grid.len(), 4);
        assert!(grid.iter().flatten().all(Option::is_some));
    }

    #[test]
    fn events_on_day_compares_day_component_only() {
        let events = vec![
            event("1", "2025-07-01"),
            event("2", "2025-08-01"),
            event("3", "2025-07-02"),
            event("4", "garbage"),
        ];
        let ids: Vec<&str> = events_on_day(&events, 1).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);

        let ids: Vec<&str> = events_on_date(&events, d(2025, 7, 1))
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn week_label_follows_thursday() {
        assert_eq!(format_week_label(d(2025, 7, 1)), "2025년 7월 1주");
        assert_eq!(format_week_label(d(2025, 7, 16)), "2025년 7월 3주");
        // Thursday of this week is July 31st.
        assert_eq!(format_week_label(d(2025, 7, 28)), "2025년 7월 5주");
        // Sunday of a week whose Thursday is August 7th.
        assert_eq!(format_week_label(d(2025, 8, 3)), "2025년 8월 1주");
        assert_eq!(format_week_label(d(2024, 12, 31)), "2025년 1월 1주");
        // A month starting on Friday hands its first days to the previous month.
        assert_eq!(format_week_label(d(2025, 8, 1)), "2025년 7월 5주");
    }

    #[test]
    fn month_label() {
        assert_eq!(format_month_label(d(2025, 7, 10)), "2025년 7월");
    }

    #[test]
    fn range_is_inclusive_and_rejects_inversion() {
        let (start, end) = (d(2025, 7, 1), d(2025, 7, 31));
        assert!(date_in_range(start, start, end));
        assert!(date_in_range(end, start, end));
        assert!(!date_in_range(d(2025, 8, 1), start, end));
        assert!(!date_in_range(d(2025, 7, 10), end, start));
    }

    #[test]
    fn zero_pad_never_truncates() {
        assert_eq!(zero_pad(5, 2), "05");
        assert_eq!(zero_pad(10, 2), "10");
        assert_eq!(zero_pad(12345, 3), "12345");
        assert_eq!(zero_pad(3.14, 5), "03.14");
        assert_eq!(zero_pad(0, 3), "000");
    }

    #[test]
    fn formats_dates_with_optional_day() {
        assert_eq!(format_date(d(2025, 7, 4), None), "2025-07-04");
        assert_eq!(format_date(d(2025, 7, 4), Some(21)), "2025-07-21");
    }

    #[test]
    fn formatted_dates_parse_back() {
        let mut date = d(2024, 1, 1);
        while date < d(2025, 1, 1) {
            assert!(parse_date_time(&format_date(date, None), "10:00").is_some());
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn malformed_strings_do_not_parse() {
        assert_eq!(parse_date_time("2025-13-01", "10:00"), None);
        assert_eq!(parse_date_time("2025-05-13", "25:00"), None);
        assert_eq!(parse_date_time("2025-05-13", ""), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn month_bounds_cover_the_month() {
        assert_eq!(month_bounds(d(2024, 2, 17)), (d(2024, 2, 1), d(2024, 2, 29)));
        assert_eq!(month_bounds(d(2025, 12, 31)), (d(2025, 12, 1), d(2025, 12, 31)));
    }
}
