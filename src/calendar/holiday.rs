use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

/// Public holidays falling on the same solar date every year.
const FIXED_HOLIDAYS: [(u32, u32, &str); 8] = [
    (1, 1, "신정"),
    (3, 1, "삼일절"),
    (5, 5, "어린이날"),
    (6, 6, "현충일"),
    (8, 15, "광복절"),
    (10, 3, "개천절"),
    (10, 9, "한글날"),
    (12, 25, "크리스마스"),
];

pub fn holiday_name(date: NaiveDate) -> Option<&'static str> {
    FIXED_HOLIDAYS
        .iter()
        .find(|(m, d, _)| *m == date.month() && *d == date.day())
        .map(|(_, _, name)| *name)
}

/// Holidays of one month keyed by date, for the month grid overlay.
pub fn holidays_in_month(year: i32, month: u32) -> BTreeMap<NaiveDate, &'static str> {
    FIXED_HOLIDAYS
        .iter()
        .filter(|(m, _, _)| *m == month)
        .filter_map(|(m, d, name)| NaiveDate::from_ymd_opt(year, *m, *d).map(|date| (date, *name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn october_has_two_holidays() {
        let holidays = holidays_in_month(2025, 10);
        let names: Vec<&str> = holidays.values().copied().collect();
        assert_eq!(names, vec!["개천절", "한글날"]);
    }

    #[test]
    fn looks_up_single_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 8, 15).unwrap();
        assert_eq!(holiday_name(date), Some("광복절"));
        assert_eq!(holiday_name(date.succ_opt().unwrap()), None);
        assert!(holidays_in_month(2025, 13).is_empty());
    }
}
