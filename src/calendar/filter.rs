use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::date::{date_in_range, month_bounds, parse_date, week_dates};
use super::event::Event;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Week,
    #[default]
    Month,
}

impl ViewMode {
    /// Inclusive date range the view shows around `reference`.
    pub fn range(&self, reference: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            ViewMode::Week => {
                let week = week_dates(reference);
                (week[0], week[6])
            }
            ViewMode::Month => month_bounds(reference),
        }
    }
}

/// Case-insensitive substring match on title, description or location.
pub fn matches_search(event: &Event, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    [&event.title, &event.description, &event.location]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
}

/// Search first, then keep what falls inside the view's date range. Without a
/// scope only the text search applies. Input order is kept.
pub fn filtered_events<'a>(
    events: &'a [Event],
    term: &str,
    scope: Option<(NaiveDate, ViewMode)>,
) -> Vec<&'a Event> {
    let range = scope.map(|(reference, mode)| mode.range(reference));

    events
        .iter()
        .filter(|e| matches_search(e, term))
        .filter(|e| match range {
            Some((start, end)) => {
                parse_date(&e.date).is_some_and(|date| date_in_range(date, start, end))
            }
            None => true,
        })
        .collect()
}
