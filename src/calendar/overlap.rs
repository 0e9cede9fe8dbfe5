use chrono::NaiveDateTime;

use super::date::parse_date_time;
use super::event::{Event, Schedulable};

/// Concrete time span of an event. Either both ends are known or neither is:
/// an event with a malformed date or time has an invalid interval, and an
/// invalid interval overlaps nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    bounds: Option<(NaiveDateTime, NaiveDateTime)>,
}

impl Interval {
    pub fn new(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        Self {
            bounds: start.zip(end),
        }
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.bounds.map(|(start, _)| start)
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.bounds.map(|(_, end)| end)
    }

    pub fn is_valid(&self) -> bool {
        self.bounds.is_some()
    }
}

pub fn to_interval<E: Schedulable + ?Sized>(event: &E) -> Interval {
    Interval::new(
        parse_date_time(event.date(), event.start_time()),
        parse_date_time(event.date(), event.end_time()),
    )
}

/// Half-open overlap: touching endpoints do not count.
pub fn overlaps<A, B>(a: &A, b: &B) -> bool
where
    A: Schedulable + ?Sized,
    B: Schedulable + ?Sized,
{
    match (to_interval(a).bounds, to_interval(b).bounds) {
        (Some((a_start, a_end)), Some((b_start, b_end))) => a_start < b_end && b_start < a_end,
        _ => false,
    }
}

/// Every event in `events` overlapping `candidate`, in input order. A stored
/// event never collides with itself, so an event being edited is skipped by id.
pub fn find_overlaps<'a, C>(candidate: &C, events: &'a [Event]) -> Vec<&'a Event>
where
    C: Schedulable + ?Sized,
{
    events
        .iter()
        .filter(|e| candidate.id() != Some(e.id.as_str()))
        .filter(|e| overlaps(candidate, *e))
        .collect()
}
