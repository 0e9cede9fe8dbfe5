use chrono::NaiveTime;
use thiserror::Error;

use super::event::{Event, Schedulable};
use super::overlap::find_overlaps;

pub const START_AFTER_END: &str = "시작 시간은 종료 시간보다 빨라야 합니다.";
pub const SAME_START_END: &str = "시작 시간과 종료 시간이 같을 수 없습니다.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("필수 정보를 모두 입력해주세요.")]
    MissingRequired,
}

/// Per-field time errors.
///
/// `same_time_error` is only set for equal start and end. Forms that show
/// just the start and end fields never display it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeErrors {
    pub start_time_error: Option<&'static str>,
    pub end_time_error: Option<&'static str>,
    pub same_time_error: Option<&'static str>,
}

impl TimeErrors {
    pub fn is_empty(&self) -> bool {
        self.start_time_error.is_none()
            && self.end_time_error.is_none()
            && self.same_time_error.is_none()
    }
}

pub fn validate_required<E: Schedulable + ?Sized>(event: &E) -> Result<(), ValidationError> {
    let fields = [event.title(), event.date(), event.start_time(), event.end_time()];
    if fields.iter().any(|f| f.is_empty()) {
        return Err(ValidationError::MissingRequired);
    }
    Ok(())
}

/// Compares two `HH:MM` clock times of the same day. Empty or unreadable
/// input is not an error here; the required-field check reports it.
pub fn validate_time_order(start: &str, end: &str) -> TimeErrors {
    let parse = |s: &str| NaiveTime::parse_from_str(s.trim(), "%H:%M").ok();
    let (Some(start), Some(end)) = (parse(start), parse(end)) else {
        return TimeErrors::default();
    };

    if start > end {
        TimeErrors {
            start_time_error: Some(START_AFTER_END),
            ..Default::default()
        }
    } else if start == end {
        TimeErrors {
            same_time_error: Some(SAME_START_END),
            ..Default::default()
        }
    } else {
        TimeErrors::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlapCheck {
    /// Existing events colliding with the candidate
    pub overlapping: Vec<Event>,
}

impl OverlapCheck {
    pub fn needs_confirmation(&self) -> bool {
        !self.overlapping.is_empty()
    }
}

/// What the caller should do with a candidate that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveDecision {
    Proceed,
    ConfirmOverlap(Vec<Event>),
}

impl From<OverlapCheck> for SaveDecision {
    fn from(check: OverlapCheck) -> Self {
        if check.needs_confirmation() {
            SaveDecision::ConfirmOverlap(check.overlapping)
        } else {
            SaveDecision::Proceed
        }
    }
}

/// Required fields first, then the overlap scan against `existing`.
pub fn validate_and_check_overlap<E: Schedulable + ?Sized>(
    candidate: &E,
    existing: &[Event],
) -> Result<OverlapCheck, ValidationError> {
    validate_required(candidate)?;
    Ok(OverlapCheck {
        overlapping: find_overlaps(candidate, existing)
            .into_iter()
            .cloned()
            .collect(),
    })
}
