pub mod date;
pub mod event;
pub mod filter;
pub mod holiday;
pub mod notification;
pub mod overlap;
pub mod store;
pub mod validation;

pub use event::{Event, EventDraft, RepeatInfo, RepeatType, Schedulable};
pub use filter::{filtered_events, matches_search, ViewMode};
pub use notification::{
    Clock, FixedClock, Notification, NotificationScheduler, NotificationTask, SystemClock,
};
pub use overlap::{find_overlaps, overlaps, to_interval, Interval};
pub use store::{EventStore, MemoryStore};
pub use validation::{
    validate_and_check_overlap, validate_required, validate_time_order, OverlapCheck,
    SaveDecision, TimeErrors, ValidationError,
};
