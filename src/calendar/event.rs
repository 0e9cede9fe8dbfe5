use serde::{Deserialize, Serialize};

/// Categories offered by the event form. Stored on the event as plain text.
pub const CATEGORIES: [&str; 4] = ["Work", "Personal", "Family", "Other"];

/// Lead times (minutes) offered by the event form, with their labels.
pub const NOTIFICATION_OPTIONS: [(u32, &str); 5] = [
    (1, "1분 전"),
    (10, "10분 전"),
    (60, "1시간 전"),
    (120, "2시간 전"),
    (1440, "1일 전"),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatType {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RepeatType {
    pub fn next(&self) -> Self {
        match self {
            RepeatType::None => RepeatType::Daily,
            RepeatType::Daily => RepeatType::Weekly,
            RepeatType::Weekly => RepeatType::Monthly,
            RepeatType::Monthly => RepeatType::Yearly,
            RepeatType::Yearly => RepeatType::None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RepeatType::None => "반복 없음",
            RepeatType::Daily => "매일",
            RepeatType::Weekly => "매주",
            RepeatType::Monthly => "매월",
            RepeatType::Yearly => "매년",
        }
    }
}

/// Recurrence metadata. Descriptive only: an `Event` is always a single
/// occurrence and nothing in this crate expands a rule into more events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatInfo {
    #[serde(rename = "type", default)]
    pub kind: RepeatType,
    #[serde(default = "default_interval")]
    pub interval: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

fn default_interval() -> u32 {
    1
}

impl Default for RepeatInfo {
    fn default() -> Self {
        Self {
            kind: RepeatType::None,
            interval: 1,
            end_date: None,
        }
    }
}

impl RepeatInfo {
    pub fn display(&self) -> String {
        if self.kind == RepeatType::None {
            return String::new();
        }
        let mut text = format!("{} (간격 {})", self.kind.label(), self.interval);
        if let Some(ref end) = self.end_date {
            text.push_str(&format!(" ~ {}", end));
        }
        text
    }
}

/// An event before the store has assigned it an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub repeat: RepeatInfo,
    #[serde(default)]
    pub notification_time: u32,
}

/// One concrete scheduled occurrence held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub repeat: RepeatInfo,
    #[serde(default)]
    pub notification_time: u32,
}

impl Event {
    pub fn from_draft(id: impl Into<String>, draft: EventDraft) -> Self {
        Self {
            id: id.into(),
            title: draft.title,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            description: draft.description,
            location: draft.location,
            category: draft.category,
            repeat: draft.repeat,
            notification_time: draft.notification_time,
        }
    }

    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            date: self.date.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            category: self.category.clone(),
            repeat: self.repeat.clone(),
            notification_time: self.notification_time,
        }
    }

    pub fn duration_display(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }

    pub fn notification_label(&self) -> Option<&'static str> {
        notification_label(self.notification_time)
    }
}

pub fn notification_label(minutes: u32) -> Option<&'static str> {
    NOTIFICATION_OPTIONS
        .iter()
        .find(|(m, _)| *m == minutes)
        .map(|(_, label)| *label)
}

/// The fields the overlap engine and validation read, shared by drafts and
/// stored events. `id` is `None` for an event that has not been saved yet.
pub trait Schedulable {
    fn id(&self) -> Option<&str>;
    fn title(&self) -> &str;
    fn date(&self) -> &str;
    fn start_time(&self) -> &str;
    fn end_time(&self) -> &str;
}

impl Schedulable for Event {
    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn date(&self) -> &str {
        &self.date
    }
    fn start_time(&self) -> &str {
        &self.start_time
    }
    fn end_time(&self) -> &str {
        &self.end_time
    }
}

impl Schedulable for EventDraft {
    fn id(&self) -> Option<&str> {
        None
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn date(&self) -> &str {
        &self.date
    }
    fn start_time(&self) -> &str {
        &self.start_time
    }
    fn end_time(&self) -> &str {
        &self.end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn draft_roundtrips_through_event() {
        let draft = EventDraft {
            title: "standup".into(),
            date: "2025-05-13".into(),
            start_time: "09:00".into(),
            end_time: "09:15".into(),
            notification_time: 10,
            ..Default::default()
        };
        let event = Event::from_draft("1", draft.clone());
        assert_eq!(event.id, "1");
        assert_eq!(event.to_draft(), draft);
        assert_eq!(Schedulable::id(&draft), None);
        assert_eq!(Schedulable::id(&event), Some("1"));
    }

    #[test]
    fn repeat_defaults_when_missing_from_toml() {
        let event: Event = toml::from_str(
            r#"
            id = "a"
            title = "t"
            date = "2025-05-13"
            start_time = "10:00"
            end_time = "11:00"
            "#,
        )
        .unwrap();
        assert_eq!(event.repeat, RepeatInfo::default());
        assert_eq!(event.notification_time, 0);

        let weekly: RepeatInfo = toml::from_str("type = \"weekly\"\ninterval = 2").unwrap();
        assert_eq!(weekly.kind, RepeatType::Weekly);
        assert_eq!(weekly.display(), "매주 (간격 2)");
    }

    #[test]
    fn labels_known_lead_times_only() {
        assert_eq!(notification_label(60), Some("1시간 전"));
        assert_eq!(notification_label(0), None);
        assert_eq!(notification_label(7), None);
    }
}
