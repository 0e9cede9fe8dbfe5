use chrono::NaiveDate;
use event_planner::calendar::date::format_date;
use event_planner::calendar::event::{CATEGORIES, NOTIFICATION_OPTIONS};
use event_planner::calendar::{
    validate_time_order, Event, EventDraft, RepeatInfo, RepeatType, TimeErrors,
};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme;

/// Ten minutes before, the first option users usually want.
const DEFAULT_NOTIFICATION: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Title,
    Date,
    StartTime,
    EndTime,
    Description,
    Location,
    Category,
    Repeat,
    RepeatInterval,
    RepeatEnd,
    Notification,
}

impl FormField {
    fn order(repeating: bool) -> &'static [FormField] {
        const ALL: [FormField; 11] = [
            FormField::Title,
            FormField::Date,
            FormField::StartTime,
            FormField::EndTime,
            FormField::Description,
            FormField::Location,
            FormField::Category,
            FormField::Repeat,
            FormField::RepeatInterval,
            FormField::RepeatEnd,
            FormField::Notification,
        ];
        const NO_REPEAT: [FormField; 9] = [
            FormField::Title,
            FormField::Date,
            FormField::StartTime,
            FormField::EndTime,
            FormField::Description,
            FormField::Location,
            FormField::Category,
            FormField::Repeat,
            FormField::Notification,
        ];
        if repeating {
            &ALL
        } else {
            &NO_REPEAT
        }
    }

    /// Cycled with space rather than typed into.
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            FormField::Category | FormField::Repeat | FormField::Notification
        )
    }
}

#[derive(Debug, Clone)]
pub struct EventFormState {
    /// Set when editing a stored event
    pub editing_id: Option<String>,
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
    pub location: String,
    pub category_index: usize,
    pub repeat: RepeatType,
    pub repeat_interval: String,
    pub repeat_end: String,
    pub notification_index: usize,
    pub active_field: FormField,
    pub time_errors: TimeErrors,
}

impl EventFormState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            editing_id: None,
            title: String::new(),
            date: format_date(date, None),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            description: String::new(),
            location: String::new(),
            category_index: 0,
            repeat: RepeatType::None,
            repeat_interval: "1".to_string(),
            repeat_end: String::new(),
            notification_index: DEFAULT_NOTIFICATION,
            active_field: FormField::Title,
            time_errors: TimeErrors::default(),
        }
    }

    pub fn from_event(event: &Event) -> Self {
        Self {
            editing_id: Some(event.id.clone()),
            title: event.title.clone(),
            date: event.date.clone(),
            start_time: event.start_time.clone(),
            end_time: event.end_time.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            category_index: CATEGORIES
                .iter()
                .position(|c| *c == event.category)
                .unwrap_or(0),
            repeat: event.repeat.kind,
            repeat_interval: event.repeat.interval.to_string(),
            repeat_end: event.repeat.end_date.clone().unwrap_or_default(),
            notification_index: NOTIFICATION_OPTIONS
                .iter()
                .position(|(m, _)| *m == event.notification_time)
                .unwrap_or(DEFAULT_NOTIFICATION),
            active_field: FormField::Title,
            time_errors: validate_time_order(&event.start_time, &event.end_time),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn to_draft(&self) -> EventDraft {
        let repeat = if self.repeat == RepeatType::None {
            RepeatInfo::default()
        } else {
            RepeatInfo {
                kind: self.repeat,
                interval: self.repeat_interval.parse::<u32>().unwrap_or(1).max(1),
                end_date: Some(self.repeat_end.clone()).filter(|s| !s.is_empty()),
            }
        };
        EventDraft {
            title: self.title.clone(),
            date: self.date.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            category: CATEGORIES[self.category_index % CATEGORIES.len()].to_string(),
            repeat,
            notification_time: self.notification_option().0,
        }
    }

    /// Lead time in minutes and its label.
    pub fn notification_option(&self) -> (u32, &'static str) {
        NOTIFICATION_OPTIONS[self.notification_index % NOTIFICATION_OPTIONS.len()]
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.active_field {
            FormField::Title => Some(&mut self.title),
            FormField::Date => Some(&mut self.date),
            FormField::StartTime => Some(&mut self.start_time),
            FormField::EndTime => Some(&mut self.end_time),
            FormField::Description => Some(&mut self.description),
            FormField::Location => Some(&mut self.location),
            FormField::RepeatInterval => Some(&mut self.repeat_interval),
            FormField::RepeatEnd => Some(&mut self.repeat_end),
            FormField::Category | FormField::Repeat | FormField::Notification => None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        if self.active_field == FormField::RepeatInterval && !c.is_ascii_digit() {
            return;
        }
        if let Some(text) = self.text_mut() {
            text.push(c);
        }
        self.revalidate_times();
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.text_mut() {
            text.pop();
        }
        self.revalidate_times();
    }

    /// Cycles the active choice field.
    pub fn cycle(&mut self) {
        match self.active_field {
            FormField::Category => {
                self.category_index = (self.category_index + 1) % CATEGORIES.len();
            }
            FormField::Repeat => self.repeat = self.repeat.next(),
            FormField::Notification => {
                self.notification_index =
                    (self.notification_index + 1) % NOTIFICATION_OPTIONS.len();
            }
            _ => {}
        }
    }

    pub fn next_field(&mut self) {
        let order = FormField::order(self.repeat != RepeatType::None);
        let pos = order.iter().position(|f| *f == self.active_field).unwrap_or(0);
        self.active_field = order[(pos + 1) % order.len()];
    }

    pub fn prev_field(&mut self) {
        let order = FormField::order(self.repeat != RepeatType::None);
        let pos = order.iter().position(|f| *f == self.active_field).unwrap_or(0);
        self.active_field = order[(pos + order.len() - 1) % order.len()];
    }

    fn revalidate_times(&mut self) {
        if matches!(self.active_field, FormField::StartTime | FormField::EndTime) {
            self.time_errors = validate_time_order(&self.start_time, &self.end_time);
        }
    }
}

pub struct EventForm;

impl EventForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &EventFormState) {
        let theme = theme::current();

        // Center the form popup
        let form_w = area.width.clamp(30, 56);
        let form_h = area.height.clamp(12, 20);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h).intersection(area);

        frame.render_widget(Clear, form_area);

        let title = if state.is_editing() { " 일정 수정 " } else { " 일정 추가 " };
        let block = Block::default()
            .title(title)
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let draft = state.to_draft();
        let mut lines: Vec<Line> = vec![
            field_line("제목", &state.title, state, FormField::Title),
            field_line("날짜", &state.date, state, FormField::Date),
            field_line("시작", &state.start_time, state, FormField::StartTime),
        ];
        if let Some(err) = state.time_errors.start_time_error {
            lines.push(Line::from(Span::styled(format!("       {}", err), theme.warning)));
        }
        lines.push(field_line("종료", &state.end_time, state, FormField::EndTime));
        if let Some(err) = state.time_errors.end_time_error {
            lines.push(Line::from(Span::styled(format!("       {}", err), theme.warning)));
        }
        // TODO: give same_time_error a line of its own; it is computed but not shown.
        lines.push(field_line("설명", &state.description, state, FormField::Description));
        lines.push(field_line("위치", &state.location, state, FormField::Location));
        lines.push(field_line("분류", &draft.category, state, FormField::Category));
        lines.push(field_line("반복", state.repeat.label(), state, FormField::Repeat));
        if state.repeat != RepeatType::None {
            lines.push(field_line(
                "간격",
                &state.repeat_interval,
                state,
                FormField::RepeatInterval,
            ));
            lines.push(field_line("종료일", &state.repeat_end, state, FormField::RepeatEnd));
        }
        let notification = state.notification_option().1;
        lines.push(field_line("알림", notification, state, FormField::Notification));

        let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
        frame.render_widget(Paragraph::new(lines), rows[0]);

        let help = Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Next ", theme.dim),
            Span::styled("Space", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cycle ", theme.dim),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Save ", theme.dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", theme.dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[1]);
    }
}

fn field_line<'a>(
    label: &str,
    value: &'a str,
    state: &EventFormState,
    field: FormField,
) -> Line<'a> {
    let active = state.active_field == field;
    let cursor = match (active, field.is_choice()) {
        (true, true) => " <",
        (true, false) => "_",
        _ => "",
    };

    let style = if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::styled(format!("{:<7}", format!("{}:", label)), theme::current().dim),
        Span::styled(value, style),
        Span::styled(cursor, style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 15).unwrap()
    }

    fn type_str(form: &mut EventFormState, s: &str) {
        for c in s.chars() {
            form.input_char(c);
        }
    }

    #[test]
    fn new_form_builds_a_draft_for_the_date() {
        let mut form = EventFormState::new(date());
        type_str(&mut form, "회의");
        let draft = form.to_draft();
        assert_eq!(draft.title, "회의");
        assert_eq!(draft.date, "2025-07-15");
        assert_eq!(draft.category, "Work");
        assert_eq!(draft.notification_time, 10);
        assert_eq!(draft.repeat, RepeatInfo::default());
    }

    #[test]
    fn new_form_pads_single_digit_dates() {
        let form = EventFormState::new(NaiveDate::from_ymd_opt(2025, 3, 7).unwrap());
        assert_eq!(form.date, "2025-03-07");
        assert_eq!(form.notification_option(), (10, "10분 전"));
    }

    #[test]
    fn editing_times_revalidates() {
        let mut form = EventFormState::new(date());
        form.active_field = FormField::EndTime;
        for _ in 0..5 {
            form.backspace();
        }
        type_str(&mut form, "08:00");
        assert!(form.time_errors.start_time_error.is_some());

        for _ in 0..5 {
            form.backspace();
        }
        type_str(&mut form, "09:00");
        assert!(form.time_errors.same_time_error.is_some());
        assert!(form.time_errors.start_time_error.is_none());
    }

    #[test]
    fn repeat_fields_only_reachable_when_repeating() {
        let mut form = EventFormState::new(date());
        form.active_field = FormField::Repeat;
        form.next_field();
        assert_eq!(form.active_field, FormField::Notification);

        form.active_field = FormField::Repeat;
        form.cycle();
        assert_eq!(form.repeat, RepeatType::Daily);
        form.next_field();
        assert_eq!(form.active_field, FormField::RepeatInterval);
        form.input_char('x');
        form.input_char('3');
        form.next_field();
        type_str(&mut form, "2025-12-31");

        let repeat = form.to_draft().repeat;
        assert_eq!(repeat.kind, RepeatType::Daily);
        assert_eq!(repeat.interval, 13);
        assert_eq!(repeat.end_date.as_deref(), Some("2025-12-31"));
    }

    #[test]
    fn field_order_wraps_both_ways() {
        let mut form = EventFormState::new(date());
        form.prev_field();
        assert_eq!(form.active_field, FormField::Notification);
        form.next_field();
        assert_eq!(form.active_field, FormField::Title);
    }

    #[test]
    fn from_event_keeps_choices() {
        let mut draft = EventFormState::new(date()).to_draft();
        draft.category = "Family".into();
        draft.notification_time = 1440;
        let event = Event::from_draft("7", draft);

        let form = EventFormState::from_event(&event);
        assert!(form.is_editing());
        assert_eq!(form.to_draft().category, "Family");
        assert_eq!(form.to_draft().notification_time, 1440);
    }
}
