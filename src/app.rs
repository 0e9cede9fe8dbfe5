use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use event_planner::calendar::date::days_in_month;
use event_planner::calendar::{
    filtered_events, validate_and_check_overlap, Clock, Event, EventStore, Notification,
    NotificationTask, SaveDecision, ViewMode,
};
use event_planner::Config;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::components::event_form::EventFormState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Search,
    Form,
    ConfirmOverlap,
}

/// Everything the session owns: the store, the latest events snapshot, the
/// reminder task and the UI state around them.
pub struct App {
    pub running: bool,
    pub view_mode: ViewMode,
    pub input_mode: InputMode,
    pub selected_date: NaiveDate,
    pub today: NaiveDate,
    pub events: Vec<Event>,
    pub search_term: String,
    pub list_index: usize,
    pub form_state: Option<EventFormState>,
    pub overlapping: Vec<Event>,
    pub status_message: Option<String>,
    pub show_help: bool,
    store: Box<dyn EventStore>,
    events_tx: watch::Sender<Vec<Event>>,
    notifications: NotificationTask,
    clock: Arc<dyn Clock>,
    tick_interval: Duration,
}

impl App {
    pub fn new(config: &Config, store: Box<dyn EventStore>, clock: Arc<dyn Clock>) -> Self {
        let today = clock.now().date();
        let events = store.list();
        let (events_tx, _) = watch::channel(events.clone());

        Self {
            running: true,
            view_mode: config.default_view,
            input_mode: InputMode::Normal,
            selected_date: today,
            today,
            events,
            search_term: String::new(),
            list_index: 0,
            form_state: None,
            overlapping: Vec::new(),
            status_message: None,
            show_help: false,
            store,
            events_tx,
            notifications: NotificationTask::new(),
            clock,
            tick_interval: config.tick_interval(),
        }
    }

    /// Starts the reminder task. Needs a tokio runtime.
    pub fn start_notifications(&mut self) {
        self.notifications.start(
            self.events_tx.subscribe(),
            Arc::clone(&self.clock),
            self.tick_interval,
        );
    }

    pub async fn shutdown(&mut self) -> event_planner::Result<()> {
        self.notifications.stop().await
    }

    /// Events of the current view after search, in store order.
    pub fn visible_events(&self) -> Vec<&Event> {
        filtered_events(
            &self.events,
            &self.search_term,
            Some((self.selected_date, self.view_mode)),
        )
    }

    /// Keeps `today` in step with the clock across midnight.
    pub fn sync_today(&mut self) {
        self.today = self.clock.now().date();
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.visible_events().get(self.list_index).copied()
    }

    pub fn pending_notifications(&self) -> Vec<Notification> {
        self.notifications.pending()
    }

    pub fn notified_ids(&self) -> HashSet<String> {
        self.notifications.notified_ids()
    }

    pub fn dismiss_notification(&mut self, index: usize) {
        if let Some(n) = self.notifications.dismiss(index) {
            debug!(event_id = %n.id, "Dismissed notification");
        }
    }

    /// Replaces the snapshot after a store round-trip and hands it to the
    /// reminder task.
    fn refresh_events(&mut self) {
        self.events = self.store.list();
        self.events_tx.send_replace(self.events.clone());
        self.clamp_list_index();
    }

    fn clamp_list_index(&mut self) {
        let len = self.visible_events().len();
        if self.list_index >= len {
            self.list_index = len.saturating_sub(1);
        }
    }

    // ── navigation ──

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
        self.clamp_list_index();
    }

    pub fn next_day(&mut self) {
        self.selected_date = self.selected_date.succ_opt().unwrap_or(self.selected_date);
        self.on_date_changed();
    }

    pub fn prev_day(&mut self) {
        self.selected_date = self.selected_date.pred_opt().unwrap_or(self.selected_date);
        self.on_date_changed();
    }

    pub fn next_week(&mut self) {
        self.selected_date += chrono::Duration::weeks(1);
        self.on_date_changed();
    }

    pub fn prev_week(&mut self) {
        self.selected_date -= chrono::Duration::weeks(1);
        self.on_date_changed();
    }

    pub fn next_month(&mut self) {
        self.selected_date = shift_month(self.selected_date, 1);
        self.on_date_changed();
    }

    pub fn prev_month(&mut self) {
        self.selected_date = shift_month(self.selected_date, -1);
        self.on_date_changed();
    }

    pub fn go_to_today(&mut self) {
        self.today = self.clock.now().date();
        self.selected_date = self.today;
        self.on_date_changed();
    }

    fn on_date_changed(&mut self) {
        self.list_index = 0;
    }

    pub fn select_next_event(&mut self) {
        let len = self.visible_events().len();
        if len > 0 {
            self.list_index = (self.list_index + 1) % len;
        }
    }

    pub fn select_prev_event(&mut self) {
        let len = self.visible_events().len();
        if len > 0 {
            self.list_index = (self.list_index + len - 1) % len;
        }
    }

    // ── search ──

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    pub fn search_input_char(&mut self, c: char) {
        self.search_term.push(c);
        self.list_index = 0;
    }

    pub fn search_backspace(&mut self) {
        self.search_term.pop();
        self.list_index = 0;
    }

    /// Leaves search mode, dropping the term when `clear` is set.
    pub fn finish_search(&mut self, clear: bool) {
        if clear {
            self.search_term.clear();
            self.list_index = 0;
        }
        self.input_mode = InputMode::Normal;
    }

    // ── event form ──

    pub fn open_event_form(&mut self) {
        self.form_state = Some(EventFormState::new(self.selected_date));
        self.input_mode = InputMode::Form;
    }

    pub fn edit_selected_event(&mut self) {
        let Some(form) = self.selected_event().map(EventFormState::from_event) else {
            self.status_message = Some("수정할 일정이 없습니다.".to_string());
            return;
        };
        self.form_state = Some(form);
        self.input_mode = InputMode::Form;
    }

    pub fn close_event_form(&mut self) {
        self.form_state = None;
        self.overlapping.clear();
        self.input_mode = InputMode::Normal;
    }

    pub fn form_input_char(&mut self, c: char) {
        if let Some(ref mut form) = self.form_state {
            form.input_char(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(ref mut form) = self.form_state {
            form.backspace();
        }
    }

    pub fn form_tab(&mut self) {
        if let Some(ref mut form) = self.form_state {
            form.next_field();
        }
    }

    pub fn form_backtab(&mut self) {
        if let Some(ref mut form) = self.form_state {
            form.prev_field();
        }
    }

    pub fn form_cycle(&mut self) {
        if let Some(ref mut form) = self.form_state {
            form.cycle();
        }
    }

    /// Required fields, then time order, then overlaps. Overlaps switch to the
    /// confirmation dialog instead of saving.
    pub fn submit_event_form(&mut self) {
        let Some(ref form) = self.form_state else {
            return;
        };
        let draft = form.to_draft();

        let check = match form.editing_id {
            Some(ref id) => {
                validate_and_check_overlap(&Event::from_draft(id.clone(), draft), &self.events)
            }
            None => validate_and_check_overlap(&draft, &self.events),
        };
        let check = match check {
            Ok(check) => check,
            Err(e) => {
                debug!("Form rejected: {}", e);
                self.status_message = Some(e.to_string());
                return;
            }
        };

        if !form.time_errors.is_empty() {
            self.status_message = Some("시간 설정을 확인해주세요.".to_string());
            return;
        }

        match SaveDecision::from(check) {
            SaveDecision::Proceed => self.save_form(),
            SaveDecision::ConfirmOverlap(events) => {
                info!("New event overlaps {} existing event(s)", events.len());
                self.overlapping = events;
                self.input_mode = InputMode::ConfirmOverlap;
            }
        }
    }

    /// Saves despite the overlap warning.
    pub fn confirm_overlap(&mut self) {
        self.overlapping.clear();
        self.save_form();
    }

    /// Back to the form to change the time.
    pub fn cancel_overlap(&mut self) {
        self.overlapping.clear();
        self.input_mode = InputMode::Form;
    }

    fn save_form(&mut self) {
        let Some(form) = self.form_state.take() else {
            return;
        };
        let draft = form.to_draft();

        let result = match form.editing_id {
            Some(ref id) => self.store.update(id, draft).map(|_| "일정이 수정되었습니다."),
            None => self.store.create(draft).map(|_| "일정이 추가되었습니다."),
        };

        match result {
            Ok(message) => {
                self.refresh_events();
                self.status_message = Some(message.to_string());
                self.input_mode = InputMode::Normal;
            }
            Err(e) => {
                warn!("Failed to save event: {}", e);
                self.status_message = Some("일정 저장 실패".to_string());
                self.form_state = Some(form);
                self.input_mode = InputMode::Form;
            }
        }
    }

    pub fn delete_selected_event(&mut self) {
        let Some(id) = self.selected_event().map(|e| e.id.clone()) else {
            return;
        };
        match self.store.remove(&id) {
            Ok(()) => {
                self.refresh_events();
                self.status_message = Some("일정이 삭제되었습니다.".to_string());
            }
            Err(e) => {
                warn!("Failed to delete event {}: {}", id, e);
                self.status_message = Some("일정 삭제 실패".to_string());
            }
        }
    }
}

/// Same day `delta` months away, clamped to the length of the target month.
fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = date.year() * 12 + date.month0() as i32 + delta;
    let (year, month) = (months.div_euclid(12), months.rem_euclid(12) as u32 + 1);
    let day = date.day().min(days_in_month(year, month).unwrap_or(28));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}
