//! Reminder notifications.
//!
//! [`NotificationScheduler`] is the state machine: it remembers which events
//! already fired and which notifications are still on screen. It has no
//! notion of time of its own, "now" is passed to every [`tick`].
//!
//! [`NotificationTask`] drives the scheduler from a tokio interval against
//! the latest snapshot of events published on a `watch` channel, reading the
//! time from an injectable [`Clock`].
//!
//! [`tick`]: NotificationScheduler::tick

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{Local, NaiveDateTime};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{debug, error, info};

use super::date::parse_date_time;
use super::event::Event;
use crate::error::{CalendarError, Result};

// Mocking out time so that it is possible to test the scheduler against
// deterministic instants.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time, used when not testing.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *lock(&self.now) = now;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = lock(&self.now);
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *lock(&self.now)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Id of the event this notification is about
    pub id: String,
    pub message: String,
}

pub fn notification_message(event: &Event) -> String {
    format!(
        "{}분 후 {} 일정이 시작됩니다.",
        event.notification_time, event.title
    )
}

/// Events due for a reminder at `now`: not yet notified, with the minutes
/// until start (rounded to the nearest minute) inside `1..=lead time`. An
/// event is picked up on the first scan after it enters that window. A lead
/// time of zero means no reminder.
pub fn upcoming_events<'a>(
    events: &'a [Event],
    now: NaiveDateTime,
    notified_ids: &HashSet<String>,
) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|e| e.notification_time > 0 && !notified_ids.contains(&e.id))
        .filter(|e| {
            let Some(start) = parse_date_time(&e.date, &e.start_time) else {
                return false;
            };
            let minutes = ((start - now).num_milliseconds() as f64 / 60_000.0).round();
            minutes > 0.0 && minutes <= e.notification_time as f64
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct NotificationScheduler {
    notified_ids: HashSet<String>,
    pending: Vec<Notification>,
}

impl NotificationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `events` once and returns the notifications fired by this scan.
    /// An event fires at most once per scheduler, whatever happens to it later.
    pub fn tick(&mut self, events: &[Event], now: NaiveDateTime) -> Vec<Notification> {
        let fired: Vec<Notification> = upcoming_events(events, now, &self.notified_ids)
            .into_iter()
            .map(|e| Notification {
                id: e.id.clone(),
                message: notification_message(e),
            })
            .collect();

        for notification in &fired {
            self.notified_ids.insert(notification.id.clone());
            self.pending.push(notification.clone());
        }
        fired
    }

    /// Removes the pending notification at `index`. The event stays notified.
    pub fn dismiss(&mut self, index: usize) -> Option<Notification> {
        if index < self.pending.len() {
            Some(self.pending.remove(index))
        } else {
            None
        }
    }

    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    pub fn notified_ids(&self) -> &HashSet<String> {
        &self.notified_ids
    }
}

#[derive(Debug, Clone, Copy)]
pub enum NotificationCommand {
    /// Scan immediately instead of waiting for the next tick
    TickNow,
    /// Stop the task
    Stop,
}

/// Runs a [`NotificationScheduler`] on a tokio interval.
pub struct NotificationTask {
    /// Shared with the spawned task
    scheduler: Arc<Mutex<NotificationScheduler>>,

    /// Channel to send commands to the running task
    command_tx: Option<mpsc::Sender<NotificationCommand>>,

    /// Handle to the running task
    handle: Option<JoinHandle<()>>,
}

impl Default for NotificationTask {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationTask {
    pub fn new() -> Self {
        Self {
            scheduler: Arc::new(Mutex::new(NotificationScheduler::new())),
            command_tx: None,
            handle: None,
        }
    }

    /// Spawns the scanning loop. The first scan happens right away, then one
    /// every `period`. Starting an already running task does nothing.
    pub fn start(
        &mut self,
        events: watch::Receiver<Vec<Event>>,
        clock: Arc<dyn Clock>,
        period: Duration,
    ) {
        if self.is_running() {
            debug!("Notification task is already running");
            return;
        }
        info!("Starting notification task, ticking every {:?}", period);

        let (command_tx, mut command_rx) = mpsc::channel(8);
        let scheduler = Arc::clone(&self.scheduler);

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = interval.tick() => scan(&scheduler, &events, clock.as_ref()),
                    cmd = command_rx.recv() => match cmd {
                        Some(NotificationCommand::TickNow) => {
                            scan(&scheduler, &events, clock.as_ref())
                        }
                        Some(NotificationCommand::Stop) | None => {
                            info!("Notification task stopping...");
                            break;
                        }
                    }
                }
            }
        });

        self.command_tx = Some(command_tx);
        self.handle = Some(handle);
    }

    /// Stops the task and waits for it to finish. Pending notifications and
    /// the notified set survive a restart.
    pub async fn stop(&mut self) -> Result<()> {
        let Some(handle) = self.handle.take() else {
            debug!("Notification task is not running");
            return Ok(());
        };

        if let Some(tx) = self.command_tx.take() {
            if let Err(e) = tx.send(NotificationCommand::Stop).await {
                error!("Failed to send stop command to notification task: {}", e);
            }
        }

        handle.await.map_err(|e| CalendarError::Scheduler {
            message: format!("Failed to stop notification task: {}", e),
        })?;
        info!("Notification task stopped");
        Ok(())
    }

    pub async fn tick_now(&self) -> Result<()> {
        let tx = self.command_tx.as_ref().ok_or_else(|| CalendarError::Scheduler {
            message: "Notification task is not running".to_string(),
        })?;
        tx.send(NotificationCommand::TickNow)
            .await
            .map_err(|e| CalendarError::Scheduler {
                message: format!("Failed to send tick command: {}", e),
            })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn pending(&self) -> Vec<Notification> {
        lock(&self.scheduler).pending().to_vec()
    }

    pub fn dismiss(&self, index: usize) -> Option<Notification> {
        lock(&self.scheduler).dismiss(index)
    }

    /// Ids of every event that has fired during this session.
    pub fn notified_ids(&self) -> HashSet<String> {
        lock(&self.scheduler).notified_ids().clone()
    }
}

fn scan(
    scheduler: &Mutex<NotificationScheduler>,
    events: &watch::Receiver<Vec<Event>>,
    clock: &dyn Clock,
) {
    let snapshot = events.borrow();
    let fired = lock(scheduler).tick(&snapshot, clock.now());
    for notification in fired {
        info!(event_id = %notification.id, "{}", notification.message);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::event::EventDraft;
    use pretty_assertions::assert_eq;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        parse_date_time(date, time).unwrap()
    }

    fn event(id: &str, date: &str, start: &str, lead: u32) -> Event {
        Event::from_draft(
            id,
            EventDraft {
                title: format!("event{}", id),
                date: date.into(),
                start_time: start.into(),
                end_time: "23:00".into(),
                notification_time: lead,
                ..Default::default()
            },
        )
    }

    #[test]
    fn selects_event_exactly_lead_time_away() {
        let events = vec![event("1", "2025-07-15", "14:00", 10)];
        let now = at("2025-07-15", "13:50");

        let mut notified = HashSet::new();
        assert_eq!(upcoming_events(&events, now, &notified), vec![&events[0]]);

        notified.insert("1".to_string());
        assert!(upcoming_events(&events, now, &notified).is_empty());
    }

    #[test]
    fn selects_event_anywhere_inside_its_lead_window() {
        let events = vec![event("1", "2025-07-15", "14:00", 10)];
        let now = at("2025-07-15", "13:55");

        let mut notified = HashSet::new();
        assert_eq!(upcoming_events(&events, now, &notified), vec![&events[0]]);

        notified.insert("1".to_string());
        assert!(upcoming_events(&events, now, &notified).is_empty());

        let empty = HashSet::new();
        assert!(upcoming_events(&events, at("2025-07-15", "13:49"), &empty).is_empty());
        assert_eq!(upcoming_events(&events, at("2025-07-15", "13:59"), &empty).len(), 1);
        assert!(upcoming_events(&events, at("2025-07-15", "14:00"), &empty).is_empty());
    }

    #[test]
    fn tick_fires_once_while_inside_the_window() {
        let events = vec![event("1", "2025-07-15", "14:00", 10)];
        let mut scheduler = NotificationScheduler::new();

        assert_eq!(scheduler.tick(&events, at("2025-07-15", "13:55")).len(), 1);
        assert!(scheduler.tick(&events, at("2025-07-15", "13:56")).is_empty());
        assert_eq!(scheduler.pending().len(), 1);
    }

    #[test]
    fn half_minute_rounding_window() {
        let events = vec![event("1", "2025-07-15", "14:00", 10)];
        let notified = HashSet::new();
        let base = at("2025-07-15", "13:50");

        // 10m29s rounds to ten minutes, 10m31s to eleven.
        let early = base - chrono::Duration::seconds(29);
        assert_eq!(upcoming_events(&events, early, &notified).len(), 1);
        let too_early = base - chrono::Duration::seconds(31);
        assert!(upcoming_events(&events, too_early, &notified).is_empty());

        // 25s before the start rounds to zero minutes.
        let starting = at("2025-07-15", "14:00") - chrono::Duration::seconds(25);
        assert!(upcoming_events(&events, starting, &notified).is_empty());
    }

    #[test]
    fn skips_started_unscheduled_and_malformed_events() {
        let events = vec![
            event("1", "2025-07-15", "13:00", 10),
            event("2", "2025-07-15", "14:00", 0),
            event("3", "2025-07-15", "14:x0", 10),
            event("4", "2025-07-15", "13:50", 0),
        ];
        let now = at("2025-07-15", "13:50");
        assert!(upcoming_events(&events, now, &HashSet::new()).is_empty());
    }

    #[test]
    fn tick_fires_once_per_event() {
        let events = vec![
            event("1", "2025-07-15", "14:00", 10),
            event("2", "2025-07-16", "13:50", 1440),
        ];
        let mut scheduler = NotificationScheduler::new();

        let fired = scheduler.tick(&events, at("2025-07-15", "13:50"));
        assert_eq!(
            fired,
            vec![
                Notification {
                    id: "1".into(),
                    message: "10분 후 event1 일정이 시작됩니다.".into(),
                },
                Notification {
                    id: "2".into(),
                    message: "1440분 후 event2 일정이 시작됩니다.".into(),
                },
            ]
        );

        // Still inside the window a few seconds later.
        let later = at("2025-07-15", "13:50") + chrono::Duration::seconds(5);
        let fired = scheduler.tick(&events, later);
        assert!(fired.is_empty());
        assert_eq!(scheduler.pending().len(), 2);
    }

    #[test]
    fn dismissed_notifications_never_come_back() {
        let events = vec![event("1", "2025-07-15", "14:00", 10)];
        let now = at("2025-07-15", "13:50");
        let mut scheduler = NotificationScheduler::new();
        scheduler.tick(&events, now);

        assert_eq!(scheduler.dismiss(5), None);
        assert_eq!(scheduler.dismiss(0).map(|n| n.id), Some("1".to_string()));
        assert!(scheduler.pending().is_empty());

        assert!(scheduler.tick(&events, now).is_empty());
        assert!(scheduler.notified_ids().contains("1"));
    }

    #[test]
    fn fixed_clock_moves_only_when_told() {
        let clock = FixedClock::new(at("2025-07-15", "13:50"));
        clock.advance(chrono::Duration::minutes(5));
        assert_eq!(clock.now(), at("2025-07-15", "13:55"));
        clock.set(at("2025-01-01", "00:00"));
        assert_eq!(clock.now(), at("2025-01-01", "00:00"));
    }

    #[tokio::test(start_paused = true)]
    async fn task_scans_on_every_tick_until_stopped() {
        let clock = Arc::new(FixedClock::new(at("2025-07-15", "13:40")));
        let (events_tx, events_rx) = watch::channel(vec![event("1", "2025-07-15", "14:00", 10)]);

        let mut task = NotificationTask::new();
        task.start(events_rx, clock.clone(), Duration::from_secs(1));
        assert!(task.is_running());

        time::sleep(Duration::from_millis(1500)).await;
        assert!(task.pending().is_empty());

        clock.set(at("2025-07-15", "13:50"));
        time::sleep(Duration::from_secs(1)).await;
        assert_eq!(task.pending().len(), 1);

        // The events snapshot is replaced wholesale.
        events_tx
            .send(vec![
                event("1", "2025-07-15", "14:00", 10),
                event("2", "2025-07-15", "13:51", 1),
            ])
            .unwrap();
        task.tick_now().await.unwrap();
        time::sleep(Duration::from_millis(10)).await;
        let ids: Vec<String> = task.pending().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["1".to_string(), "2".to_string()]);

        task.stop().await.unwrap();
        assert!(!task.is_running());
        assert!(task.tick_now().await.is_err());
    }
}
