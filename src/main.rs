mod app;
mod components;
mod event;
mod logging;
mod theme;
mod tui;

use std::sync::Arc;
use std::time::Duration;

use app::{App, InputMode};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event_planner::calendar::{EventStore, MemoryStore, SystemClock, ViewMode};
use event_planner::Config;
use ratatui::layout::{Constraint, Layout, Rect};
use tracing::info;

const IDLE_SLEEP: Duration = Duration::from_millis(50);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::load()?;
    if let Some(path) = config.log_path() {
        logging::init(&path)?;
    }
    theme::init(&config.theme);

    let store: Box<dyn EventStore> = match config.events_path() {
        Some(path) => Box::new(MemoryStore::load(&path)?),
        None => Box::new(MemoryStore::new()),
    };
    info!("Loaded {} event(s)", store.list().len());

    let mut app = App::new(&config, store, Arc::new(SystemClock));
    app.start_notifications();

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app).await;
    tui::restore()?;
    app.shutdown().await?;
    result
}

async fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        app.sync_today();
        terminal.draw(|frame| draw(frame, app))?;

        // Yield to the notification task while no key is waiting
        let Some(key) = event::try_next_key()? else {
            tokio::time::sleep(IDLE_SLEEP).await;
            continue;
        };

        if app.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                app.show_help = false;
            }
            continue;
        }

        match app.input_mode {
            InputMode::Normal => handle_normal_input(app, key),
            InputMode::Search => handle_search_input(app, key),
            InputMode::Form => handle_form_input(app, key),
            InputMode::ConfirmOverlap => handle_overlap_input(app, key),
        }
    }

    Ok(())
}

fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let [content_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

    let visible = app.visible_events();
    let [calendar_area, list_area] = if content_area.width >= 80 {
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
            .areas(content_area)
    } else {
        [content_area, Rect::default()]
    };

    match app.view_mode {
        ViewMode::Month => components::MonthView::render(
            frame,
            calendar_area,
            app.selected_date,
            app.today,
            &visible,
        ),
        ViewMode::Week => components::WeekView::render(
            frame,
            calendar_area,
            app.selected_date,
            app.today,
            &visible,
        ),
    }

    if !list_area.is_empty() {
        components::EventList::render(
            frame,
            list_area,
            &visible,
            &app.notified_ids(),
            &app.search_term,
            app.input_mode == InputMode::Search,
            app.list_index,
        );
    }

    if let Some(ref form) = app.form_state {
        components::EventForm::render(frame, area, form);
    }

    if app.input_mode == InputMode::ConfirmOverlap {
        components::OverlapDialog::render(frame, area, &app.overlapping);
    }

    components::NotificationList::render(frame, content_area, &app.pending_notifications());

    if app.show_help {
        components::HelpPopup::render(frame, area);
    }

    components::StatusBar::render(
        frame,
        status_area,
        app.view_mode,
        app.input_mode,
        app.status_message.as_deref(),
    );
}

fn handle_normal_input(app: &mut App, key: KeyEvent) {
    app.status_message = None;
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Char('1'), _) => app.set_view_mode(ViewMode::Month),
        (KeyCode::Char('2'), _) => app.set_view_mode(ViewMode::Week),
        (KeyCode::Char('t'), _) => app.go_to_today(),
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.prev_day(),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.next_day(),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.prev_week(),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.next_week(),
        (KeyCode::Char('['), _) => app.prev_month(),
        (KeyCode::Char(']'), _) => app.next_month(),
        (KeyCode::Tab, _) => app.select_next_event(),
        (KeyCode::BackTab, _) => app.select_prev_event(),
        (KeyCode::Char('/'), _) => app.start_search(),
        (KeyCode::Char('n'), _) => app.open_event_form(),
        (KeyCode::Char('e'), _) | (KeyCode::Enter, _) => app.edit_selected_event(),
        (KeyCode::Char('d'), _) => app.delete_selected_event(),
        (KeyCode::Char('x'), _) => app.dismiss_notification(0),
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.finish_search(false),
        KeyCode::Esc => app.finish_search(true),
        KeyCode::Backspace => app.search_backspace(),
        KeyCode::Char(c) => app.search_input_char(c),
        _ => {}
    }
}

fn handle_form_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_event_form(),
        KeyCode::Enter => app.submit_event_form(),
        KeyCode::Tab => app.form_tab(),
        KeyCode::BackTab => app.form_backtab(),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char(' ')
            if app
                .form_state
                .as_ref()
                .is_some_and(|f| f.active_field.is_choice()) =>
        {
            app.form_cycle()
        }
        KeyCode::Char(c) => app.form_input_char(c),
        _ => {}
    }
}

fn handle_overlap_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_overlap(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_overlap(),
        _ => {}
    }
}
