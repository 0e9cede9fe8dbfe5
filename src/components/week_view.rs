use chrono::{NaiveDate, Timelike};
use event_planner::calendar::date::{events_on_date, format_week_label, week_dates};
use event_planner::calendar::{to_interval, Event};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme;

const HOUR_START: u32 = 6;
const HOUR_END: u32 = 23;

pub struct WeekView;

impl WeekView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        selected_date: NaiveDate,
        today: NaiveDate,
        events: &[&Event],
    ) {
        let theme = theme::current();
        let block = Block::default()
            .title(format!(" {} ", format_week_label(selected_date)))
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width < 10 || inner.height < 3 {
            return;
        }

        let inner_h = inner.height as usize;

        // Time label column, then one column per day
        let time_col_w: u16 = if inner.width >= 70 { 6 } else { 4 };
        let col_w = (inner.width.saturating_sub(time_col_w) / 7).max(1);

        let mut col_constraints = vec![Constraint::Length(time_col_w)];
        for _ in 0..7 {
            col_constraints.push(Constraint::Length(col_w));
        }
        col_constraints.push(Constraint::Min(0));
        let cols = Layout::horizontal(col_constraints).split(inner);

        // One header row, the rest shared by the hours
        let content_rows = inner_h.saturating_sub(1);
        let total_hours = (HOUR_END - HOUR_START) as usize;
        let rows_per_hour = (content_rows / total_hours).max(1);
        let visible_hours = (content_rows / rows_per_hour).min(total_hours);

        let mut row_constraints = vec![Constraint::Length(1)];
        for _ in 0..visible_hours {
            row_constraints.push(Constraint::Length(rows_per_hour as u16));
        }
        row_constraints.push(Constraint::Min(0));
        let rows = Layout::vertical(row_constraints).split(inner);

        let week = week_dates(selected_date);

        for (offset, date) in week.iter().enumerate() {
            let col_idx = offset + 1;
            let label = if col_w >= 10 {
                date.format("%m/%d %a").to_string()
            } else {
                date.format("%d").to_string()
            };

            let style = if *date == today && *date == selected_date {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if *date == selected_date {
                theme.selected
            } else if *date == today {
                theme.today
            } else {
                theme.header
            };

            let header = Paragraph::new(Line::from(Span::styled(
                format!("{:^width$}", label, width = col_w as usize),
                style,
            )));
            frame.render_widget(header, cols[col_idx].intersection(rows[0]));
        }

        for hour_idx in 0..visible_hours {
            let hour = HOUR_START + hour_idx as u32;
            let row_idx = hour_idx + 1;

            let time_label = if time_col_w >= 6 {
                format!("{:>2}:00 ", hour)
            } else {
                format!("{:>2} ", hour)
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(time_label, theme.dim))),
                cols[0].intersection(rows[row_idx]),
            );

            for (offset, date) in week.iter().enumerate() {
                let cell_area = cols[offset + 1].intersection(rows[row_idx]);
                if cell_area.width == 0 || cell_area.height == 0 {
                    continue;
                }

                let in_hour = events_on_date(events.iter().copied(), *date)
                    .into_iter()
                    .find(|ev| occupies_hour(ev, hour));

                if let Some(ev) = in_hour {
                    let width = cell_area.width as usize;
                    let title: String = ev.title.chars().take(width).collect();
                    let style = Style::default().fg(Color::Black).bg(Color::Cyan);
                    let para = Paragraph::new(Line::from(Span::styled(
                        format!("{:<width$}", title, width = width),
                        style,
                    )));
                    frame.render_widget(para, cell_area);
                }
            }
        }
    }
}

/// Whether any part of `hour` is inside the event. An event ending on the
/// hour does not occupy that hour.
fn occupies_hour(event: &Event, hour: u32) -> bool {
    let interval = to_interval(event);
    let (Some(start), Some(end)) = (interval.start(), interval.end()) else {
        return false;
    };
    let last_hour = if end.minute() > 0 {
        end.hour()
    } else {
        end.hour().saturating_sub(1)
    };
    hour >= start.hour() && hour <= last_hour
}
