use chrono::{Datelike, NaiveDate};
use event_planner::calendar::date::{events_on_day, format_month_label, month_grid};
use event_planner::calendar::holiday::holidays_in_month;
use event_planner::calendar::Event;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme;

const DAY_NAMES: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

pub struct MonthView;

impl MonthView {
    /// `events` must already be limited to the month of `selected_date`:
    /// cells are matched on day-of-month only.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        selected_date: NaiveDate,
        today: NaiveDate,
        events: &[&Event],
    ) {
        let theme = theme::current();
        let year = selected_date.year();
        let month = selected_date.month();
        let holidays = holidays_in_month(year, month);

        let block = Block::default()
            .title(format!(" {} ", format_month_label(selected_date)))
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let header = Line::from(
            DAY_NAMES
                .iter()
                .enumerate()
                .map(|(i, d)| {
                    let style = if i == 0 { theme.holiday } else { theme.header };
                    Span::styled(format!(" {:<4}", d), style)
                })
                .collect::<Vec<Span>>(),
        );

        let mut weeks: Vec<Line> = Vec::new();
        for row in month_grid(selected_date) {
            let cells: Vec<Span> = row
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let Some(day) = *cell else {
                        return Span::raw("      ");
                    };
                    let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                        return Span::raw("      ");
                    };
                    let count = events_on_day(events.iter().copied(), day).len();
                    let marker = match count {
                        0 => "  ",
                        1 => "* ",
                        _ => "+ ",
                    };

                    let style = if date == today && date == selected_date {
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Yellow)
                            .add_modifier(Modifier::BOLD)
                    } else if date == selected_date {
                        theme.selected
                    } else if date == today {
                        theme.today
                    } else if holidays.contains_key(&date) || col == 0 {
                        theme.holiday
                    } else {
                        Style::default()
                    };

                    Span::styled(format!("  {:>2}{}", day, marker), style)
                })
                .collect();
            weeks.push(Line::from(cells));
        }

        let holiday_lines: Vec<Line> = holidays
            .iter()
            .map(|(date, name)| {
                Line::from(Span::styled(
                    format!(" {} {}", date.format("%m/%d"), name),
                    theme.holiday,
                ))
            })
            .collect();

        // Layout: header + weeks + holiday legend
        let mut constraints = vec![Constraint::Length(1)];
        for _ in &weeks {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));

        let rows = Layout::vertical(constraints).split(inner);

        frame.render_widget(Paragraph::new(header), rows[0]);
        for (i, week) in weeks.into_iter().enumerate() {
            frame.render_widget(Paragraph::new(week), rows[i + 1]);
        }
        if let Some(legend) = rows.last() {
            frame.render_widget(Paragraph::new(holiday_lines), *legend);
        }
    }
}
