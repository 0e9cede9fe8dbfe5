use std::collections::HashSet;

use event_planner::calendar::{Event, RepeatType};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::theme;

pub struct EventList;

impl EventList {
    /// Search bar on top, the filtered events below it.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        events: &[&Event],
        notified_ids: &HashSet<String>,
        search_term: &str,
        searching: bool,
        selected_index: usize,
    ) {
        let theme = theme::current();
        let [search_area, list_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

        let cursor = if searching { "_" } else { "" };
        let search_border = if searching { theme.highlight } else { theme.border };
        let search = Paragraph::new(Line::from(vec![
            Span::styled(" 일정 검색: ", theme.dim),
            Span::raw(format!("{}{}", search_term, cursor)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(search_border),
        );
        frame.render_widget(search, search_area);

        let count = format!(" {}개 ", events.len());
        let block = Block::default()
            .title(" 일정 목록 ")
            .title_style(theme.header)
            .title_bottom(Line::from(Span::styled(count, theme.dim)))
            .borders(Borders::ALL)
            .border_style(theme.border);

        if events.is_empty() {
            let inner = block.inner(list_area);
            frame.render_widget(block, list_area);
            let msg = Paragraph::new("검색 결과가 없습니다.").style(theme.dim);
            frame.render_widget(msg, inner);
            return;
        }

        let items: Vec<ListItem> = events
            .iter()
            .map(|ev| format_event(ev, notified_ids.contains(&ev.id)))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(theme.selected)
            .highlight_symbol("> ");

        let mut state = ListState::default().with_selected(Some(selected_index));
        frame.render_stateful_widget(list, list_area, &mut state);
    }
}

fn format_event(ev: &Event, notified: bool) -> ListItem<'static> {
    let theme = theme::current();

    let title_style = if notified {
        theme.warning.add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let mut title = vec![Span::styled(ev.title.clone(), title_style)];
    if notified {
        title.insert(0, Span::styled("! ", theme.warning));
    }

    let mut lines = vec![
        Line::from(title),
        Line::from(Span::styled(
            format!("  {} {}", ev.date, ev.duration_display()),
            theme.dim,
        )),
    ];

    if !ev.description.is_empty() {
        lines.push(Line::from(format!("  {}", ev.description)));
    }
    if !ev.location.is_empty() {
        lines.push(Line::from(Span::styled(format!("  @ {}", ev.location), theme.dim)));
    }
    if !ev.category.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  카테고리: {}", ev.category),
            theme.dim,
        )));
    }
    if ev.repeat.kind != RepeatType::None {
        lines.push(Line::from(Span::styled(
            format!("  반복: {}", ev.repeat.display()),
            theme.dim,
        )));
    }
    if let Some(label) = ev.notification_label() {
        lines.push(Line::from(Span::styled(format!("  알림: {}", label), theme.dim)));
    }
    lines.push(Line::from(""));

    ListItem::new(lines)
}
