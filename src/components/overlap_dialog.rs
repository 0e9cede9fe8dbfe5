use event_planner::calendar::Event;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme;

pub struct OverlapDialog;

impl OverlapDialog {
    /// Centered warning listing the events the pending save collides with.
    pub fn render(frame: &mut Frame, area: Rect, overlapping: &[Event]) {
        let theme = theme::current();
        let popup_w = area.width.clamp(30, 60);
        let popup_h = (overlapping.len() as u16 + 7).clamp(8, area.height.max(8));
        let x = area.x + area.width.saturating_sub(popup_w) / 2;
        let y = area.y + area.height.saturating_sub(popup_h) / 2;
        let popup_area = Rect::new(x, y, popup_w, popup_h).intersection(area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" 일정 겹침 경고 ")
            .title_style(theme.warning.add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(theme.warning);

        let mut lines = vec![
            Line::from("다음 일정과 겹칩니다:"),
            Line::from(""),
        ];
        for ev in overlapping {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {} ", ev.title),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("({} {})", ev.date, ev.duration_display()), theme.dim),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from("계속 진행하시겠습니까?"));
        lines.push(Line::from(Span::styled("y: 계속 진행  n/Esc: 취소", theme.dim)));

        let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(para, popup_area);
    }
}
