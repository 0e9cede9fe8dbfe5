use event_planner::calendar::Notification;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme;

const MAX_WIDTH: u16 = 44;

pub struct NotificationList;

impl NotificationList {
    /// Stacks pending notifications in the top-right corner, oldest first.
    pub fn render(frame: &mut Frame, area: Rect, notifications: &[Notification]) {
        if notifications.is_empty() {
            return;
        }
        let theme = theme::current();
        let width = area.width.min(MAX_WIDTH);
        let x = area.x + area.width.saturating_sub(width);

        let mut y = area.y;
        for notification in notifications {
            let message_w = width.saturating_sub(2).max(1) as usize;
            let wrapped = notification.message.chars().count() / message_w + 1;
            let height = wrapped as u16 + 2;
            if y + height > area.y + area.height {
                break;
            }

            let box_area = Rect::new(x, y, width, height);
            frame.render_widget(Clear, box_area);
            let block = Block::default()
                .title(" 알림 ")
                .title_style(theme.warning)
                .title_bottom(Line::from(Span::styled(" x: 닫기 ", theme.dim)))
                .borders(Borders::ALL)
                .border_style(theme.warning);
            let para = Paragraph::new(notification.message.as_str())
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(para, box_area);

            y += height;
        }
    }
}
