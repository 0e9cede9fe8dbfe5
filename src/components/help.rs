use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme;

const SECTIONS: [(&str, &[(&str, &str)]); 4] = [
    (
        "이동",
        &[
            ("h/l", "이전/다음 날"),
            ("j/k", "다음/이전 주"),
            ("[/]", "이전/다음 달"),
            ("t", "오늘로 이동"),
        ],
    ),
    ("보기", &[("1/2", "월간 / 주간 보기"), ("Tab", "일정 목록에서 선택")]),
    (
        "일정",
        &[
            ("/", "일정 검색"),
            ("n", "새 일정"),
            ("e", "선택한 일정 수정"),
            ("d", "선택한 일정 삭제"),
            ("x", "가장 오래된 알림 닫기"),
        ],
    ),
    ("", &[("q", "종료"), ("?/Esc", "도움말 닫기")]),
];

pub struct HelpPopup;

impl HelpPopup {
    pub fn render(frame: &mut Frame, area: Rect) {
        let theme = theme::current();
        let popup_w = area.width.clamp(30, 48);
        let popup_h = area.height.clamp(12, 22);
        let x = area.x + area.width.saturating_sub(popup_w) / 2;
        let y = area.y + area.height.saturating_sub(popup_h) / 2;
        let popup_area = Rect::new(x, y, popup_w, popup_h).intersection(area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" 단축키 ")
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);

        let key_style = theme.highlight.add_modifier(Modifier::BOLD);
        let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

        let mut lines = Vec::new();
        for (i, (section, keys)) in SECTIONS.iter().enumerate() {
            if i > 0 {
                lines.push(Line::from(""));
            }
            if !section.is_empty() {
                lines.push(Line::from(Span::styled(*section, section_style)));
            }
            for (key, desc) in keys.iter() {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:<8}", key), key_style),
                    Span::raw(*desc),
                ]));
            }
        }

        let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(para, popup_area);
    }
}
