use event_planner::calendar::ViewMode;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::InputMode;
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        view_mode: ViewMode,
        input_mode: InputMode,
        message: Option<&str>,
    ) {
        let style = theme::current().status;
        let w = area.width as usize;

        let mode_str = match view_mode {
            ViewMode::Month => "월간 보기",
            ViewMode::Week => "주간 보기",
        };
        let mode_str = match input_mode {
            InputMode::Normal => mode_str,
            InputMode::Search => "검색",
            InputMode::Form => "일정 편집",
            InputMode::ConfirmOverlap => "겹침 확인",
        };

        let hints = match input_mode {
            InputMode::Normal if w >= 90 => {
                " hjkl:이동 [/]:월 t:오늘 /:검색 n:추가 e:수정 d:삭제 ?:도움말 q:종료"
            }
            InputMode::Normal if w >= 40 => " n:추가 /:검색 ?:도움말 q:종료",
            InputMode::Normal => " q:종료",
            InputMode::Search => " Enter:완료 Esc:지우기",
            InputMode::Form => " Tab:다음 Space:선택 Enter:저장 Esc:취소",
            InputMode::ConfirmOverlap => " y:계속 n:취소",
        };

        let message = message.map(|m| format!(" {} ", m)).unwrap_or_default();
        let used = Span::raw(mode_str).width()
            + 2
            + Span::raw(message.as_str()).width()
            + Span::raw(hints).width();
        let padding = " ".repeat(w.saturating_sub(used));

        let line = Line::from(vec![
            Span::styled(format!(" {} ", mode_str), style),
            Span::styled(message, style),
            Span::styled(padding, style),
            Span::styled(hints, style),
        ]);

        frame.render_widget(Paragraph::new(line).style(style), area);
    }
}
