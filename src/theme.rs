use std::sync::OnceLock;

use event_planner::config::ThemeConfig;
use ratatui::style::{Color, Modifier, Style};

static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the theme built from the config. Only the first call has effect.
pub fn init(config: &ThemeConfig) {
    let _ = THEME.set(Theme::from_config(config));
}

/// Get the active theme, the default one if [`init`] was never called.
pub fn current() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub today: Style,
    pub selected: Style,
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub highlight: Style,
    pub holiday: Style,
    pub warning: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            today: Style::default().fg(Color::Black).bg(Color::Yellow),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            highlight: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            holiday: Style::default().fg(Color::LightRed),
            warning: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }
}

impl Theme {
    pub fn preset(name: &str) -> Self {
        match name {
            "dracula" => Self::dracula(),
            "nord" => Self::nord(),
            _ => Self::default(),
        }
    }

    fn dracula() -> Self {
        Self {
            today: Style::default().fg(Color::Black).bg(Color::Rgb(189, 147, 249)), // purple
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(139, 233, 253)), // cyan
            header: Style::default().fg(Color::Rgb(248, 248, 242)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(98, 114, 164)),
            border: Style::default().fg(Color::Rgb(68, 71, 90)),
            status: Style::default()
                .fg(Color::Rgb(248, 248, 242))
                .bg(Color::Rgb(68, 71, 90)),
            highlight: Style::default()
                .bg(Color::Rgb(68, 71, 90))
                .add_modifier(Modifier::BOLD),
            holiday: Style::default().fg(Color::Rgb(255, 85, 85)),
            warning: Style::default().fg(Color::Rgb(255, 85, 85)).add_modifier(Modifier::BOLD),
        }
    }

    fn nord() -> Self {
        Self {
            today: Style::default().fg(Color::Black).bg(Color::Rgb(235, 203, 139)),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(136, 192, 208)),
            header: Style::default().fg(Color::Rgb(229, 233, 240)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(76, 86, 106)),
            border: Style::default().fg(Color::Rgb(67, 76, 94)),
            status: Style::default()
                .fg(Color::Rgb(229, 233, 240))
                .bg(Color::Rgb(67, 76, 94)),
            highlight: Style::default()
                .bg(Color::Rgb(67, 76, 94))
                .add_modifier(Modifier::BOLD),
            holiday: Style::default().fg(Color::Rgb(191, 97, 106)),
            warning: Style::default().fg(Color::Rgb(191, 97, 106)).add_modifier(Modifier::BOLD),
        }
    }

    fn from_config(config: &ThemeConfig) -> Self {
        let mut theme = config
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        let color = |value: &Option<String>| value.as_deref().and_then(parse_color);

        if let Some(c) = color(&config.today_fg) {
            theme.today = theme.today.fg(c);
        }
        if let Some(c) = color(&config.today_bg) {
            theme.today = theme.today.bg(c);
        }
        if let Some(c) = color(&config.selected_fg) {
            theme.selected = theme.selected.fg(c);
        }
        if let Some(c) = color(&config.selected_bg) {
            theme.selected = theme.selected.bg(c);
        }
        if let Some(c) = color(&config.header_fg) {
            theme.header = theme.header.fg(c);
        }
        if let Some(c) = color(&config.dim_fg) {
            theme.dim = theme.dim.fg(c);
        }
        if let Some(c) = color(&config.border_fg) {
            theme.border = theme.border.fg(c);
        }
        if let Some(c) = color(&config.status_fg) {
            theme.status = theme.status.fg(c);
        }
        if let Some(c) = color(&config.status_bg) {
            theme.status = theme.status.bg(c);
        }
        if let Some(c) = color(&config.highlight_bg) {
            theme.highlight = theme.highlight.bg(c);
        }
        if let Some(c) = color(&config.holiday_fg) {
            theme.holiday = theme.holiday.fg(c);
        }

        theme
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.starts_with('#') && s.len() == 7 {
        let r = u8::from_str_radix(&s[1..3], 16).ok()?;
        let g = u8::from_str_radix(&s[3..5], 16).ok()?;
        let b = u8::from_str_radix(&s[5..7], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightblue" => Some(Color::LightBlue),
        _ => None,
    }
}
