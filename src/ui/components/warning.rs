// Warning screen component - 경고 화면 컴포넌트
//
// 터미널이 너무 작을 때 표시되는 경고 화면

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::ui::layout::{MIN_HEIGHT, MIN_WIDTH};
use crate::ui::Theme;

/// 경고 화면 컴포넌트
pub struct WarningScreen {
    current_size: (u16, u16),
    warning_color: Color,
    bg_color: Color,
    fg_color: Color,
    error_color: Color,
}

impl Default for WarningScreen {
    fn default() -> Self {
        Self {
            current_size: (0, 0),
            warning_color: Color::Yellow,
            bg_color: Color::Rgb(30, 30, 30),
            fg_color: Color::Rgb(212, 212, 212),
            error_color: Color::Red,
        }
    }
}

impl WarningScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// 현재 터미널 크기 설정
    pub fn current_size(mut self, width: u16, height: u16) -> Self {
        self.current_size = (width, height);
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.warning_color = theme.warning;
        self.bg_color = theme.bg_primary;
        self.fg_color = theme.fg_primary;
        self.error_color = theme.error;
        self
    }
}

impl Widget for WarningScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_warning = Style::default()
            .fg(self.warning_color)
            .add_modifier(Modifier::BOLD);

        let lines = vec![
            Line::from(Span::styled("Terminal Too Small", bold_warning)),
            Line::from(""),
            Line::from(vec![
                Span::styled("Current: ", Style::default().fg(self.fg_color)),
                Span::styled(
                    format!("{}x{}", self.current_size.0, self.current_size.1),
                    Style::default()
                        .fg(self.error_color)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Required: ", Style::default().fg(self.fg_color)),
                Span::styled(format!("{}x{}", MIN_WIDTH, MIN_HEIGHT), bold_warning),
            ]),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.warning_color))
            .style(Style::default().bg(self.bg_color));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(block)
            .render(area, buf);
    }
}
