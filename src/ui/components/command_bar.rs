// Command bar component - 하단 커맨드 바 컴포넌트
//
// 키맵에서 뽑은 단축키 표시

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// 커맨드 항목
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandItem {
    /// 단축키 (F5, Ctrl+d, ...)
    pub key: String,
    /// 레이블 (Copy, Del, ...)
    pub label: String,
}

impl CommandItem {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// 커맨드 바 컴포넌트
pub struct CommandBar<'a> {
    commands: &'a [CommandItem],
    bg_color: Color,
    key_fg_color: Color,
    label_fg_color: Color,
}

impl<'a> CommandBar<'a> {
    pub fn new(commands: &'a [CommandItem]) -> Self {
        Self {
            commands,
            bg_color: Color::Rgb(30, 30, 30),
            key_fg_color: Color::Rgb(0, 120, 212),
            label_fg_color: Color::Rgb(212, 212, 212),
        }
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.command_bar_bg;
        self.key_fg_color = theme.accent;
        self.label_fg_color = theme.command_bar_fg;
        self
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let key_style = Style::default()
            .fg(self.key_fg_color)
            .add_modifier(Modifier::BOLD);
        let label_style = Style::default().fg(self.label_fg_color);

        let mut spans = vec![Span::raw(" ")];
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(cmd.key.as_str(), key_style));
            spans.push(Span::styled(":", label_style));
            spans.push(Span::styled(cmd.label.as_str(), label_style));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_bar_renders_items_in_order() {
        let items = vec![CommandItem::new("F5", "Copy"), CommandItem::new("q", "Quit")];
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        CommandBar::new(&items).render(area, &mut buf);

        let line: String = (0..area.width)
            .filter_map(|x| buf.cell((x, 0)).map(|c| c.symbol().to_string()))
            .collect();
        assert!(line.starts_with(" F5:Copy q:Quit"));
    }
}
