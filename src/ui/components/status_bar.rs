// Status bar component - 상태바 컴포넌트
//
// 포커스 패널의 파일/디렉토리 개수, 마킹 수, 진행 중인 전송 표시

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// 상태바 컴포넌트
pub struct StatusBar<'a> {
    file_count: usize,
    dir_count: usize,
    /// 마킹된 항목 수
    marked_count: usize,
    /// 진행 중인 전송 설명 (예: "Move notes.txt")
    transfer: Option<&'a str>,
    /// 포커스 패널 이름
    pane_label: &'a str,
    /// 포커스 패널 경로
    path: &'a str,
    bg_color: Color,
    fg_color: Color,
    highlight_color: Color,
}

impl Default for StatusBar<'_> {
    fn default() -> Self {
        Self {
            file_count: 0,
            dir_count: 0,
            marked_count: 0,
            transfer: None,
            pane_label: "Left",
            path: "",
            bg_color: Color::Rgb(30, 30, 30),
            fg_color: Color::Rgb(212, 212, 212),
            highlight_color: Color::Yellow,
        }
    }
}

impl<'a> StatusBar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_count(mut self, count: usize) -> Self {
        self.file_count = count;
        self
    }

    pub fn dir_count(mut self, count: usize) -> Self {
        self.dir_count = count;
        self
    }

    pub fn marked_count(mut self, count: usize) -> Self {
        self.marked_count = count;
        self
    }

    pub fn transfer(mut self, transfer: Option<&'a str>) -> Self {
        self.transfer = transfer;
        self
    }

    pub fn pane_label(mut self, label: &'a str) -> Self {
        self.pane_label = label;
        self
    }

    pub fn path(mut self, path: &'a str) -> Self {
        self.path = path;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.status_bar_bg;
        self.fg_color = theme.status_bar_fg;
        self.highlight_color = theme.warning;
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let left_info = if self.path.is_empty() {
            format!(" {} files, {} dirs", self.file_count, self.dir_count)
        } else {
            format!(
                " {} | {} files, {} dirs",
                self.path, self.file_count, self.dir_count
            )
        };

        let mut extra = String::new();
        if self.marked_count > 0 {
            extra.push_str(&format!(" | {} marked", self.marked_count));
        }
        if let Some(transfer) = self.transfer {
            extra.push_str(&format!(" | Dragging: {}", transfer));
        }

        let right_info = format!("[{}] ", self.pane_label);

        let used = left_info.width() + extra.width() + right_info.width();
        let padding = " ".repeat((area.width as usize).saturating_sub(used));

        let line = Line::from(vec![
            Span::styled(left_info, Style::default().fg(self.fg_color)),
            Span::styled(extra, Style::default().fg(self.highlight_color)),
            Span::raw(padding),
            Span::styled(right_info, Style::default().fg(self.fg_color)),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_line(bar: StatusBar<'_>, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
        (0..width)
            .filter_map(|x| buf.cell((x, 0)).map(|c| c.symbol().to_string()))
            .collect()
    }

    #[test]
    fn test_counts_and_pane_label() {
        let line = render_line(
            StatusBar::new().file_count(10).dir_count(5).pane_label("Right"),
            60,
        );
        assert!(line.starts_with(" 10 files, 5 dirs"));
        assert!(line.trim_end().ends_with("[Right]"));
        assert!(!line.contains("marked"));
    }

    #[test]
    fn test_focused_path_shown_first() {
        let line = render_line(StatusBar::new().path("/srv/data").file_count(1), 60);
        assert!(line.starts_with(" /srv/data | 1 files, 0 dirs"));
    }

    #[test]
    fn test_marked_and_transfer() {
        let line = render_line(
            StatusBar::new()
                .marked_count(2)
                .transfer(Some("Move notes.txt")),
            80,
        );
        assert!(line.contains("2 marked"));
        assert!(line.contains("Dragging: Move notes.txt"));
    }
}
