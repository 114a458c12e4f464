// Panel component - 파일 패널 컴포넌트
//
// 디렉토리 목록, 커서/마킹 상태, 테두리 렌더링

use crate::core::render::PaneView;
use crate::models::{DirectoryEntry, EntryKind};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use std::collections::BTreeSet;
use std::path::PathBuf;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 패널 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelStatus {
    #[default]
    Inactive,
    Active,
}

/// 빈 선택 집합을 위한 정적 참조
static EMPTY_SELECTION: BTreeSet<PathBuf> = BTreeSet::new();

/// 패널 컴포넌트
pub struct Panel<'a> {
    /// 패널 제목 (경로)
    title: String,
    status: PanelStatus,
    entries: &'a [DirectoryEntry],
    /// 커서 위치 (".." 포함 인덱스)
    cursor: usize,
    cursor_released: bool,
    scroll_offset: usize,
    /// 마킹된 경로
    marked: &'a BTreeSet<PathBuf>,
    active_border_color: Color,
    inactive_border_color: Color,
    bg_color: Color,
    file_normal_color: Color,
    file_selected_color: Color,
    file_selected_bg_color: Color,
    file_marked_color: Color,
    directory_color: Color,
    parent_link_color: Color,
}

impl Default for Panel<'_> {
    fn default() -> Self {
        let theme = Theme::dark();
        Self {
            title: String::new(),
            status: PanelStatus::default(),
            entries: &[],
            cursor: 0,
            cursor_released: false,
            scroll_offset: 0,
            marked: &EMPTY_SELECTION,
            active_border_color: theme.panel_active_border,
            inactive_border_color: theme.panel_inactive_border,
            bg_color: theme.panel_bg,
            file_normal_color: theme.file_normal,
            file_selected_color: theme.file_selected,
            file_selected_bg_color: theme.file_selected_bg,
            file_marked_color: theme.file_marked,
            directory_color: theme.directory,
            parent_link_color: theme.parent_link,
        }
    }
}

impl<'a> Panel<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 패널 스냅샷으로부터 생성
    pub fn from_view(view: &PaneView<'a>) -> Self {
        let panel = Self::new()
            .title(view.path.display().to_string())
            .entries(view.entries)
            .cursor(view.cursor)
            .cursor_released(view.cursor_released)
            .scroll_offset(view.scroll_offset)
            .marked(view.selected);
        if view.focused {
            panel.active()
        } else {
            panel.inactive()
        }
    }

    /// 제목 설정
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn active(mut self) -> Self {
        self.status = PanelStatus::Active;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.status = PanelStatus::Inactive;
        self
    }

    pub fn entries(mut self, entries: &'a [DirectoryEntry]) -> Self {
        self.entries = entries;
        self
    }

    pub fn cursor(mut self, index: usize) -> Self {
        self.cursor = index;
        self
    }

    pub fn cursor_released(mut self, released: bool) -> Self {
        self.cursor_released = released;
        self
    }

    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    pub fn marked(mut self, marked: &'a BTreeSet<PathBuf>) -> Self {
        self.marked = marked;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.active_border_color = theme.panel_active_border;
        self.inactive_border_color = theme.panel_inactive_border;
        self.bg_color = theme.panel_bg;
        self.file_normal_color = theme.file_normal;
        self.file_selected_color = theme.file_selected;
        self.file_selected_bg_color = theme.file_selected_bg;
        self.file_marked_color = theme.file_marked;
        self.directory_color = theme.directory;
        self.parent_link_color = theme.parent_link;
        self
    }

    fn border_color(&self) -> Color {
        match self.status {
            PanelStatus::Active => self.active_border_color,
            PanelStatus::Inactive => self.inactive_border_color,
        }
    }

    fn title_style(&self) -> Style {
        let base = Style::default().fg(self.file_normal_color);
        match self.status {
            PanelStatus::Active => base.add_modifier(Modifier::BOLD),
            PanelStatus::Inactive => base,
        }
    }

    /// 종류별 아이콘 (ASCII)
    fn entry_icon(kind: EntryKind) -> &'static str {
        match kind {
            EntryKind::ParentLink => " ",
            EntryKind::Directory => "/",
            EntryKind::File => " ",
        }
    }

    fn entry_color(&self, kind: EntryKind) -> Color {
        match kind {
            EntryKind::ParentLink => self.parent_link_color,
            EntryKind::Directory => self.directory_color,
            EntryKind::File => self.file_normal_color,
        }
    }

    /// 경로를 최대 너비에 맞게 축약 (홈 디렉토리 ~로 축약 + 앞부분 생략)
    fn truncate_path(path: &str, max_width: usize) -> String {
        let home = dirs::home_dir()
            .map(|h| h.display().to_string())
            .unwrap_or_default();
        let path = if !home.is_empty() && home != "/" && path.starts_with(&home) {
            format!("~{}", &path[home.len()..])
        } else {
            path.to_string()
        };

        if path.width() <= max_width {
            return path;
        }

        let ellipsis = "...";
        let available_width = max_width.saturating_sub(ellipsis.width());
        let mut result = String::new();
        let mut current_width = 0;
        for ch in path.chars().rev() {
            let ch_width = ch.width().unwrap_or(1);
            if current_width + ch_width > available_width {
                break;
            }
            result.insert(0, ch);
            current_width += ch_width;
        }
        format!("{}{}", ellipsis, result)
    }

    /// 파일명을 최대 너비로 잘라냄 (확장자 보존)
    ///
    /// "very_long_fi...txt" 형태. 확장자가 없거나 숨김파일이면 끝에서 자른다.
    fn truncate_name(name: &str, max_width: usize) -> String {
        if name.width() <= max_width {
            return name.to_string();
        }

        let ellipsis = "...";
        let ellipsis_width = 3;

        let (stem, ext) = match name.rfind('.') {
            Some(dot_pos) if dot_pos > 0 => (&name[..dot_pos], &name[dot_pos..]),
            _ => (name, ""),
        };
        let ext_width = ext.width();

        if ellipsis_width + ext_width >= max_width || ext.is_empty() {
            let mut truncated = String::new();
            let mut current_width = 0;
            for ch in name.chars() {
                let ch_width = ch.width().unwrap_or(1);
                if current_width + ch_width + ellipsis_width > max_width {
                    truncated.push_str(ellipsis);
                    break;
                }
                truncated.push(ch);
                current_width += ch_width;
            }
            return truncated;
        }

        let available_stem_width = max_width - ellipsis_width - ext_width;
        let mut truncated = String::new();
        let mut current_width = 0;
        for ch in stem.chars() {
            let ch_width = ch.width().unwrap_or(1);
            if current_width + ch_width > available_stem_width {
                break;
            }
            truncated.push(ch);
            current_width += ch_width;
        }
        truncated.push_str(ellipsis);
        truncated.push_str(ext);
        truncated
    }

    /// 한 행 렌더링
    fn render_entry(&self, entry: &DirectoryEntry, index: usize, inner: Rect, buf: &mut Buffer, y: u16) {
        let is_cursor = index == self.cursor && !self.cursor_released;
        let is_marked = self.marked.contains(&entry.path) && !entry.is_parent_link();

        let (fg, bg, marker) = match (is_cursor, is_marked) {
            (true, true) => (self.file_marked_color, Some(self.file_selected_bg_color), "*"),
            (true, false) => (self.file_selected_color, Some(self.file_selected_bg_color), " "),
            (false, true) => (self.file_marked_color, None, "*"),
            (false, false) => (self.entry_color(entry.kind), None, " "),
        };

        let style = match bg {
            Some(bg_color) => Style::default().fg(fg).bg(bg_color),
            None => Style::default().fg(fg),
        };
        let marker_style = if is_marked {
            Style::default()
                .fg(self.file_marked_color)
                .bg(bg.unwrap_or(self.bg_color))
        } else {
            style
        };

        let label = if entry.is_parent_link() {
            "[..]".to_string()
        } else {
            entry.name.clone()
        };
        let icon = Self::entry_icon(entry.kind);
        let name_width = (inner.width as usize).saturating_sub(3);
        let display_name = Self::truncate_name(&label, name_width);
        let padding = name_width.saturating_sub(display_name.width());

        let line = Line::from(vec![
            Span::styled(marker, marker_style),
            Span::styled(icon, style),
            Span::styled(" ", style),
            Span::styled(display_name, style),
            Span::styled(" ".repeat(padding), style),
        ]);
        buf.set_line(inner.x, inner.y + y, &line, inner.width);
    }
}

impl Widget for Panel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let title_max_width = (area.width as usize).saturating_sub(4);
        let display_title = Self::truncate_path(&self.title, title_max_width);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color()))
            .title(Span::styled(format!(" {} ", display_title), self.title_style()))
            .style(Style::default().bg(self.bg_color));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let visible = inner.height as usize;
        let start = self.scroll_offset.min(self.entries.len());
        let end = (start + visible).min(self.entries.len());

        for (i, entry) in self.entries[start..end].iter().enumerate() {
            self.render_entry(entry, start + i, inner, buf, i as u16);
        }

        // 스크롤바 렌더링
        let total_items = self.entries.len();
        if total_items > visible && inner.width > 1 {
            let track_height = visible;
            let thumb_height = (track_height * track_height / total_items).max(1);
            let max_scroll = total_items - visible;
            let thumb_pos = if max_scroll == 0 {
                0
            } else {
                start.min(max_scroll) * track_height.saturating_sub(thumb_height) / max_scroll
            };

            let scrollbar_x = inner.x + inner.width - 1;
            let track_style = Style::default().fg(Color::Rgb(60, 60, 60));
            let thumb_style = Style::default().fg(Color::Rgb(150, 150, 150));

            for i in 0..track_height {
                let (symbol, style) = if i >= thumb_pos && i < thumb_pos + thumb_height {
                    ("┃", thumb_style)
                } else {
                    ("│", track_style)
                };
                buf.set_string(scrollbar_x, inner.y + i as u16, symbol, style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn sample_entries() -> Vec<DirectoryEntry> {
        vec![
            DirectoryEntry::parent_link(Path::new("/data/work")),
            DirectoryEntry::from_path(PathBuf::from("/data/work/src"), true),
            DirectoryEntry::from_path(PathBuf::from("/data/work/notes.txt"), false),
        ]
    }

    fn row_text(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width)
            .filter_map(|x| buf.cell((x, y)).map(|cell| cell.symbol().to_string()))
            .collect::<String>()
    }

    #[test]
    fn test_panel_creation() {
        let entries = sample_entries();
        let panel = Panel::new()
            .title("/data/work")
            .active()
            .entries(&entries)
            .cursor(1)
            .scroll_offset(0);

        assert_eq!(panel.title, "/data/work");
        assert_eq!(panel.status, PanelStatus::Active);
        assert_eq!(panel.entries.len(), 3);
        assert_eq!(panel.cursor, 1);
    }

    #[test]
    fn test_panel_status_toggle() {
        assert_eq!(Panel::new().active().status, PanelStatus::Active);
        assert_eq!(Panel::new().inactive().status, PanelStatus::Inactive);
    }

    #[test]
    fn test_render_rows() {
        let entries = sample_entries();
        let mut marked = BTreeSet::new();
        marked.insert(PathBuf::from("/data/work/notes.txt"));
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);

        Panel::new()
            .title("/data/work")
            .entries(&entries)
            .marked(&marked)
            .render(area, &mut buf);

        assert!(row_text(&buf, 0, 30).contains("/data/work"));
        assert!(row_text(&buf, 1, 30).contains("[..]"));
        assert!(row_text(&buf, 2, 30).contains("/ src"));
        let marked_row = row_text(&buf, 3, 30);
        assert!(marked_row.contains("*  notes.txt"));
    }

    #[test]
    fn test_released_cursor_row_is_not_highlighted() {
        let entries = sample_entries();
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 30, 6);

        let mut highlighted = Buffer::empty(area);
        Panel::new()
            .entries(&entries)
            .cursor(2)
            .render(area, &mut highlighted);
        let bg = highlighted.cell((5, 3)).map(|cell| cell.bg);
        assert_eq!(bg, Some(theme.file_selected_bg));

        let mut released = Buffer::empty(area);
        Panel::new()
            .entries(&entries)
            .cursor(2)
            .cursor_released(true)
            .render(area, &mut released);
        let bg = released.cell((5, 3)).map(|cell| cell.bg);
        assert_ne!(bg, Some(theme.file_selected_bg));
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(Panel::truncate_name("test.txt", 20), "test.txt");

        let truncated = Panel::truncate_name("very_long_filename_that_should_be_truncated.txt", 20);
        assert!(truncated.contains("..."));
        assert!(truncated.ends_with(".txt"));

        let truncated = Panel::truncate_name("very_long_filename_without_extension", 15);
        assert!(truncated.ends_with("..."));

        let truncated = Panel::truncate_name(".very_long_hidden_config_file", 15);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_truncate_path_keeps_tail() {
        let truncated = Panel::truncate_path("/a/very/deep/directory/structure/leaf", 16);
        assert!(truncated.starts_with("..."));
        assert!(truncated.ends_with("leaf"));
        assert!(truncated.width() <= 16);
    }
}
