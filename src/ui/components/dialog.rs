//! 다이얼로그 시스템
//!
//! 확인/입력/선택/메시지 모달 위젯과 키 처리

use crate::ui::Theme;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 다이얼로그 내부 좌우 패딩 (border 안쪽 여백)
const DIALOG_H_PADDING: u16 = 2;
/// 다이얼로그 내부 상단 패딩 (border 아래 여백)
const DIALOG_V_PADDING: u16 = 1;

/// 한 줄 입력 버퍼 (cursor는 바이트 인덱스)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = self.prev_char_start(self.cursor);
        self.value.remove(prev);
        self.cursor = prev;
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.prev_char_start(self.cursor);
    }

    pub fn right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    /// 커서 앞 단어 삭제 (Ctrl+W)
    pub fn delete_prev_word(&mut self) {
        let original = self.cursor;
        let mut pos = original;

        // 구분자 건너뛰기
        while pos > 0 {
            let prev = self.prev_char_start(pos);
            if !Self::is_word_delimiter(self.char_at(prev)) {
                break;
            }
            pos = prev;
        }
        // 단어 시작까지
        while pos > 0 {
            let prev = self.prev_char_start(pos);
            if Self::is_word_delimiter(self.char_at(prev)) {
                break;
            }
            pos = prev;
        }

        self.value.replace_range(pos..original, "");
        self.cursor = pos;
    }

    fn char_at(&self, index: usize) -> char {
        self.value[index..].chars().next().unwrap_or_default()
    }

    fn prev_char_start(&self, pos: usize) -> usize {
        self.value[..pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn is_word_delimiter(ch: char) -> bool {
        ch.is_whitespace() || matches!(ch, '/' | '\\' | '.' | '-' | '_')
    }
}

/// 다이얼로그 종류
#[derive(Debug, Clone, PartialEq)]
pub enum DialogKind {
    /// 입력 다이얼로그
    Input {
        title: String,
        prompt: String,
        input: TextInput,
        selected_button: usize, // 0: OK, 1: Cancel
    },
    /// 확인 다이얼로그 (Yes/No)
    Confirm {
        title: String,
        message: String,
        selected_button: usize, // 0: Yes, 1: No
    },
    /// 선택 다이얼로그
    Choose {
        title: String,
        message: String,
        options: Vec<String>,
        selected_index: usize,
    },
    /// 메시지 다이얼로그
    Message {
        title: String,
        message: String,
        is_error: bool,
    },
}

/// 다이얼로그 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    /// 확인/메시지 닫기
    Accepted,
    /// 입력 완료
    Text(String),
    /// 선택 완료
    Selected(usize),
    Cancelled,
}

impl DialogKind {
    pub fn input(title: impl Into<String>, prompt: impl Into<String>) -> Self {
        DialogKind::Input {
            title: title.into(),
            prompt: prompt.into(),
            input: TextInput::default(),
            selected_button: 0,
        }
    }

    pub fn confirm(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Confirm {
            title: title.into(),
            message: message.into(),
            selected_button: 0,
        }
    }

    pub fn choose(title: impl Into<String>, message: impl Into<String>, options: Vec<String>) -> Self {
        DialogKind::Choose {
            title: title.into(),
            message: message.into(),
            options,
            selected_index: 0,
        }
    }

    pub fn message(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Message {
            title: title.into(),
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Message {
            title: title.into(),
            message: message.into(),
            is_error: true,
        }
    }

    /// 키 처리 (다이얼로그가 닫히면 결과 반환)
    pub fn handle_key(&mut self, modifiers: KeyModifiers, code: KeyCode) -> Option<DialogResult> {
        match self {
            DialogKind::Input {
                input,
                selected_button,
                ..
            } => Self::handle_input_key(input, selected_button, modifiers, code),
            DialogKind::Confirm {
                selected_button, ..
            } => Self::handle_confirm_key(selected_button, modifiers, code),
            DialogKind::Choose {
                options,
                selected_index,
                ..
            } => Self::handle_choose_key(options.len(), selected_index, code),
            DialogKind::Message { .. } => match code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(DialogResult::Accepted),
                _ => None,
            },
        }
    }

    fn handle_input_key(
        input: &mut TextInput,
        selected_button: &mut usize,
        modifiers: KeyModifiers,
        code: KeyCode,
    ) -> Option<DialogResult> {
        match (modifiers, code) {
            (_, KeyCode::Enter) => {
                if *selected_button == 0 {
                    return Some(DialogResult::Text(input.value.clone()));
                }
                return Some(DialogResult::Cancelled);
            }
            (_, KeyCode::Esc) => return Some(DialogResult::Cancelled),
            (KeyModifiers::NONE, KeyCode::Tab) | (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                *selected_button = 1 - (*selected_button).min(1);
            }
            (KeyModifiers::CONTROL, KeyCode::Char('w')) => input.delete_prev_word(),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => input.insert_char(c),
            (_, KeyCode::Backspace) => input.backspace(),
            (_, KeyCode::Delete) => input.delete(),
            (_, KeyCode::Left) => input.left(),
            (_, KeyCode::Right) => input.right(),
            (_, KeyCode::Home) => input.home(),
            (_, KeyCode::End) => input.end(),
            _ => {}
        }
        None
    }

    fn handle_confirm_key(
        selected_button: &mut usize,
        modifiers: KeyModifiers,
        code: KeyCode,
    ) -> Option<DialogResult> {
        match (modifiers, code) {
            (KeyModifiers::NONE, KeyCode::Tab)
            | (KeyModifiers::SHIFT, KeyCode::BackTab)
            | (_, KeyCode::Left)
            | (_, KeyCode::Right) => {
                *selected_button = 1 - (*selected_button).min(1);
                None
            }
            (_, KeyCode::Char('y')) | (_, KeyCode::Char('Y')) => Some(DialogResult::Accepted),
            (_, KeyCode::Char('n')) | (_, KeyCode::Char('N')) | (_, KeyCode::Esc) => {
                Some(DialogResult::Cancelled)
            }
            (_, KeyCode::Enter) => {
                if *selected_button == 0 {
                    Some(DialogResult::Accepted)
                } else {
                    Some(DialogResult::Cancelled)
                }
            }
            _ => None,
        }
    }

    fn handle_choose_key(count: usize, selected_index: &mut usize, code: KeyCode) -> Option<DialogResult> {
        if count == 0 {
            return match code {
                KeyCode::Esc | KeyCode::Enter => Some(DialogResult::Cancelled),
                _ => None,
            };
        }
        match code {
            KeyCode::Up | KeyCode::Left | KeyCode::BackTab | KeyCode::Char('k') => {
                *selected_index = (*selected_index + count - 1) % count;
                None
            }
            KeyCode::Down | KeyCode::Right | KeyCode::Tab | KeyCode::Char('j') => {
                *selected_index = (*selected_index + 1) % count;
                None
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let n = c.to_digit(10).unwrap_or(0) as usize;
                if (1..=count).contains(&n) {
                    Some(DialogResult::Selected(n - 1))
                } else {
                    None
                }
            }
            KeyCode::Enter => Some(DialogResult::Selected((*selected_index).min(count - 1))),
            KeyCode::Esc => Some(DialogResult::Cancelled),
            _ => None,
        }
    }
}

/// 다이얼로그 위젯
pub struct Dialog<'a> {
    kind: &'a DialogKind,
    bg_color: Color,
    fg_color: Color,
    border_color: Color,
    title_color: Color,
    error_color: Color,
    button_bg: Color,
    button_fg: Color,
    button_selected_bg: Color,
    button_selected_fg: Color,
    input_bg: Color,
}

impl<'a> Dialog<'a> {
    pub fn new(kind: &'a DialogKind) -> Self {
        Self {
            kind,
            bg_color: Color::Rgb(45, 45, 48),
            fg_color: Color::Rgb(212, 212, 212),
            border_color: Color::Rgb(0, 120, 212),
            title_color: Color::Rgb(0, 120, 212),
            error_color: Color::Rgb(244, 71, 71),
            button_bg: Color::Rgb(60, 60, 60),
            button_fg: Color::Rgb(212, 212, 212),
            button_selected_bg: Color::Rgb(0, 120, 212),
            button_selected_fg: Color::White,
            input_bg: Color::Rgb(30, 30, 30),
        }
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.fg_color = theme.fg_primary;
        self.border_color = theme.panel_active_border;
        self.title_color = theme.accent;
        self.error_color = theme.error;
        self.button_bg = theme.panel_inactive_border;
        self.button_fg = theme.fg_primary;
        self.button_selected_bg = theme.file_selected_bg;
        self.button_selected_fg = theme.file_selected;
        self.input_bg = theme.bg_primary;
        self
    }

    /// 다이얼로그 영역 계산 (화면 중앙)
    fn calculate_area(&self, screen: Rect) -> Rect {
        let sw = screen.width;
        let sh = screen.height;

        let (width, height) = match self.kind {
            DialogKind::Input { .. } => (50u16.min(sw.saturating_sub(4)).max(30), 7u16),
            DialogKind::Confirm { .. } => (50u16.min(sw.saturating_sub(4)).max(30), 8u16),
            DialogKind::Choose { options, .. } => {
                let longest = options.iter().map(|o| o.width()).max().unwrap_or(0) as u16;
                let w = (longest + 12).clamp(40, 70).min(sw.saturating_sub(4));
                (w, 6 + options.len() as u16)
            }
            DialogKind::Message { message, .. } => {
                let lines = message.lines().count().max(1);
                let w = 50u16.min(sw.saturating_sub(4)).max(30);
                (w, 6 + lines as u16)
            }
        };

        let width = width.min(sw.saturating_sub(4));
        let height = height.min(sh.saturating_sub(2));

        Rect {
            x: screen.x + sw.saturating_sub(width) / 2,
            y: screen.y + sh.saturating_sub(height) / 2,
            width,
            height,
        }
    }

    fn frame(&self, buf: &mut Buffer, area: Rect, title: &str, accent: Color) -> Rect {
        Block::default()
            .title(format!(" {} ", title))
            .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(self.bg_color))
            .render(area, buf);

        Rect {
            x: area.x + DIALOG_H_PADDING,
            y: area.y + DIALOG_V_PADDING,
            width: area.width.saturating_sub(DIALOG_H_PADDING * 2),
            height: area.height.saturating_sub(DIALOG_V_PADDING * 2),
        }
    }

    /// 버튼 렌더링 헬퍼
    fn render_button(&self, buf: &mut Buffer, x: u16, y: u16, label: &str, is_selected: bool) -> u16 {
        let (bg, fg) = if is_selected {
            (self.button_selected_bg, self.button_selected_fg)
        } else {
            (self.button_bg, self.button_fg)
        };
        let padded_label = format!(" {} ", label);
        let width = padded_label.width() as u16;
        buf.set_string(x, y, &padded_label, Style::default().fg(fg).bg(bg));
        width
    }

    fn render_button_pair(&self, buf: &mut Buffer, area: Rect, labels: [&str; 2], selected: usize) {
        let y = area.y + area.height.saturating_sub(2);
        let total = labels.iter().map(|l| l.width() as u16 + 2).sum::<u16>() + 2;
        let x = area.x + area.width.saturating_sub(total) / 2;
        let first = self.render_button(buf, x, y, labels[0], selected == 0);
        self.render_button(buf, x + first + 2, y, labels[1], selected == 1);
    }

    fn render_input(&self, buf: &mut Buffer, area: Rect, title: &str, prompt: &str, input: &TextInput, selected_button: usize) {
        let inner = self.frame(buf, area, title, self.title_color);
        buf.set_string(inner.x, inner.y, prompt, Style::default().fg(self.fg_color));

        // 입력 필드 배경
        let input_y = inner.y + 1;
        for x in inner.x..inner.x + inner.width {
            if let Some(cell) = buf.cell_mut((x, input_y)) {
                cell.set_bg(self.input_bg);
            }
        }

        // 커서가 보이도록 앞부분을 잘라서 표시
        let max_display = (inner.width as usize).saturating_sub(2);
        let cursor_col: usize = input.value[..input.cursor]
            .chars()
            .map(|c| c.width().unwrap_or(0))
            .sum();
        let mut start_byte = 0;
        let mut skipped = 0;
        if cursor_col >= max_display {
            let target = cursor_col + 1 - max_display;
            for (i, c) in input.value.char_indices() {
                if skipped >= target {
                    start_byte = i;
                    break;
                }
                skipped += c.width().unwrap_or(0);
                start_byte = i + c.len_utf8();
            }
        }
        let visible = &input.value[start_byte..];
        buf.set_stringn(
            inner.x + 1,
            input_y,
            visible,
            max_display,
            Style::default().fg(self.fg_color).bg(self.input_bg),
        );

        let cursor_x = inner.x + 1 + (cursor_col - skipped) as u16;
        if cursor_x < inner.x + inner.width {
            if let Some(cell) = buf.cell_mut((cursor_x, input_y)) {
                if input.cursor < input.value.len() {
                    cell.set_style(Style::default().fg(self.input_bg).bg(self.fg_color));
                } else {
                    cell.set_char('▏');
                    cell.set_style(Style::default().fg(self.fg_color).bg(self.input_bg));
                }
            }
        }

        self.render_button_pair(buf, area, ["OK", "Cancel"], selected_button);
    }

    fn render_confirm(&self, buf: &mut Buffer, area: Rect, title: &str, message: &str, selected_button: usize) {
        let inner = self.frame(buf, area, title, self.title_color);
        Paragraph::new(message)
            .style(Style::default().fg(self.fg_color))
            .wrap(Wrap { trim: true })
            .render(
                Rect {
                    height: inner.height.saturating_sub(2),
                    ..inner
                },
                buf,
            );
        self.render_button_pair(buf, area, ["Yes", "No"], selected_button);
    }

    fn render_choose(&self, buf: &mut Buffer, area: Rect, title: &str, message: &str, options: &[String], selected_index: usize) {
        let inner = self.frame(buf, area, title, self.title_color);
        buf.set_string(inner.x, inner.y, message, Style::default().fg(self.fg_color));

        for (i, option) in options.iter().enumerate() {
            let y = inner.y + 2 + i as u16;
            if y >= area.y + area.height.saturating_sub(1) {
                break;
            }
            let style = if i == selected_index {
                Style::default()
                    .fg(self.button_selected_fg)
                    .bg(self.button_selected_bg)
            } else {
                Style::default().fg(self.fg_color)
            };
            let line = format!(" {}. {}", i + 1, option);
            buf.set_stringn(inner.x, y, &line, inner.width as usize, style);
        }
    }

    fn render_message(&self, buf: &mut Buffer, area: Rect, title: &str, message: &str, is_error: bool) {
        let accent = if is_error {
            self.error_color
        } else {
            self.title_color
        };
        let inner = self.frame(buf, area, title, accent);
        Paragraph::new(message)
            .style(Style::default().fg(self.fg_color))
            .wrap(Wrap { trim: true })
            .render(
                Rect {
                    height: inner.height.saturating_sub(2),
                    ..inner
                },
                buf,
            );

        let button_y = area.y + area.height.saturating_sub(2);
        let button_x = area.x + area.width.saturating_sub(6) / 2;
        self.render_button(buf, button_x, button_y, "OK", true);
    }
}

impl Widget for Dialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_area = self.calculate_area(area);
        Clear.render(dialog_area, buf);

        match self.kind {
            DialogKind::Input {
                title,
                prompt,
                input,
                selected_button,
            } => self.render_input(buf, dialog_area, title, prompt, input, *selected_button),
            DialogKind::Confirm {
                title,
                message,
                selected_button,
            } => self.render_confirm(buf, dialog_area, title, message, *selected_button),
            DialogKind::Choose {
                title,
                message,
                options,
                selected_index,
            } => self.render_choose(buf, dialog_area, title, message, options, *selected_index),
            DialogKind::Message {
                title,
                message,
                is_error,
            } => self.render_message(buf, dialog_area, title, message, *is_error),
        }
    }
}
