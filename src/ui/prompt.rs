//! 터미널 모달 프롬프트
//!
//! 프롬프트가 떠 있는 동안 메인 루프는 멈춰 있으므로, 마지막으로 그린 화면을
//! 배경으로 고정해 두고 그 위에 다이얼로그만 다시 그린다. 작업 결과를 알리기 전에는
//! 패널 목록을 배경 위에 다시 그려 받는다.

use crate::core::{ListingRenderer, MessageLevel, PaneView, PromptService};
use crate::ui::components::{Dialog, DialogKind, DialogResult, Panel};
use crate::ui::{LayoutManager, Theme};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::Backend, buffer::Buffer, widgets::Widget, Terminal};
use std::io;
use tracing::warn;

const CONFIRM_TITLE: &str = "Confirmation";
const INFO_TITLE: &str = "Message";
const ERROR_TITLE: &str = "Error";

/// 이벤트 공급원 (기본은 crossterm `event::read`)
pub type ReadEvent = fn() -> io::Result<Event>;

/// `PromptService` 터미널 구현
pub struct TerminalPrompt<'t, B: Backend, E = ReadEvent> {
    terminal: &'t mut Terminal<B>,
    backdrop: Buffer,
    /// 배경 버퍼 크기 기준 레이아웃
    layout: LayoutManager,
    theme: Theme,
    next_event: E,
}

impl<'t, B: Backend> TerminalPrompt<'t, B> {
    pub fn new(terminal: &'t mut Terminal<B>, backdrop: Buffer, theme: Theme) -> Self {
        Self::with_events(terminal, backdrop, theme, event::read)
    }
}

impl<'t, B, E> TerminalPrompt<'t, B, E>
where
    B: Backend,
    E: FnMut() -> io::Result<Event>,
{
    pub fn with_events(terminal: &'t mut Terminal<B>, backdrop: Buffer, theme: Theme, next_event: E) -> Self {
        let mut layout = LayoutManager::new();
        layout.update(backdrop.area);
        Self {
            terminal,
            backdrop,
            layout,
            theme,
            next_event,
        }
    }

    /// 다이얼로그가 닫힐 때까지 블로킹 (입출력 오류는 취소로 처리)
    fn run(&mut self, mut dialog: DialogKind) -> DialogResult {
        loop {
            if let Err(e) = self.draw(&dialog) {
                warn!(error = %e, "failed to draw prompt");
                return DialogResult::Cancelled;
            }

            match (self.next_event)() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if let Some(result) = dialog.handle_key(key.modifiers, key.code) {
                        return result;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "failed to read prompt input");
                    return DialogResult::Cancelled;
                }
            }
        }
    }

    fn draw(&mut self, dialog: &DialogKind) -> io::Result<()> {
        let backdrop = &self.backdrop;
        let theme = &self.theme;
        self.terminal.draw(|f| {
            let area = f.area();
            let buf = f.buffer_mut();
            for y in area.top()..area.bottom() {
                for x in area.left()..area.right() {
                    if let (Some(src), Some(dst)) = (backdrop.cell((x, y)), buf.cell_mut((x, y))) {
                        *dst = src.clone();
                    }
                }
            }
            f.render_widget(Dialog::new(dialog).theme(theme), area);
        })?;
        Ok(())
    }
}

impl<B: Backend, E> ListingRenderer for TerminalPrompt<'_, B, E> {
    fn render_listing(&mut self, view: &PaneView<'_>) {
        let area = self.layout.panel_area(view.id).intersection(self.backdrop.area);
        if area.width == 0 || area.height == 0 {
            return;
        }
        Panel::from_view(view)
            .theme(&self.theme)
            .render(area, &mut self.backdrop);
    }
}

impl<B, E> PromptService for TerminalPrompt<'_, B, E>
where
    B: Backend,
    E: FnMut() -> io::Result<Event>,
{
    fn confirm(&mut self, message: &str) -> bool {
        self.run(DialogKind::confirm(CONFIRM_TITLE, message)) == DialogResult::Accepted
    }

    fn prompt_text(&mut self, message: &str, title: &str) -> Option<String> {
        match self.run(DialogKind::input(title, message)) {
            DialogResult::Text(text) => Some(text),
            _ => None,
        }
    }

    fn choose(&mut self, message: &str, title: &str, options: &[String]) -> Option<usize> {
        match self.run(DialogKind::choose(title, message, options.to_vec())) {
            DialogResult::Selected(index) => Some(index),
            _ => None,
        }
    }

    fn show_message(&mut self, level: MessageLevel, message: &str) {
        let dialog = match level {
            MessageLevel::Info => DialogKind::message(INFO_TITLE, message),
            MessageLevel::Error => DialogKind::error(ERROR_TITLE, message),
        };
        self.run(dialog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use crate::models::{DirectoryEntry, PaneId};
    use ratatui::layout::Rect;
    use std::collections::{BTreeSet, VecDeque};
    use std::path::{Path, PathBuf};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn scripted(events: Vec<Event>) -> impl FnMut() -> io::Result<Event> {
        let mut queue: VecDeque<Event> = events.into();
        move || {
            queue
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more events"))
        }
    }

    fn backdrop_with(text: &str) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, 60, 20));
        buf.set_string(0, 0, text, ratatui::style::Style::default());
        buf
    }

    #[test]
    fn test_confirm_accept_and_decline() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        {
            let events = scripted(vec![key(KeyCode::Enter)]);
            let mut prompt = TerminalPrompt::with_events(&mut terminal, backdrop_with(""), Theme::default(), events);
            assert!(prompt.confirm("Delete?"));
        }

        let events = scripted(vec![key(KeyCode::Tab), key(KeyCode::Enter)]);
        let mut prompt = TerminalPrompt::with_events(&mut terminal, backdrop_with(""), Theme::default(), events);
        assert!(!prompt.confirm("Delete?"));
    }

    #[test]
    fn test_prompt_text_collects_typed_chars() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let events = scripted(vec![
            key(KeyCode::Char('d')),
            key(KeyCode::Char('o')),
            key(KeyCode::Char('c')),
            key(KeyCode::Enter),
        ]);
        let mut prompt = TerminalPrompt::with_events(&mut terminal, backdrop_with(""), Theme::default(), events);
        assert_eq!(prompt.prompt_text("Name:", "New Folder"), Some("doc".to_string()));
    }

    #[test]
    fn test_choose_and_cancel() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let options = vec!["/a".to_string(), "/b".to_string()];

        {
            let events = scripted(vec![key(KeyCode::Down), key(KeyCode::Enter)]);
            let mut prompt = TerminalPrompt::with_events(&mut terminal, backdrop_with(""), Theme::default(), events);
            assert_eq!(prompt.choose("Select one:", "Choose", &options), Some(1));
        }

        let events = scripted(vec![key(KeyCode::Esc)]);
        let mut prompt = TerminalPrompt::with_events(&mut terminal, backdrop_with(""), Theme::default(), events);
        assert_eq!(prompt.choose("Select one:", "Choose", &options), None);
    }

    #[test]
    fn test_input_failure_counts_as_cancel() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut prompt = TerminalPrompt::with_events(&mut terminal, backdrop_with(""), Theme::default(), scripted(vec![]));
        assert!(!prompt.confirm("Delete?"));
        assert_eq!(prompt.prompt_text("Name:", "New Folder"), None);
    }

    #[test]
    fn test_backdrop_kept_behind_dialog() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let events = scripted(vec![key(KeyCode::Enter)]);
        let mut prompt = TerminalPrompt::with_events(
            &mut terminal,
            backdrop_with("backdrop"),
            Theme::default(),
            events,
        );
        prompt.show_message(MessageLevel::Info, "File/folder deleted successfully!");
        drop(prompt);

        let buf = terminal.backend().buffer();
        let top: String = (0..8)
            .filter_map(|x| buf.cell((x, 0)).map(|c| c.symbol().to_string()))
            .collect();
        assert_eq!(top, "backdrop");

        let all: String = (0..20u16)
            .flat_map(|y| (0..60u16).map(move |x| (x, y)))
            .filter_map(|pos| buf.cell(pos).map(|c| c.symbol().to_string()))
            .collect();
        assert!(all.contains("Message"));
    }

    #[test]
    fn test_listing_redrawn_into_backdrop_before_message() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let entries = vec![
            DirectoryEntry::parent_link(Path::new("/work")),
            DirectoryEntry::from_path(PathBuf::from("/work/fresh.txt"), false),
        ];
        let selected = BTreeSet::new();
        let view = PaneView {
            id: PaneId::Left,
            path: Path::new("/work"),
            entries: &entries,
            cursor: 0,
            cursor_released: false,
            scroll_offset: 0,
            selected: &selected,
            focused: true,
        };

        let events = scripted(vec![key(KeyCode::Enter)]);
        let mut prompt = TerminalPrompt::with_events(
            &mut terminal,
            backdrop_with("stale.txt"),
            Theme::default(),
            events,
        );
        prompt.render_listing(&view);
        prompt.show_message(MessageLevel::Info, "File/folder deleted successfully!");
        drop(prompt);

        let buf = terminal.backend().buffer();
        let top: String = (0..3u16)
            .flat_map(|y| (0..30u16).map(move |x| (x, y)))
            .filter_map(|pos| buf.cell(pos).map(|c| c.symbol().to_string()))
            .collect();
        assert!(top.contains("fresh.txt"));
        assert!(!top.contains("stale.txt"));
    }
}
