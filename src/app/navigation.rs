use super::*;
use crossterm::event::{KeyCode, KeyModifiers};

impl<G: FilesystemGateway> App<G> {
    /// 키 입력 처리 (키맵에 없는 키는 무시)
    pub fn handle_key(
        &mut self,
        modifiers: KeyModifiers,
        code: KeyCode,
        prompt: &mut dyn PromptService,
    ) {
        if let Some(action) = self.keymap.find_action(modifiers, code) {
            self.execute_action(action, prompt);
        }
    }

    /// 액션 실행
    pub fn execute_action(&mut self, action: Action, prompt: &mut dyn PromptService) {
        debug!(?action, pane = self.active.label(), "execute action");
        match action {
            Action::Quit => self.quit(),
            Action::TogglePanel => self.toggle_panel(),
            Action::MoveUp => self.active_pane_mut().move_cursor_up(),
            Action::MoveDown => self.active_pane_mut().move_cursor_down(),
            Action::GoToTop => self.active_pane_mut().cursor_to_top(),
            Action::GoToBottom => self.active_pane_mut().cursor_to_bottom(),
            Action::PageUp => {
                let page = self.page_size();
                self.active_pane_mut().page_up(page);
            }
            Action::PageDown => {
                let page = self.page_size();
                self.active_pane_mut().page_down(page);
            }
            Action::EnterSelected => self.enter_selected(),
            Action::GoToParent => self.go_to_parent(),
            Action::Refresh => self.controller.refresh_all(),
            Action::ToggleSelection => self.active_pane_mut().toggle_selection(),
            Action::Copy => self.start_transfer(TransferAction::Copy, prompt),
            Action::Move => self.start_transfer(TransferAction::Move, prompt),
            Action::Delete => self.start_delete(prompt),
            Action::MakeDirectory => self.start_mkdir(prompt),
        }
    }

    /// 포커스 패널 전환
    pub fn toggle_panel(&mut self) {
        self.active.toggle();
    }

    /// 커서 항목 열기 (디렉토리 진입 / ".."이면 상위로)
    pub fn enter_selected(&mut self) {
        let cursor = self.active_pane().cursor;
        self.controller.request_open(self.active, cursor);
    }

    pub fn go_to_parent(&mut self) {
        self.controller.request_navigate_up(self.active);
    }

    fn page_size(&self) -> usize {
        self.layout.visible_rows(self.active).max(1)
    }
}
