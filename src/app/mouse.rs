use super::*;
use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use std::time::Duration;

const DOUBLE_CLICK_MS: u64 = 400;

impl<G: FilesystemGateway> App<G> {
    /// 마우스 입력 처리
    ///
    /// 누르면 해당 행에 포커스, 누른 채 끌면 전송 시작 (Ctrl이면 복사, 아니면 이동),
    /// 반대편 패널 위에서 놓으면 전송 완료, 그 밖에서 놓으면 취소.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, prompt: &mut dyn PromptService) {
        self.handle_mouse_at(mouse, Instant::now(), prompt);
    }

    pub(crate) fn handle_mouse_at(
        &mut self,
        mouse: MouseEvent,
        now: Instant,
        prompt: &mut dyn PromptService,
    ) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.press(mouse.column, mouse.row, now),
            MouseEventKind::Drag(MouseButton::Left) => self.drag(mouse.modifiers),
            MouseEventKind::Up(MouseButton::Left) => self.release(mouse.column, mouse.row, prompt),
            MouseEventKind::ScrollUp => self.scroll(mouse.column, mouse.row, true),
            MouseEventKind::ScrollDown => self.scroll(mouse.column, mouse.row, false),
            _ => {}
        }
    }

    fn press(&mut self, column: u16, row: u16, now: Instant) {
        let Some(pane) = self.layout.pane_at(column, row) else {
            return;
        };
        self.active = pane;
        self.press_origin = Some(pane);

        let offset = self.controller.pane(pane).scroll_offset;
        let Some(index) = self.layout.row_at(pane, column, row, offset) else {
            return;
        };
        if !self.controller.pane_mut(pane).set_cursor(index) {
            self.last_click = None;
            return;
        }

        let double_clicked = self.last_click.is_some_and(|last| {
            last.pane == pane
                && last.row == index
                && now.duration_since(last.at) <= Duration::from_millis(DOUBLE_CLICK_MS)
        });

        if double_clicked {
            self.last_click = None;
            self.press_origin = None;
            self.controller.request_open(pane, index);
        } else {
            self.last_click = Some(ClickInfo {
                pane,
                row: index,
                at: now,
            });
        }
    }

    fn drag(&mut self, modifiers: KeyModifiers) {
        if self.transfers.pending().is_some() {
            return;
        }
        let Some(source) = self.press_origin.take() else {
            return;
        };
        let action = if modifiers.contains(KeyModifiers::CONTROL) {
            TransferAction::Copy
        } else {
            TransferAction::Move
        };
        self.transfers.begin(&self.controller, source, action);
    }

    fn release(&mut self, column: u16, row: u16, prompt: &mut dyn PromptService) {
        self.press_origin = None;
        if self.transfers.pending().is_none() {
            return;
        }

        match self.layout.pane_at(column, row) {
            Some(target) => {
                commands::drop_transfer(&mut self.controller, &mut self.transfers, target, prompt);
            }
            None => {
                self.transfers.cancel();
                debug!("dropped outside the panes, cancelled");
            }
        }
    }

    fn scroll(&mut self, column: u16, row: u16, up: bool) {
        let target = self.layout.pane_at(column, row).unwrap_or(self.active);
        let pane = self.controller.pane_mut(target);
        if up {
            pane.move_cursor_up();
        } else {
            pane.move_cursor_down();
        }
    }
}
