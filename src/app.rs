//! 애플리케이션 상태
//!
//! 키/마우스 입력을 액션으로 바꿔 컨트롤러와 전송 코디네이터에 넘기고,
//! 매 프레임 두 패널과 하단 바를 그린다.

use crate::core::actions::{Action, Keymap};
use crate::core::commands;
use crate::core::{DualPaneController, PromptService, TransferAction, TransferCoordinator};
use crate::models::{PaneId, PaneState};
use crate::system::{FileSystem, FilesystemGateway};
use crate::ui::{
    CommandBar, CommandItem, FrameRenderer, LayoutManager, LayoutMode, StatusBar, Theme,
    WarningScreen,
};
use ratatui::Frame;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

mod mouse;
mod navigation;
mod operations;

/// 마지막 클릭 (더블클릭 판정용)
#[derive(Debug, Clone, Copy)]
struct ClickInfo {
    pane: PaneId,
    row: usize,
    at: Instant,
}

pub struct App<G: FilesystemGateway = FileSystem> {
    controller: DualPaneController<G>,
    transfers: TransferCoordinator,
    keymap: Keymap,
    command_items: Vec<CommandItem>,
    pub layout: LayoutManager,
    theme: Theme,
    active: PaneId,
    last_click: Option<ClickInfo>,
    /// 왼쪽 버튼을 누른 패널 (첫 Drag 이벤트에서 전송 시작)
    press_origin: Option<PaneId>,
    should_quit: bool,
}

impl<G: FilesystemGateway> App<G> {
    pub fn new(gateway: G, left_root: PathBuf, right_root: PathBuf, keymap: Keymap) -> Self {
        info!(
            left = %left_root.display(),
            right = %right_root.display(),
            "starting"
        );
        let controller = DualPaneController::new(gateway, left_root, right_root);
        let command_items = keymap.command_bar_items();

        Self {
            controller,
            transfers: TransferCoordinator::new(),
            keymap,
            command_items,
            layout: LayoutManager::new(),
            theme: Theme::default(),
            active: PaneId::default(),
            last_click: None,
            press_origin: None,
            should_quit: false,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// 포커스 패널
    #[cfg(test)]
    pub fn active_panel(&self) -> PaneId {
        self.active
    }

    #[cfg(test)]
    pub fn controller(&self) -> &DualPaneController<G> {
        &self.controller
    }

    pub fn active_pane(&self) -> &PaneState {
        self.controller.pane(self.active)
    }

    fn active_pane_mut(&mut self) -> &mut PaneState {
        self.controller.pane_mut(self.active)
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// 진행 중인 전송 설명 (예: "Move notes.txt")
    pub fn pending_transfer_label(&self) -> Option<String> {
        self.transfers
            .pending()
            .map(|request| format!("{} {}", request.action.label(), request.entry.name))
    }

    /// 화면 그리기
    pub fn draw(&mut self, f: &mut Frame<'_>) {
        let area = f.area();
        self.layout.update(area);

        if self.layout.mode() == LayoutMode::TooSmall {
            let (width, height) = self.layout.terminal_size();
            let warning = WarningScreen::new()
                .current_size(width, height)
                .theme(&self.theme);
            f.render_widget(warning, area);
            return;
        }

        for id in [PaneId::Left, PaneId::Right] {
            let rows = self.layout.visible_rows(id);
            self.controller.pane_mut(id).ensure_visible(rows);
        }

        {
            let mut renderer = FrameRenderer::new(f, &self.layout, &self.theme);
            self.controller.render(self.active, &mut renderer);
        }

        let areas = *self.layout.areas();
        let pane = self.controller.pane(self.active);
        let path = pane.current_path().display().to_string();
        let transfer = self.pending_transfer_label();
        let status_bar = StatusBar::new()
            .path(&path)
            .file_count(pane.file_count())
            .dir_count(pane.dir_count())
            .marked_count(pane.selected().len())
            .transfer(transfer.as_deref())
            .pane_label(self.active.label())
            .theme(&self.theme);
        f.render_widget(status_bar, areas.status_bar);

        let command_bar = CommandBar::new(&self.command_items).theme(&self.theme);
        f.render_widget(command_bar, areas.command_bar);
    }
}
