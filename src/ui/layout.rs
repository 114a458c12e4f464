// Layout system - 레이아웃 시스템
//
// 터미널 크기에 따른 레이아웃 모드:
// - 최소 크기 이상: 듀얼 패널 모드
// - 그보다 작으면: 경고 메시지 표시

use crate::models::PaneId;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// 최소 터미널 크기 상수
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 10;

/// 레이아웃 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    DualPanel,
    /// 터미널이 너무 작음
    TooSmall,
}

/// 레이아웃 영역
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutAreas {
    pub left_panel: Rect,
    pub right_panel: Rect,
    pub status_bar: Rect,
    pub command_bar: Rect,
    /// 경고 메시지 영역 (TooSmall 모드에서 사용)
    pub warning: Rect,
}

/// 레이아웃 매니저
#[derive(Debug)]
pub struct LayoutManager {
    mode: LayoutMode,
    terminal_size: (u16, u16),
    areas: LayoutAreas,
}

impl Default for LayoutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutManager {
    pub fn new() -> Self {
        Self {
            mode: LayoutMode::DualPanel,
            terminal_size: (80, 24),
            areas: LayoutAreas::default(),
        }
    }

    /// 터미널 크기에 따라 레이아웃 모드 결정
    fn determine_mode(width: u16, height: u16) -> LayoutMode {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            LayoutMode::TooSmall
        } else {
            LayoutMode::DualPanel
        }
    }

    /// 터미널 크기 업데이트 및 레이아웃 재계산
    pub fn update(&mut self, area: Rect) {
        self.terminal_size = (area.width, area.height);
        self.mode = Self::determine_mode(area.width, area.height);
        self.areas = match self.mode {
            LayoutMode::TooSmall => LayoutAreas {
                warning: area,
                ..Default::default()
            },
            LayoutMode::DualPanel => Self::calculate_dual_panel_areas(area),
        };
    }

    /// 듀얼 패널 레이아웃 계산
    fn calculate_dual_panel_areas(area: Rect) -> LayoutAreas {
        // 패널 | 상태바 | 커맨드바
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let panel_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(vertical_chunks[0]);

        LayoutAreas {
            left_panel: panel_chunks[0],
            right_panel: panel_chunks[1],
            status_bar: vertical_chunks[1],
            command_bar: vertical_chunks[2],
            warning: Rect::default(),
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn areas(&self) -> &LayoutAreas {
        &self.areas
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    pub fn panel_area(&self, pane: PaneId) -> Rect {
        match pane {
            PaneId::Left => self.areas.left_panel,
            PaneId::Right => self.areas.right_panel,
        }
    }

    /// 패널 안쪽(테두리 제외) 목록 높이
    pub fn visible_rows(&self, pane: PaneId) -> usize {
        self.panel_area(pane).height.saturating_sub(2) as usize
    }

    /// 화면 좌표가 속한 패널
    pub fn pane_at(&self, column: u16, row: u16) -> Option<PaneId> {
        if self.mode == LayoutMode::TooSmall {
            return None;
        }
        [PaneId::Left, PaneId::Right]
            .into_iter()
            .find(|&id| contains(self.panel_area(id), column, row))
    }

    /// 화면 좌표가 가리키는 목록 인덱스 (테두리/빈 줄이면 None)
    pub fn row_at(&self, pane: PaneId, column: u16, row: u16, scroll_offset: usize) -> Option<usize> {
        let area = self.panel_area(pane);
        if !contains(area, column, row) {
            return None;
        }
        let inner_top = area.y + 1;
        let inner_bottom = area.y + area.height.saturating_sub(1);
        if row < inner_top || row >= inner_bottom {
            return None;
        }
        Some(scroll_offset + (row - inner_top) as usize)
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
