//! 목록 렌더러 경계
//!
//! 컨트롤러는 패널 스냅샷을 `PaneView`로 넘길 뿐이고, 아이콘/레이블/스타일은
//! 렌더러가 결정한다.

use crate::models::{DirectoryEntry, PaneId, PaneState};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// 렌더러에 넘기는 패널 스냅샷 (읽기 전용)
#[derive(Debug, Clone, Copy)]
pub struct PaneView<'a> {
    pub id: PaneId,
    pub path: &'a Path,
    pub entries: &'a [DirectoryEntry],
    pub cursor: usize,
    /// 커서 행이 선택에서 빠져 있으면 강조하지 않는다
    pub cursor_released: bool,
    pub scroll_offset: usize,
    pub selected: &'a BTreeSet<PathBuf>,
    /// 포커스된 패널인지
    pub focused: bool,
}

impl<'a> PaneView<'a> {
    pub fn of(id: PaneId, pane: &'a PaneState, focused: bool) -> Self {
        Self {
            id,
            path: pane.current_path(),
            entries: pane.entries(),
            cursor: pane.cursor,
            cursor_released: pane.is_cursor_released(),
            scroll_offset: pane.scroll_offset,
            selected: pane.selected(),
            focused,
        }
    }
}

/// 디렉토리 목록 렌더러
pub trait ListingRenderer {
    fn render_listing(&mut self, view: &PaneView<'_>);
}

/// 렌더링 호출을 기록하는 테스트용 렌더러
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<RenderedPane>,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPane {
    pub id: PaneId,
    pub path: PathBuf,
    pub names: Vec<String>,
    pub focused: bool,
}

#[cfg(test)]
impl ListingRenderer for RecordingRenderer {
    fn render_listing(&mut self, view: &PaneView<'_>) {
        self.frames.push(RenderedPane {
            id: view.id,
            path: view.path.to_path_buf(),
            names: view.entries.iter().map(|e| e.name.clone()).collect(),
            focused: view.focused,
        });
    }
}
