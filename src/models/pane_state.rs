use crate::models::directory_entry::DirectoryEntry;
use crate::system::FilesystemGateway;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 패널 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaneId {
    #[default]
    Left,
    Right,
}

impl PaneId {
    /// 반대편 패널
    pub fn other(self) -> Self {
        match self {
            PaneId::Left => PaneId::Right,
            PaneId::Right => PaneId::Left,
        }
    }

    /// 패널 전환
    pub fn toggle(&mut self) {
        *self = self.other();
    }

    pub fn label(self) -> &'static str {
        match self {
            PaneId::Left => "Left",
            PaneId::Right => "Right",
        }
    }
}

/// 패널 상태
///
/// 현재 디렉토리와 마지막으로 읽은 목록, 그리고 그 목록 위의 커서/선택 상태를 가진다.
/// 현재 디렉토리는 `navigate_to` / `navigate_up`으로만 바뀐다.
#[derive(Debug, Clone)]
pub struct PaneState {
    /// 현재 경로 (절대 경로)
    current_path: PathBuf,
    /// 마지막 새로고침 시점의 목록 (맨 앞은 항상 ".." 항목)
    entries: Vec<DirectoryEntry>,
    /// 커서 위치 (".." 포함 인덱스)
    pub cursor: usize,
    /// 스크롤 오프셋
    pub scroll_offset: usize,
    /// 다중 선택 (경로 기준이라 새로고침 후에도 유지됨)
    selected: BTreeSet<PathBuf>,
    /// 다음 새로고침 때 커서를 옮길 항목 이름
    pending_focus: Option<String>,
    /// 커서가 가리켜도 선택으로 보지 않는 항목 (커서가 움직이면 해제)
    released: Option<PathBuf>,
}

impl PaneState {
    /// 새 패널 상태 생성 (목록은 비어 있음, `refresh` 필요)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            current_path: make_absolute(path.into()),
            entries: Vec::new(),
            cursor: 0,
            scroll_offset: 0,
            selected: BTreeSet::new(),
            pending_focus: None,
            released: None,
        }
    }

    /// 현재 디렉토리
    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    /// 마지막 새로고침 시점의 목록
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// 현재 디렉토리 목록 생성
    ///
    /// 첫 항목은 항상 ".."이고 나머지는 OS가 돌려준 순서 그대로다.
    /// 디렉토리를 읽지 못하면 ".."만 돌려준다.
    pub fn listing<G: FilesystemGateway + ?Sized>(&self, filesystem: &G) -> Vec<DirectoryEntry> {
        let mut listing = vec![DirectoryEntry::parent_link(&self.current_path)];
        match filesystem.read_directory(&self.current_path) {
            Ok(children) => listing.extend(children),
            Err(e) => {
                debug!(path = %self.current_path.display(), error = %e, "listing failed, showing parent link only");
            }
        }
        listing
    }

    /// 목록 새로고침
    pub fn refresh<G: FilesystemGateway + ?Sized>(&mut self, filesystem: &G) {
        self.entries = self.listing(filesystem);

        // 사라진 항목의 선택 해제
        let listed: BTreeSet<&PathBuf> = self.entries.iter().map(|e| &e.path).collect();
        self.selected.retain(|path| listed.contains(path));

        if let Some(name) = self.pending_focus.take() {
            if let Some(index) = self
                .entries
                .iter()
                .position(|e| !e.is_parent_link() && e.name == name)
            {
                self.cursor = index;
            }
        }

        // 커서가 범위를 벗어나면 조정
        if self.cursor >= self.entries.len() {
            self.cursor = self.entries.len().saturating_sub(1);
        }
    }

    /// 디렉토리 이동
    ///
    /// 존재 여부나 디렉토리 여부는 확인하지 않는다. 파일 경로로 이동하면 목록에는
    /// ".."만 남는다.
    pub fn navigate_to(&mut self, path: impl Into<PathBuf>) {
        self.current_path = make_absolute(path.into());
        self.reset_view();
    }

    /// 상위 디렉토리로 이동
    ///
    /// 부모가 없거나 존재하지 않으면 아무것도 하지 않고 false를 반환한다.
    pub fn navigate_up<G: FilesystemGateway + ?Sized>(&mut self, filesystem: &G) -> bool {
        let Some(parent) = self.current_path.parent() else {
            return false;
        };
        if !filesystem.exists(parent) {
            return false;
        }

        let parent = parent.to_path_buf();
        let left_name = self
            .current_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string());
        self.current_path = parent;
        self.reset_view();
        self.pending_focus = left_name;
        true
    }

    fn reset_view(&mut self) {
        self.cursor = 0;
        self.scroll_offset = 0;
        self.selected.clear();
        self.pending_focus = None;
        self.released = None;
    }

    /// 커서 위치의 항목
    pub fn focused_entry(&self) -> Option<&DirectoryEntry> {
        self.entries.get(self.cursor)
    }

    /// 선택된 경로 집합
    pub fn selected(&self) -> &BTreeSet<PathBuf> {
        &self.selected
    }

    /// 선택된 항목의 목록 인덱스 (목록 순서)
    pub fn selection_indices(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| self.selected.contains(&e.path))
            .map(|(i, _)| i)
            .collect()
    }

    /// 첫 번째 선택 인덱스
    ///
    /// 다중 선택이 없으면 커서 위치가 선택된 것으로 본다.
    /// 단, `release` 이후 커서가 움직이기 전까지는 커서도 선택이 아니다.
    pub fn first_selected_index(&self) -> Option<usize> {
        self.selection_indices().first().copied().or_else(|| {
            if self.entries.is_empty() || self.is_cursor_released() {
                None
            } else {
                Some(self.cursor)
            }
        })
    }

    /// 커서 행이 선택에서 빠진 상태인지
    pub fn is_cursor_released(&self) -> bool {
        match (&self.released, self.focused_entry()) {
            (Some(path), Some(entry)) => entry.path == *path,
            _ => false,
        }
    }

    /// 첫 번째 선택 항목
    pub fn first_selected_entry(&self) -> Option<&DirectoryEntry> {
        self.first_selected_index()
            .and_then(|index| self.entries.get(index))
    }

    /// 커서 항목 선택 토글 후 아래로 이동
    pub fn toggle_selection(&mut self) {
        let Some(entry) = self.focused_entry() else {
            return;
        };
        if entry.is_parent_link() {
            return;
        }
        let path = entry.path.clone();
        if !self.selected.remove(&path) {
            self.selected.insert(path);
        }
        self.move_cursor_down();
    }

    /// 항목을 선택에서 완전히 빼기
    ///
    /// 마킹을 지우고, 커서가 그 항목 위에 있으면 커서의 암묵적 선택도 푼다.
    /// 목록에서는 사라지지 않는다.
    pub fn release(&mut self, path: &Path) {
        self.selected.remove(path);
        if self.focused_entry().is_some_and(|e| e.path.as_path() == path) {
            self.released = Some(path.to_path_buf());
        }
    }

    /// 특정 행으로 커서 이동 (범위 밖이면 무시)
    pub fn set_cursor(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.place_cursor(index);
            true
        } else {
            false
        }
    }

    fn place_cursor(&mut self, index: usize) {
        self.cursor = index;
        self.released = None;
    }

    pub fn move_cursor_up(&mut self) {
        self.place_cursor(self.cursor.saturating_sub(1));
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor + 1 < self.entries.len() {
            self.place_cursor(self.cursor + 1);
        } else {
            self.released = None;
        }
    }

    pub fn cursor_to_top(&mut self) {
        self.place_cursor(0);
    }

    pub fn cursor_to_bottom(&mut self) {
        self.place_cursor(self.entries.len().saturating_sub(1));
    }

    pub fn page_up(&mut self, page: usize) {
        self.place_cursor(self.cursor.saturating_sub(page.max(1)));
    }

    pub fn page_down(&mut self, page: usize) {
        let last = self.entries.len().saturating_sub(1);
        self.place_cursor((self.cursor + page.max(1)).min(last));
    }

    /// 커서가 보이도록 스크롤 조정
    pub fn ensure_visible(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + visible_height {
            self.scroll_offset = self.cursor + 1 - visible_height;
        }
    }

    /// 파일 개수
    pub fn file_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_file()).count()
    }

    /// 디렉토리 개수 ("..") 제외
    pub fn dir_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_directory()).count()
    }
}

fn make_absolute(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::FileSystem;
    use std::fs;
    use tempfile::TempDir;

    fn pane_at(path: &Path) -> (PaneState, FileSystem) {
        let filesystem = FileSystem::new();
        let mut pane = PaneState::new(path);
        pane.refresh(&filesystem);
        (pane, filesystem)
    }

    #[test]
    fn test_pane_id_other() {
        assert_eq!(PaneId::Left.other(), PaneId::Right);
        assert_eq!(PaneId::Right.other(), PaneId::Left);

        let mut id = PaneId::Left;
        id.toggle();
        assert_eq!(id, PaneId::Right);
    }

    #[test]
    fn test_listing_starts_with_parent_link() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        let (pane, filesystem) = pane_at(temp.path());

        let listing = pane.listing(&filesystem);
        assert!(listing[0].is_parent_link());
        assert_eq!(listing.len(), 3);
        assert!(listing.iter().skip(1).all(|e| !e.is_parent_link()));
    }

    #[test]
    fn test_listing_of_empty_directory_is_parent_link_only() {
        let temp = TempDir::new().unwrap();
        let (pane, filesystem) = pane_at(temp.path());

        let listing = pane.listing(&filesystem);
        assert_eq!(listing.len(), 1);
        assert!(listing[0].is_parent_link());
    }

    #[test]
    fn test_listing_is_fail_soft_for_missing_directory() {
        let temp = TempDir::new().unwrap();
        let gone = temp.path().join("gone");
        fs::create_dir(&gone).unwrap();
        let (mut pane, filesystem) = pane_at(&gone);
        fs::remove_dir(&gone).unwrap();

        pane.refresh(&filesystem);
        assert_eq!(pane.entries().len(), 1);
        assert!(pane.entries()[0].is_parent_link());
    }

    #[test]
    fn test_navigate_to_file_path_is_not_validated() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        fs::write(&file, "x").unwrap();
        let (mut pane, filesystem) = pane_at(temp.path());

        pane.navigate_to(&file);
        pane.refresh(&filesystem);

        assert_eq!(pane.current_path(), file.as_path());
        assert_eq!(pane.entries().len(), 1);
    }

    #[test]
    fn test_navigate_up_moves_to_parent() {
        let temp = TempDir::new().unwrap();
        let child = temp.path().join("child");
        fs::create_dir(&child).unwrap();
        let (mut pane, filesystem) = pane_at(&child);

        assert!(pane.navigate_up(&filesystem));
        assert_eq!(pane.current_path(), temp.path());

        // 방금 나온 디렉토리에 커서
        pane.refresh(&filesystem);
        assert_eq!(pane.focused_entry().unwrap().name, "child");
    }

    #[test]
    fn test_navigate_up_is_noop_when_parent_missing() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing").join("deeper");
        let filesystem = FileSystem::new();
        let mut pane = PaneState::new(&missing);

        assert!(!pane.navigate_up(&filesystem));
        assert_eq!(pane.current_path(), missing.as_path());
    }

    #[cfg(unix)]
    #[test]
    fn test_navigate_up_is_noop_at_root() {
        let filesystem = FileSystem::new();
        let mut pane = PaneState::new("/");

        assert!(!pane.navigate_up(&filesystem));
        assert_eq!(pane.current_path(), Path::new("/"));
    }

    #[test]
    fn test_relative_path_becomes_absolute() {
        let pane = PaneState::new(".");
        assert!(pane.current_path().is_absolute());
    }

    #[test]
    fn test_selection_survives_refresh_and_prunes_missing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::write(temp.path().join("b.txt"), "b").unwrap();
        let (mut pane, filesystem) = pane_at(temp.path());

        pane.set_cursor(1);
        pane.toggle_selection();
        pane.toggle_selection();
        assert_eq!(pane.selected().len(), 2);

        pane.refresh(&filesystem);
        assert_eq!(pane.selected().len(), 2);

        fs::remove_file(temp.path().join("a.txt")).unwrap();
        pane.refresh(&filesystem);
        assert_eq!(pane.selected().len(), 1);
    }

    #[test]
    fn test_parent_link_cannot_be_selected() {
        let temp = TempDir::new().unwrap();
        let (mut pane, _filesystem) = pane_at(temp.path());

        pane.cursor_to_top();
        pane.toggle_selection();
        assert!(pane.selected().is_empty());
    }

    #[test]
    fn test_first_selected_index_prefers_marks_over_cursor() {
        let temp = TempDir::new().unwrap();
        for name in ["a", "b", "c"] {
            fs::write(temp.path().join(name), name).unwrap();
        }
        let (mut pane, _filesystem) = pane_at(temp.path());

        // 선택이 없으면 커서
        pane.set_cursor(2);
        assert_eq!(pane.first_selected_index(), Some(2));

        // 3번, 1번 순서로 선택해도 목록 순서상 첫 번째
        pane.set_cursor(3);
        pane.toggle_selection();
        pane.set_cursor(1);
        pane.toggle_selection();
        assert_eq!(pane.selection_indices(), vec![1, 3]);
        assert_eq!(pane.first_selected_index(), Some(1));
    }

    #[test]
    fn test_release_drops_cursor_selection_until_cursor_moves() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a"), "a").unwrap();
        fs::write(temp.path().join("b"), "b").unwrap();
        let (mut pane, filesystem) = pane_at(temp.path());

        pane.set_cursor(1);
        let path = pane.focused_entry().unwrap().path.clone();
        pane.release(&path);
        assert!(pane.first_selected_index().is_none());

        // 새로고침해도 유지, 목록에는 남아 있음
        pane.refresh(&filesystem);
        assert!(pane.is_cursor_released());
        assert!(pane.entries().iter().any(|e| e.path == path));

        pane.move_cursor_down();
        assert_eq!(pane.first_selected_index(), Some(2));
        pane.move_cursor_up();
        assert_eq!(pane.first_selected_index(), Some(1));
    }

    #[test]
    fn test_release_of_other_entry_keeps_cursor_selection() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a"), "a").unwrap();
        fs::write(temp.path().join("b"), "b").unwrap();
        let (mut pane, _filesystem) = pane_at(temp.path());

        pane.set_cursor(2);
        pane.toggle_selection();
        pane.set_cursor(1);
        let marked = pane.entries()[2].path.clone();
        pane.release(&marked);

        assert!(pane.selected().is_empty());
        assert_eq!(pane.first_selected_index(), Some(1));
    }

    #[test]
    fn test_cursor_movement_and_scroll() {
        let temp = TempDir::new().unwrap();
        for i in 0..10 {
            fs::write(temp.path().join(format!("f{}", i)), "x").unwrap();
        }
        let (mut pane, _filesystem) = pane_at(temp.path());

        pane.cursor_to_bottom();
        assert_eq!(pane.cursor, 10);
        pane.ensure_visible(4);
        assert_eq!(pane.scroll_offset, 7);

        pane.page_up(5);
        assert_eq!(pane.cursor, 5);
        pane.cursor_to_top();
        pane.ensure_visible(4);
        assert_eq!(pane.scroll_offset, 0);

        pane.move_cursor_up();
        assert_eq!(pane.cursor, 0);
        pane.page_down(100);
        assert_eq!(pane.cursor, 10);
    }

    #[test]
    fn test_counts_exclude_parent_link() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::create_dir(temp.path().join("d1")).unwrap();
        fs::create_dir(temp.path().join("d2")).unwrap();
        let (pane, _filesystem) = pane_at(temp.path());

        assert_eq!(pane.file_count(), 1);
        assert_eq!(pane.dir_count(), 2);
    }
}
