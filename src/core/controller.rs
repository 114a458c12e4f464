//! 양쪽 패널과 모든 파일 시스템 변경을 중재하는 컨트롤러
//!
//! 변경 요청은 모두 동기식이며, 처리 후 두 패널을 전부 다시 읽는다.

use crate::core::render::{ListingRenderer, PaneView};
use crate::models::{DirectoryEntry, PaneId, PaneState};
use crate::system::{FileSystem, FilesystemGateway};
use crate::utils::error::{Result, TwinPaneError};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub struct DualPaneController<G: FilesystemGateway = FileSystem> {
    gateway: G,
    left: PaneState,
    right: PaneState,
}

impl<G: FilesystemGateway> DualPaneController<G> {
    /// 컨트롤러 생성 (두 패널 모두 즉시 목록을 읽음)
    pub fn new(gateway: G, left_root: impl Into<PathBuf>, right_root: impl Into<PathBuf>) -> Self {
        let mut controller = Self {
            gateway,
            left: PaneState::new(left_root),
            right: PaneState::new(right_root),
        };
        controller.refresh_all();
        controller
    }

    pub fn pane(&self, id: PaneId) -> &PaneState {
        match id {
            PaneId::Left => &self.left,
            PaneId::Right => &self.right,
        }
    }

    pub fn pane_mut(&mut self, id: PaneId) -> &mut PaneState {
        match id {
            PaneId::Left => &mut self.left,
            PaneId::Right => &mut self.right,
        }
    }

    #[cfg(test)]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// 양쪽 패널 새로고침
    pub fn refresh_all(&mut self) {
        self.left.refresh(&self.gateway);
        self.right.refresh(&self.gateway);
    }

    /// 항목을 대상 패널의 현재 디렉토리로 복사
    ///
    /// 성공하면 생성된 경로를 반환한다. 실패하면 새로고침 없이 에러를 그대로 전달한다.
    pub fn request_copy(&mut self, entry: &DirectoryEntry, destination: PaneId) -> Result<PathBuf> {
        if entry.is_parent_link() {
            return Err(TwinPaneError::InvalidEntry {
                path: entry.path.clone(),
            });
        }

        let dest = self.pane(destination).current_path().join(&entry.name);
        debug!(src = %entry.path.display(), dest = %dest.display(), "copy requested");
        self.gateway.copy(&entry.path, &dest)?;

        self.refresh_all();
        Ok(dest)
    }

    /// 항목 삭제 후 실제로 사라졌는지 확인
    pub fn request_delete(&mut self, entry: &DirectoryEntry) -> Result<()> {
        if entry.is_parent_link() {
            return Err(TwinPaneError::InvalidEntry {
                path: entry.path.clone(),
            });
        }

        self.gateway.delete(&entry.path)?;

        if self.gateway.exists(&entry.path) {
            warn!(path = %entry.path.display(), "delete reported success but entry remains");
            return Err(TwinPaneError::DeleteVerificationFailed {
                path: entry.path.clone(),
            });
        }

        self.refresh_all();
        Ok(())
    }

    /// 새 폴더 생성
    ///
    /// 이미 존재하면 아무것도 건드리지 않고 `AlreadyExists`를 반환한다.
    /// 생성을 시도한 경우에는 결과와 관계없이 두 패널을 새로고침한다.
    pub fn request_new_folder(&mut self, parent: &Path, name: &str) -> Result<PathBuf> {
        let name = validate_folder_name(name)?;
        let target = parent.join(name);

        if self.gateway.exists(&target) {
            debug!(path = %target.display(), "new folder rejected, target exists");
            return Err(TwinPaneError::AlreadyExists { path: target });
        }

        let result = self.gateway.create_directory(parent, name);
        self.refresh_all();
        result
    }

    /// 패널 디렉토리 변경
    pub fn request_navigate(&mut self, pane: PaneId, path: impl Into<PathBuf>) {
        let path = path.into();
        debug!(pane = pane.label(), path = %path.display(), "navigate");
        self.pane_mut(pane).navigate_to(path);
        self.refresh_all();
    }

    /// 상위 디렉토리로 이동 (이동했으면 true)
    pub fn request_navigate_up(&mut self, pane: PaneId) -> bool {
        let moved = match pane {
            PaneId::Left => self.left.navigate_up(&self.gateway),
            PaneId::Right => self.right.navigate_up(&self.gateway),
        };
        self.refresh_all();
        moved
    }

    /// 목록의 한 행 열기
    ///
    /// ".."은 상위로, 디렉토리는 안으로 이동하고 파일은 아무것도 하지 않는다.
    /// 디렉토리가 바뀌었으면 true.
    pub fn request_open(&mut self, pane: PaneId, index: usize) -> bool {
        let Some(entry) = self.pane(pane).entries().get(index).cloned() else {
            return false;
        };

        if entry.is_parent_link() {
            self.request_navigate_up(pane)
        } else if entry.is_directory() {
            info!(pane = pane.label(), path = %entry.path.display(), "enter directory");
            self.request_navigate(pane, entry.path);
            true
        } else {
            self.refresh_all();
            false
        }
    }

    /// 두 패널의 스냅샷을 렌더러에 전달 (왼쪽 먼저)
    pub fn render<R: ListingRenderer + ?Sized>(&self, focus: PaneId, renderer: &mut R) {
        for id in [PaneId::Left, PaneId::Right] {
            renderer.render_listing(&PaneView::of(id, self.pane(id), id == focus));
        }
    }
}

/// 폴더 이름 검증 (앞뒤 공백 제거 후 반환)
fn validate_folder_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    let invalid = trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.chars().any(std::path::is_separator);

    if invalid {
        return Err(TwinPaneError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(trimmed)
}
