use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::models::directory_entry::DirectoryEntry;
use crate::utils::error::{Result, TwinPaneError};

use super::{FileSystem, FilesystemGateway};

/// 실제 파일 시스템에 위임하되 일부 동작을 고장낼 수 있는 테스트용 게이트웨이
#[derive(Default)]
pub struct StubbornGateway {
    inner: FileSystem,
    state: RefCell<State>,
}

#[derive(Default)]
struct State {
    /// delete가 "성공"을 보고하지만 실제로는 지우지 않는 경로
    pinned: HashSet<PathBuf>,
    /// copy가 항상 실패하는지 여부
    fail_copies: bool,
    /// 호출 기록
    calls: Vec<String>,
}

impl StubbornGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&self, path: impl Into<PathBuf>) {
        self.state.borrow_mut().pinned.insert(path.into());
    }

    pub fn fail_copies(&self) {
        self.state.borrow_mut().fail_copies = true;
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    /// 파일 시스템을 변경하는 호출 기록만
    pub fn mutations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.starts_with("read") && !c.starts_with("exists"))
            .collect()
    }

    fn record(&self, call: String) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl FilesystemGateway for StubbornGateway {
    fn read_directory(&self, path: &Path) -> Result<Vec<DirectoryEntry>> {
        self.record(format!("read {}", path.display()));
        self.inner.read_directory(path)
    }

    fn copy(&self, src: &Path, dest: &Path) -> Result<()> {
        self.record(format!("copy {} -> {}", src.display(), dest.display()));
        if self.state.borrow().fail_copies {
            return Err(TwinPaneError::CopyFailed {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
                reason: "injected failure".to_string(),
            });
        }
        self.inner.copy(src, dest)
    }

    fn delete(&self, path: &Path) -> Result<()> {
        self.record(format!("delete {}", path.display()));
        if self.state.borrow().pinned.contains(path) {
            return Ok(());
        }
        self.inner.delete(path)
    }

    fn create_directory(&self, parent: &Path, name: &str) -> Result<PathBuf> {
        self.record(format!("mkdir {}", parent.join(name).display()));
        self.inner.create_directory(parent, name)
    }

    fn exists(&self, path: &Path) -> bool {
        self.record(format!("exists {}", path.display()));
        self.inner.exists(path)
    }
}
