use std::path::{Path, PathBuf};

/// 상위 디렉토리 항목 이름
pub const PARENT_LINK_NAME: &str = "..";

/// 엔트리 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// 목록 맨 앞의 합성 "상위 디렉토리" 항목
    ParentLink,
    /// 디렉토리
    Directory,
    /// 파일 (디렉토리가 아닌 모든 것)
    File,
}

/// 목록 한 줄에 해당하는 파일/디렉토리
///
/// 목록을 새로 읽을 때마다 다시 만들어지며 경로 외의 식별자는 없다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// 표시 이름
    pub name: String,
    /// 절대 경로
    pub path: PathBuf,
    /// 종류
    pub kind: EntryKind,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, path: PathBuf, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            path,
            kind,
        }
    }

    /// `dir`에 대한 상위 디렉토리 항목 생성
    ///
    /// 루트처럼 부모가 없으면 `dir` 자신을 가리킨다.
    pub fn parent_link(dir: &Path) -> Self {
        let path = dir.parent().unwrap_or(dir).to_path_buf();
        Self::new(PARENT_LINK_NAME, path, EntryKind::ParentLink)
    }

    /// 경로로부터 엔트리 생성 (이름은 마지막 경로 요소)
    pub fn from_path(path: PathBuf, is_dir: bool) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        let kind = if is_dir {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        Self::new(name, path, kind)
    }

    pub fn is_parent_link(&self) -> bool {
        self.kind == EntryKind::ParentLink
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}
