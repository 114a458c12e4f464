use crate::models::directory_entry::DirectoryEntry;
use crate::utils::error::{Result, TwinPaneError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 파일 시스템 접근 경계
///
/// 컨트롤러는 이 트레이트를 통해서만 파일 시스템을 건드린다.
pub trait FilesystemGateway {
    /// 디렉토리의 직속 자식 목록 (OS 열거 순서, 정렬 없음)
    fn read_directory(&self, path: &Path) -> Result<Vec<DirectoryEntry>>;

    /// 디렉토리는 재귀 복사, 파일은 단일 복사
    fn copy(&self, src: &Path, dest: &Path) -> Result<()>;

    /// 디렉토리는 재귀 삭제, 파일은 단일 삭제
    fn delete(&self, path: &Path) -> Result<()>;

    /// `parent` 아래에 `name` 디렉토리 하나 생성
    fn create_directory(&self, parent: &Path, name: &str) -> Result<PathBuf>;

    fn exists(&self, path: &Path) -> bool;
}

/// 실제 OS 파일 시스템
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystem;

impl FileSystem {
    pub fn new() -> Self {
        Self
    }

    /// 단일 파일 복사
    ///
    /// 대상이 이미 있으면 덮어쓴다.
    pub fn copy_file(&self, src: &Path, dest: &Path) -> Result<()> {
        if src == dest {
            return Err(TwinPaneError::SameSourceAndDest {
                path: src.to_path_buf(),
            });
        }

        if !src.exists() {
            return Err(TwinPaneError::PathNotFound {
                path: src.to_path_buf(),
            });
        }

        fs::copy(src, dest).map_err(|e| {
            if e.kind() == ErrorKind::PermissionDenied {
                TwinPaneError::PermissionDenied {
                    path: dest.to_path_buf(),
                }
            } else {
                TwinPaneError::CopyFailed {
                    src: src.to_path_buf(),
                    dest: dest.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        })?;

        Ok(())
    }

    /// 디렉토리 재귀 복사
    ///
    /// 대상 디렉토리가 이미 있으면 그 안에 병합한다. 중간에 실패해도 이미 복사된
    /// 항목은 되돌리지 않는다.
    pub fn copy_directory(&self, src: &Path, dest: &Path) -> Result<()> {
        if src == dest {
            return Err(TwinPaneError::SameSourceAndDest {
                path: src.to_path_buf(),
            });
        }

        if !src.exists() {
            return Err(TwinPaneError::PathNotFound {
                path: src.to_path_buf(),
            });
        }

        if !src.is_dir() {
            return Err(TwinPaneError::NotADirectory {
                path: src.to_path_buf(),
            });
        }

        if Self::is_recursive_path(src, dest) {
            return Err(TwinPaneError::RecursiveCopy {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
            });
        }

        fs::create_dir_all(dest).map_err(|e| {
            if e.kind() == ErrorKind::PermissionDenied {
                TwinPaneError::PermissionDenied {
                    path: dest.to_path_buf(),
                }
            } else {
                TwinPaneError::CopyFailed {
                    src: src.to_path_buf(),
                    dest: dest.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        })?;

        for entry in fs::read_dir(src)? {
            let entry = entry?;
            let entry_path = entry.path();
            let dest_path = dest.join(entry.file_name());
            let file_type = entry.file_type()?;

            if file_type.is_symlink() {
                self.copy_symlink(&entry_path, &dest_path)?;
            } else if file_type.is_dir() {
                self.copy_directory(&entry_path, &dest_path)?;
            } else {
                self.copy_file(&entry_path, &dest_path)?;
            }
        }

        Ok(())
    }

    /// 트리 내부의 심볼릭 링크는 따라가지 않고 링크로 다시 만든다
    #[cfg(unix)]
    fn copy_symlink(&self, src: &Path, dest: &Path) -> Result<()> {
        let target = fs::read_link(src)?;
        if fs::symlink_metadata(dest).is_ok() {
            fs::remove_file(dest)?;
        }
        std::os::unix::fs::symlink(&target, dest).map_err(|e| TwinPaneError::CopyFailed {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            reason: e.to_string(),
        })
    }

    #[cfg(not(unix))]
    fn copy_symlink(&self, src: &Path, dest: &Path) -> Result<()> {
        if src.is_dir() {
            self.copy_directory(src, dest)
        } else {
            self.copy_file(src, dest)
        }
    }

    /// 디렉토리를 자기 자신(또는 하위)으로 복사하려는지 검사
    pub fn is_recursive_path(source: &Path, dest: &Path) -> bool {
        if !source.is_dir() {
            return false;
        }
        let Ok(canonical_source) = source.canonicalize() else {
            return false;
        };
        // 대상은 아직 없을 수 있으므로 존재하는 가장 가까운 조상으로 판단
        let mut ancestor = dest;
        loop {
            if let Ok(canonical_ancestor) = ancestor.canonicalize() {
                let rest = dest.strip_prefix(ancestor).unwrap_or(Path::new(""));
                return canonical_ancestor.join(rest).starts_with(&canonical_source);
            }
            match ancestor.parent() {
                Some(parent) => ancestor = parent,
                None => return false,
            }
        }
    }

    /// 단일 파일 영구 삭제
    pub fn delete_file(&self, path: &Path) -> Result<()> {
        if fs::symlink_metadata(path).is_err() {
            return Err(TwinPaneError::PathNotFound {
                path: path.to_path_buf(),
            });
        }

        fs::remove_file(path).map_err(|e| Self::delete_error(path, e))
    }

    /// 디렉토리 재귀 영구 삭제
    pub fn delete_directory(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(TwinPaneError::PathNotFound {
                path: path.to_path_buf(),
            });
        }

        if !path.is_dir() {
            return Err(TwinPaneError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        fs::remove_dir_all(path).map_err(|e| Self::delete_error(path, e))
    }

    fn delete_error(path: &Path, e: std::io::Error) -> TwinPaneError {
        if e.kind() == ErrorKind::PermissionDenied {
            TwinPaneError::PermissionDenied {
                path: path.to_path_buf(),
            }
        } else {
            TwinPaneError::DeleteFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        }
    }
}

impl FilesystemGateway for FileSystem {
    fn read_directory(&self, path: &Path) -> Result<Vec<DirectoryEntry>> {
        if !path.exists() {
            return Err(TwinPaneError::PathNotFound {
                path: path.to_path_buf(),
            });
        }

        if !path.is_dir() {
            return Err(TwinPaneError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        let read_dir = fs::read_dir(path).map_err(|e| {
            if e.kind() == ErrorKind::PermissionDenied {
                TwinPaneError::PermissionDenied {
                    path: path.to_path_buf(),
                }
            } else {
                TwinPaneError::Io(e)
            }
        })?;

        let mut entries = Vec::new();
        for entry in read_dir {
            // 읽을 수 없는 엔트리는 스킵
            let Ok(entry) = entry else { continue };
            let entry_path = entry.path();
            // 링크는 대상 기준으로 디렉토리 여부 판단
            let is_dir = fs::metadata(&entry_path)
                .map(|m| m.is_dir())
                .unwrap_or(false);
            entries.push(DirectoryEntry::from_path(entry_path, is_dir));
        }

        Ok(entries)
    }

    fn copy(&self, src: &Path, dest: &Path) -> Result<()> {
        // 링크 자체가 아니라 가리키는 대상이 디렉토리인지로 분기
        let result = if src.is_dir() {
            self.copy_directory(src, dest)
        } else {
            self.copy_file(src, dest)
        };

        match &result {
            Ok(()) => info!(src = %src.display(), dest = %dest.display(), "copied"),
            Err(e) => warn!(src = %src.display(), dest = %dest.display(), error = %e, "copy failed"),
        }
        result
    }

    fn delete(&self, path: &Path) -> Result<()> {
        // 디렉토리 심볼릭 링크는 링크만 지운다
        let is_real_dir = fs::symlink_metadata(path)
            .map(|m| m.is_dir())
            .unwrap_or(false);
        let result = if is_real_dir {
            self.delete_directory(path)
        } else {
            self.delete_file(path)
        };

        match &result {
            Ok(()) => info!(path = %path.display(), "deleted"),
            Err(e) => warn!(path = %path.display(), error = %e, "delete failed"),
        }
        result
    }

    fn create_directory(&self, parent: &Path, name: &str) -> Result<PathBuf> {
        let path = parent.join(name);
        if fs::symlink_metadata(&path).is_ok() {
            return Err(TwinPaneError::AlreadyExists { path });
        }

        let result = fs::create_dir(&path).map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => TwinPaneError::AlreadyExists { path: path.clone() },
            ErrorKind::PermissionDenied => TwinPaneError::PermissionDenied { path: path.clone() },
            _ => TwinPaneError::CreateFailed {
                path: path.clone(),
                reason: e.to_string(),
            },
        });

        match result {
            Ok(()) => {
                info!(path = %path.display(), "directory created");
                Ok(path)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "create directory failed");
                Err(e)
            }
        }
    }

    fn exists(&self, path: &Path) -> bool {
        // 깨진 링크도 "존재"로 본다
        path.exists() || fs::symlink_metadata(path).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    use std::os::unix::fs as unix_fs;

    #[test]
    fn test_read_directory_lists_children() {
        let fs_instance = FileSystem::new();
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();

        let entries = fs_instance.read_directory(temp.path()).unwrap();
        assert_eq!(entries.len(), 2);

        let file = entries.iter().find(|e| e.name == "a.txt").unwrap();
        assert!(file.is_file());
        assert_eq!(file.path, temp.path().join("a.txt"));

        let dir = entries.iter().find(|e| e.name == "sub").unwrap();
        assert!(dir.is_directory());
    }

    #[test]
    fn test_read_nonexistent_directory() {
        let fs_instance = FileSystem::new();
        let temp = TempDir::new().unwrap();
        let result = fs_instance.read_directory(&temp.path().join("missing"));

        match result {
            Err(TwinPaneError::PathNotFound { .. }) => {}
            other => panic!("Expected PathNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_directory_on_file_is_not_a_directory() {
        let fs_instance = FileSystem::new();
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        fs::write(&file, "x").unwrap();

        match fs_instance.read_directory(&file) {
            Err(TwinPaneError::NotADirectory { .. }) => {}
            other => panic!("Expected NotADirectory error, got {:?}", other),
        }
    }

    #[test]
    fn test_copy_file_preserves_content() {
        let fs_instance = FileSystem::new();
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("a.txt");
        let dest = temp.path().join("b.txt");
        fs::write(&src, "hello").unwrap();

        fs_instance.copy(&src, &dest).unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "hello");
        assert!(src.exists());
    }

    #[test]
    fn test_copy_directory_is_recursive() {
        let fs_instance = FileSystem::new();
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("nested/empty")).unwrap();
        fs::write(src.join("top.txt"), "top").unwrap();
        fs::write(src.join("nested/inner.txt"), "inner").unwrap();
        let dest = temp.path().join("dest");

        fs_instance.copy(&src, &dest).unwrap();

        assert_eq!(fs::read_to_string(dest.join("top.txt")).unwrap(), "top");
        assert_eq!(
            fs::read_to_string(dest.join("nested/inner.txt")).unwrap(),
            "inner"
        );
        assert!(dest.join("nested/empty").is_dir());
    }

    #[test]
    fn test_copy_missing_source_fails() {
        let fs_instance = FileSystem::new();
        let temp = TempDir::new().unwrap();
        let result = fs_instance.copy(&temp.path().join("nope"), &temp.path().join("dest"));

        let err = result.unwrap_err();
        assert!(err.is_io_failure());
        assert!(matches!(err, TwinPaneError::PathNotFound { .. }));
    }

    #[test]
    fn test_copy_onto_itself_is_rejected() {
        let fs_instance = FileSystem::new();
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("same.txt");
        fs::write(&file, "x").unwrap();

        match fs_instance.copy(&file, &file) {
            Err(TwinPaneError::SameSourceAndDest { .. }) => {}
            other => panic!("Expected SameSourceAndDest error, got {:?}", other),
        }
    }

    #[test]
    fn test_copy_directory_into_itself_is_rejected() {
        let fs_instance = FileSystem::new();
        let temp = TempDir::new().unwrap();
        let parent = temp.path().join("parent");
        fs::create_dir_all(parent.join("child")).unwrap();

        let result = fs_instance.copy(&parent, &parent.join("child").join("parent"));
        match result {
            Err(TwinPaneError::RecursiveCopy { .. }) => {}
            other => panic!("Expected RecursiveCopy error, got {:?}", other),
        }
        assert!(!parent.join("child").join("parent").exists());
    }

    #[test]
    fn test_is_recursive_path_different_dirs() {
        let temp = TempDir::new().unwrap();
        let dir_a = temp.path().join("dir_a");
        let dir_b = temp.path().join("dir_b");
        fs::create_dir_all(&dir_a).unwrap();
        fs::create_dir_all(&dir_b).unwrap();

        assert!(!FileSystem::is_recursive_path(&dir_a, &dir_b.join("dir_a")));
        assert!(FileSystem::is_recursive_path(&dir_a, &dir_a.join("x")));
    }

    #[test]
    fn test_delete_file_and_directory() {
        let fs_instance = FileSystem::new();
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("f.txt");
        let dir = temp.path().join("d");
        fs::write(&file, "x").unwrap();
        fs::create_dir_all(dir.join("deep")).unwrap();
        fs::write(dir.join("deep/g.txt"), "y").unwrap();

        fs_instance.delete(&file).unwrap();
        fs_instance.delete(&dir).unwrap();

        assert!(!file.exists());
        assert!(!dir.exists());
    }

    #[test]
    fn test_delete_missing_path_fails() {
        let fs_instance = FileSystem::new();
        let temp = TempDir::new().unwrap();

        let err = fs_instance.delete(&temp.path().join("ghost")).unwrap_err();
        assert!(err.is_io_failure());
    }

    #[cfg(unix)]
    #[test]
    fn test_delete_symlink_to_directory_keeps_target() {
        let fs_instance = FileSystem::new();
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("target");
        let link = temp.path().join("link");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), "keep").unwrap();
        unix_fs::symlink(&target, &link).unwrap();

        fs_instance.delete(&link).unwrap();

        assert!(fs::symlink_metadata(&link).is_err());
        assert!(target.join("keep.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_directory_recreates_symlinks() {
        let fs_instance = FileSystem::new();
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let outside = temp.path().join("outside");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&outside).unwrap();
        fs::write(outside.join("big.txt"), "outside").unwrap();
        unix_fs::symlink(&outside, src.join("link")).unwrap();
        let dest = temp.path().join("dest");

        fs_instance.copy(&src, &dest).unwrap();

        let copied = fs::symlink_metadata(dest.join("link")).unwrap();
        assert!(copied.file_type().is_symlink());
        assert_eq!(fs::read_link(dest.join("link")).unwrap(), outside);
    }

    #[test]
    fn test_create_directory() {
        let fs_instance = FileSystem::new();
        let temp = TempDir::new().unwrap();

        let created = fs_instance
            .create_directory(temp.path(), "new_folder")
            .unwrap();
        assert_eq!(created, temp.path().join("new_folder"));
        assert!(created.is_dir());

        // 이미 존재하면 에러
        match fs_instance.create_directory(temp.path(), "new_folder") {
            Err(TwinPaneError::AlreadyExists { .. }) => {}
            other => panic!("Expected AlreadyExists error, got {:?}", other),
        }
    }

    #[test]
    fn test_create_directory_in_missing_parent_fails() {
        let fs_instance = FileSystem::new();
        let temp = TempDir::new().unwrap();

        let err = fs_instance
            .create_directory(&temp.path().join("missing"), "child")
            .unwrap_err();
        assert!(err.is_io_failure());
    }
}
