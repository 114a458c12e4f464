use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TwinPaneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {path}")]
    PathNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Source and destination are the same: {path}")]
    SameSourceAndDest { path: PathBuf },

    #[error("Cannot copy '{src}' into itself ({dest})")]
    RecursiveCopy { src: PathBuf, dest: PathBuf },

    #[error("Copy failed: {src} -> {dest}: {reason}")]
    CopyFailed {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    #[error("Delete failed: {path}: {reason}")]
    DeleteFailed { path: PathBuf, reason: String },

    #[error("Create directory failed: {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },

    #[error("Already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// 삭제 호출은 성공했지만 대상이 여전히 존재함
    #[error("Delete reported success but '{path}' still exists")]
    DeleteVerificationFailed { path: PathBuf },

    #[error("Invalid folder name: '{name}'")]
    InvalidName { name: String },

    #[error("Entry cannot be used for this operation: {path}")]
    InvalidEntry { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TwinPaneError {
    /// OS 레벨 실패(IOFailure 계열) 여부
    pub fn is_io_failure(&self) -> bool {
        matches!(
            self,
            TwinPaneError::Io(_)
                | TwinPaneError::PathNotFound { .. }
                | TwinPaneError::NotADirectory { .. }
                | TwinPaneError::PermissionDenied { .. }
                | TwinPaneError::SameSourceAndDest { .. }
                | TwinPaneError::RecursiveCopy { .. }
                | TwinPaneError::CopyFailed { .. }
                | TwinPaneError::DeleteFailed { .. }
                | TwinPaneError::CreateFailed { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TwinPaneError>;
