//! 설정 파일 (`config.toml`)
//!
//! 앱은 설정을 읽기만 하며 아무 상태도 저장하지 않는다.

use crate::core::actions::Keymap;
use crate::utils::error::{Result, TwinPaneError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 설정 파일 경로를 바꾸는 환경 변수
pub const CONFIG_ENV: &str = "TWINPANE_CONFIG";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub panes: PanesConfig,
    /// action_id -> 키 표기
    pub keys: BTreeMap<String, String>,
    pub log: LogConfig,
}

/// 시작 디렉토리
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PanesConfig {
    pub left: Option<PathBuf>,
    pub right: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub file: Option<PathBuf>,
}

impl Config {
    /// 설정 파일 경로 (`$TWINPANE_CONFIG` 우선)
    pub fn path() -> Option<PathBuf> {
        resolve_path(env::var_os(CONFIG_ENV))
    }

    /// 기본 위치에서 설정 읽기
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// 파일이 없으면 기본값, 형식이 잘못되었으면 `Config` 에러
    pub fn load_from(path: &Path) -> Result<Self> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(TwinPaneError::Config(format!(
                    "cannot read {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        Self::parse(&data)
            .map_err(|e| TwinPaneError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn parse(data: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(data)
    }

    /// 왼쪽 패널 시작 디렉토리 (기본: 작업 디렉토리)
    pub fn left_root(&self) -> PathBuf {
        self.panes.left.clone().unwrap_or_else(working_dir)
    }

    /// 오른쪽 패널 시작 디렉토리 (기본: 홈 디렉토리)
    pub fn right_root(&self) -> PathBuf {
        self.panes
            .right
            .clone()
            .or_else(dirs::home_dir)
            .unwrap_or_else(working_dir)
    }

    /// 로그 파일 경로
    pub fn log_file(&self) -> PathBuf {
        self.log.file.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(env::temp_dir)
                .join("twinpane")
                .join("twinpane.log")
        })
    }

    /// `[keys]`를 반영한 키맵
    pub fn keymap(&self) -> Result<Keymap> {
        Keymap::with_overrides(&self.keys)
    }
}

fn resolve_path(custom: Option<OsString>) -> Option<PathBuf> {
    if let Some(custom) = custom {
        let custom = PathBuf::from(custom);
        if !custom.as_os_str().is_empty() {
            return Some(custom);
        }
    }
    dirs::config_dir().map(|dir| dir.join("twinpane").join("config.toml"))
}

fn working_dir() -> PathBuf {
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
