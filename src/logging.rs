//! 파일 로깅
//!
//! 터미널은 TUI가 점유하므로 로그는 항상 파일로만 쓴다.
//! `TWINPANE_LOG`가 비어 있으면 아무것도 설치하지 않는다.

use std::env;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// 로그 필터 환경 변수 (예: `twinpane=debug`)
pub const LOG_ENV: &str = "TWINPANE_LOG";

/// 로깅 초기화 (설치했으면 true)
pub fn init(log_file: &Path) -> anyhow::Result<bool> {
    let Some(directives) = env::var(LOG_ENV).ok().filter(|v| !v.trim().is_empty()) else {
        return Ok(false);
    };

    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(directives)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(true)
}
