//! 드래그 앤 드롭 전송 프로토콜
//!
//! 드래그 시작(`begin`)에서 항목 하나를 붙잡고, 드롭(`complete`)에서 정확히 한 번 소비한다.

use crate::core::controller::DualPaneController;
use crate::models::{DirectoryEntry, PaneId};
use crate::system::FilesystemGateway;
use crate::utils::error::Result;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// 전송 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferAction {
    Copy,
    /// 디스크에서는 복사만 하고, 원본 패널의 선택만 해제한다
    Move,
}

impl TransferAction {
    pub fn label(self) -> &'static str {
        match self {
            TransferAction::Copy => "Copy",
            TransferAction::Move => "Move",
        }
    }
}

/// 진행 중인 전송 요청
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub entry: DirectoryEntry,
    pub source: PaneId,
    /// 항상 원본의 반대편 패널
    pub destination: PaneId,
    pub action: TransferAction,
}

/// 드롭 결과
#[derive(Debug, Clone, PartialEq)]
pub enum TransferOutcome {
    /// 대기 중인 요청이 없었음
    Idle,
    /// 원본 패널 위에 드롭되어 취소됨
    Cancelled,
    /// 복사 완료
    Copied {
        destination: PathBuf,
        action: TransferAction,
    },
}

#[derive(Debug, Default)]
pub struct TransferCoordinator {
    pending: Option<TransferRequest>,
}

impl TransferCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 드래그 시작
    ///
    /// 원본 패널의 첫 번째 선택 항목 하나만 붙잡는다. 빈 패널이거나 ".."이면 None.
    /// 이미 대기 중인 요청은 교체된다.
    pub fn begin<G: FilesystemGateway>(
        &mut self,
        controller: &DualPaneController<G>,
        source: PaneId,
        action: TransferAction,
    ) -> Option<&TransferRequest> {
        self.pending = None;

        let entry = controller.pane(source).first_selected_entry()?;
        if entry.is_parent_link() {
            return None;
        }

        debug!(source = source.label(), entry = %entry.path.display(), action = action.label(), "drag started");
        self.pending = Some(TransferRequest {
            entry: entry.clone(),
            source,
            destination: source.other(),
            action,
        });
        self.pending.as_ref()
    }

    /// 드롭 처리
    pub fn complete<G: FilesystemGateway>(
        &mut self,
        controller: &mut DualPaneController<G>,
        drop_target: PaneId,
    ) -> Result<TransferOutcome> {
        let Some(request) = self.pending.take() else {
            return Ok(TransferOutcome::Idle);
        };

        if drop_target == request.source {
            debug!(entry = %request.entry.path.display(), "dropped on source pane, cancelled");
            return Ok(TransferOutcome::Cancelled);
        }

        let destination = match controller.request_copy(&request.entry, request.destination) {
            Ok(path) => path,
            Err(e) => {
                warn!(entry = %request.entry.path.display(), error = %e, "transfer abandoned");
                return Err(e);
            }
        };

        if request.action == TransferAction::Move {
            controller
                .pane_mut(request.source)
                .release(&request.entry.path);
        }

        info!(
            src = %request.entry.path.display(),
            dest = %destination.display(),
            action = request.action.label(),
            "transfer completed"
        );
        Ok(TransferOutcome::Copied {
            destination,
            action: request.action,
        })
    }

    /// 대기 중인 요청 취소
    pub fn cancel(&mut self) -> Option<TransferRequest> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<&TransferRequest> {
        self.pending.as_ref()
    }
}
