//! 단축키/마우스로 실행되는 삭제, 새 폴더, 전송 흐름
//!
//! 사용자 응답은 `PromptService`로 받고, 실패는 모달 메시지로 알린다.

use crate::core::controller::DualPaneController;
use crate::core::prompt::{MessageLevel, PromptService};
use crate::core::transfer::{TransferCoordinator, TransferOutcome};
use crate::models::PaneId;
use crate::system::FilesystemGateway;
use crate::utils::error::TwinPaneError;
use std::path::PathBuf;
use tracing::{debug, warn};

pub const DELETE_CONFIRM: &str = "Are you sure you want to delete this file/folder?";
pub const DELETE_SUCCESS: &str = "File/folder deleted successfully!";
pub const DELETE_FAILED: &str = "Failed to delete the file/folder.";
pub const FOLDER_LOCATION_MESSAGE: &str = "Select one:";
pub const FOLDER_LOCATION_TITLE: &str = "Choose the disk!";
pub const FOLDER_NAME_MESSAGE: &str = "Enter the name of the new folder:";
pub const FOLDER_NAME_TITLE: &str = "New Folder";
pub const FOLDER_EXISTS: &str =
    "Failed to create the folder because file with this name already exists.";
pub const COPY_FAILED: &str = "Failed to copy the file/folder.";

/// 현재 패널 상태를 배경으로 다시 그린 뒤 메시지 표시
fn report<G: FilesystemGateway>(
    controller: &DualPaneController<G>,
    focus: PaneId,
    prompt: &mut dyn PromptService,
    level: MessageLevel,
    message: &str,
) {
    controller.render(focus, &mut *prompt);
    prompt.show_message(level, message);
}

/// 대기 중인 전송을 `drop_target` 패널에 떨어뜨린다
///
/// 복사 실패는 오류 메시지로 보여 주고, 취소/대기 없음은 조용히 None.
pub fn drop_transfer<G: FilesystemGateway>(
    controller: &mut DualPaneController<G>,
    transfers: &mut TransferCoordinator,
    drop_target: PaneId,
    prompt: &mut dyn PromptService,
) -> Option<PathBuf> {
    let focus = transfers
        .pending()
        .map_or(drop_target, |request| request.source);
    match transfers.complete(controller, drop_target) {
        Ok(TransferOutcome::Copied { destination, .. }) => Some(destination),
        Ok(_) => None,
        Err(e) => {
            debug!(io_failure = e.is_io_failure(), "reporting transfer failure");
            let message = format!("{}\n{}", COPY_FAILED, e);
            report(controller, focus, prompt, MessageLevel::Error, &message);
            None
        }
    }
}

/// 포커스 패널의 첫 번째 선택 항목 삭제 (삭제했으면 true)
pub fn delete_selected<G: FilesystemGateway>(
    controller: &mut DualPaneController<G>,
    focus: PaneId,
    prompt: &mut dyn PromptService,
) -> bool {
    let Some(entry) = controller.pane(focus).first_selected_entry().cloned() else {
        return false;
    };
    if entry.is_parent_link() {
        return false;
    }

    if !prompt.confirm(DELETE_CONFIRM) {
        return false;
    }

    match controller.request_delete(&entry) {
        Ok(()) => {
            report(controller, focus, prompt, MessageLevel::Info, DELETE_SUCCESS);
            true
        }
        Err(TwinPaneError::DeleteVerificationFailed { .. }) => {
            report(controller, focus, prompt, MessageLevel::Error, DELETE_FAILED);
            false
        }
        Err(e) => {
            warn!(path = %entry.path.display(), error = %e, "delete failed");
            let message = format!("{}\n{}", DELETE_FAILED, e);
            report(controller, focus, prompt, MessageLevel::Error, &message);
            false
        }
    }
}

/// 새 폴더 생성 흐름
///
/// 위치(양쪽 패널의 현재 디렉토리)를 고르고 이름을 입력받는다.
/// 취소하거나 빈 이름이면 아무것도 만들지 않는다. 어느 경우든 두 패널은 새로고침된다.
pub fn create_folder<G: FilesystemGateway>(
    controller: &mut DualPaneController<G>,
    focus: PaneId,
    prompt: &mut dyn PromptService,
) -> Option<PathBuf> {
    let created = ask_and_create(controller, focus, prompt);
    controller.refresh_all();
    created
}

fn ask_and_create<G: FilesystemGateway>(
    controller: &mut DualPaneController<G>,
    focus: PaneId,
    prompt: &mut dyn PromptService,
) -> Option<PathBuf> {
    let locations = [PaneId::Left, PaneId::Right]
        .map(|id| controller.pane(id).current_path().to_path_buf());
    let options: Vec<String> = locations
        .iter()
        .map(|p| p.display().to_string())
        .collect();

    let choice = prompt.choose(FOLDER_LOCATION_MESSAGE, FOLDER_LOCATION_TITLE, &options)?;
    let parent = locations.get(choice)?.clone();

    let name = prompt.prompt_text(FOLDER_NAME_MESSAGE, FOLDER_NAME_TITLE)?;
    if name.trim().is_empty() {
        return None;
    }

    match controller.request_new_folder(&parent, &name) {
        Ok(path) => Some(path),
        Err(TwinPaneError::AlreadyExists { .. }) => {
            report(controller, focus, prompt, MessageLevel::Error, FOLDER_EXISTS);
            None
        }
        Err(e) => {
            warn!(parent = %parent.display(), name = %name, error = %e, "create folder failed");
            report(controller, focus, prompt, MessageLevel::Error, &e.to_string());
            None
        }
    }
}
