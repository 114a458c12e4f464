use super::*;

impl<G: FilesystemGateway> App<G> {
    /// 포커스 패널의 선택 항목을 반대편 패널로 전송
    ///
    /// 키보드 전송은 드래그 시작과 반대편 드롭을 한 번에 수행한다.
    pub fn start_transfer(&mut self, action: TransferAction, prompt: &mut dyn PromptService) {
        let source = self.active;
        if self
            .transfers
            .begin(&self.controller, source, action)
            .is_none()
        {
            debug!(pane = source.label(), "nothing to transfer");
            return;
        }
        commands::drop_transfer(
            &mut self.controller,
            &mut self.transfers,
            source.other(),
            prompt,
        );
    }

    pub fn start_delete(&mut self, prompt: &mut dyn PromptService) {
        commands::delete_selected(&mut self.controller, self.active, prompt);
    }

    pub fn start_mkdir(&mut self, prompt: &mut dyn PromptService) {
        commands::create_folder(&mut self.controller, self.active, prompt);
    }
}
