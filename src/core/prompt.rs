//! 사용자 프롬프트 경계
//!
//! 확인/입력/선택/메시지는 모두 모달이며 호출자는 응답이 올 때까지 블로킹된다.
//! 모달 뒤에 보이는 패널 목록은 `ListingRenderer`로 다시 그릴 수 있다.

use crate::core::render::ListingRenderer;

/// 메시지 수준
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Error,
}

/// 사용자 프롬프트 서비스
pub trait PromptService: ListingRenderer {
    /// 예/아니오 확인
    fn confirm(&mut self, message: &str) -> bool;

    /// 텍스트 입력 (취소 시 None)
    fn prompt_text(&mut self, message: &str, title: &str) -> Option<String>;

    /// 선택지 중 하나 선택 (취소 시 None)
    fn choose(&mut self, message: &str, title: &str, options: &[String]) -> Option<usize>;

    /// 메시지 표시
    fn show_message(&mut self, level: MessageLevel, message: &str);
}

/// 미리 정해 둔 응답을 순서대로 돌려주는 테스트용 프롬프트
///
/// 큐가 비면 확인은 "아니오", 입력/선택은 취소로 답한다.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    pub confirms: std::collections::VecDeque<bool>,
    pub texts: std::collections::VecDeque<Option<String>>,
    pub choices: std::collections::VecDeque<Option<usize>>,
    /// 받은 질문 (확인/입력/선택 메시지)
    pub asked: Vec<String>,
    /// 표시된 메시지
    pub messages: Vec<(MessageLevel, String)>,
    /// 모달 배경으로 다시 그려진 패널
    pub backdrop: crate::core::render::RecordingRenderer,
}

#[cfg(test)]
impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirm_with(mut self, answer: bool) -> Self {
        self.confirms.push_back(answer);
        self
    }

    pub fn type_text(mut self, text: Option<&str>) -> Self {
        self.texts.push_back(text.map(str::to_string));
        self
    }

    pub fn pick(mut self, choice: Option<usize>) -> Self {
        self.choices.push_back(choice);
        self
    }

    pub fn last_message(&self) -> Option<&(MessageLevel, String)> {
        self.messages.last()
    }
}

#[cfg(test)]
impl ListingRenderer for ScriptedPrompt {
    fn render_listing(&mut self, view: &crate::core::render::PaneView<'_>) {
        self.backdrop.render_listing(view);
    }
}

#[cfg(test)]
impl PromptService for ScriptedPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.confirms.pop_front().unwrap_or(false)
    }

    fn prompt_text(&mut self, message: &str, _title: &str) -> Option<String> {
        self.asked.push(message.to_string());
        self.texts.pop_front().flatten()
    }

    fn choose(&mut self, message: &str, _title: &str, _options: &[String]) -> Option<usize> {
        self.asked.push(message.to_string());
        self.choices.pop_front().flatten()
    }

    fn show_message(&mut self, level: MessageLevel, message: &str) {
        self.messages.push((level, message.to_string()));
    }
}
