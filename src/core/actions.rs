//! 액션 시스템
//!
//! 키 입력은 `Keymap` 디스패치 테이블을 통해서만 `Action`으로 바뀐다.
//! 커맨드바 항목도 같은 테이블에서 생성된다.

use crate::ui::components::command_bar::CommandItem;
use crate::utils::error::{Result, TwinPaneError};
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// 모든 가능한 액션의 열거
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    GoToTop,
    GoToBottom,
    PageUp,
    PageDown,
    EnterSelected,
    GoToParent,
    TogglePanel,
    // Selection
    ToggleSelection,
    // File Operations
    Copy,
    Move,
    Delete,
    MakeDirectory,
    // System
    Refresh,
    Quit,
}

/// 커맨드바 표시 정보
pub struct CommandBarEntry {
    pub label: &'static str,
    pub priority: u8,
}

/// 액션 정의 (메타데이터)
pub struct ActionDef {
    pub action: Action,
    /// 설정 파일 `[keys]`에서 쓰는 식별자
    pub id: &'static str,
    pub command_bar: Option<CommandBarEntry>,
}

/// 키 바인딩 정의
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Option<KeyModifiers>, // None = any modifier
    pub action: Action,
}

impl KeyBinding {
    fn new(code: KeyCode, modifiers: Option<KeyModifiers>, action: Action) -> Self {
        Self {
            code,
            modifiers,
            action,
        }
    }

    fn matches(&self, modifiers: KeyModifiers, code: KeyCode) -> bool {
        let mod_matches = match self.modifiers {
            None => true,
            Some(required) => modifiers == required,
        };
        self.code == code && mod_matches
    }
}

/// 모든 액션 메타데이터
pub static ACTION_DEFS: &[ActionDef] = &[
    // Navigation
    ActionDef {
        action: Action::MoveUp,
        id: "move_up",
        command_bar: None,
    },
    ActionDef {
        action: Action::MoveDown,
        id: "move_down",
        command_bar: None,
    },
    ActionDef {
        action: Action::GoToTop,
        id: "go_top",
        command_bar: None,
    },
    ActionDef {
        action: Action::GoToBottom,
        id: "go_bottom",
        command_bar: None,
    },
    ActionDef {
        action: Action::PageUp,
        id: "page_up",
        command_bar: None,
    },
    ActionDef {
        action: Action::PageDown,
        id: "page_down",
        command_bar: None,
    },
    ActionDef {
        action: Action::EnterSelected,
        id: "open",
        command_bar: Some(CommandBarEntry {
            label: "Open",
            priority: 1,
        }),
    },
    ActionDef {
        action: Action::GoToParent,
        id: "parent",
        command_bar: Some(CommandBarEntry {
            label: "Up",
            priority: 2,
        }),
    },
    ActionDef {
        action: Action::TogglePanel,
        id: "toggle_panel",
        command_bar: Some(CommandBarEntry {
            label: "Panel",
            priority: 3,
        }),
    },
    // Selection
    ActionDef {
        action: Action::ToggleSelection,
        id: "toggle_selection",
        command_bar: Some(CommandBarEntry {
            label: "Mark",
            priority: 4,
        }),
    },
    // File Operations
    ActionDef {
        action: Action::Copy,
        id: "copy",
        command_bar: Some(CommandBarEntry {
            label: "Copy",
            priority: 5,
        }),
    },
    ActionDef {
        action: Action::Move,
        id: "move",
        command_bar: Some(CommandBarEntry {
            label: "Move",
            priority: 6,
        }),
    },
    ActionDef {
        action: Action::MakeDirectory,
        id: "new_folder",
        command_bar: Some(CommandBarEntry {
            label: "Dir",
            priority: 7,
        }),
    },
    ActionDef {
        action: Action::Delete,
        id: "delete",
        command_bar: Some(CommandBarEntry {
            label: "Del",
            priority: 8,
        }),
    },
    // System
    ActionDef {
        action: Action::Refresh,
        id: "refresh",
        command_bar: None,
    },
    ActionDef {
        action: Action::Quit,
        id: "quit",
        command_bar: Some(CommandBarEntry {
            label: "Quit",
            priority: 9,
        }),
    },
];

impl Action {
    /// action_id 문자열로 Action 조회
    pub fn from_id(id: &str) -> Option<Action> {
        ACTION_DEFS.iter().find(|d| d.id == id).map(|d| d.action)
    }

    pub fn def(self) -> Option<&'static ActionDef> {
        ACTION_DEFS.iter().find(|d| d.action == self)
    }
}

fn build_default_bindings() -> Vec<KeyBinding> {
    let none = Some(KeyModifiers::NONE);
    let ctrl = Some(KeyModifiers::CONTROL);
    vec![
        // File Operations
        KeyBinding::new(KeyCode::F(8), None, Action::Delete),
        KeyBinding::new(KeyCode::Delete, None, Action::Delete),
        KeyBinding::new(KeyCode::F(7), None, Action::MakeDirectory),
        KeyBinding::new(KeyCode::F(5), None, Action::Copy),
        KeyBinding::new(KeyCode::Char('y'), none, Action::Copy),
        KeyBinding::new(KeyCode::F(6), None, Action::Move),
        KeyBinding::new(KeyCode::Char('x'), none, Action::Move),
        // Navigation
        KeyBinding::new(KeyCode::Enter, None, Action::EnterSelected),
        KeyBinding::new(KeyCode::Char('l'), none, Action::EnterSelected),
        KeyBinding::new(KeyCode::Right, None, Action::EnterSelected),
        KeyBinding::new(KeyCode::Backspace, None, Action::GoToParent),
        KeyBinding::new(KeyCode::Char('h'), none, Action::GoToParent),
        KeyBinding::new(KeyCode::Left, None, Action::GoToParent),
        KeyBinding::new(KeyCode::Up, None, Action::MoveUp),
        KeyBinding::new(KeyCode::Char('k'), none, Action::MoveUp),
        KeyBinding::new(KeyCode::Down, None, Action::MoveDown),
        KeyBinding::new(KeyCode::Char('j'), none, Action::MoveDown),
        KeyBinding::new(KeyCode::Home, None, Action::GoToTop),
        KeyBinding::new(KeyCode::End, None, Action::GoToBottom),
        KeyBinding::new(KeyCode::PageUp, None, Action::PageUp),
        KeyBinding::new(KeyCode::PageDown, None, Action::PageDown),
        KeyBinding::new(KeyCode::Tab, None, Action::TogglePanel),
        // Selection
        KeyBinding::new(KeyCode::Char(' '), None, Action::ToggleSelection),
        KeyBinding::new(KeyCode::Insert, None, Action::ToggleSelection),
        // System
        KeyBinding::new(KeyCode::Char('q'), none, Action::Quit),
        KeyBinding::new(KeyCode::F(10), None, Action::Quit),
        KeyBinding::new(KeyCode::Char('c'), ctrl, Action::Quit),
        KeyBinding::new(KeyCode::Char('r'), ctrl, Action::Refresh),
    ]
}

static DEFAULT_BINDINGS: LazyLock<Vec<KeyBinding>> = LazyLock::new(build_default_bindings);

/// 키 → 액션 디스패치 테이블
#[derive(Debug, Clone, PartialEq)]
pub struct Keymap {
    bindings: Vec<KeyBinding>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            bindings: DEFAULT_BINDINGS.clone(),
        }
    }
}

impl Keymap {
    /// 설정 파일의 `action_id = "키"` 목록을 기본값 위에 적용
    ///
    /// 재정의된 액션은 기본 바인딩을 모두 잃는다.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Result<Self> {
        let mut custom = Vec::with_capacity(overrides.len());
        for (id, spec) in overrides {
            let action = Action::from_id(id)
                .ok_or_else(|| TwinPaneError::Config(format!("unknown action '{}'", id)))?;
            let (code, modifiers) = parse_key_spec(spec).ok_or_else(|| {
                TwinPaneError::Config(format!("invalid key '{}' for action '{}'", spec, id))
            })?;
            let modifiers = if modifiers.is_empty() && !matches!(code, KeyCode::Char(_)) {
                None
            } else {
                Some(modifiers)
            };
            custom.push(KeyBinding::new(code, modifiers, action));
        }

        // 재정의 바인딩이 먼저 검사되도록 앞에 둔다
        let mut bindings = custom;
        bindings.extend(
            DEFAULT_BINDINGS
                .iter()
                .filter(|b| !bindings_override(overrides, b.action))
                .cloned(),
        );
        Ok(Self { bindings })
    }

    /// 키 입력으로 액션 조회
    pub fn find_action(&self, modifiers: KeyModifiers, code: KeyCode) -> Option<Action> {
        self.bindings
            .iter()
            .find(|binding| binding.matches(modifiers, code))
            .map(|binding| binding.action)
    }

    /// 액션의 대표 단축키 표시 문자열 (첫 번째 바인딩)
    pub fn shortcut_label(&self, action: Action) -> Option<String> {
        self.bindings
            .iter()
            .find(|b| b.action == action)
            .map(|b| format_key(b.code, b.modifiers.unwrap_or(KeyModifiers::NONE)))
    }

    /// 커맨드바용 항목 생성 (priority 순 정렬)
    pub fn command_bar_items(&self) -> Vec<CommandItem> {
        let mut entries: Vec<(&CommandBarEntry, &ActionDef)> = ACTION_DEFS
            .iter()
            .filter_map(|def| def.command_bar.as_ref().map(|cb| (cb, def)))
            .collect();

        entries.sort_by_key(|(cb, _)| cb.priority);

        entries
            .into_iter()
            .filter_map(|(cb, def)| {
                self.shortcut_label(def.action)
                    .map(|key| CommandItem::new(key, cb.label))
            })
            .collect()
    }
}

fn bindings_override(overrides: &BTreeMap<String, String>, action: Action) -> bool {
    action
        .def()
        .is_some_and(|def| overrides.contains_key(def.id))
}

/// "Ctrl+R", "F8", "Delete", "x" 같은 키 표기 파싱
pub fn parse_key_spec(spec: &str) -> Option<(KeyCode, KeyModifiers)> {
    let spec = spec.trim();
    if spec.is_empty() {
        return None;
    }

    let mut modifiers = KeyModifiers::NONE;
    // "Ctrl++" 처럼 키 자체가 '+'인 경우
    let (prefix, key) = match spec.strip_suffix("++") {
        Some(rest) => (Some(rest), "+"),
        None => match spec.rsplit_once('+') {
            Some((rest, key)) => (Some(rest), key),
            None => (None, spec),
        },
    };

    if let Some(prefix) = prefix {
        for modifier in prefix.split('+') {
            match modifier.trim().to_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
    }

    let code = match parse_key_code(key.trim())? {
        // 터미널은 Ctrl/Alt 조합 문자를 소문자로 보낸다
        KeyCode::Char(c)
            if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                && !modifiers.contains(KeyModifiers::SHIFT) =>
        {
            KeyCode::Char(c.to_ascii_lowercase())
        }
        code => code,
    };
    Some((code, modifiers))
}

fn parse_key_code(key: &str) -> Option<KeyCode> {
    let lower = key.to_lowercase();

    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        if (1..=12).contains(&n) {
            return Some(KeyCode::F(n));
        }
    }

    let code = match lower.as_str() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" | "bs" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "insert" | "ins" => KeyCode::Insert,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "space" => KeyCode::Char(' '),
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    Some(code)
}

/// 커맨드바/도움말용 키 표시
pub fn format_key(code: KeyCode, modifiers: KeyModifiers) -> String {
    let key = match code {
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::Insert => "Ins".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        other => format!("{:?}", other),
    };

    let mut parts = Vec::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl".to_string());
    }
    if modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt".to_string());
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift".to_string());
    }
    parts.push(key);
    parts.join("+")
}
