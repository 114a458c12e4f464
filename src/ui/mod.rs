// UI Layer
pub mod components;
pub mod layout;
pub mod prompt;
pub mod renderer;
pub mod theme;

pub use components::{CommandBar, CommandItem, StatusBar, WarningScreen};
pub use layout::{LayoutManager, LayoutMode};
pub use prompt::TerminalPrompt;
pub use renderer::FrameRenderer;
pub use theme::Theme;
