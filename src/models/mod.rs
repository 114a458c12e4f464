// Data Models
pub mod directory_entry;
pub mod pane_state;

pub use directory_entry::{DirectoryEntry, EntryKind};
pub use pane_state::{PaneId, PaneState};
