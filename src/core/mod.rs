// Core Layer
pub mod actions;
pub mod commands;
pub mod controller;
pub mod prompt;
pub mod render;
pub mod transfer;

pub use controller::DualPaneController;
pub use prompt::{MessageLevel, PromptService};
pub use render::{ListingRenderer, PaneView};
pub use transfer::{TransferAction, TransferCoordinator};
