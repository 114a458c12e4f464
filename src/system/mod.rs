// System Layer
pub mod filesystem;

#[cfg(test)]
pub mod mock;

pub use filesystem::{FileSystem, FilesystemGateway};
