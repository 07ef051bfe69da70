//! Core data models shared by the session and its front-ends.

mod file;
mod message;

pub use file::{format_file_size, FileHandle, FileId, SelectedFile};
pub use message::{MessageKind, StatusMessage};
