pub mod document;
pub mod error;
pub mod task;

pub use document::TaskDocument;
pub use error::TaskDocError;
pub use task::{IssueRef, Notes, Priority, Subtask, Task, TaskId};
