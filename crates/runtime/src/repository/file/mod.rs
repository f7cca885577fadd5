//! File-based repository implementations.

mod history;
mod log;
mod save;

pub use history::FileHistoryRepository;
pub use log::FileLogSink;
pub use save::FileSaveRepository;
