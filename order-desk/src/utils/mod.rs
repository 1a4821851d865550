//! 工具模块 - 日志、错误

pub mod error;
pub mod logger;

pub use error::{DeskError, DeskResult};
pub use logger::{init_logger, init_logger_with_file};
