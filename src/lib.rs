pub mod error;
pub mod loggers;
mod template;
pub mod timer;
mod wrap;

pub use error::{TemplateError, TimerError};
pub use timer::{Logger, Timer, TimerGuard};
