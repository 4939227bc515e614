use std::sync::Arc;

use crate::timer::Logger;

/// The default logger: writes each report as a line to standard output.
pub fn stdout() -> Logger {
    Arc::new(|line: &str| println!("{}", line))
}

/// Writes each report as a line to standard error.
pub fn stderr() -> Logger {
    Arc::new(|line: &str| eprintln!("{}", line))
}

/// Forwards each report to the `log` facade at info level, for programs
/// that route output through a log backend instead of plain stdout.
pub fn log_info() -> Logger {
    Arc::new(|line: &str| log::info!("{}", line))
}
