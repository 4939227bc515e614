use thiserror::Error;

/// Errors returned when a timer operation is called in the wrong state, or
/// when rendering the report message fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("Timer is running. Use stop to stop it")]
    NotIdle,

    #[error("Timer is not running. Use start to start it.")]
    NotRunning,

    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Errors produced while rendering a message template. The field set is
/// closed, so anything outside it fails instead of being substituted with
/// garbage or dropped silently.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown message field: {{{0}}}")]
    UnknownField(String),

    #[error("unsupported format spec: {{{0}}}")]
    InvalidSpec(String),

    #[error("unmatched brace in message template")]
    UnmatchedBrace,
}
