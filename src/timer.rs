use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::TimerError;
use crate::template;

/// Callback that receives the report line of each finished measurement.
pub type Logger = Arc<dyn Fn(&str) + Send + Sync>;

pub(crate) const DEFAULT_MESSAGE: &str = "Elapsed time: {:.4f} seconds";

/// The name/message/logger triple bound to a timer. Wrapped functions clone
/// it at decoration time so every call can report without touching the
/// shared idle/running state.
#[derive(Clone)]
pub(crate) struct Reporter {
    pub(crate) name: Option<String>,
    pub(crate) message: String,
    pub(crate) logger: Logger,
}

impl Reporter {
    /// Renders the message for one elapsed interval and invokes the logger
    /// exactly once.
    pub(crate) fn report(&self, elapsed: Duration) -> Result<(), TimerError> {
        let line = template::render(&self.message, self.name.as_deref(), elapsed.as_secs_f64())?;
        (self.logger)(&line);
        Ok(())
    }
}

/// Measures the elapsed time between a start and a stop event and reports it
/// through the configured logger.
///
/// A timer is either idle or running, and exactly one start/stop pair may be
/// open at a time. Use it explicitly with [`Timer::start`]/[`Timer::stop`],
/// tied to a scope with [`Timer::scoped`], or around individual calls with
/// [`Timer::time`]/[`Timer::wrap`]. The clock is [`Instant`], so elapsed
/// durations are monotonic and never negative.
///
/// One instance is meant to be driven by one logical flow at a time; there
/// is no internal locking. The call-wrapping mode never shares the
/// idle/running state, so wrapped functions may be invoked concurrently.
pub struct Timer {
    pub(crate) reporter: Reporter,
    start_time: Option<Instant>,
}

impl Timer {
    /// Creates an idle timer with no name, the default message
    /// `"Elapsed time: {:.4f} seconds"` and a logger printing to stdout.
    pub fn new() -> Timer {
        Timer {
            reporter: Reporter {
                name: None,
                message: DEFAULT_MESSAGE.to_string(),
                logger: crate::loggers::stdout(),
            },
            start_time: None,
        }
    }

    /// Sets the label substituted for `{name}` in the message.
    pub fn with_name(mut self, name: impl Into<String>) -> Timer {
        self.reporter.name = Some(name.into());
        self
    }

    /// Sets the report message template. Recognized fields: positional `{}`,
    /// `{name}`, `{seconds}`, `{milliseconds}` and `{minutes}`, with an
    /// optional fixed precision like `{seconds:.3f}`. A template referencing
    /// anything else makes the report step fail.
    pub fn with_message(mut self, message: impl Into<String>) -> Timer {
        self.reporter.message = message.into();
        self
    }

    /// Replaces the logger that receives each report line.
    pub fn with_logger(mut self, logger: impl Fn(&str) + Send + Sync + 'static) -> Timer {
        self.reporter.logger = Arc::new(logger);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.reporter.name.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.reporter.message
    }

    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }

    /// Starts the timer. Fails with [`TimerError::NotIdle`] if it is already
    /// running.
    pub fn start(&mut self) -> Result<(), TimerError> {
        if self.start_time.is_some() {
            return Err(TimerError::NotIdle);
        }
        self.start_time = Some(Instant::now());
        Ok(())
    }

    /// Stops the timer and reports the elapsed time through the logger.
    /// Fails with [`TimerError::NotRunning`] if the timer is idle.
    ///
    /// The timer returns to idle before the message is rendered, so a
    /// template error out of `stop` leaves it stopped.
    pub fn stop(&mut self) -> Result<(), TimerError> {
        let started = self.start_time.take().ok_or(TimerError::NotRunning)?;
        self.reporter.report(started.elapsed())
    }

    /// Starts the timer and returns a guard that stops it when dropped, on
    /// every exit path out of the enclosing scope. A failure to start (timer
    /// already running) propagates and no guard is produced.
    pub fn scoped(&mut self) -> Result<TimerGuard<'_>, TimerError> {
        self.start()?;
        Ok(TimerGuard {
            timer: self,
            finished: false,
        })
    }
}

impl Default for Timer {
    fn default() -> Timer {
        Timer::new()
    }
}

impl std::fmt::Debug for Timer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timer")
            .field("name", &self.reporter.name)
            .field("message", &self.reporter.message)
            .field("running", &self.start_time.is_some())
            .finish()
    }
}

/// Guard returned by [`Timer::scoped`]. Dereferences to the timer so the
/// enclosing block can inspect its name and message; the elapsed time of the
/// open interval is not observable.
pub struct TimerGuard<'a> {
    timer: &'a mut Timer,
    finished: bool,
}

impl TimerGuard<'_> {
    /// Stops the timer now instead of at end of scope, surfacing a message
    /// rendering failure that the implicit drop would have to discard.
    pub fn finish(mut self) -> Result<(), TimerError> {
        self.finished = true;
        self.timer.stop()
    }
}

impl std::ops::Deref for TimerGuard<'_> {
    type Target = Timer;

    fn deref(&self) -> &Timer {
        self.timer
    }
}

impl Drop for TimerGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            // Destructors cannot fail; finish() is the path that surfaces
            // rendering errors.
            let _ = self.timer.stop();
        }
    }
}
