use std::time::Instant;

use crate::error::TimerError;
use crate::timer::Timer;

impl Timer {
    /// Runs `f` once under a private start/stop pair and reports the elapsed
    /// time. The timestamp pair is taken strictly around the call, so the
    /// measurement excludes rendering and logging overhead, and `f`'s result
    /// is passed through unchanged.
    ///
    /// The shared idle/running state is untouched: `time` works whether the
    /// timer is idle or running, and reentrant calls do not conflict. If `f`
    /// panics, the panic propagates and nothing is reported for that call.
    pub fn time<T>(&self, f: impl FnOnce() -> T) -> Result<T, TimerError> {
        let started = Instant::now();
        let ret = f();
        let elapsed = started.elapsed();
        self.reporter.report(elapsed)?;
        Ok(ret)
    }

    /// Wraps `f` so that every call is timed and reported independently.
    ///
    /// The name, message and logger are snapshotted when `wrap` is called;
    /// the returned function no longer borrows the timer. Each call pairs
    /// its own start and stop, so calling the wrapper N times produces
    /// exactly N report lines and concurrent calls never conflict.
    pub fn wrap<A, R>(&self, f: impl Fn(A) -> R) -> impl Fn(A) -> Result<R, TimerError> {
        let reporter = self.reporter.clone();
        move |arg| {
            let started = Instant::now();
            let ret = f(arg);
            let elapsed = started.elapsed();
            reporter.report(elapsed)?;
            Ok(ret)
        }
    }
}

/// Times every method of an inherent impl block.
///
/// The timer expression on the left of `=>` is evaluated once per call, and
/// each call measures itself with a private start/stop pair, so reentrant
/// and concurrent invocations do not conflict and every call produces one
/// report line. Method signatures are kept as written.
///
/// ```
/// use lapse::{timed_methods, Timer};
///
/// struct Calculator;
///
/// timed_methods! {
///     Timer::new().with_name("calc").with_message("{name}: {seconds:.4f}") => impl Calculator {
///         fn add(&self, a: i64, b: i64) -> i64 {
///             a + b
///         }
///     }
/// }
///
/// assert_eq!(Calculator.add(1, 2), 3);
/// ```
///
/// # Panics
///
/// Generated methods keep their original return types, so a message
/// template that fails to render panics. Use [`Timer::time`] or
/// [`Timer::wrap`] to handle rendering failures as values.
#[macro_export]
macro_rules! timed_methods {
    (
        $timer:expr => impl $ty:ty {
            $(
                $(#[$meta:meta])*
                $vis:vis fn $name:ident $args:tt $(-> $ret:ty)? $body:block
            )*
        }
    ) => {
        impl $ty {
            $(
                $(#[$meta])*
                $vis fn $name $args $(-> $ret)? {
                    let timer: $crate::Timer = $timer;
                    match timer.time(|| $body) {
                        Ok(ret) => ret,
                        Err(err) => panic!("{}", err),
                    }
                }
            )*
        }
    };
}
