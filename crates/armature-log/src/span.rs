//! Logged scopes with start/end/duration reporting.

use std::time::{Duration, Instant};

use crate::level::LogLevel;
use crate::logger::{Log, Logger};

/// A logged scope bracketing an operation.
///
/// Opening a span logs `<label> started` at info. Calling
/// [`Span::complete`] logs `<label> completed after <duration>` at info.
/// Dropping a span that was never completed — an early return or a panic
/// unwinding through it — logs `<label> failed after <duration>` at error.
///
/// Timing uses a monotonic clock.
#[derive(Debug)]
pub struct Span {
    logger: Logger,
    label: String,
    start: Instant,
    completed: bool,
}

impl Span {
    pub(crate) fn open(logger: Logger, parts: &[&str]) -> Self {
        let label = if parts.is_empty() {
            "span".to_string()
        } else {
            format!("[{}]", parts.join("/"))
        };
        logger.info(&format!("{label} started"));
        Span {
            logger,
            label,
            start: Instant::now(),
            completed: false,
        }
    }

    /// Time elapsed since the span was opened.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Closes the span successfully.
    pub fn complete(mut self) {
        self.completed = true;
        self.report(LogLevel::Info, "completed");
    }

    fn report(&self, level: LogLevel, disposition: &str) {
        let duration = format_duration(self.start.elapsed());
        self.logger.log(
            level,
            &format!("{} {} after {}", self.label, disposition, duration),
        );
    }
}

impl Drop for Span {
    fn drop(&mut self) {
        if !self.completed {
            self.report(LogLevel::Error, "failed");
        }
    }
}

/// Renders a duration as `H:MM:SS.micros`.
fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    format!(
        "{}:{:02}:{:02}.{:06}",
        total / 3600,
        (total % 3600) / 60,
        total % 60,
        duration.subsec_micros()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::capture;
    use serial_test::serial;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(0)), "0:00:00.000000");
        assert_eq!(
            format_duration(Duration::from_millis(1_500)),
            "0:00:01.500000"
        );
        assert_eq!(
            format_duration(Duration::from_secs(3_600 + 2 * 60 + 3)),
            "1:02:03.000000"
        );
    }

    #[test]
    #[serial]
    fn test_span_completed() {
        let lines = capture(|| {
            let logger = Logger::new("spans", LogLevel::Info);
            let span = logger.span(&["build", "release"]);
            span.complete();
        });
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("[build/release] started"));
        assert!(lines[1].contains("[build/release] completed after"));
        assert!(lines[1].contains("[INFO]"));
    }

    #[test]
    #[serial]
    fn test_span_failed_on_drop() {
        let lines = capture(|| {
            let logger = Logger::new("spans", LogLevel::Info);
            let span = logger.span(&["deploy"]);
            drop(span);
        });
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("[deploy] failed after"));
        assert!(lines[1].contains("[ERROR]"));
    }

    #[test]
    #[serial]
    fn test_unnamed_span_uses_literal_label() {
        let lines = capture(|| {
            let logger = Logger::new("spans", LogLevel::Info);
            logger.span(&[]).complete();
        });
        assert!(lines[0].contains("span started"));
        assert!(lines[1].contains("span completed after"));
    }

    #[test]
    #[serial]
    fn test_in_span_preserves_result() {
        #[derive(Debug, PartialEq)]
        struct MyError(&'static str);

        let logger = Logger::new("spans", LogLevel::Info);

        let lines = capture(|| {
            let ok: Result<u32, MyError> = logger.in_span(&["work"], || Ok(7));
            assert_eq!(ok, Ok(7));
        });
        assert!(lines[1].contains("[work] completed after"));

        let lines = capture(|| {
            let err: Result<u32, MyError> = logger.in_span(&["work"], || Err(MyError("boom")));
            assert_eq!(err, Err(MyError("boom")));
        });
        assert!(lines[1].contains("[work] failed after"));
    }
}
