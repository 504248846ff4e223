//! In-memory capture of emitted lines, for tests.
//!
//! While a capture is active every line that would have reached stderr is
//! collected into a buffer instead. Capture state is process-global, so
//! tests that use it must not run concurrently (mark them `#[serial]`).

use once_cell::sync::Lazy;
use std::sync::Mutex;

static BUFFER: Lazy<Mutex<Option<Vec<String>>>> = Lazy::new(|| Mutex::new(None));

/// Records a line into the active capture, if any.
///
/// Returns true when the line was captured (and must not be written out).
pub(crate) fn push(line: &str) -> bool {
    let mut buffer = BUFFER.lock().expect("capture buffer poisoned");
    match buffer.as_mut() {
        Some(lines) => {
            lines.push(line.to_string());
            true
        }
        None => false,
    }
}

/// Runs `f` with capture enabled and returns the lines it emitted.
pub fn capture<F: FnOnce()>(f: F) -> Vec<String> {
    struct Reset;
    impl Drop for Reset {
        fn drop(&mut self) {
            if let Ok(mut buffer) = BUFFER.lock() {
                *buffer = None;
            }
        }
    }

    {
        let mut buffer = BUFFER.lock().expect("capture buffer poisoned");
        *buffer = Some(Vec::new());
    }
    let reset = Reset;
    f();
    let lines = {
        let mut buffer = BUFFER.lock().expect("capture buffer poisoned");
        buffer.take().unwrap_or_default()
    };
    drop(reset);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Log, LogLevel, Logger};
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_capture_collects_lines() {
        let lines = capture(|| {
            let logger = Logger::new("cap", LogLevel::Debug);
            logger.info("one");
            logger.info("two");
        });
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("one"));
        assert!(lines[1].contains("two"));
    }

    #[test]
    #[serial]
    fn test_capture_resets_after_run() {
        capture(|| {});
        assert!(!push("stray line"));
    }
}
