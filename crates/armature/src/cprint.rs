//! Colorized line printing.

use console::Style;
use std::io::Write;

/// Writes `message` plus a newline through `style`.
///
/// Styling follows console's terminal detection, so piped output stays
/// plain. Write failures are ignored — this is last-resort reporting.
pub fn cprint(style: &Style, writer: &mut dyn Write, message: &str) {
    let _ = writeln!(writer, "{}", style.apply_to(message));
}
