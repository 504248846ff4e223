//! Clock-style duration parsing.

use std::time::Duration;
use thiserror::Error;

/// Error for a string that is not a recognized duration shape.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid duration string '{0}'")]
pub struct ParseDurationError(pub String);

/// Parses `H:MM:SS`, `MM:SS`, or `SS` (fractional seconds allowed) into a
/// duration. The literal `N/A` parses to `None`.
pub fn parse_duration(s: &str) -> Result<Option<Duration>, ParseDurationError> {
    if s == "N/A" {
        return Ok(None);
    }

    let parts: Vec<f64> = s
        .split(':')
        .map(|part| part.parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| ParseDurationError(s.to_string()))?;

    let seconds = match parts[..] {
        [hours, minutes, seconds] => hours * 3600.0 + minutes * 60.0 + seconds,
        [minutes, seconds] => minutes * 60.0 + seconds,
        [seconds] => seconds,
        _ => return Err(ParseDurationError(s.to_string())),
    };
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(ParseDurationError(s.to_string()));
    }

    Ok(Some(Duration::from_secs_f64(seconds)))
}
