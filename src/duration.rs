use crate::error::{AppError, Result};

/// A helix compact duration (`"1d2h3m4s"`) broken into its calendar
/// components. Any unit may be absent; absent units are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DurationParts {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl DurationParts {
    pub fn total_seconds(&self) -> i64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }
}

/// Parse a compact duration string. Each of `d`, `h`, `m`, `s` is optional;
/// when present, its value is the integer substring between the previous
/// unit marker (or the start of the string) and the marker itself.
pub fn parse(src: &str) -> Result<DurationParts> {
    Ok(DurationParts {
        days: component(src, 'd', None)?,
        hours: component(src, 'h', Some('d'))?,
        minutes: component(src, 'm', Some('h'))?,
        seconds: component(src, 's', Some('m'))?,
    })
}

fn component(src: &str, marker: char, prev_marker: Option<char>) -> Result<i64> {
    let Some(end) = src.find(marker) else {
        return Ok(0);
    };
    let start = prev_marker
        .and_then(|m| src.find(m))
        .map(|i| i + 1)
        .unwrap_or(0);
    if start > end {
        return Err(AppError::MalformedDuration(src.to_string()));
    }
    src[start..end]
        .parse::<i64>()
        .map_err(|_| AppError::MalformedDuration(src.to_string()))
}
