//! Stopwatch display formatting.
//!
//! All formats truncate to hundredths of a second; 1235 ms renders as `.23`.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display mode for a millisecond duration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeFormat {
    /// `m:ss.cc`, sign dropped.
    #[default]
    Full,
    /// `ss.cc` over the total elapsed seconds, sign dropped.
    Seconds,
    /// `±ss.cc` with seconds modulo 60; minutes are not shown.
    Diff,
    /// `±ss` over the total elapsed seconds.
    DiffSeconds,
}

impl TimeFormat {
    /// Resolve a format name. Unknown names fall back to [`TimeFormat::Full`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "seconds" => Self::Seconds,
            "diff" => Self::Diff,
            "diff-seconds" => Self::DiffSeconds,
            _ => Self::Full,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Seconds => "seconds",
            Self::Diff => "diff",
            Self::DiffSeconds => "diff-seconds",
        }
    }
}

impl FromStr for TimeFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format a (possibly negative) millisecond duration.
///
/// Only the diff formats carry a sign, and it is taken from `milliseconds`
/// itself: `-5` renders as `-00.00` in [`TimeFormat::Diff`].
pub fn format_time(milliseconds: i64, format: TimeFormat) -> String {
    let abs_ms = milliseconds.unsigned_abs();
    let total_seconds = abs_ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    let centiseconds = (abs_ms % 1000) / 10;
    let sign = if milliseconds < 0 { '-' } else { '+' };

    match format {
        TimeFormat::Full => format!("{}:{:02}.{:02}", minutes, seconds, centiseconds),
        TimeFormat::Seconds => format!("{:02}.{:02}", total_seconds, centiseconds),
        TimeFormat::Diff => format!("{}{:02}.{:02}", sign, seconds, centiseconds),
        TimeFormat::DiffSeconds => format!("{}{:02}", sign, total_seconds),
    }
}

/// [`format_time`] with the format given by name.
pub fn format_time_str(milliseconds: i64, format: &str) -> String {
    format_time(milliseconds, TimeFormat::from_name(format))
}

/// Parse a [`TimeFormat::Full`] string back into milliseconds.
///
/// Returns `None` unless the input is exactly `m:ss.cc` with seconds below 60.
pub fn parse_time(text: &str) -> Option<i64> {
    let (minutes, rest) = text.split_once(':')?;
    let (seconds, centiseconds) = rest.split_once('.')?;

    if minutes.is_empty() || seconds.len() != 2 || centiseconds.len() != 2 {
        return None;
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(minutes) || !all_digits(seconds) || !all_digits(centiseconds) {
        return None;
    }

    let minutes: i64 = minutes.parse().ok()?;
    let seconds: i64 = seconds.parse().ok()?;
    let centiseconds: i64 = centiseconds.parse().ok()?;
    if seconds >= 60 {
        return None;
    }

    minutes
        .checked_mul(60)?
        .checked_add(seconds)?
        .checked_mul(1000)?
        .checked_add(centiseconds * 10)
}
