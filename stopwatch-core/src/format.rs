//! Time display formatting. Every component is truncated, never rounded.

use std::fmt;

const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;

/// Zero-padded display components of an elapsed time.
///
/// `milliseconds` holds centiseconds (two digits). Hours beyond 99 widen
/// the field rather than wrapping.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FormattedTime {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    pub milliseconds: String,
}

impl FormattedTime {
    pub fn has_hours(&self) -> bool {
        self.hours.bytes().any(|b| b != b'0')
    }

    /// "MM:SS.cc", dropping the hours block.
    pub fn compact(&self) -> String {
        format!("{}:{}.{}", self.minutes, self.seconds, self.milliseconds)
    }
}

impl fmt::Display for FormattedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}.{}",
            self.hours, self.minutes, self.seconds, self.milliseconds
        )
    }
}

pub fn format(ms: u64) -> FormattedTime {
    FormattedTime {
        hours: format!("{:02}", ms / MS_PER_HOUR),
        minutes: format!("{:02}", (ms % MS_PER_HOUR) / MS_PER_MINUTE),
        seconds: format!("{:02}", (ms % MS_PER_MINUTE) / MS_PER_SECOND),
        milliseconds: format!("{:02}", (ms % MS_PER_SECOND) / 10),
    }
}

/// Format milliseconds as "HH:MM:SS.cs" (centiseconds)
pub fn format_hms_cs(ms: u64) -> String {
    format(ms).to_string()
}

/// Format a lap's captured time as "MM:SS.cs". Minutes are not wrapped at
/// the hour, so 75 minutes reads "75:00.00".
pub fn format_lap_time(ms: u64) -> String {
    let m = ms / MS_PER_MINUTE;
    let s = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    let cs = (ms % MS_PER_SECOND) / 10;
    format!("{:02}:{:02}.{:02}", m, s, cs)
}

/// Format a split delta as "+MM:SS.cs" or "-MM:SS.cs". Zero is positive.
pub fn format_delta(delta_ms: i64) -> String {
    let sign = if delta_ms < 0 { '-' } else { '+' };
    format!("{}{}", sign, format_lap_time(delta_ms.unsigned_abs()))
}
