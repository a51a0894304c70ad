//! Elapsed wall-clock time formatting.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Whole seconds elapsed, formatted as `Elapsed time 3725s -> 01:02:05`.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use ml_history::ElapsedTime;
///
/// let elapsed = ElapsedTime::from_duration(Duration::from_secs(3725));
/// assert_eq!(elapsed.to_string(), "Elapsed time 3725s -> 01:02:05");
/// assert_eq!(elapsed.short(), "3725s");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct ElapsedTime {
    /// Total whole seconds.
    pub secs: u64,
}

impl ElapsedTime {
    /// Creates from a number of whole seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self { secs }
    }

    /// Creates from a duration, truncating sub-second precision.
    #[must_use]
    pub const fn from_duration(duration: Duration) -> Self {
        Self {
            secs: duration.as_secs(),
        }
    }

    /// Time elapsed since `start`.
    #[must_use]
    pub fn since(start: Instant) -> Self {
        Self::from_duration(start.elapsed())
    }

    /// Whole hours.
    #[must_use]
    pub const fn hours(&self) -> u64 {
        self.secs / 3600
    }

    /// Minutes past the hour.
    #[must_use]
    pub const fn minutes(&self) -> u64 {
        (self.secs % 3600) / 60
    }

    /// Seconds past the minute.
    #[must_use]
    pub const fn seconds(&self) -> u64 {
        self.secs % 60
    }

    /// Compact form used in run labels, e.g. `"125s"`.
    #[must_use]
    pub fn short(&self) -> String {
        format!("{}s", self.secs)
    }

    /// Clock form `HH:MM:SS`. Hours are not wrapped at 24.
    #[must_use]
    pub fn clock(&self) -> String {
        format!(
            "{:02}:{:02}:{:02}",
            self.hours(),
            self.minutes(),
            self.seconds()
        )
    }
}

impl From<Duration> for ElapsedTime {
    fn from(duration: Duration) -> Self {
        Self::from_duration(duration)
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Elapsed time {}s -> {}", self.secs, self.clock())
    }
}

/// Formats the time elapsed since `start`.
///
/// # Example
///
/// ```
/// use std::time::Instant;
///
/// let t0 = Instant::now();
/// let message = ml_history::elapsed_since(t0);
/// assert!(message.starts_with("Elapsed time "));
/// ```
#[must_use]
pub fn elapsed_since(start: Instant) -> String {
    ElapsedTime::since(start).to_string()
}
