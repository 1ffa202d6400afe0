//! Pause event domain types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Second-precision timestamp stored on pause events.
///
/// Always rendered as `%Y-%m-%d_%H:%M:%S` (UTC). The same text is embedded in
/// object store keys, so the format must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PauseTimestamp(NaiveDateTime);

impl PauseTimestamp {
    pub const FORMAT: &'static str = "%Y-%m-%d_%H:%M:%S";

    /// Truncates to whole seconds.
    pub fn from_utc(at: DateTime<Utc>) -> Self {
        let naive = at.naive_utc();
        Self(naive.with_nanosecond(0).unwrap_or(naive))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for PauseTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl FromStr for PauseTimestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s, Self::FORMAT).map(Self)
    }
}

impl Serialize for PauseTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PauseTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Lifecycle state of a pause event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventState {
    Active,
    Resolved,
}

/// A single request to pause a pipeline system.
///
/// While active, the event is persisted twice: a current copy whose existence
/// is the pause signal, and a historical copy kept forever as the audit trail.
/// Resolving fills in `who_cleared`/`time_cleared` on the historical copy and
/// drops the current one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseEvent {
    pub event_id: String,
    pub pipeline_system: String,
    #[serde(default)]
    pub who_paused: String,
    pub time_paused: PauseTimestamp,
    #[serde(default)]
    pub who_cleared: Option<String>,
    #[serde(default)]
    pub time_cleared: Option<PauseTimestamp>,
    #[serde(default)]
    pub pause_reason: String,
}

impl PauseEvent {
    /// Creates a new, active pause event
    pub fn new(
        event_id: impl Into<String>,
        pipeline_system: impl Into<String>,
        who_paused: impl Into<String>,
        time_paused: PauseTimestamp,
        pause_reason: impl Into<String>,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            pipeline_system: pipeline_system.into(),
            who_paused: who_paused.into(),
            time_paused,
            who_cleared: None,
            time_cleared: None,
            pause_reason: pause_reason.into(),
        }
    }

    pub fn state(&self) -> EventState {
        if self.time_cleared.is_some() || self.who_cleared.is_some() {
            EventState::Resolved
        } else {
            EventState::Active
        }
    }

    pub fn is_active(&self) -> bool {
        self.state() == EventState::Active
    }

    /// Marks the event resolved by `who` at `at`.
    pub fn resolve(&mut self, who: impl Into<String>, at: PauseTimestamp) {
        self.who_cleared = Some(who.into());
        self.time_cleared = Some(at);
    }
}
