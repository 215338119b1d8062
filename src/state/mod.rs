mod file;

pub use file::FileStore;

use crate::error::StateError;
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Persisted posting switch. `Active` is the normal state; `Disabled` blocks
/// every run until a human clears it via the `enable` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum KillSwitch {
    Active,
    Disabled {
        reason: String,
        since: NaiveDate,
    },
}

impl KillSwitch {
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled { .. })
    }
}

/// One row of the append-only engagement log.
#[derive(Debug, Clone)]
pub struct EngagementEntry {
    pub date: String,
    pub time: String,
    pub scene: String,
    pub text: String,
    pub status: String,
}

impl EngagementEntry {
    pub fn new(now: DateTime<Tz>, scene: &str, text: &str, status: &str) -> Self {
        Self {
            date: now.format("%Y-%m-%d").to_string(),
            time: now.format("%H:%M:%S").to_string(),
            scene: scene.to_string(),
            text: text.to_string(),
            status: status.to_string(),
        }
    }
}

/// Storage interface for every persisted fact the bot tracks. File-backed in
/// production; the seam exists so an embedded database or remote key-value
/// store could replace it without touching the gate or pipeline.
pub trait StateStore {
    fn daily_marker(&self) -> Result<Option<NaiveDate>, StateError>;
    fn set_daily_marker(&self, date: NaiveDate) -> Result<(), StateError>;

    /// Count of successful generations for a `"YYYY-MM"` key.
    fn monthly_count(&self, month: &str) -> Result<u32, StateError>;
    fn increment_monthly(&self, month: &str) -> Result<(), StateError>;

    fn content_history(&self) -> Result<HashMap<String, NaiveDate>, StateError>;
    fn mark_content_used(&self, text: &str, date: NaiveDate) -> Result<(), StateError>;

    fn scene_history(&self) -> Result<HashMap<String, NaiveDate>, StateError>;
    fn mark_scene_used(&self, name: &str, date: NaiveDate) -> Result<(), StateError>;

    /// Holiday names already posted in the given year.
    fn holiday_ledger(&self, year: i32) -> Result<Vec<String>, StateError>;
    fn mark_holiday_used(&self, year: i32, name: &str) -> Result<(), StateError>;

    fn kill_switch(&self) -> Result<KillSwitch, StateError>;
    fn set_kill_switch(&self, switch: &KillSwitch) -> Result<(), StateError>;

    fn append_engagement(&self, entry: &EngagementEntry) -> Result<(), StateError>;
    fn append_error(&self, timestamp: &str, message: &str) -> Result<(), StateError>;
}
