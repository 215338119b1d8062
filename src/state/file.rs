use super::{EngagementEntry, KillSwitch, StateStore};
use crate::error::StateError;
use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const DAILY_MARKER: &str = "last_post.txt";
const MONTHLY_USAGE: &str = "monthly_usage.json";
const CONTENT_HISTORY: &str = "content_history.json";
const SCENE_HISTORY: &str = "scene_history.json";
const HOLIDAY_HISTORY: &str = "holiday_history.json";
const KILL_SWITCH: &str = "kill_switch.json";
const ENGAGEMENT_LOG: &str = "engagement_log.csv";
const ERROR_LOG: &str = "error_log.txt";

const ENGAGEMENT_HEADER: &str = "Date,Time,Scene,Text,Status";

/// Plain-file state store. Every record file is read fully at decision time
/// and rewritten via a temp file + rename so a crash mid-write never leaves a
/// truncated record. Log files are append-only.
pub struct FileStore {
    dir: PathBuf,
}

fn io_err(path: &Path, source: std::io::Error) -> StateError {
    StateError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn write_atomic(&self, name: &str, contents: &str) -> Result<(), StateError> {
        fs::create_dir_all(&self.dir).map_err(|e| io_err(&self.dir, e))?;
        let path = self.path(name);
        let tmp = self.path(&format!("{name}.tmp"));
        fs::write(&tmp, contents).map_err(|e| io_err(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| io_err(&path, e))?;
        Ok(())
    }

    fn read_json<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T, StateError> {
        let path = self.path(name);
        if !path.exists() {
            return Ok(T::default());
        }
        let raw = fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        serde_json::from_str(&raw).map_err(|e| StateError::Corrupt {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StateError> {
        let rendered = serde_json::to_string_pretty(value).map_err(|e| StateError::Corrupt {
            path: self.path(name).display().to_string(),
            message: e.to_string(),
        })?;
        self.write_atomic(name, &rendered)
    }

    fn append_line(&self, name: &str, header: Option<&str>, line: &str) -> Result<(), StateError> {
        fs::create_dir_all(&self.dir).map_err(|e| io_err(&self.dir, e))?;
        let path = self.path(name);
        let fresh = !path.exists();
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| io_err(&path, e))?;
        if fresh {
            if let Some(header) = header {
                writeln!(file, "{header}").map_err(|e| io_err(&path, e))?;
            }
        }
        writeln!(file, "{line}").map_err(|e| io_err(&path, e))?;
        Ok(())
    }

    fn read_date_map(&self, name: &str) -> Result<HashMap<String, NaiveDate>, StateError> {
        let raw: HashMap<String, String> = self.read_json(name)?;
        let mut map = HashMap::with_capacity(raw.len());
        for (key, value) in raw {
            let date = NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|e| {
                StateError::Corrupt {
                    path: self.path(name).display().to_string(),
                    message: format!("bad date '{value}' for '{key}': {e}"),
                }
            })?;
            map.insert(key, date);
        }
        Ok(map)
    }

    fn mark_date(&self, name: &str, key: &str, date: NaiveDate) -> Result<(), StateError> {
        let mut raw: HashMap<String, String> = self.read_json(name)?;
        raw.insert(key.to_string(), date.format("%Y-%m-%d").to_string());
        self.write_json(name, &raw)
    }
}

impl StateStore for FileStore {
    fn daily_marker(&self) -> Result<Option<NaiveDate>, StateError> {
        let path = self.path(DAILY_MARKER);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        let trimmed = raw.trim();
        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|e| {
            StateError::Corrupt {
                path: path.display().to_string(),
                message: format!("bad date '{trimmed}': {e}"),
            }
        })?;
        Ok(Some(date))
    }

    fn set_daily_marker(&self, date: NaiveDate) -> Result<(), StateError> {
        self.write_atomic(DAILY_MARKER, &date.format("%Y-%m-%d").to_string())
    }

    fn monthly_count(&self, month: &str) -> Result<u32, StateError> {
        let usage: HashMap<String, u32> = self.read_json(MONTHLY_USAGE)?;
        Ok(usage.get(month).copied().unwrap_or(0))
    }

    fn increment_monthly(&self, month: &str) -> Result<(), StateError> {
        let mut usage: HashMap<String, u32> = self.read_json(MONTHLY_USAGE)?;
        *usage.entry(month.to_string()).or_insert(0) += 1;
        self.write_json(MONTHLY_USAGE, &usage)
    }

    fn content_history(&self) -> Result<HashMap<String, NaiveDate>, StateError> {
        self.read_date_map(CONTENT_HISTORY)
    }

    fn mark_content_used(&self, text: &str, date: NaiveDate) -> Result<(), StateError> {
        self.mark_date(CONTENT_HISTORY, text, date)
    }

    fn scene_history(&self) -> Result<HashMap<String, NaiveDate>, StateError> {
        self.read_date_map(SCENE_HISTORY)
    }

    fn mark_scene_used(&self, name: &str, date: NaiveDate) -> Result<(), StateError> {
        self.mark_date(SCENE_HISTORY, name, date)
    }

    fn holiday_ledger(&self, year: i32) -> Result<Vec<String>, StateError> {
        let ledger: HashMap<String, Vec<String>> = self.read_json(HOLIDAY_HISTORY)?;
        Ok(ledger.get(&year.to_string()).cloned().unwrap_or_default())
    }

    fn mark_holiday_used(&self, year: i32, name: &str) -> Result<(), StateError> {
        let mut ledger: HashMap<String, Vec<String>> = self.read_json(HOLIDAY_HISTORY)?;
        ledger
            .entry(year.to_string())
            .or_default()
            .push(name.to_string());
        self.write_json(HOLIDAY_HISTORY, &ledger)
    }

    fn kill_switch(&self) -> Result<KillSwitch, StateError> {
        let path = self.path(KILL_SWITCH);
        if !path.exists() {
            return Ok(KillSwitch::Active);
        }
        let raw = fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        serde_json::from_str(&raw).map_err(|e| StateError::Corrupt {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn set_kill_switch(&self, switch: &KillSwitch) -> Result<(), StateError> {
        self.write_json(KILL_SWITCH, switch)
    }

    fn append_engagement(&self, entry: &EngagementEntry) -> Result<(), StateError> {
        let line = [
            entry.date.as_str(),
            entry.time.as_str(),
            entry.scene.as_str(),
            entry.text.as_str(),
            entry.status.as_str(),
        ]
        .iter()
        .map(|field| csv_field(field))
        .collect::<Vec<_>>()
        .join(",");
        self.append_line(ENGAGEMENT_LOG, Some(ENGAGEMENT_HEADER), &line)
    }

    fn append_error(&self, timestamp: &str, message: &str) -> Result<(), StateError> {
        self.append_line(ERROR_LOG, None, &format!("[{timestamp}] ERROR: {message}"))
    }
}
