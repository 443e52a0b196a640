//! Record store: the whole `date-key -> DayLog` mapping as one JSON blob.
//!
//! Reads never fail; a missing or unparseable blob reads as an empty mapping.
//! The mapping is passed in and returned explicitly, nothing is cached here.

use crate::models::{DayLog, DayLogPatch, LogMap};
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};
use tracing::error;

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/life-log.v1.json")
}

#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_all(&self) -> LogMap {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(data) => data,
                Err(err) => {
                    error!("failed to parse record file {}: {err}", self.path.display());
                    LogMap::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => LogMap::new(),
            Err(err) => {
                error!("failed to read record file {}: {err}", self.path.display());
                LogMap::new()
            }
        }
    }

    /// Replaces the stored blob with `all` in a single rename.
    pub fn save_all(&self, all: &LogMap) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let payload = serde_json::to_vec(all).map_err(io::Error::other)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

pub fn get_day(all: &LogMap, key: &str) -> DayLog {
    all.get(key).cloned().unwrap_or_default()
}

pub fn set_day(all: &LogMap, key: &str, day: DayLog) -> LogMap {
    let mut next = all.clone();
    next.insert(key.to_string(), day);
    next
}

pub fn update_day(all: &LogMap, key: &str, patch: DayLogPatch) -> LogMap {
    let mut day = get_day(all, key);
    patch.apply_to(&mut day);
    set_day(all, key, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Todo;

    fn unique_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = env::temp_dir();
        path.push(format!("life_log_{name}_{}_{}", std::process::id(), nanos));
        path.push("records.json");
        path
    }

    fn todo(id: i64, text: &str, done: bool) -> Todo {
        Todo {
            id,
            text: text.to_string(),
            done,
        }
    }

    #[test]
    fn load_missing_file_is_empty() {
        let store = RecordStore::new(unique_path("missing"));
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn load_corrupt_file_is_empty() {
        let path = unique_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"{not json").unwrap();

        let store = RecordStore::new(&path);
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn save_then_load_keeps_mapping() {
        let store = RecordStore::new(unique_path("roundtrip"));
        let day = DayLog {
            wake_time: Some("06:30".into()),
            todos: Some(vec![todo(1, "laundry", false)]),
            ..DayLog::default()
        };
        let all = set_day(&LogMap::new(), "2025-04-01", day.clone());

        store.save_all(&all).unwrap();
        let loaded = store.load_all();
        assert_eq!(get_day(&loaded, "2025-04-01"), day);

        store.save_all(&LogMap::new()).unwrap();
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn stored_blob_uses_camel_case_and_omits_absent_fields() {
        let store = RecordStore::new(unique_path("shape"));
        let day = DayLog {
            study_minutes: Some("90".into()),
            ..DayLog::default()
        };
        store.save_all(&set_day(&LogMap::new(), "2025-04-01", day)).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, r#"{"2025-04-01":{"studyMinutes":"90"}}"#);
    }

    #[test]
    fn get_day_absent_is_empty_record() {
        assert_eq!(get_day(&LogMap::new(), "2025-01-01"), DayLog::default());
    }

    #[test]
    fn set_then_get_returns_value() {
        let day = DayLog {
            memo: Some("sunny".into()),
            ..DayLog::default()
        };
        let all = set_day(&LogMap::new(), "2025-01-01", day.clone());
        assert_eq!(get_day(&all, "2025-01-01"), day);
    }

    #[test]
    fn update_day_is_shallow_merge() {
        let day = DayLog {
            wake_time: Some("07:00".into()),
            steps: Some("4000".into()),
            todos: Some(vec![todo(1, "a", true), todo(2, "b", false)]),
            ..DayLog::default()
        };
        let all = set_day(&LogMap::new(), "2025-01-01", day);

        let patch = DayLogPatch {
            steps: Some("9000".into()),
            todos: Some(vec![todo(3, "c", false)]),
            ..DayLogPatch::default()
        };
        let next = update_day(&all, "2025-01-01", patch);
        let updated = get_day(&next, "2025-01-01");

        assert_eq!(updated.wake_time.as_deref(), Some("07:00"));
        assert_eq!(updated.steps.as_deref(), Some("9000"));
        assert_eq!(updated.todos(), &[todo(3, "c", false)]);
        // input mapping is untouched
        assert_eq!(get_day(&all, "2025-01-01").steps.as_deref(), Some("4000"));
    }

    #[test]
    fn update_day_creates_missing_day() {
        let patch = DayLogPatch {
            weight: Some("52.3".into()),
            ..DayLogPatch::default()
        };
        let next = update_day(&LogMap::new(), "2025-02-02", patch);
        assert_eq!(next.len(), 1);
        assert_eq!(get_day(&next, "2025-02-02").weight.as_deref(), Some("52.3"));
    }
}
