use crate::lang::Error;
use serde::{Deserialize, Serialize};

type Result<T> = std::result::Result<T, Error>;

pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub expression: String,
    pub result: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl HistoryEntry {
    pub fn new(expression: String, result: String, timestamp: i64) -> HistoryEntry {
        HistoryEntry {
            expression,
            result,
            timestamp,
        }
    }
}

/// ## Newest first and size limited log

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_LIMIT);
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn get(&self, idx: usize) -> Option<&HistoryEntry> {
        self.entries.get(idx)
    }
    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
    pub fn from_json(s: &str) -> Result<History> {
        let mut history: History = serde_json::from_str(s)?;
        history.entries.truncate(HISTORY_LIMIT);
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: i64) -> HistoryEntry {
        HistoryEntry::new(format!("{}+0", n), n.to_string(), n)
    }

    #[test]
    fn test_newest_first() {
        let mut history = History::default();
        history.push(entry(1));
        history.push(entry(2));
        assert_eq!(history.get(0).unwrap().result, "2");
        assert_eq!(history.get(1).unwrap().result, "1");
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = History::default();
        for n in 0..HISTORY_LIMIT as i64 {
            history.push(entry(n));
        }
        assert_eq!(history.len(), 10);
        assert_eq!(history.get(9).unwrap().timestamp, 0);
        history.push(entry(10));
        assert_eq!(history.len(), 10);
        assert_eq!(history.get(0).unwrap().timestamp, 10);
        assert_eq!(history.get(9).unwrap().timestamp, 1);
    }

    #[test]
    fn test_json_shape() {
        let mut history = History::default();
        history.push(HistoryEntry::new("2+3".to_string(), "5".to_string(), 1700000000000));
        assert_eq!(
            history.to_json().unwrap(),
            r#"[{"expression":"2+3","result":"5","timestamp":1700000000000}]"#
        );
    }

    #[test]
    fn test_from_json_caps_and_rejects_garbage() {
        let entries: Vec<HistoryEntry> = (0..12).map(entry).collect();
        let json = serde_json::to_string(&entries).unwrap();
        assert_eq!(History::from_json(&json).unwrap().len(), HISTORY_LIMIT);
        assert!(History::from_json("{not json").is_err());
    }
}
