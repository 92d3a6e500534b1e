mod common;
use common::*;
use multicalc::mach::{FileStore, History, HistoryEntry, MemoryStore, Runtime, Store, Theme};

#[test]
fn test_defaults_from_empty_store() {
    let r = Runtime::new(Box::new(MemoryStore::default()));
    assert_eq!(r.theme(), Theme::Dark);
    assert!(r.history().is_empty());
    assert_eq!(r.display(), "0");
}

#[test]
fn test_restores_theme_and_history() {
    let mut store = MemoryStore::default();
    let mut history = History::default();
    history.push(HistoryEntry::new("2+3".to_string(), "5".to_string(), 1));
    store.save("theme", "light").unwrap();
    store.save("history", &history.to_json().unwrap()).unwrap();
    let r = Runtime::new(Box::new(store));
    assert_eq!(r.theme(), Theme::Light);
    assert_eq!(r.history(), &history);
}

#[test]
fn test_corrupt_values_use_defaults() {
    let mut store = MemoryStore::default();
    store.save("theme", "purple").unwrap();
    store.save("history", "[{").unwrap();
    let r = Runtime::new(Box::new(store));
    assert_eq!(r.theme(), Theme::Dark);
    assert!(r.history().is_empty());
}

#[test]
fn test_file_store_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    {
        let mut r = Runtime::new(Box::new(FileStore::open(&path).unwrap()));
        press(&mut r, "2+3= :theme 1/0=");
    }
    let r = Runtime::new(Box::new(FileStore::open(&path).unwrap()));
    assert_eq!(r.theme(), Theme::Light);
    assert_eq!(r.history().len(), 1);
    assert_eq!(r.history().get(0).unwrap().result, "5");
    assert_eq!(r.display(), "0");
}
