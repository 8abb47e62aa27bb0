/// Search history persistence across service instances
mod common;

use std::fs;
use std::sync::Arc;

use chat_search::history::{HISTORY_KEY, MAX_HISTORY};
use chat_search::models::SearchOptions;
use chat_search::storage::{FileStore, KeyValueStore};
use chat_search::{SearchConfig, SearchService};
use tempfile::TempDir;

fn file_service(dir: &TempDir) -> SearchService {
    let store = FileStore::open(dir.path()).unwrap();
    SearchService::new(Arc::new(store), SearchConfig::default())
}

#[test]
fn test_history_survives_restart() {
    let dir = TempDir::new().unwrap();
    {
        let svc = file_service(&dir);
        svc.add_to_search_history("rust lifetimes");
        svc.add_to_search_history("python decorators");
    }

    let svc = file_service(&dir);
    assert_eq!(svc.search_history(), vec!["rust lifetimes", "python decorators"]);
}

#[test]
fn test_history_stored_as_json_array() {
    let dir = TempDir::new().unwrap();
    let svc = file_service(&dir);
    svc.add_to_search_history("a");
    svc.add_to_search_history("b");

    let raw = fs::read_to_string(dir.path().join(format!("{}.json", HISTORY_KEY))).unwrap();
    let parsed: Vec<String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, vec!["a", "b"]);
}

#[test]
fn test_history_capped_at_fifty() {
    let dir = TempDir::new().unwrap();
    let svc = file_service(&dir);
    for i in 0..60 {
        svc.add_to_search_history(&format!("query {}", i));
    }

    let history = file_service(&dir).search_history();
    assert_eq!(history.len(), MAX_HISTORY);
    assert_eq!(history.first().unwrap(), "query 10");
    assert_eq!(history.last().unwrap(), "query 59");
}

#[test]
fn test_repeated_query_moves_to_newest() {
    let dir = TempDir::new().unwrap();
    let svc = file_service(&dir);
    svc.add_to_search_history("one");
    svc.add_to_search_history("two");
    svc.add_to_search_history("one");
    svc.add_to_search_history("one");

    assert_eq!(svc.search_history(), vec!["two", "one"]);
}

#[test]
fn test_clear_removes_persisted_history() {
    let dir = TempDir::new().unwrap();
    let svc = file_service(&dir);
    svc.add_to_search_history("secret project");
    svc.clear_search_history();

    assert!(svc.search_history().is_empty());
    assert!(file_service(&dir).search_history().is_empty());
}

#[test]
fn test_corrupt_history_starts_empty() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    store.set(HISTORY_KEY, "{not json").unwrap();

    let svc = file_service(&dir);
    assert!(svc.search_history().is_empty());
    svc.add_to_search_history("fresh");
    assert_eq!(file_service(&dir).search_history(), vec!["fresh"]);
}

#[test]
fn test_suggestions_history_then_common_terms() {
    let dir = TempDir::new().unwrap();
    let svc = file_service(&dir);
    for q in ["rust traits", "python", "rust macros", "rust async", "rust errors"] {
        svc.add_to_search_history(q);
    }

    let suggestions = svc.get_search_suggestions("RUST");
    assert_eq!(suggestions, vec!["rust errors", "rust async", "rust macros", "rust"]);
    assert!(svc.get_search_suggestions("").is_empty());
}

#[tokio::test]
async fn test_search_records_trimmed_query() {
    let dir = TempDir::new().unwrap();
    let svc = file_service(&dir);
    let convs = common::sample_conversations();
    svc.search(&convs, "  panics  ", &SearchOptions::default()).await;

    assert_eq!(file_service(&dir).search_history(), vec!["panics"]);
}
