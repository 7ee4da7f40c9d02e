//! Unit tests for the HistoryManager.

use tabshell::api::schema::InsertHistory;
use tabshell::database::Database;
use tabshell::managers::history_manager::{HistoryManager, HistoryManagerTrait};

fn visit(url: &str, title: Option<&str>) -> InsertHistory {
    InsertHistory {
        url: url.to_string(),
        title: title.map(str::to_string),
    }
}

#[test]
fn test_create_returns_record() {
    let db = Database::open_in_memory().unwrap();
    let mut mgr = HistoryManager::new(db.connection());
    let record = mgr.create(&visit("https://a.example", Some("A"))).unwrap();
    assert!(record.id > 0);
    assert_eq!(record.url, "https://a.example");
    assert_eq!(record.title.as_deref(), Some("A"));
    assert!(record.timestamp > 0);
}

#[test]
fn test_each_visit_is_a_row() {
    let db = Database::open_in_memory().unwrap();
    let mut mgr = HistoryManager::new(db.connection());
    mgr.create(&visit("https://a.example", None)).unwrap();
    mgr.create(&visit("https://a.example", None)).unwrap();
    assert_eq!(mgr.list().unwrap().len(), 2);
}

#[test]
fn test_list_newest_first() {
    let db = Database::open_in_memory().unwrap();
    let mut mgr = HistoryManager::new(db.connection());
    mgr.create(&visit("https://a.example", None)).unwrap();
    mgr.create(&visit("https://b.example", None)).unwrap();
    mgr.create(&visit("https://c.example", None)).unwrap();

    let urls: Vec<_> = mgr.list().unwrap().into_iter().map(|r| r.url).collect();
    assert_eq!(urls, vec!["https://c.example", "https://b.example", "https://a.example"]);
}

#[test]
fn test_clear_all() {
    let db = Database::open_in_memory().unwrap();
    let mut mgr = HistoryManager::new(db.connection());
    mgr.create(&visit("https://a.example", None)).unwrap();
    mgr.clear_all().unwrap();
    assert!(mgr.list().unwrap().is_empty());
}
