//! Unit tests for the FeedbackManager.

use tabshell::api::schema::InsertFeedback;
use tabshell::database::Database;
use tabshell::managers::feedback_manager::{FeedbackManager, FeedbackManagerTrait};

fn feedback(message: &str, rating: i64) -> InsertFeedback {
    InsertFeedback { message: message.to_string(), rating }
}

#[test]
fn test_create_assigns_increasing_ids() {
    let db = Database::open_in_memory().unwrap();
    let mut mgr = FeedbackManager::new(db.connection());
    let first = mgr.create(&feedback("first", 4)).unwrap();
    let second = mgr.create(&feedback("second", 2)).unwrap();
    assert!(second.id > first.id);
    assert_eq!(first.message, "first");
    assert_eq!(first.rating, 4);
    assert!(first.created_at > 0);
}

#[test]
fn test_list_returns_newest_first() {
    let db = Database::open_in_memory().unwrap();
    let mut mgr = FeedbackManager::new(db.connection());
    mgr.create(&feedback("old", 3)).unwrap();
    mgr.create(&feedback("new", 5)).unwrap();

    let all = mgr.list().unwrap();
    let messages: Vec<_> = all.iter().map(|f| f.message.as_str()).collect();
    assert_eq!(messages, vec!["new", "old"]);
}

#[test]
fn test_list_empty() {
    let db = Database::open_in_memory().unwrap();
    let mgr = FeedbackManager::new(db.connection());
    assert!(mgr.list().unwrap().is_empty());
}
