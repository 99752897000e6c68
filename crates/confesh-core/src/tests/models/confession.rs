use crate::{Confession, Identity, NewConfession};

use chrono::Utc;

fn sample(author_id: Option<&str>, is_anonymous: bool) -> Confession {
    Confession {
        id: Some("doc-1".to_string()),
        content: "I never read the syllabus".to_string(),
        created_at: Utc::now(),
        updated_at: None,
        is_anonymous,
        author: "Maria".to_string(),
        author_id: author_id.map(String::from),
    }
}

#[test]
fn test_from_new_assigns_id() {
    let identity = Identity::new("uid-1", Some("Maria".to_string()));
    let new = NewConfession::new("hello".to_string(), false, &identity).unwrap();
    let created_at = new.created_at;

    let confession = Confession::from_new("doc-9".to_string(), new);

    assert_eq!(confession.id.as_deref(), Some("doc-9"));
    assert_eq!(confession.author_id.as_deref(), Some("uid-1"));
    assert_eq!(confession.created_at, created_at);
    assert!(confession.updated_at.is_none());
}

#[test]
fn test_display_author() {
    assert_eq!(sample(Some("uid-1"), false).display_author(), "Maria");
    assert_eq!(sample(Some("uid-1"), true).display_author(), "Anonymous");
}

#[test]
fn test_is_owned_by() {
    let owner = Identity::new("uid-1", None);
    let other = Identity::new("uid-2", None);
    let confession = sample(Some("uid-1"), true);

    assert!(confession.is_owned_by(Some(&owner)));
    assert!(!confession.is_owned_by(Some(&other)));
    assert!(!confession.is_owned_by(None));
}

#[test]
fn test_record_without_author_id_is_owned_by_nobody() {
    let identity = Identity::new("uid-1", None);
    assert!(!sample(None, false).is_owned_by(Some(&identity)));
}

#[test]
fn test_serde_round_trip_keeps_fields() {
    let confession = sample(Some("uid-1"), false);
    let json = serde_json::to_string(&confession).unwrap();
    let parsed: Confession = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, confession);
}
