use crate::firebase::firestore::{
    Document, ListDocumentsResponse, encode_content_update, encode_new,
};

use confesh_core::{Identity, NewConfession};

use chrono::{TimeZone, Utc};
use serde_json::json;

fn document(fields: serde_json::Value) -> Document {
    serde_json::from_value(json!({
        "name": "projects/confesh/databases/(default)/documents/confessions/abc123",
        "fields": fields,
        "createTime": "2025-01-02T03:04:05.000000Z",
        "updateTime": "2025-01-02T03:04:05.000000Z"
    }))
    .unwrap()
}

#[test]
fn test_document_id_is_last_name_segment() {
    let doc = document(json!({}));
    assert_eq!(doc.id().unwrap(), "abc123");
}

#[test]
fn test_document_without_id_is_rejected() {
    let doc: Document = serde_json::from_value(json!({ "name": "" })).unwrap();
    assert!(doc.id().is_err());
}

#[test]
fn test_full_document_decodes_every_field() {
    let doc = document(json!({
        "content": { "stringValue": "I skipped chapel" },
        "createdAt": { "timestampValue": "2025-01-02T03:04:05.123456Z" },
        "updatedAt": { "timestampValue": "2025-01-03T00:00:00Z" },
        "isAnonymous": { "booleanValue": true },
        "author": { "stringValue": "Anonymous" },
        "authorId": { "stringValue": "uid-1" }
    }));

    let confession = doc.into_confession().unwrap();

    assert_eq!(confession.id.as_deref(), Some("abc123"));
    assert_eq!(confession.content, "I skipped chapel");
    assert_eq!(
        confession.created_at,
        Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()
            + chrono::Duration::microseconds(123_456)
    );
    assert_eq!(
        confession.updated_at,
        Some(Utc.with_ymd_and_hms(2025, 1, 3, 0, 0, 0).unwrap())
    );
    assert!(confession.is_anonymous);
    assert_eq!(confession.author, "Anonymous");
    assert_eq!(confession.author_id.as_deref(), Some("uid-1"));
}

#[test]
fn test_sparse_document_gets_defaults() {
    let before = Utc::now();
    let doc = document(json!({ "content": { "stringValue": "legacy post" } }));

    let confession = doc.into_confession().unwrap();

    assert_eq!(confession.content, "legacy post");
    assert!(!confession.is_anonymous);
    assert_eq!(confession.author, "Unknown");
    assert!(confession.author_id.is_none());
    assert!(confession.updated_at.is_none());
    assert!(confession.created_at >= before);
}

#[test]
fn test_bad_timestamp_falls_back_to_now() {
    let before = Utc::now();
    let doc = document(json!({
        "content": { "stringValue": "x" },
        "createdAt": { "timestampValue": "yesterday" }
    }));

    assert!(doc.into_confession().unwrap().created_at >= before);
}

#[test]
fn test_empty_list_response_has_no_documents() {
    let page: ListDocumentsResponse = serde_json::from_value(json!({})).unwrap();
    assert!(page.documents.is_empty());
    assert!(page.next_page_token.is_none());
}

#[test]
fn test_encode_new_writes_typed_fields() {
    let identity = Identity::new("uid-1", Some("Maria".to_string()));
    let mut new = NewConfession::new("hello".to_string(), false, &identity).unwrap();
    new.created_at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();

    let body = encode_new(&new);

    assert_eq!(body["fields"]["content"]["stringValue"], "hello");
    assert_eq!(body["fields"]["isAnonymous"]["booleanValue"], false);
    assert_eq!(body["fields"]["author"]["stringValue"], "Maria");
    assert_eq!(body["fields"]["authorId"]["stringValue"], "uid-1");
    assert_eq!(
        body["fields"]["createdAt"]["timestampValue"],
        "2025-01-02T03:04:05.000000Z"
    );
}

#[test]
fn test_encoded_new_confession_decodes_back() {
    let identity = Identity::new("uid-1", None);
    let mut new = NewConfession::new("hello".to_string(), true, &identity).unwrap();
    new.created_at = Utc.with_ymd_and_hms(2024, 12, 24, 23, 59, 59).unwrap();
    let mut stored = encode_new(&new);
    stored["name"] = json!("projects/p/databases/(default)/documents/confessions/x1");

    let doc: Document = serde_json::from_value(stored).unwrap();
    let confession = doc.into_confession().unwrap();

    assert_eq!(confession.content, new.content);
    assert_eq!(confession.author, "Anonymous");
    assert_eq!(confession.created_at, new.created_at);
}

#[test]
fn test_encode_content_update_only_touches_editable_fields() {
    let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let body = encode_content_update("new words", at);

    let fields = body["fields"].as_object().unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields["content"]["stringValue"], "new words");
    assert_eq!(fields["updatedAt"]["timestampValue"], "2025-06-01T12:00:00.000000Z");
}
