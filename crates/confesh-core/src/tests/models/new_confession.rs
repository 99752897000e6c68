use crate::{Identity, NewConfession, WallError};

#[test]
fn test_named_confession_uses_display_name() {
    let identity = Identity::new("uid-1", Some("Maria".to_string()));
    let new = NewConfession::new("hello".to_string(), false, &identity).unwrap();

    assert_eq!(new.author, "Maria");
    assert_eq!(new.author_id, "uid-1");
    assert!(!new.is_anonymous);
}

#[test]
fn test_named_confession_without_display_name_uses_user() {
    let identity = Identity::new("uid-1", None);
    let new = NewConfession::new("hello".to_string(), false, &identity).unwrap();

    assert_eq!(new.author, "User");
}

#[test]
fn test_anonymous_confession_hides_author_but_keeps_owner() {
    let identity = Identity::new("uid-1", Some("Maria".to_string()));
    let new = NewConfession::new("hello".to_string(), true, &identity).unwrap();

    assert_eq!(new.author, "Anonymous");
    assert_eq!(new.author_id, "uid-1");
    assert!(new.is_anonymous);
}

#[test]
fn test_empty_content_rejected() {
    let identity = Identity::new("uid-1", None);
    let result = NewConfession::new("   ".to_string(), false, &identity);

    assert!(matches!(result, Err(WallError::Validation { .. })));
}
