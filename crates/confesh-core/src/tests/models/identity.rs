use crate::Identity;

#[test]
fn test_name_or_default_uses_display_name() {
    let identity = Identity::new("uid-1", Some("Maria".to_string()));
    assert_eq!(identity.name_or_default(), "Maria");
}

#[test]
fn test_name_or_default_falls_back_to_user() {
    assert_eq!(Identity::new("uid-1", None).name_or_default(), "User");
    assert_eq!(
        Identity::new("uid-1", Some("   ".to_string())).name_or_default(),
        "User"
    );
}
