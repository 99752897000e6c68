use crate::Credentials;

#[test]
fn test_debug_redacts_password() {
    let credentials = Credentials::new("a@b.c", "hunter2");
    let rendered = format!("{credentials:?}");

    assert!(rendered.contains("a@b.c"));
    assert!(!rendered.contains("hunter2"));
}
