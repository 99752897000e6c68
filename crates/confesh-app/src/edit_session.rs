use confesh_core::Confession;

/// An open edit: the record being edited and the working copy of its text.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub target: Confession,
    pub content: String,
}

impl EditSession {
    pub fn new(target: Confession) -> Self {
        let content = target.content.clone();
        Self { target, content }
    }

    pub fn target_id(&self) -> Option<&str> {
        self.target.id.as_deref()
    }
}
