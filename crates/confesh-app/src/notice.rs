use confesh_core::WallError;

/// A one-shot message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    /// Error class, when the notice came from a failure
    pub kind: Option<&'static str>,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind: None,
        }
    }

    /// Notice for a failed action, with the message the user should see.
    pub fn from_error(err: &WallError, message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
            kind: Some(err.kind()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind.is_some()
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
