use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Submission blocked before any network call.
    Validation,
    /// Chunk transmission or listing fetch failed.
    Transport,
}

/// A user-visible message the boundary must show before repainting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Validation,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Transport,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            NoticeKind::Validation => "invalid submission",
            NoticeKind::Transport => "upload service error",
        };
        write!(f, "{prefix}: {}", self.message)
    }
}
