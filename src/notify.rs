use serde::Serialize;

pub const VISIBLE_MS: u64 = 3_000;
pub const TRANSITION_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Info,
}

impl NotificationKind {
    pub fn class(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Info => "info",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            NotificationKind::Success => "#27AE60",
            NotificationKind::Info => "#3498DB",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub visible_ms: u64,
    pub transition_ms: u64,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
            visible_ms: VISIBLE_MS,
            transition_ms: TRANSITION_MS,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Info)
    }

    pub fn result_added() -> Self {
        Self::success("Test result added successfully!")
    }

    /// Resolves the `notice` query key used after redirects.
    pub fn from_notice(key: &str) -> Option<Self> {
        match key {
            "added" => Some(Self::result_added()),
            _ => None,
        }
    }
}
