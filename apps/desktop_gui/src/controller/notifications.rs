use std::time::{Duration, Instant};

pub const SUCCESS_TTL: Duration = Duration::from_secs(4);
pub const ERROR_TTL: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub expires_at: Instant,
}

/// Transient toasts, newest last.
#[derive(Debug, Default)]
pub struct Notifications {
    toasts: Vec<Toast>,
}

impl Notifications {
    pub fn success(&mut self, message: impl Into<String>, now: Instant) {
        self.push(ToastKind::Success, message.into(), now + SUCCESS_TTL);
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) {
        self.push(ToastKind::Error, message.into(), now + ERROR_TTL);
    }

    fn push(&mut self, kind: ToastKind, message: String, expires_at: Instant) {
        self.toasts.push(Toast {
            kind,
            message,
            expires_at,
        });
    }

    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|toast| toast.expires_at > now);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }
}
