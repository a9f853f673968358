use crate::{ChatOrigin, ContactMessage, StatusKind, SubmissionResult, TurnId};

pub const SEND_LABEL: &str = "Send Message";
pub const SENDING_LABEL: &str = "Sending...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub contact: ContactFormView,
    pub status: StatusView,
    pub chat: ChatViewModel,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactFormView {
    pub fields: ContactMessage,
    pub submitting: bool,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub last_result: Option<SubmissionResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusView {
    pub visible: bool,
    pub text: String,
    pub kind: StatusKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatViewModel {
    pub open: bool,
    pub input: String,
    pub rows: Vec<TranscriptRow>,
    /// Messages waiting behind the in-flight request.
    pub queued: usize,
    pub quick_replies: Vec<String>,
}

impl ChatViewModel {
    pub fn is_typing(&self) -> bool {
        self.rows.iter().any(|row| matches!(row, TranscriptRow::Typing))
    }

    pub fn turns(&self) -> impl Iterator<Item = &TurnView> {
        self.rows.iter().filter_map(|row| match row {
            TranscriptRow::Turn(turn) => Some(turn),
            TranscriptRow::Typing => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptRow {
    Turn(TurnView),
    Typing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnView {
    pub id: TurnId,
    pub origin: ChatOrigin,
    /// Turn text, already HTML-escaped.
    pub html: String,
}
