use crate::chat::{ChatSession, TranscriptEntry};
use crate::contact::ContactForm;
use crate::status::StatusBanner;
use crate::view_model::{
    AppViewModel, ChatViewModel, ContactFormView, StatusView, TranscriptRow, TurnView,
    SENDING_LABEL, SEND_LABEL,
};
use crate::{escape_html, QuickReplies};

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) contact: ContactForm,
    pub(crate) status: StatusBanner,
    pub(crate) chat: ChatSession,
    pub(crate) quick_replies: QuickReplies,
    next_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quick_replies(quick_replies: QuickReplies) -> Self {
        Self {
            quick_replies,
            ..Self::default()
        }
    }

    pub fn quick_replies(&self) -> &QuickReplies {
        &self.quick_replies
    }

    pub fn is_submitting(&self) -> bool {
        self.contact.in_flight().is_some()
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.chat.in_flight().is_some()
    }

    pub fn view(&self) -> AppViewModel {
        let submitting = self.is_submitting();
        let rows = self
            .chat
            .transcript
            .entries()
            .iter()
            .map(|entry| match entry {
                TranscriptEntry::Turn { id, turn } => TranscriptRow::Turn(TurnView {
                    id: *id,
                    origin: turn.origin,
                    html: escape_html(&turn.text),
                }),
                TranscriptEntry::TypingIndicator => TranscriptRow::Typing,
            })
            .collect();

        AppViewModel {
            contact: ContactFormView {
                fields: self.contact.fields().clone(),
                submitting,
                submit_enabled: !submitting,
                submit_label: if submitting { SENDING_LABEL } else { SEND_LABEL },
                last_result: self.contact.last_result().cloned(),
            },
            status: StatusView {
                visible: self.status.visible,
                text: self.status.text.clone(),
                kind: self.status.kind,
            },
            chat: ChatViewModel {
                open: self.chat.open,
                input: self.chat.input.clone(),
                rows,
                queued: self.chat.pending_len(),
                quick_replies: self.quick_replies.labels().map(str::to_string).collect(),
            },
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn next_request_id(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.next_request_id
    }
}
