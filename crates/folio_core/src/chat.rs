use std::collections::VecDeque;

use crate::RequestId;

pub type TurnId = u64;

pub const DEFAULT_BOT_REPLY: &str = "I'm sorry, I didn't understand that.";
pub const CHAT_APOLOGY: &str = "I'm having trouble connecting. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatOrigin {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub text: String,
    pub origin: ChatOrigin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TranscriptEntry {
    Turn { id: TurnId, turn: ChatTurn },
    TypingIndicator,
}

/// Append-only transcript; the typing indicator is the only entry ever removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Transcript {
    entries: Vec<TranscriptEntry>,
    next_turn_id: TurnId,
}

impl Transcript {
    pub(crate) fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub(crate) fn push(&mut self, origin: ChatOrigin, text: impl Into<String>) -> TurnId {
        self.next_turn_id += 1;
        let id = self.next_turn_id;
        self.entries.push(TranscriptEntry::Turn {
            id,
            turn: ChatTurn {
                text: text.into(),
                origin,
            },
        });
        id
    }

    pub(crate) fn show_typing(&mut self) {
        if !self.is_typing() {
            self.entries.push(TranscriptEntry::TypingIndicator);
        }
    }

    pub(crate) fn clear_typing(&mut self) {
        self.entries
            .retain(|entry| !matches!(entry, TranscriptEntry::TypingIndicator));
    }

    pub(crate) fn is_typing(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| matches!(entry, TranscriptEntry::TypingIndicator))
    }
}

/// Chat widget state: window flag, input box, transcript and the send queue.
///
/// Sends are serialized: one request is on the wire at a time and later
/// messages wait in `pending` so replies land in the order they were asked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ChatSession {
    pub(crate) open: bool,
    pub(crate) input: String,
    pub(crate) transcript: Transcript,
    in_flight: Option<RequestId>,
    pending: VecDeque<String>,
}

impl ChatSession {
    pub(crate) fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub(crate) fn begin(&mut self, request_id: RequestId) {
        self.in_flight = Some(request_id);
        self.transcript.show_typing();
    }

    pub(crate) fn enqueue(&mut self, text: String) {
        self.pending.push_back(text);
    }

    pub(crate) fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Closes out the in-flight request. Returns false for a stale request id.
    pub(crate) fn settle(&mut self, request_id: RequestId) -> bool {
        if self.in_flight != Some(request_id) {
            return false;
        }
        self.in_flight = None;
        self.transcript.clear_typing();
        true
    }

    pub(crate) fn next_pending(&mut self) -> Option<String> {
        self.pending.pop_front()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatAnswer {
    pub response: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatFailure {
    Timeout,
    Network,
    Protocol,
    Application { detail: Option<String> },
}

pub type ChatOutcome = Result<ChatAnswer, ChatFailure>;

/// Bot text for a settled request. Failure detail never reaches the transcript.
pub(crate) fn reply_text(outcome: &ChatOutcome) -> &str {
    match outcome {
        Ok(answer) => answer
            .response
            .as_deref()
            .filter(|response| !response.trim().is_empty())
            .unwrap_or(DEFAULT_BOT_REPLY),
        Err(_) => CHAT_APOLOGY,
    }
}
