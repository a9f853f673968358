//! Folio core: pure contact-form and chat state machine plus view-model helpers.
mod bindings;
mod chat;
mod contact;
mod effect;
mod escape;
mod msg;
mod quick_reply;
mod state;
mod status;
mod update;
mod validate;
mod view_model;

pub use bindings::{Dispatched, EventKind, EventTable, Handler, Role, UiEvent};
pub use chat::{
    ChatAnswer, ChatFailure, ChatOrigin, ChatOutcome, ChatTurn, TurnId, CHAT_APOLOGY,
    DEFAULT_BOT_REPLY,
};
pub use contact::{
    ContactAccepted, ContactMessage, ContactOutcome, FormField, SubmissionResult, SubmitFailure,
    DEFAULT_FAILURE_MESSAGE, DEFAULT_SUCCESS_MESSAGE,
};
pub use effect::Effect;
pub use escape::escape_html;
pub use msg::Msg;
pub use quick_reply::QuickReplies;
pub use state::{AppState, RequestId};
pub use status::{StatusKind, STATUS_HIDE_DELAY};
pub use update::update;
pub use validate::{is_valid_email, validate_contact, ValidationError};
pub use view_model::{
    AppViewModel, ChatViewModel, ContactFormView, StatusView, TranscriptRow, TurnView,
    SEND_LABEL, SENDING_LABEL,
};
