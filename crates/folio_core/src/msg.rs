#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited a contact form field.
    FieldEdited {
        field: crate::FormField,
        value: String,
    },
    /// User submitted the contact form.
    ContactSubmitted,
    /// Engine finished a contact submission.
    ContactSettled {
        request_id: crate::RequestId,
        outcome: crate::ContactOutcome,
    },
    /// The status hide timer for `generation` fired.
    StatusHideElapsed { generation: u64 },
    /// User opened or closed the chat window.
    ChatToggled,
    /// User edited the chat input box.
    ChatInputChanged(String),
    /// User pressed Send or Enter in the chat input.
    ChatSendRequested,
    /// User picked a quick reply by its label.
    QuickReplySelected(String),
    /// Engine finished a chat request.
    ChatSettled {
        request_id: crate::RequestId,
        outcome: crate::ChatOutcome,
    },
    /// Fallback for unbound UI events.
    NoOp,
}
