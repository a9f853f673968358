use crate::chat::reply_text;
use crate::{
    validate_contact, AppState, ChatOrigin, Effect, Msg, StatusKind, SubmissionResult,
    SubmitFailure, STATUS_HIDE_DELAY,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FieldEdited { field, value } => {
            if state.contact.set_field(field, value) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ContactSubmitted => {
            // The submit control is disabled while a request is on the wire.
            if state.is_submitting() {
                return (state, Vec::new());
            }
            let message = state.contact.collect();
            match validate_contact(&message) {
                Err(err) => {
                    let result = SubmissionResult::Failed(SubmitFailure::Validation(err));
                    vec![show_result(&mut state, result)]
                }
                Ok(()) => {
                    let request_id = state.next_request_id();
                    state.contact.begin(request_id);
                    state.mark_dirty();
                    vec![Effect::SubmitContact {
                        request_id,
                        message,
                    }]
                }
            }
        }
        Msg::ContactSettled {
            request_id,
            outcome,
        } => {
            if !state.contact.settle(request_id) {
                return (state, Vec::new());
            }
            let result = SubmissionResult::from_outcome(outcome);
            if result.is_ok() {
                state.contact.clear();
            }
            vec![show_result(&mut state, result)]
        }
        Msg::StatusHideElapsed { generation } => {
            if state.status.hide_if_current(generation) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ChatToggled => {
            state.chat.open = !state.chat.open;
            state.mark_dirty();
            Vec::new()
        }
        Msg::ChatInputChanged(text) => {
            if state.chat.input != text {
                state.chat.input = text;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ChatSendRequested => {
            let text = state.chat.input.clone();
            send_chat(&mut state, &text)
        }
        Msg::QuickReplySelected(label) => {
            let text = state.quick_replies.expand(&label);
            send_chat(&mut state, &text)
        }
        Msg::ChatSettled {
            request_id,
            outcome,
        } => {
            if !state.chat.settle(request_id) {
                return (state, Vec::new());
            }
            state
                .chat
                .transcript
                .push(ChatOrigin::Bot, reply_text(&outcome));
            state.mark_dirty();
            match state.chat.next_pending() {
                Some(text) => vec![start_chat_request(&mut state, text)],
                None => Vec::new(),
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn show_result(state: &mut AppState, result: SubmissionResult) -> Effect {
    let kind = if result.is_ok() {
        StatusKind::Success
    } else {
        StatusKind::Error
    };
    let generation = state.status.show(result.display_text(), kind);
    state.contact.record(result);
    state.mark_dirty();
    Effect::ScheduleStatusHide {
        generation,
        delay: STATUS_HIDE_DELAY,
    }
}

/// Whitespace only decides blankness; the message is shown and sent as typed.
fn send_chat(state: &mut AppState, text: &str) -> Vec<Effect> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    state.chat.transcript.push(ChatOrigin::User, text);
    state.chat.input.clear();
    state.mark_dirty();

    if state.is_awaiting_reply() {
        state.chat.enqueue(text.to_string());
        return Vec::new();
    }
    vec![start_chat_request(state, text.to_string())]
}

fn start_chat_request(state: &mut AppState, text: String) -> Effect {
    let request_id = state.next_request_id();
    state.chat.begin(request_id);
    Effect::SendChat { request_id, text }
}
