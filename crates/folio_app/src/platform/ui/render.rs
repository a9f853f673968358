use folio_core::{AppViewModel, ChatOrigin, StatusKind, TurnId, TurnView};

/// One display instruction for a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCommand {
    ShowStatus { text: String, kind: StatusKind },
    HideStatus,
    SetSubmitControl { enabled: bool, label: &'static str },
    AppendTurn { origin: ChatOrigin, html: String },
    SetTyping(bool),
    SetChatOpen(bool),
}

/// What has already been pushed to the surfaces, so renders only emit changes.
#[derive(Debug, Clone, Default)]
pub struct RenderCursor {
    status: Option<(String, StatusKind)>,
    submit: Option<(bool, &'static str)>,
    last_turn: TurnId,
    typing: bool,
    chat_open: bool,
}

pub fn render(view: &AppViewModel, cursor: &mut RenderCursor) -> Vec<DisplayCommand> {
    let mut cmds = Vec::new();

    let status = view
        .status
        .visible
        .then(|| (view.status.text.clone(), view.status.kind));
    if status != cursor.status {
        cmds.push(match &status {
            Some((text, kind)) => DisplayCommand::ShowStatus {
                text: text.clone(),
                kind: *kind,
            },
            None => DisplayCommand::HideStatus,
        });
        cursor.status = status;
    }

    let submit = (view.contact.submit_enabled, view.contact.submit_label);
    if cursor.submit != Some(submit) {
        cmds.push(DisplayCommand::SetSubmitControl {
            enabled: submit.0,
            label: submit.1,
        });
        cursor.submit = Some(submit);
    }

    if view.chat.open != cursor.chat_open {
        cmds.push(DisplayCommand::SetChatOpen(view.chat.open));
        cursor.chat_open = view.chat.open;
    }

    // Turns are append-only, so anything past the last rendered id is new.
    let last_turn = cursor.last_turn;
    let new_turns: Vec<&TurnView> = view
        .chat
        .turns()
        .filter(|turn| turn.id > last_turn)
        .collect();
    // A bot turn settles the indicator it answers; a queued send raises a fresh one.
    let reply_arrived = new_turns.iter().any(|turn| turn.origin == ChatOrigin::Bot);
    let typing = view.chat.is_typing();
    if cursor.typing && (!typing || reply_arrived) {
        cmds.push(DisplayCommand::SetTyping(false));
        cursor.typing = false;
    }
    for turn in new_turns {
        cmds.push(DisplayCommand::AppendTurn {
            origin: turn.origin,
            html: turn.html.clone(),
        });
        cursor.last_turn = turn.id;
    }
    if typing && !cursor.typing {
        cmds.push(DisplayCommand::SetTyping(true));
        cursor.typing = true;
    }

    cmds
}

#[cfg(test)]
mod tests {
    use folio_core::{update, AppState, ChatAnswer, Effect, Msg, SENDING_LABEL, SEND_LABEL};

    use super::*;

    #[test]
    fn chat_round_trip_renders_incrementally() {
        let mut cursor = RenderCursor::default();
        let state = AppState::new();
        let first = render(&state.view(), &mut cursor);
        assert_eq!(
            first,
            vec![DisplayCommand::SetSubmitControl {
                enabled: true,
                label: SEND_LABEL
            }]
        );
        assert!(render(&state.view(), &mut cursor).is_empty());

        let (state, _) = update(state, Msg::ChatInputChanged("<hi>".into()));
        let (state, effects) = update(state, Msg::ChatSendRequested);
        let request_id = match effects.as_slice() {
            [Effect::SendChat { request_id, .. }] => *request_id,
            other => panic!("unexpected effects {other:?}"),
        };
        assert_eq!(
            render(&state.view(), &mut cursor),
            vec![
                DisplayCommand::AppendTurn {
                    origin: ChatOrigin::User,
                    html: "&lt;hi&gt;".into()
                },
                DisplayCommand::SetTyping(true),
            ]
        );

        let (state, _) = update(
            state,
            Msg::ChatSettled {
                request_id,
                outcome: Ok(ChatAnswer {
                    response: Some("hello".into()),
                }),
            },
        );
        assert_eq!(
            render(&state.view(), &mut cursor),
            vec![
                DisplayCommand::SetTyping(false),
                DisplayCommand::AppendTurn {
                    origin: ChatOrigin::Bot,
                    html: "hello".into()
                },
            ]
        );
    }

    fn send(state: AppState, text: &str) -> (AppState, Vec<Effect>) {
        let (state, _) = update(state, Msg::ChatInputChanged(text.into()));
        update(state, Msg::ChatSendRequested)
    }

    fn chat_request(effects: &[Effect]) -> u64 {
        match effects {
            [Effect::SendChat { request_id, .. }] => *request_id,
            other => panic!("unexpected effects {other:?}"),
        }
    }

    fn settle(state: AppState, request_id: u64, reply: &str) -> (AppState, Vec<Effect>) {
        update(
            state,
            Msg::ChatSettled {
                request_id,
                outcome: Ok(ChatAnswer {
                    response: Some(reply.into()),
                }),
            },
        )
    }

    fn bot(html: &str) -> DisplayCommand {
        DisplayCommand::AppendTurn {
            origin: ChatOrigin::Bot,
            html: html.into(),
        }
    }

    #[test]
    fn queued_send_shows_typing_again_after_each_reply() {
        let mut cursor = RenderCursor::default();
        let state = AppState::new();
        render(&state.view(), &mut cursor);

        let (state, effects) = send(state, "first");
        let first_id = chat_request(&effects);
        render(&state.view(), &mut cursor);

        let (state, effects) = send(state, "second");
        assert!(effects.is_empty());
        assert_eq!(
            render(&state.view(), &mut cursor),
            vec![DisplayCommand::AppendTurn {
                origin: ChatOrigin::User,
                html: "second".into()
            }]
        );

        let (state, effects) = settle(state, first_id, "reply one");
        let second_id = chat_request(&effects);
        assert_eq!(
            render(&state.view(), &mut cursor),
            vec![
                DisplayCommand::SetTyping(false),
                bot("reply one"),
                DisplayCommand::SetTyping(true),
            ]
        );

        let (state, _) = settle(state, second_id, "reply two");
        assert_eq!(
            render(&state.view(), &mut cursor),
            vec![DisplayCommand::SetTyping(false), bot("reply two")]
        );
    }

    #[test]
    fn status_and_submit_control_follow_the_form() {
        let mut cursor = RenderCursor::default();
        let (state, _) = update(AppState::new(), Msg::ContactSubmitted);
        let cmds = render(&state.view(), &mut cursor);
        assert!(matches!(
            cmds.first(),
            Some(DisplayCommand::ShowStatus {
                kind: StatusKind::Error,
                ..
            })
        ));

        let (state, _) = update(state, Msg::StatusHideElapsed { generation: 1 });
        assert_eq!(
            render(&state.view(), &mut cursor),
            vec![DisplayCommand::HideStatus]
        );

        let mut state = state;
        for (field, value) in [
            (folio_core::FormField::Name, "Ada"),
            (folio_core::FormField::Email, "ada@example.com"),
            (folio_core::FormField::Subject, "Hi"),
            (folio_core::FormField::Message, "Hello"),
        ] {
            state = update(
                state,
                Msg::FieldEdited {
                    field,
                    value: value.into(),
                },
            )
            .0;
        }
        let (state, _) = update(state, Msg::ContactSubmitted);
        assert_eq!(
            render(&state.view(), &mut cursor),
            vec![DisplayCommand::SetSubmitControl {
                enabled: false,
                label: SENDING_LABEL
            }]
        );
    }
}
