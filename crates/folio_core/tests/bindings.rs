use folio_core::{EventKind, EventTable, FormField, Msg, Role, UiEvent};

#[test]
fn form_submit_suppresses_default_navigation() {
    let table = EventTable::portfolio();
    let dispatched = table
        .dispatch(Role::ContactForm, &UiEvent::Submit)
        .expect("form submit is bound");
    assert_eq!(dispatched.msg, Msg::ContactSubmitted);
    assert!(dispatched.prevent_default);
}

#[test]
fn every_form_field_routes_input() {
    let table = EventTable::portfolio();
    for field in FormField::ALL {
        let dispatched = table
            .dispatch(
                Role::FormField(field),
                &UiEvent::Input {
                    value: "x".to_string(),
                },
            )
            .expect("field input is bound");
        assert_eq!(
            dispatched.msg,
            Msg::FieldEdited {
                field,
                value: "x".to_string()
            }
        );
        assert!(!dispatched.prevent_default);
    }
}

#[test]
fn only_enter_sends_from_chat_input() {
    let table = EventTable::portfolio();
    let enter = table.dispatch(
        Role::ChatInput,
        &UiEvent::KeyPress {
            key: "Enter".to_string(),
        },
    );
    assert_eq!(enter.map(|d| d.msg), Some(Msg::ChatSendRequested));

    let other = table.dispatch(
        Role::ChatInput,
        &UiEvent::KeyPress {
            key: "a".to_string(),
        },
    );
    assert!(other.is_none());
}

#[test]
fn chat_controls_are_bound() {
    let table = EventTable::portfolio();
    let click = |text: &str| UiEvent::Click {
        text: text.to_string(),
    };

    assert_eq!(
        table.dispatch(Role::ChatSend, &click("Send")).map(|d| d.msg),
        Some(Msg::ChatSendRequested)
    );
    assert_eq!(
        table.dispatch(Role::ChatToggle, &click("")).map(|d| d.msg),
        Some(Msg::ChatToggled)
    );
    assert_eq!(
        table.dispatch(Role::ChatClose, &click("")).map(|d| d.msg),
        Some(Msg::ChatToggled)
    );
    assert_eq!(
        table
            .dispatch(Role::QuickReply, &click("Skills?"))
            .map(|d| d.msg),
        Some(Msg::QuickReplySelected("Skills?".to_string()))
    );
}

#[test]
fn unbound_pairs_are_noops() {
    let table = EventTable::portfolio();
    assert!(!table.is_bound(EventKind::Click, Role::ContactForm));
    assert!(table
        .dispatch(
            Role::ContactForm,
            &UiEvent::Click {
                text: String::new()
            }
        )
        .is_none());
    assert!(EventTable::empty()
        .dispatch(Role::ContactForm, &UiEvent::Submit)
        .is_none());
}
