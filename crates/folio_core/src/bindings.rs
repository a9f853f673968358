use std::collections::HashMap;

use crate::{FormField, Msg};

/// The part a UI element plays on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    ContactForm,
    FormField(FormField),
    ChatToggle,
    ChatClose,
    ChatInput,
    ChatSend,
    QuickReply,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Click on an element; `text` is the element's text content.
    Click { text: String },
    Submit,
    KeyPress { key: String },
    Input { value: String },
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UiEvent::Click { .. } => EventKind::Click,
            UiEvent::Submit => EventKind::Submit,
            UiEvent::KeyPress { .. } => EventKind::KeyPress,
            UiEvent::Input { .. } => EventKind::Input,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
    KeyPress,
    Input,
}

pub type Handler = fn(Role, &UiEvent) -> Option<Msg>;

#[derive(Debug, Clone, Copy)]
struct Binding {
    handler: Handler,
    prevent_default: bool,
}

/// Result of routing one UI event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    pub msg: Msg,
    /// The element's default action (e.g. form navigation) must not run.
    pub prevent_default: bool,
}

/// Maps (event, element role) to the message it produces. Built once at start-up.
#[derive(Debug, Clone, Default)]
pub struct EventTable {
    bindings: HashMap<(EventKind, Role), Binding>,
}

impl EventTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, kind: EventKind, role: Role, handler: Handler) -> &mut Self {
        self.insert(kind, role, handler, false)
    }

    pub fn bind_preventing_default(
        &mut self,
        kind: EventKind,
        role: Role,
        handler: Handler,
    ) -> &mut Self {
        self.insert(kind, role, handler, true)
    }

    fn insert(&mut self, kind: EventKind, role: Role, handler: Handler, prevent: bool) -> &mut Self {
        self.bindings.insert(
            (kind, role),
            Binding {
                handler,
                prevent_default: prevent,
            },
        );
        self
    }

    pub fn is_bound(&self, kind: EventKind, role: Role) -> bool {
        self.bindings.contains_key(&(kind, role))
    }

    /// Routes an event. Unbound pairs and handlers that decline yield `None`.
    pub fn dispatch(&self, role: Role, event: &UiEvent) -> Option<Dispatched> {
        let binding = self.bindings.get(&(event.kind(), role))?;
        let msg = (binding.handler)(role, event)?;
        Some(Dispatched {
            msg,
            prevent_default: binding.prevent_default,
        })
    }
}

impl EventTable {
    /// Contact form and chat widget wiring for the portfolio page.
    pub fn portfolio() -> Self {
        let mut table = Self::empty();
        table
            .bind_preventing_default(EventKind::Submit, Role::ContactForm, |_, _| {
                Some(Msg::ContactSubmitted)
            })
            .bind(EventKind::Click, Role::ChatToggle, |_, _| Some(Msg::ChatToggled))
            .bind(EventKind::Click, Role::ChatClose, |_, _| Some(Msg::ChatToggled))
            .bind(EventKind::Input, Role::ChatInput, |_, event| match event {
                UiEvent::Input { value } => Some(Msg::ChatInputChanged(value.clone())),
                _ => None,
            })
            .bind(EventKind::KeyPress, Role::ChatInput, |_, event| match event {
                UiEvent::KeyPress { key } if key == "Enter" => Some(Msg::ChatSendRequested),
                _ => None,
            })
            .bind(EventKind::Click, Role::ChatSend, |_, _| {
                Some(Msg::ChatSendRequested)
            })
            .bind(EventKind::Click, Role::QuickReply, |_, event| match event {
                UiEvent::Click { text } => Some(Msg::QuickReplySelected(text.clone())),
                _ => None,
            });
        for field in FormField::ALL {
            table.bind(EventKind::Input, Role::FormField(field), field_input);
        }
        table
    }
}

fn field_input(role: Role, event: &UiEvent) -> Option<Msg> {
    match (role, event) {
        (Role::FormField(field), UiEvent::Input { value }) => Some(Msg::FieldEdited {
            field,
            value: value.clone(),
        }),
        _ => None,
    }
}
