use std::io::{self, Write};

use chrono::Local;
use folio_core::{ChatOrigin, StatusKind};

use super::render::DisplayCommand;

/// Shows the transient status notifier.
pub trait StatusSurface {
    fn show(&mut self, text: &str, kind: StatusKind);
    fn hide(&mut self);
}

/// Chat window, transcript and typing indicator.
pub trait TranscriptSurface {
    fn set_open(&mut self, open: bool);
    fn append(&mut self, origin: ChatOrigin, html: &str);
    fn set_typing(&mut self, typing: bool);
}

/// The form's submit control.
pub trait SubmitControl {
    fn set_state(&mut self, enabled: bool, label: &str);
}

/// Whatever display elements are present. Commands aimed at a missing
/// surface are dropped.
#[derive(Default)]
pub struct Surfaces {
    pub status: Option<Box<dyn StatusSurface>>,
    pub transcript: Option<Box<dyn TranscriptSurface>>,
    pub submit: Option<Box<dyn SubmitControl>>,
}

impl Surfaces {
    /// Contact mode only needs the status line and the submit control.
    pub fn contact_terminal() -> Self {
        Self {
            status: Some(Box::new(TerminalStatus)),
            transcript: None,
            submit: Some(Box::new(TerminalSubmit)),
        }
    }

    pub fn chat_terminal() -> Self {
        Self {
            status: Some(Box::new(TerminalStatus)),
            transcript: Some(Box::new(TerminalTranscript)),
            submit: None,
        }
    }

    pub fn apply(&mut self, cmds: Vec<DisplayCommand>) {
        for cmd in cmds {
            match cmd {
                DisplayCommand::ShowStatus { text, kind } => {
                    if let Some(status) = self.status.as_mut() {
                        status.show(&text, kind);
                    }
                }
                DisplayCommand::HideStatus => {
                    if let Some(status) = self.status.as_mut() {
                        status.hide();
                    }
                }
                DisplayCommand::SetSubmitControl { enabled, label } => {
                    if let Some(submit) = self.submit.as_mut() {
                        submit.set_state(enabled, label);
                    }
                }
                DisplayCommand::AppendTurn { origin, html } => {
                    if let Some(transcript) = self.transcript.as_mut() {
                        transcript.append(origin, &html);
                    }
                }
                DisplayCommand::SetTyping(typing) => {
                    if let Some(transcript) = self.transcript.as_mut() {
                        transcript.set_typing(typing);
                    }
                }
                DisplayCommand::SetChatOpen(open) => {
                    if let Some(transcript) = self.transcript.as_mut() {
                        transcript.set_open(open);
                    }
                }
            }
        }
    }
}

fn stamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

fn emit(line: String) {
    let mut out = io::stdout().lock();
    let _ = writeln!(out, "{line}");
    let _ = out.flush();
}

struct TerminalStatus;

impl StatusSurface for TerminalStatus {
    fn show(&mut self, text: &str, kind: StatusKind) {
        let tag = match kind {
            StatusKind::Success => "ok",
            StatusKind::Error => "error",
        };
        emit(format!("[{}] {tag}: {text}", stamp()));
    }

    // A printed line cannot be withdrawn.
    fn hide(&mut self) {}
}

struct TerminalTranscript;

impl TranscriptSurface for TerminalTranscript {
    fn set_open(&mut self, open: bool) {
        let state = if open { "opened" } else { "closed" };
        emit(format!("[{}] chat {state}", stamp()));
    }

    fn append(&mut self, origin: ChatOrigin, html: &str) {
        let who = match origin {
            ChatOrigin::User => "you",
            ChatOrigin::Bot => "bot",
        };
        emit(format!("[{}] {who}> {html}", stamp()));
    }

    fn set_typing(&mut self, typing: bool) {
        if typing {
            emit(format!("[{}] bot is typing...", stamp()));
        }
    }
}

struct TerminalSubmit;

impl SubmitControl for TerminalSubmit {
    fn set_state(&mut self, enabled: bool, label: &str) {
        if !enabled {
            emit(format!("[{}] {label}", stamp()));
        }
    }
}
