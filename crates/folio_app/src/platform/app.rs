use std::io::{self, BufRead};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use clap::Parser;
use folio_core::{update, AppState, EventTable, Msg, Role, UiEvent};
use folio_engine::EngineHandle;
use folio_logging::{folio_debug, folio_info, folio_trace, folio_warn};

use super::config::{AppConfig, Cli, Command, ContactArgs};
use super::effects::EffectRunner;
use super::logging;
use super::ui::constants::{ENTER_KEY, QUICK_REPLY_PREFIX, QUIT_COMMAND, TOGGLE_COMMAND};
use super::ui::render::{render, RenderCursor};
use super::ui::surfaces::Surfaces;

/// Everything the dispatch loop reacts to: engine results, UI events, shutdown.
#[derive(Debug)]
pub(crate) enum Inbound {
    Msg(Msg),
    Ui { role: Role, event: UiEvent },
    Quit,
}

pub fn run_app() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli)?;
    logging::initialize(cli.log, config.level_filter()?);
    folio_info!("Starting folio against {}", config.base_url);

    let engine = EngineHandle::new(config.api_settings())?;
    let (inbound_tx, inbound_rx) = mpsc::channel::<Inbound>();
    let runner = EffectRunner::new(engine, inbound_tx.clone());
    let state = AppState::with_quick_replies(config.quick_replies());

    match &cli.command {
        Command::Contact(args) => {
            let session = Session::new(state, runner, Surfaces::contact_terminal());
            Ok(run_contact(session, args, &inbound_rx))
        }
        Command::Chat => {
            let session = Session::new(state, runner, Surfaces::chat_terminal());
            spawn_stdin_reader(inbound_tx);
            Ok(run_chat(session, &inbound_rx))
        }
    }
}

struct Session {
    state: AppState,
    table: EventTable,
    runner: EffectRunner,
    surfaces: Surfaces,
    cursor: RenderCursor,
}

impl Session {
    fn new(state: AppState, runner: EffectRunner, surfaces: Surfaces) -> Self {
        let mut session = Self {
            state,
            table: EventTable::portfolio(),
            runner,
            surfaces,
            cursor: RenderCursor::default(),
        };
        session.render();
        session
    }

    fn dispatch_ui(&mut self, role: Role, event: UiEvent) {
        match self.table.dispatch(role, &event) {
            Some(dispatched) => {
                if dispatched.prevent_default {
                    folio_trace!("{:?} on {:?}: default action suppressed", event.kind(), role);
                }
                self.dispatch_msg(dispatched.msg);
            }
            None => folio_trace!("Unbound {:?} on {:?}", event.kind(), role),
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        folio_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);
        if was_dirty {
            self.render();
        }
    }

    fn render(&mut self) {
        let cmds = render(&self.state.view(), &mut self.cursor);
        self.surfaces.apply(cmds);
    }

    fn handle(&mut self, inbound: Inbound) {
        match inbound {
            Inbound::Msg(msg) => self.dispatch_msg(msg),
            Inbound::Ui { role, event } => self.dispatch_ui(role, event),
            Inbound::Quit => {}
        }
    }
}

fn run_contact(
    mut session: Session,
    args: &ContactArgs,
    inbound: &mpsc::Receiver<Inbound>,
) -> ExitCode {
    for (field, value) in args.field_values() {
        session.dispatch_ui(
            Role::FormField(field),
            UiEvent::Input {
                value: value.to_string(),
            },
        );
    }
    session.dispatch_ui(Role::ContactForm, UiEvent::Submit);

    while session.state.is_submitting() {
        match inbound.recv() {
            Ok(next) => session.handle(next),
            Err(_) => {
                folio_warn!("Engine channel closed while submitting");
                break;
            }
        }
    }

    let succeeded = session
        .state
        .view()
        .contact
        .last_result
        .is_some_and(|result| result.is_ok());
    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run_chat(mut session: Session, inbound: &mpsc::Receiver<Inbound>) -> ExitCode {
    session.dispatch_ui(Role::ChatToggle, UiEvent::Click { text: String::new() });
    let labels: Vec<&str> = session.state.quick_replies().labels().collect();
    println!(
        "Type a message and press Enter. Quick replies: {} ({}LABEL). {} closes or reopens, {} exits.",
        labels.join(", "),
        QUICK_REPLY_PREFIX,
        TOGGLE_COMMAND,
        QUIT_COMMAND
    );

    // Replies still on the wire are printed before exiting.
    let mut quitting = false;
    while !(quitting && !session.state.is_awaiting_reply()) {
        match inbound.recv() {
            Ok(Inbound::Quit) => quitting = true,
            Ok(next) => session.handle(next),
            Err(_) => break,
        }
    }
    ExitCode::SUCCESS
}

fn spawn_stdin_reader(inbound_tx: mpsc::Sender<Inbound>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    folio_warn!("Failed to read stdin: {}", err);
                    break;
                }
            };
            let events = line_to_inbound(&line);
            let quit = events.iter().any(|event| matches!(event, Inbound::Quit));
            for event in events {
                if inbound_tx.send(event).is_err() {
                    return;
                }
            }
            if quit {
                return;
            }
        }
        let _ = inbound_tx.send(Inbound::Quit);
    });
}

/// Maps one line of terminal input onto the UI events a browser would raise.
fn line_to_inbound(line: &str) -> Vec<Inbound> {
    let trimmed = line.trim();
    if trimmed == QUIT_COMMAND {
        return vec![Inbound::Quit];
    }
    if trimmed == TOGGLE_COMMAND {
        return vec![Inbound::Ui {
            role: Role::ChatToggle,
            event: UiEvent::Click {
                text: String::new(),
            },
        }];
    }
    if let Some(label) = trimmed.strip_prefix(QUICK_REPLY_PREFIX) {
        return vec![Inbound::Ui {
            role: Role::QuickReply,
            event: UiEvent::Click {
                text: label.to_string(),
            },
        }];
    }
    vec![
        Inbound::Ui {
            role: Role::ChatInput,
            event: UiEvent::Input {
                value: line.to_string(),
            },
        },
        Inbound::Ui {
            role: Role::ChatInput,
            event: UiEvent::KeyPress {
                key: ENTER_KEY.to_string(),
            },
        },
    ]
}
