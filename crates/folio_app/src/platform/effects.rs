use std::sync::mpsc;
use std::thread;

use folio_core::{
    ChatAnswer, ChatFailure, ChatOutcome, ContactAccepted, ContactMessage, ContactOutcome,
    Effect, Msg, SubmitFailure,
};
use folio_engine::{ApiError, ContactAck, ContactPayload, EngineEvent, EngineHandle, FailureKind};
use folio_logging::{folio_debug, folio_info};

use super::app::Inbound;
use super::ui::constants::ENGINE_POLL_INTERVAL;

/// Executes core effects on the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, inbound_tx: mpsc::Sender<Inbound>) -> Self {
        let runner = Self { engine };
        runner.spawn_event_loop(inbound_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitContact {
                    request_id,
                    message,
                } => {
                    folio_info!(
                        "SubmitContact request_id={} subject_len={} message_len={}",
                        request_id,
                        message.subject.len(),
                        message.message.len()
                    );
                    self.engine.submit_contact(request_id, to_payload(message));
                }
                Effect::SendChat { request_id, text } => {
                    folio_info!("SendChat request_id={} text_len={}", request_id, text.len());
                    self.engine.send_chat(request_id, text);
                }
                Effect::ScheduleStatusHide { generation, delay } => {
                    folio_debug!("ScheduleStatusHide generation={} delay={:?}", generation, delay);
                    self.engine.schedule_hide(generation, delay);
                }
            }
        }
    }

    fn spawn_event_loop(&self, inbound_tx: mpsc::Sender<Inbound>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            match engine.try_recv() {
                Some(event) => {
                    if inbound_tx.send(Inbound::Msg(map_event(event))).is_err() {
                        break;
                    }
                }
                None => thread::sleep(ENGINE_POLL_INTERVAL),
            }
        });
    }
}

fn to_payload(message: ContactMessage) -> ContactPayload {
    ContactPayload {
        name: message.name,
        email: message.email,
        phone: message.phone,
        company: message.company,
        project_type: message.project_type,
        budget: message.budget,
        subject: message.subject,
        message: message.message,
        website: message.website,
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ContactCompleted { request_id, result } => Msg::ContactSettled {
            request_id,
            outcome: contact_outcome(result),
        },
        EngineEvent::ChatCompleted { request_id, result } => Msg::ChatSettled {
            request_id,
            outcome: chat_outcome(result),
        },
        EngineEvent::StatusHideElapsed { generation } => Msg::StatusHideElapsed { generation },
    }
}

fn contact_outcome(result: Result<ContactAck, ApiError>) -> ContactOutcome {
    match result {
        Ok(ack) => Ok(ContactAccepted {
            message: ack.message,
        }),
        Err(err) => Err(match err.kind {
            FailureKind::Timeout => SubmitFailure::Timeout,
            FailureKind::Network => SubmitFailure::Network,
            FailureKind::Protocol => SubmitFailure::Protocol,
            FailureKind::Application { detail, .. } => SubmitFailure::Application { detail },
            FailureKind::InvalidEndpoint => SubmitFailure::Unexpected,
        }),
    }
}

fn chat_outcome(result: Result<folio_engine::ChatAnswer, ApiError>) -> ChatOutcome {
    match result {
        Ok(answer) => Ok(ChatAnswer {
            response: answer.response,
        }),
        Err(err) => Err(match err.kind {
            FailureKind::Timeout => ChatFailure::Timeout,
            FailureKind::Network | FailureKind::InvalidEndpoint => ChatFailure::Network,
            FailureKind::Protocol => ChatFailure::Protocol,
            FailureKind::Application { detail, .. } => ChatFailure::Application { detail },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(kind: FailureKind) -> ApiError {
        ApiError {
            kind,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn engine_failures_map_onto_submit_taxonomy() {
        let cases = [
            (FailureKind::Timeout, SubmitFailure::Timeout),
            (FailureKind::Network, SubmitFailure::Network),
            (FailureKind::Protocol, SubmitFailure::Protocol),
            (
                FailureKind::Application {
                    status: 400,
                    detail: Some("Invalid email".to_string()),
                },
                SubmitFailure::Application {
                    detail: Some("Invalid email".to_string()),
                },
            ),
            (FailureKind::InvalidEndpoint, SubmitFailure::Unexpected),
        ];
        for (kind, expected) in cases {
            let msg = map_event(EngineEvent::ContactCompleted {
                request_id: 4,
                result: Err(api_error(kind)),
            });
            assert_eq!(
                msg,
                Msg::ContactSettled {
                    request_id: 4,
                    outcome: Err(expected),
                }
            );
        }
    }

    #[test]
    fn chat_and_timer_events_map_through() {
        let msg = map_event(EngineEvent::ChatCompleted {
            request_id: 9,
            result: Ok(folio_engine::ChatAnswer {
                response: Some("hi".to_string()),
            }),
        });
        assert_eq!(
            msg,
            Msg::ChatSettled {
                request_id: 9,
                outcome: Ok(ChatAnswer {
                    response: Some("hi".to_string())
                }),
            }
        );
        assert_eq!(
            map_event(EngineEvent::StatusHideElapsed { generation: 2 }),
            Msg::StatusHideElapsed { generation: 2 }
        );
    }

    #[test]
    fn payload_carries_every_field() {
        let message = ContactMessage {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            website: "spam".into(),
            ..ContactMessage::default()
        };
        let payload = to_payload(message);
        assert_eq!(payload.name, "Ada");
        assert_eq!(payload.website, "spam");
    }
}
