use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use folio_logging::{folio_debug, folio_info, folio_warn};
use thiserror::Error;

use crate::api::{ApiSettings, PortfolioApi, ReqwestApi};
use crate::{ApiError, ContactPayload, EngineEvent, RequestId};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to configure api client: {0}")]
    Api(#[from] ApiError),
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

enum EngineCommand {
    SubmitContact {
        request_id: RequestId,
        payload: ContactPayload,
    },
    SendChat {
        request_id: RequestId,
        message: String,
    },
    ScheduleHide {
        generation: u64,
        delay: Duration,
    },
}

/// Front-end side of the engine: commands go in, `EngineEvent`s come out.
///
/// Requests run concurrently on a tokio runtime owned by a worker thread; the
/// thread exits once every handle clone is dropped.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, EngineError> {
        let api: Arc<dyn PortfolioApi> = Arc::new(ReqwestApi::new(settings)?);
        Self::with_api(api)
    }

    /// Runs commands against any `PortfolioApi`, e.g. a stub in tests.
    pub fn with_api(api: Arc<dyn PortfolioApi>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, event_tx).await;
                });
            }
            folio_debug!("Engine command channel closed; shutting down runtime");
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn submit_contact(&self, request_id: RequestId, payload: ContactPayload) {
        self.send(EngineCommand::SubmitContact {
            request_id,
            payload,
        });
    }

    pub fn send_chat(&self, request_id: RequestId, message: impl Into<String>) {
        self.send(EngineCommand::SendChat {
            request_id,
            message: message.into(),
        });
    }

    pub fn schedule_hide(&self, generation: u64, delay: Duration) {
        self.send(EngineCommand::ScheduleHide { generation, delay });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        let rx = self.event_rx.lock().ok()?;
        rx.try_recv().ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            folio_warn!("Engine worker is gone; command dropped");
        }
    }
}

async fn handle_command(
    api: &dyn PortfolioApi,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::SubmitContact {
            request_id,
            payload,
        } => {
            let result = api.submit_contact(&payload).await;
            match &result {
                Ok(_) => folio_info!("Contact request {} accepted", request_id),
                Err(err) => folio_warn!("Contact request {} failed: {}", request_id, err),
            }
            EngineEvent::ContactCompleted { request_id, result }
        }
        EngineCommand::SendChat {
            request_id,
            message,
        } => {
            let result = api.send_chat(&message).await;
            if let Err(err) = &result {
                folio_warn!("Chat request {} failed: {}", request_id, err);
            }
            EngineEvent::ChatCompleted { request_id, result }
        }
        EngineCommand::ScheduleHide { generation, delay } => {
            tokio::time::sleep(delay).await;
            EngineEvent::StatusHideElapsed { generation }
        }
    };
    let _ = event_tx.send(event);
}
