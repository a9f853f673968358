use std::fmt;

use serde::{Deserialize, Serialize};

pub type RequestId = u64;

/// JSON body of `POST /api/contact`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub project_type: String,
    pub budget: String,
    pub subject: String,
    pub message: String,
    /// Honeypot; the server rejects submissions where it is filled.
    pub website: String,
}

/// JSON body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactAck {
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatAnswer {
    pub response: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContactReply {
    #[serde(default)]
    pub ok: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ContactCompleted {
        request_id: RequestId,
        result: Result<ContactAck, ApiError>,
    },
    ChatCompleted {
        request_id: RequestId,
        result: Result<ChatAnswer, ApiError>,
    },
    StatusHideElapsed {
        generation: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    Timeout,
    Network,
    /// Reply was not JSON, was malformed, or was too large.
    Protocol,
    /// Well-formed JSON reply that reported failure.
    Application { status: u16, detail: Option<String> },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Protocol => write!(f, "protocol error"),
            FailureKind::Application { status, detail } => match detail {
                Some(detail) => write!(f, "application error (http {status}): {detail}"),
                None => write!(f, "application error (http {status})"),
            },
        }
    }
}
