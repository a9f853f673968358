//! Folio engine: HTTP calls to the portfolio API and effect execution.
mod api;
mod engine;
mod types;

pub use api::{ApiSettings, PortfolioApi, ReqwestApi};
pub use engine::{EngineError, EngineHandle};
pub use types::{
    ApiError, ChatAnswer, ChatRequest, ContactAck, ContactPayload, EngineEvent, FailureKind,
    RequestId,
};
