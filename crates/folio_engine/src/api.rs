use std::time::Duration;

use folio_logging::{folio_debug, folio_warn};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::types::{ChatReply, ContactReply};
use crate::{ApiError, ChatAnswer, ChatRequest, ContactAck, ContactPayload, FailureKind};

const JSON: &str = "application/json";
const CONTACT_PATH: &str = "/api/contact";
const CHAT_PATH: &str = "/api/chat";
const LOG_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Origin the relative API paths are resolved against.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub contact_timeout: Duration,
    pub chat_timeout: Duration,
    pub max_reply_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            contact_timeout: Duration::from_secs(30),
            chat_timeout: Duration::from_secs(10),
            max_reply_bytes: 256 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait PortfolioApi: Send + Sync {
    async fn submit_contact(&self, payload: &ContactPayload) -> Result<ContactAck, ApiError>;

    async fn send_chat(&self, message: &str) -> Result<ChatAnswer, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    settings: ApiSettings,
    base: Url,
    client: reqwest::Client,
}

/// A JSON reply that passed the content-type and size checks.
struct JsonReply<T> {
    status: StatusCode,
    body: T,
}

impl ReqwestApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            base,
            client,
        })
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|err| ApiError::new(FailureKind::InvalidEndpoint, err.to_string()))
    }

    /// POSTs `body` as JSON and aborts the whole exchange once `deadline` passes.
    async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        deadline: Duration,
    ) -> Result<JsonReply<T>, ApiError>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let url = self.endpoint(path)?;
        let body = serde_json::to_vec(body)
            .map_err(|err| ApiError::new(FailureKind::Protocol, err.to_string()))?;
        match tokio::time::timeout(deadline, self.exchange(url, body)).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::new(
                FailureKind::Timeout,
                format!("no reply from {path} within {}ms", deadline.as_millis()),
            )),
        }
    }

    async fn exchange<T: DeserializeOwned + Send>(
        &self,
        url: Url,
        body: Vec<u8>,
    ) -> Result<JsonReply<T>, ApiError> {
        folio_debug!("POST {} ({} bytes)", url, body.len());
        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_reply_bytes {
                return Err(too_large(self.settings.max_reply_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_reply_bytes {
                return Err(too_large(self.settings.max_reply_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        if !content_type.as_deref().is_some_and(is_json_content_type) {
            let text = String::from_utf8_lossy(&bytes);
            folio_warn!(
                "Non-JSON reply from {} (status {}, content-type {:?}): {}",
                url,
                status,
                content_type,
                folio_logging::preview(&text, LOG_PREVIEW_CHARS)
            );
            return Err(ApiError::new(
                FailureKind::Protocol,
                "server returned invalid response format",
            ));
        }

        let body = serde_json::from_slice(&bytes).map_err(|err| {
            folio_warn!("Malformed JSON reply from {} (status {}): {}", url, status, err);
            ApiError::new(FailureKind::Protocol, err.to_string())
        })?;
        Ok(JsonReply { status, body })
    }
}

#[async_trait::async_trait]
impl PortfolioApi for ReqwestApi {
    async fn submit_contact(&self, payload: &ContactPayload) -> Result<ContactAck, ApiError> {
        let reply: JsonReply<ContactReply> = self
            .post_json(CONTACT_PATH, payload, self.settings.contact_timeout)
            .await?;
        let JsonReply { status, body } = reply;
        if status.is_success() && body.ok == Some(true) {
            return Ok(ContactAck {
                message: body.message,
            });
        }
        let detail = body.message.or(body.error);
        Err(ApiError::new(
            FailureKind::Application {
                status: status.as_u16(),
                detail: detail.clone(),
            },
            detail.unwrap_or_else(|| status.to_string()),
        ))
    }

    async fn send_chat(&self, message: &str) -> Result<ChatAnswer, ApiError> {
        let request = ChatRequest {
            message: message.to_string(),
        };
        let reply: JsonReply<ChatReply> = self
            .post_json(CHAT_PATH, &request, self.settings.chat_timeout)
            .await?;
        let JsonReply { status, body } = reply;
        if !status.is_success() || body.error.is_some() {
            return Err(ApiError::new(
                FailureKind::Application {
                    status: status.as_u16(),
                    detail: body.error.clone(),
                },
                body.error.unwrap_or_else(|| status.to_string()),
            ));
        }
        Ok(ChatAnswer {
            response: body.response,
        })
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains(JSON)
}

fn too_large(max_bytes: u64, actual: u64) -> ApiError {
    ApiError::new(
        FailureKind::Protocol,
        format!("reply too large (max {max_bytes}, actual {actual})"),
    )
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Protocol, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
