use std::fmt;

use derive_builder::Builder;
use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT},
    Client,
};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    api_interfaces::completion::{self, Message},
    constants::*,
    error::GetError,
    SessionToken,
};

pub use crate::api_interfaces::completion::Usage;

/// A single-turn chat completion request.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ChatRequest {
    #[builder(default = "DEFAULT_MESSAGE.to_string()")]
    pub message: String,
    #[builder(default = "DEFAULT_MODEL.to_string()")]
    pub model: String,
    #[builder(default = "DEFAULT_TEMPERATURE")]
    pub temperature: f64,
    #[builder(default = "DEFAULT_MAX_TOKENS")]
    pub max_tokens: u32,
}

impl ChatRequestBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(temperature) = self.temperature {
            if !temperature.is_finite() || !(0.0..=2.0).contains(&temperature) {
                return Err(format!(
                    "temperature must be between 0 and 2, got {}",
                    temperature
                ));
            }
        }
        if self.max_tokens == Some(0) {
            return Err("max tokens must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// The first completion choice, plus whatever accounting the service returned.
#[derive(Debug)]
pub struct ChatResponse {
    pub answer: String,
    pub usage: Option<Usage>,
    pub model: Option<String>,
    raw: Value,
}

impl ChatResponse {
    /// The complete response document as returned by the service.
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl TryFrom<Value> for ChatResponse {
    type Error = GetError;

    fn try_from(raw: Value) -> Result<Self, GetError> {
        let parsed: completion::Response = serde_json::from_value(raw.clone())?;
        let answer = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(GetError::NoChoices)?
            .message
            .and_then(|message| message.content)
            .ok_or(GetError::MissingContent)?;
        Ok(Self {
            answer,
            usage: parsed.usage,
            model: parsed.model,
            raw,
        })
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} total ({} prompt + {} completion)",
            self.total_tokens, self.prompt_tokens, self.completion_tokens
        )
    }
}

impl<'a> From<&'a ChatRequest> for completion::Request<'a> {
    fn from(request: &'a ChatRequest) -> Self {
        Self {
            messages: vec![Message {
                role: "user",
                content: &request.message,
            }],
            model: &request.model,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

impl ChatRequest {
    pub fn builder() -> ChatRequestBuilder {
        ChatRequestBuilder::default()
    }

    /// Send the request to the completion service using a custom HTTP client and endpoint.
    /// If the endpoint is not provided, the Copilot completion service will be used.
    pub async fn send(
        &self,
        client: &Client,
        token: &SessionToken,
        endpoint: Option<&str>,
    ) -> Result<ChatResponse, GetError> {
        let url = endpoint.unwrap_or(DEFAULT_COMPLETION_SERVICE_URL);
        let request_id = Uuid::new_v4().to_string();
        debug!(url, %request_id, model = %self.model, "requesting chat completion");
        let response = client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", token.get()))
            .header(INTEGRATION_ID_HEADER, INTEGRATION_ID)
            .header(EDITOR_VERSION_HEADER, EDITOR_VERSION)
            .header(EDITOR_PLUGIN_VERSION_HEADER, EDITOR_PLUGIN_VERSION)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header(OPENAI_INTENT_HEADER, OPENAI_INTENT)
            .header(API_VERSION_HEADER, API_VERSION)
            .header(REQUEST_ID_HEADER, &request_id)
            .header(USER_AGENT_LIBRARY_HEADER, USER_AGENT_LIBRARY)
            .header(INITIATOR_HEADER, INITIATOR)
            .body(serde_json::to_string(&completion::Request::from(self))?)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await.map_err(GetError::ResponseBodyError)?;
        if !status.is_success() {
            warn!(%status, %request_id, "completion service returned an error");
            return Err(GetError::ResponseError { status, body });
        }
        let parsed_body: Value = serde_json::from_str(&body)?;
        let response = ChatResponse::try_from(parsed_body)?;
        debug!(%request_id, model = response.model.as_deref(), "received chat completion");
        Ok(response)
    }
}
