use reqwest::Url;
use thiserror::Error;

use crate::{
    chat::{ChatRequest, ChatResponse},
    error::GetError,
    token::{SessionToken, TokenError},
    Credential,
};

#[derive(Clone, Debug)]
pub struct Client {
    http_client: reqwest::Client,
    endpoints: Option<EndpointConfig>,
    credential: Credential,
}

/// Overrides for the service URLs. Unset entries fall back to the public GitHub endpoints.
#[derive(Clone, Debug, Default)]
pub struct EndpointConfig {
    pub token: Option<String>,
    pub completion: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointConfigError {
    #[error("invalid URL for endpoint {0} (url: {1})")]
    InvalidUrl(&'static str, String),
    #[error("unsupported scheme `{1}` for endpoint {0}, expected http or https")]
    UnsupportedScheme(&'static str, String),
}

impl EndpointConfig {
    pub fn validate(&self) -> Result<(), EndpointConfigError> {
        let overrides = [
            ("token", self.token.as_deref()),
            ("completion", self.completion.as_deref()),
        ];
        for (name, url) in overrides {
            let Some(url) = url else { continue };
            let parsed =
                Url::parse(url).map_err(|_| EndpointConfigError::InvalidUrl(name, url.to_string()))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(EndpointConfigError::UnsupportedScheme(
                    name,
                    parsed.scheme().to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ClientInitError {
    #[error("invalid endpoint configuration: {0}")]
    InvalidEndpointConfig(#[from] EndpointConfigError),
}

impl Client {
    pub fn new(
        http_client: reqwest::Client,
        endpoints: Option<EndpointConfig>,
        credential: Credential,
    ) -> Result<Self, ClientInitError> {
        if let Some(endpoints) = &endpoints {
            endpoints.validate()?
        }
        Ok(Self {
            http_client,
            endpoints,
            credential,
        })
    }

    pub async fn exchange_token(&self) -> Result<SessionToken, TokenError> {
        let url = self
            .endpoints
            .as_ref()
            .and_then(|endpoints| endpoints.token.as_deref());
        SessionToken::exchange(&self.http_client, &self.credential, url).await
    }

    pub async fn complete(
        &self,
        token: &SessionToken,
        request: &ChatRequest,
    ) -> Result<ChatResponse, GetError> {
        let url = self
            .endpoints
            .as_ref()
            .and_then(|endpoints| endpoints.completion.as_deref());
        request.send(&self.http_client, token, url).await
    }
}
