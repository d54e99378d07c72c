use std::fmt;

use reqwest::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT},
    Client,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{api_interfaces::token, constants::*, Credential};

/// A short-lived Copilot token, valid for the chat completion service.
#[derive(Clone)]
pub struct SessionToken {
    token: String,
    expires_at: Option<i64>,
    refresh_in: Option<u64>,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("the token request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("the token request failed with status code: {status}\n{body}")]
    ResponseError {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("the token response body could not be read: {0}")]
    ResponseBodyError(#[source] reqwest::Error),
    #[error("unable to parse the token response: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl SessionToken {
    /// Exchange a GitHub credential for a Copilot token using a custom HTTP client and endpoint.
    /// If the endpoint is not provided, the GitHub token service will be used.
    pub async fn exchange(
        client: &Client,
        credential: &Credential,
        endpoint: Option<&str>,
    ) -> Result<Self, TokenError> {
        let url = endpoint.unwrap_or(DEFAULT_TOKEN_SERVICE_URL);
        debug!(url, "exchanging GitHub token for a Copilot token");
        let response = client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("token {}", credential.get()))
            .header(EDITOR_VERSION_HEADER, EDITOR_VERSION)
            .header(EDITOR_PLUGIN_VERSION_HEADER, EDITOR_PLUGIN_VERSION)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header(API_VERSION_HEADER, API_VERSION)
            .header(USER_AGENT_LIBRARY_HEADER, USER_AGENT_LIBRARY)
            .send()
            .await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(TokenError::ResponseBodyError)?;
        if !status.is_success() {
            warn!(%status, "token service rejected the credential");
            return Err(TokenError::ResponseError { status, body });
        }
        let parsed_body: token::Response = serde_json::from_str(&body)?;
        debug!(
            expires_at = parsed_body.expires_at,
            refresh_in = parsed_body.refresh_in,
            "obtained Copilot token"
        );
        Ok(Self::from(parsed_body))
    }

    /// From a raw token string.
    pub fn from_raw(token: &str) -> Self {
        Self {
            token: token.to_owned(),
            expires_at: None,
            refresh_in: None,
        }
    }

    pub fn get(&self) -> &str {
        &self.token
    }

    /// Unix timestamp after which the token is no longer accepted, if the service reported one.
    pub fn expires_at(&self) -> Option<i64> {
        self.expires_at
    }

    /// Seconds after which the service suggests fetching a new token.
    pub fn refresh_in(&self) -> Option<u64> {
        self.refresh_in
    }
}

impl From<token::Response> for SessionToken {
    fn from(response: token::Response) -> Self {
        Self {
            token: response.token,
            expires_at: response.expires_at,
            refresh_in: response.refresh_in,
        }
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("refresh_in", &self.refresh_in)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    const FAKE_GITHUB_TOKEN: &str = "gho_fake";
    const FAKE_SESSION_TOKEN: &str = "tid=fake;exp=1700000000";

    #[tokio::test]
    async fn exchange_success() {
        // Arrange
        let server = MockServer::start_async().await;
        let token_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/")
                    .header("authorization", format!("token {}", FAKE_GITHUB_TOKEN))
                    .header("accept", "application/json")
                    .header("editor-version", EDITOR_VERSION)
                    .header("editor-plugin-version", EDITOR_PLUGIN_VERSION)
                    .header("user-agent", CLIENT_USER_AGENT)
                    .header("x-github-api-version", API_VERSION)
                    .header("x-vscode-user-agent-library-version", USER_AGENT_LIBRARY);
                then.status(200).json_body(json!({
                    "token": FAKE_SESSION_TOKEN,
                    "expires_at": 1700000000,
                    "refresh_in": 1500
                }));
            })
            .await;
        let url = server.url("/");
        let client = reqwest::Client::new();
        let credential = Credential::from_raw(FAKE_GITHUB_TOKEN);

        // Act
        let token = SessionToken::exchange(&client, &credential, Some(&url)).await;

        // Assert
        assert!(
            token.is_ok(),
            "Failed to exchange token: {:?}",
            token.unwrap_err()
        );
        let token = token.unwrap();
        assert_eq!(token.get(), FAKE_SESSION_TOKEN);
        assert_eq!(token.expires_at(), Some(1700000000));
        assert_eq!(token.refresh_in(), Some(1500));
        token_mock.assert();
    }

    #[tokio::test]
    async fn exchange_token_only() {
        // Arrange
        let server = MockServer::start_async().await;
        let token_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).json_body(json!({ "token": "T1" }));
            })
            .await;
        let url = server.url("/");
        let client = reqwest::Client::new();

        // Act
        let token =
            SessionToken::exchange(&client, &Credential::from_raw("A"), Some(&url)).await;

        // Assert
        let token = token.unwrap();
        assert_eq!(token.get(), "T1");
        assert_eq!(token.expires_at(), None);
        token_mock.assert();
    }

    #[tokio::test]
    async fn exchange_bad_status() {
        // Arrange
        let server = MockServer::start_async().await;
        let token_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(401).body(r#"{"message":"Bad credentials"}"#);
            })
            .await;
        let url = server.url("/");
        let client = reqwest::Client::new();

        // Act
        let token =
            SessionToken::exchange(&client, &Credential::from_raw("A"), Some(&url)).await;

        // Assert
        match token.unwrap_err() {
            TokenError::ResponseError { status, body } => {
                assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
                assert!(body.contains("Bad credentials"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        token_mock.assert();
    }

    #[tokio::test]
    async fn exchange_missing_token_field() {
        // Arrange
        let server = MockServer::start_async().await;
        let token_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).json_body(json!({ "expires_at": 1700000000 }));
            })
            .await;
        let url = server.url("/");
        let client = reqwest::Client::new();

        // Act
        let token =
            SessionToken::exchange(&client, &Credential::from_raw("A"), Some(&url)).await;

        // Assert
        assert!(matches!(token.unwrap_err(), TokenError::ParseError(_)));
        token_mock.assert();
    }

    #[tokio::test]
    async fn exchange_invalid_url() {
        // Arrange
        let client = reqwest::Client::new();

        // Act
        let token = SessionToken::exchange(
            &client,
            &Credential::from_raw("A"),
            Some("http://test.invalid"),
        )
        .await;

        // Assert
        assert!(matches!(token.unwrap_err(), TokenError::RequestError(_)));
    }

    #[test]
    fn debug_redacts_token() {
        let token = SessionToken::from_raw("super-secret");
        assert!(!format!("{:?}", token).contains("super-secret"));
    }
}
