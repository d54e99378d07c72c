use thiserror::Error;

#[derive(Debug, Error)]
pub enum GetError {
    #[error("the request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("the request failed with status code: {status}\n{body}")]
    ResponseError {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("the response body could not be read: {0}")]
    ResponseBodyError(#[source] reqwest::Error),
    #[error("unable to parse the response body: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("the response contained no choices")]
    NoChoices,
    #[error("the first choice has no message content")]
    MissingContent,
}
