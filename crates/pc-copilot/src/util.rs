use std::time::Duration;

/// Build the HTTP client used for both Copilot requests.
pub fn default_http_client(timeout: Option<Duration>) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder().gzip(true).brotli(true);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}
