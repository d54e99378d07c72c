use serde::Deserialize;

/// Raw token exchange response from GitHub. Only the fields we read are modeled.
#[derive(Deserialize)]
pub struct Response {
    pub token: String,
    pub expires_at: Option<i64>,
    pub refresh_in: Option<u64>,
}
