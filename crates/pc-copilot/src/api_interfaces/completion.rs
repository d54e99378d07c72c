use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Raw chat completion request body.
#[derive(Serialize, Debug)]
pub struct Request<'a> {
    pub messages: Vec<Message<'a>>,
    pub model: &'a str,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Serialize, Debug)]
pub struct Message<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

/// Raw chat completion response body.
#[derive(Deserialize)]
pub struct Response {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default, deserialize_with = "non_empty_usage")]
    pub usage: Option<Usage>,
    pub model: Option<String>,
}

#[derive(Deserialize)]
pub struct Choice {
    pub message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

/// Token accounting reported alongside a completion. Missing counters read as zero.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// An empty or null usage object carries no accounting and reads as absent.
fn non_empty_usage<'de, D>(deserializer: D) -> Result<Option<Usage>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Map<String, Value>>::deserialize(deserializer)? {
        Some(fields) if !fields.is_empty() => Usage::deserialize(Value::Object(fields))
            .map(Some)
            .map_err(de::Error::custom),
        _ => Ok(None),
    }
}
