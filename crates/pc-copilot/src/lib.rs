mod api_interfaces;
pub mod chat;
pub mod client;
pub mod constants;
mod credential;
pub mod error;
pub mod token;
pub mod util;

pub use chat::{ChatRequest, ChatResponse, Usage};
pub use client::{Client, EndpointConfig};
pub use credential::{Credential, CredentialError};
pub use token::SessionToken;
