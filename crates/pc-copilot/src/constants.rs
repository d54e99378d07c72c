/// The default endpoint that exchanges a GitHub token for a Copilot token
pub const DEFAULT_TOKEN_SERVICE_URL: &str = "https://api.github.com/copilot_internal/v2/token";

/// The default endpoint for the Copilot chat completion service
pub const DEFAULT_COMPLETION_SERVICE_URL: &str = "https://api.githubcopilot.com/chat/completions";

/// The environment variable the GitHub token is read from
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

pub const DEFAULT_MODEL: &str = "gpt-5-mini";
pub const DEFAULT_MESSAGE: &str = "Hello! What is 2+2?";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

// Client identity. The Copilot service only talks to clients that look like the VS Code extension.
pub const VSCODE_VERSION: &str = "1.96.0";
pub const COPILOT_VERSION: &str = "0.26.7";
pub const EDITOR_VERSION: &str = "vscode/1.96.0";
pub const EDITOR_PLUGIN_VERSION: &str = "copilot-chat/0.26.7";
pub const CLIENT_USER_AGENT: &str = "GitHubCopilotChat/0.26.7";
pub const API_VERSION: &str = "2025-04-01";
pub const USER_AGENT_LIBRARY: &str = "electron-fetch";
pub const INTEGRATION_ID: &str = "vscode-chat";
pub const OPENAI_INTENT: &str = "conversation-panel";
pub const INITIATOR: &str = "user";

/// Header names shared by both requests
pub const EDITOR_VERSION_HEADER: &str = "editor-version";
pub const EDITOR_PLUGIN_VERSION_HEADER: &str = "editor-plugin-version";
pub const API_VERSION_HEADER: &str = "x-github-api-version";
pub const USER_AGENT_LIBRARY_HEADER: &str = "x-vscode-user-agent-library-version";

/// Header names only sent with completion requests
pub const INTEGRATION_ID_HEADER: &str = "copilot-integration-id";
pub const OPENAI_INTENT_HEADER: &str = "openai-intent";
pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const INITIATOR_HEADER: &str = "x-initiator";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_identity_matches_versions() {
        assert!(EDITOR_VERSION.ends_with(VSCODE_VERSION));
        assert!(EDITOR_PLUGIN_VERSION.ends_with(COPILOT_VERSION));
        assert!(CLIENT_USER_AGENT.ends_with(COPILOT_VERSION));
    }

    #[test]
    fn default_service_urls_are_https() {
        assert!(DEFAULT_TOKEN_SERVICE_URL.starts_with("https://"));
        assert!(DEFAULT_COMPLETION_SERVICE_URL.starts_with("https://"));
    }
}
