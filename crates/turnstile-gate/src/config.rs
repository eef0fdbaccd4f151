//! Gate configuration.

use turnstile_core::UserId;

/// Gate configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// The administrator identity with total gate bypass (default: 0, which
    /// matches no real user).
    pub admin_id: UserId,

    /// Identifier of the gating channel the bot checks membership against.
    pub channel_id: String,

    /// Bot API token; required by the HTTP checker.
    pub bot_token: Option<String>,

    /// Base URL of the Bot API (default: `<https://api.telegram.org>`).
    pub api_base: String,

    /// Membership request timeout in seconds (default: 5).
    pub membership_timeout_seconds: u64,
}

impl GateConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            admin_id: std::env::var("ADMIN_ID")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(UserId::new(0)),
            channel_id: std::env::var("CHANNEL_ID").unwrap_or_default(),
            bot_token: std::env::var("BOT_TOKEN").ok(),
            api_base: std::env::var("BOT_API_BASE")
                .unwrap_or_else(|_| "https://api.telegram.org".into()),
            membership_timeout_seconds: std::env::var("MEMBERSHIP_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            admin_id: UserId::new(0),
            channel_id: String::new(),
            bot_token: None,
            api_base: "https://api.telegram.org".into(),
            membership_timeout_seconds: 5,
        }
    }
}
