//! Bot HTTP API implementation of the membership checker.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use turnstile_core::{Membership, UserId};

use crate::checker::MembershipChecker;
use crate::config::GateConfig;

/// Membership checker backed by the chat platform's Bot HTTP API.
///
/// Issues `getChatMember` calls for the configured channel under a bounded
/// timeout. Transport and API failures never raise through
/// [`MembershipChecker::check`]; they resolve to
/// [`Membership::CheckFailed`], which the gate denies.
#[derive(Debug, Clone)]
pub struct BotApiMembershipChecker {
    client: Client,
    api_base: String,
    bot_token: String,
    channel_id: String,
}

impl BotApiMembershipChecker {
    /// Create a checker from the gate configuration.
    ///
    /// # Errors
    ///
    /// Returns `CheckerError::Configuration` if no bot token is configured,
    /// or an HTTP error if the client cannot be built.
    pub fn new(config: &GateConfig) -> Result<Self, CheckerError> {
        let bot_token = config
            .bot_token
            .clone()
            .ok_or_else(|| CheckerError::Configuration("BOT_TOKEN is not set".into()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.membership_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bot_token,
            channel_id: config.channel_id.clone(),
        })
    }

    /// Query the raw membership status of a user in the gating channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, or the API answers
    /// with `ok: false`.
    pub async fn member_status(&self, user_id: UserId) -> Result<ChatMemberStatus, CheckerError> {
        let url = format!("{}/bot{}/getChatMember", self.api_base, self.bot_token);
        let request = GetChatMemberRequest {
            chat_id: &self.channel_id,
            user_id: user_id.get(),
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let body: ApiResponse<ChatMember> = response.json().await?;

        if !body.ok {
            return Err(CheckerError::Api(
                body.description.unwrap_or_else(|| "unknown error".into()),
            ));
        }

        let member = body
            .result
            .ok_or_else(|| CheckerError::Api("response carried no member".into()))?;
        Ok(member.status)
    }
}

#[async_trait]
impl MembershipChecker for BotApiMembershipChecker {
    async fn check(&self, user_id: UserId) -> Membership {
        match self.member_status(user_id).await {
            Ok(status) if status.counts_as_member() => Membership::Member,
            Ok(_) => Membership::NotMember,
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "membership check failed");
                Membership::CheckFailed
            }
        }
    }
}

/// Membership status of a chat member as reported by the Bot API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMemberStatus {
    /// Channel creator.
    Creator,
    /// Channel administrator.
    Administrator,
    /// Ordinary member.
    Member,
    /// Member with restrictions.
    Restricted,
    /// Not a member.
    Left,
    /// Banned from the channel.
    Kicked,
}

impl ChatMemberStatus {
    /// Whether this status passes the membership gate.
    #[must_use]
    pub const fn counts_as_member(self) -> bool {
        matches!(self, Self::Creator | Self::Administrator | Self::Member)
    }
}

/// Errors that can occur when talking to the Bot API.
#[derive(Debug, thiserror::Error)]
pub enum CheckerError {
    /// HTTP request failed or timed out.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an error payload.
    #[error("API error: {0}")]
    Api(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

#[derive(Serialize)]
struct GetChatMemberRequest<'a> {
    chat_id: &'a str,
    user_id: i64,
}

#[derive(Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    #[serde(default)]
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
struct ChatMember {
    status: ChatMemberStatus,
}
