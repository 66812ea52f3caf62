use std::collections::HashMap;

use serde::Deserialize;
use tracing::{error, info, info_span};

use crate::error::DeliveryError;
use crate::platform::{ChannelHandle, ChatPlatform};

const API_BASE: &str = "https://discord.com/api/v10";

/// Guild text channels are type 0.
const GUILD_TEXT: u8 = 0;

#[derive(Debug, Deserialize)]
struct GuildChannel {
    id: String,
    name: Option<String>,
    #[serde(rename = "type")]
    kind: u8,
}

/// Discord REST client authenticated with a bot token.
#[derive(Clone)]
pub struct Discord {
    token: String,
}

impl std::fmt::Debug for Discord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Discord").field("token", &"<redacted>").finish()
    }
}

impl Discord {
    pub fn new(token: String) -> Self {
        Self { token }
    }

    fn auth(&self) -> String {
        format!("Bot {}", self.token)
    }
}

/// Text channels from a `GET /guilds/{id}/channels` body, keyed by name.
pub fn text_channels(body: &str) -> Result<HashMap<String, ChannelHandle>, serde_json::Error> {
    let channels: Vec<GuildChannel> = serde_json::from_str(body)?;
    Ok(channels
        .into_iter()
        .filter(|c| c.kind == GUILD_TEXT)
        .filter_map(|c| c.name.map(|name| (name, ChannelHandle(c.id))))
        .collect())
}

impl ChatPlatform for Discord {
    fn list_channels(&self, guild_id: &str) -> Result<HashMap<String, ChannelHandle>, DeliveryError> {
        let url = format!("{}/guilds/{}/channels", API_BASE, guild_id);
        let fail = |reason: String| DeliveryError::Rejected { channel: format!("guild:{}", guild_id), reason };

        let response_result = {
            let _span = info_span!("discord_list_channels", guild = %guild_id).entered();
            ureq::get(&url).header("Authorization", self.auth()).call()
        };
        let response = response_result.map_err(|e| {
            error!(error = %e, "Failed to list Discord channels");
            fail(e.to_string())
        })?;
        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| fail(format!("failed to read response body: {}", e)))?;
        text_channels(&body).map_err(|e| fail(format!("unexpected channel listing: {}", e)))
    }

    fn send_message(&self, channel: &ChannelHandle, content: &str) -> Result<(), DeliveryError> {
        let url = format!("{}/channels/{}/messages", API_BASE, channel);
        let payload = serde_json::json!({ "content": content });
        match ureq::post(&url).header("Authorization", self.auth()).send_json(payload) {
            Ok(resp) => {
                info!(status = resp.status().as_u16(), channel = %channel, "Posted message to Discord");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, channel = %channel, "Failed to post to Discord");
                Err(DeliveryError::Rejected { channel: channel.to_string(), reason: e.to_string() })
            }
        }
    }
}
