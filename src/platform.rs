use std::collections::HashMap;
use std::fmt;

use tracing::{info, instrument};

use crate::error::DeliveryError;

/// Opaque delivery target (a Discord channel id).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelHandle(pub String);

impl fmt::Display for ChannelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The chat platform as seen by the bot: channel discovery and sending. Blocking.
pub trait ChatPlatform: Send + Sync {
    fn list_channels(&self, guild_id: &str) -> Result<HashMap<String, ChannelHandle>, DeliveryError>;
    fn send_message(&self, channel: &ChannelHandle, content: &str) -> Result<(), DeliveryError>;
}

/// Channel name -> handle, filled once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct DestinationRegistry {
    channels: HashMap<String, ChannelHandle>,
}

impl DestinationRegistry {
    pub fn new(channels: HashMap<String, ChannelHandle>) -> Self {
        Self { channels }
    }

    #[instrument(level = "info", skip(platform))]
    pub fn discover(platform: &dyn ChatPlatform, guild_id: &str) -> Result<Self, DeliveryError> {
        let channels = platform.list_channels(guild_id)?;
        info!(count = channels.len(), "Registered destination channels");
        Ok(Self { channels })
    }

    pub fn get(&self, name: &str) -> Result<&ChannelHandle, DeliveryError> {
        self.channels
            .get(name)
            .ok_or_else(|| DeliveryError::ChannelMissing(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
