/*!
 * Channel authorization.
 *
 * The bot only talks to chats whose identifiers were listed at startup.
 * Anything else is dropped before the text is even looked at.
 */

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;

/// Immutable set of chat identifiers the bot is allowed to serve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSet {
    ids: HashSet<i64>,
}

impl ChannelSet {
    /// Parse a comma-separated list such as `"123, -1234, 12345"`.
    ///
    /// Tokens are trimmed and empty tokens are skipped. Fails when a token is not a
    /// signed 64-bit integer or when nothing is left after trimming.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let mut ids = HashSet::new();
        for token in value.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let id = token.parse::<i64>().map_err(|source| ConfigError::InvalidChannel {
                token: token.to_string(),
                source,
            })?;
            ids.insert(id);
        }

        if ids.is_empty() {
            return Err(ConfigError::NoChannels);
        }

        Ok(Self { ids })
    }

    /// Whether messages from this chat may be processed
    pub fn is_authorized(&self, channel_id: i64) -> bool {
        self.ids.contains(&channel_id)
    }

    /// Number of distinct channels
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromStr for ChannelSet {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ChannelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<i64> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        let joined = ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(",");
        write!(f, "{}", joined)
    }
}
