//! Platform access tokens and connection status.
//!
//! Tokens come from environment variables (`TIKTOK_TOKEN`, ...). A missing
//! variable is an empty token. Status is a length heuristic only; nothing is
//! verified against the platform.

use serde::Serialize;

/// Tokens at least this long count as connected
pub const CONNECTED_MIN_LEN: usize = 10;

/// Known platforms with the environment variable holding each token
pub const PLATFORMS: [(&str, &str); 7] = [
    ("TikTok", "TIKTOK_TOKEN"),
    ("Facebook", "FACEBOOK_TOKEN"),
    ("YouTube", "YOUTUBE_TOKEN"),
    ("Twitch", "TWITCH_TOKEN"),
    ("Kik", "KIK_TOKEN"),
    ("Instagram", "INSTAGRAM_TOKEN"),
    ("Twitter/X", "TWITTER_TOKEN"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Connected,
    Pending,
    NotConnected,
}

impl ConnectionStatus {
    pub fn from_token(token: &str) -> Self {
        let len = token.trim().chars().count();
        if len >= CONNECTED_MIN_LEN {
            ConnectionStatus::Connected
        } else if len > 0 {
            ConnectionStatus::Pending
        } else {
            ConnectionStatus::NotConnected
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "Connected",
            ConnectionStatus::Pending => "Pending",
            ConnectionStatus::NotConnected => "Not connected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformToken {
    pub platform: String,
    pub env_var: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformStatus {
    pub name: String,
    pub status: ConnectionStatus,
    pub label: &'static str,
}

/// Token per platform, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformTokens {
    entries: Vec<PlatformToken>,
}

impl PlatformTokens {
    /// Read every known token from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let entries = PLATFORMS
            .iter()
            .map(|(platform, env_var)| PlatformToken {
                platform: platform.to_string(),
                env_var: env_var.to_string(),
                token: lookup(env_var).unwrap_or_default(),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[PlatformToken] {
        &self.entries
    }

    /// Token for a platform name (case-insensitive), if the platform is known
    pub fn token(&self, platform: &str) -> Option<&str> {
        self.entry(platform).map(|entry| entry.token.as_str())
    }

    /// Replace a token in memory; returns false for an unknown platform
    pub fn set_token(&mut self, platform: &str, token: impl Into<String>) -> bool {
        let key = normalize(platform);
        match self
            .entries
            .iter_mut()
            .find(|entry| normalize(&entry.platform) == key)
        {
            Some(entry) => {
                entry.token = token.into();
                true
            }
            None => false,
        }
    }

    pub fn status(&self, platform: &str) -> Option<ConnectionStatus> {
        self.token(platform).map(ConnectionStatus::from_token)
    }

    pub fn statuses(&self) -> Vec<PlatformStatus> {
        self.entries
            .iter()
            .map(|entry| {
                let status = ConnectionStatus::from_token(&entry.token);
                PlatformStatus {
                    name: entry.platform.clone(),
                    status,
                    label: status.label(),
                }
            })
            .collect()
    }

    fn entry(&self, platform: &str) -> Option<&PlatformToken> {
        let key = normalize(platform);
        self.entries
            .iter()
            .find(|entry| normalize(&entry.platform) == key)
    }
}

// "twitter", "Twitter/X" and "TWITTER/X" all name the same platform.
fn normalize(platform: &str) -> String {
    let lower = platform.trim().to_lowercase();
    match lower.strip_suffix("/x") {
        Some(base) => base.to_string(),
        None => lower,
    }
}
