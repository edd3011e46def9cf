use chrono::FixedOffset;
use serde::Deserialize;

/// Defaults for the command line, read from `CHANNEL_SUGGESTIONS_*`
/// environment variables (a `.env` file is honoured).
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Channel's local offset from UTC in minutes, used for publish days
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// Number of suggestions listed per channel
    #[serde(default = "default_report_limit")]
    pub report_limit: usize,
}

fn default_report_limit() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            report_limit: default_report_limit(),
        }
    }
}

impl Config {
    pub const ENV_PREFIX: &'static str = "CHANNEL_SUGGESTIONS_";

    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(Self::ENV_PREFIX)
            .from_iter(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

/// Turns a minute offset into a chrono offset, rejecting anything outside
/// a day.
pub fn utc_offset(minutes: i32) -> anyhow::Result<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| anyhow::anyhow!("UTC offset of {minutes} minutes is out of range"))
}
