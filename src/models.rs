use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{InputError, PriorityError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub views: Option<u64>,
    #[serde(default)]
    pub likes: Option<u64>,
    #[serde(default)]
    pub comments: Option<u64>,
    #[serde(default)]
    pub ctr: Option<f64>,
    /// Average view duration in seconds.
    #[serde(default)]
    pub avg_view_duration: Option<f64>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl Video {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            channel_id: None,
            title: None,
            published_at: None,
            views: None,
            likes: None,
            comments: None,
            ctr: None,
            avg_view_duration: None,
            thumbnail_url: None,
        }
    }

    /// Checks the metric ranges the engine assumes. The engine itself never
    /// calls this; loaders do before handing videos over.
    pub fn validate(&self) -> Result<(), InputError> {
        if let Some(ctr) = self.ctr {
            if !ctr.is_finite() || !(0.0..=1.0).contains(&ctr) {
                return Err(InputError::InvalidMetric {
                    video_id: self.id.clone(),
                    field: "ctr",
                    value: ctr,
                });
            }
        }

        if let Some(duration) = self.avg_view_duration {
            if !duration.is_finite() || duration < 0.0 {
                return Err(InputError::InvalidMetric {
                    video_id: self.id.clone(),
                    field: "avg_view_duration",
                    value: duration,
                });
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelAverages {
    pub avg_views: f64,
    pub avg_ctr: f64,
    pub avg_duration: f64,
    pub sample_size: usize,
}

impl ChannelAverages {
    pub fn is_empty(&self) -> bool {
        self.sample_size == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Title,
    Thumbnail,
    Hook,
    Length,
    Timing,
    Ctr,
    Engagement,
}

impl SuggestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionKind::Title => "title",
            SuggestionKind::Thumbnail => "thumbnail",
            SuggestionKind::Hook => "hook",
            SuggestionKind::Length => "length",
            SuggestionKind::Timing => "timing",
            SuggestionKind::Ctr => "ctr",
            SuggestionKind::Engagement => "engagement",
        }
    }
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency of a suggestion. Ordered from `Low` (1) to `Urgent` (5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Priority {
    Low = 1,
    Minor = 2,
    Moderate = 3,
    High = 4,
    Urgent = 5,
}

impl Priority {
    pub fn level(self) -> u8 {
        self as u8
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.level()
    }
}

impl TryFrom<u8> for Priority {
    type Error = PriorityError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::Low),
            2 => Ok(Priority::Minor),
            3 => Ok(Priority::Moderate),
            4 => Ok(Priority::High),
            5 => Ok(Priority::Urgent),
            other => Err(PriorityError(other)),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionScope {
    Video,
    Channel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub suggestion: String,
    pub reason: Option<String>,
    pub priority: Priority,
    pub scope: SuggestionScope,
    /// Source video for per-video suggestions; the most recently published
    /// video for channel-wide ones.
    pub video_id: Option<String>,
}

impl Suggestion {
    pub fn for_video(
        video_id: &str,
        kind: SuggestionKind,
        priority: Priority,
        suggestion: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            suggestion: suggestion.into(),
            reason: Some(reason.into()),
            priority,
            scope: SuggestionScope::Video,
            video_id: Some(video_id.to_string()),
        }
    }

    pub fn for_channel(
        anchor: Option<&Video>,
        kind: SuggestionKind,
        priority: Priority,
        suggestion: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            suggestion: suggestion.into(),
            reason: Some(reason.into()),
            priority,
            scope: SuggestionScope::Channel,
            video_id: anchor.map(|video| video.id.clone()),
        }
    }
}

/// Most recently published video, used to anchor channel-wide suggestions.
/// Ties keep the earliest video in input order.
pub fn most_recent(videos: &[Video]) -> Option<&Video> {
    videos
        .iter()
        .filter(|video| video.published_at.is_some())
        .fold(None, |latest: Option<&Video>, video| match latest {
            Some(current) if current.published_at >= video.published_at => Some(current),
            _ => Some(video),
        })
}
