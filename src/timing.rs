use chrono::{Datelike, FixedOffset, Offset, Utc};

use crate::models::{most_recent, Priority, Suggestion, SuggestionKind, Video};

pub const MIN_CHANNEL_VIDEOS: usize = 5;
pub const MIN_BUCKET_VIDEOS: usize = 2;

pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    views: f64,
    count: usize,
}

impl Bucket {
    fn mean(&self) -> f64 {
        self.views / self.count as f64
    }
}

pub fn analyze_timing(videos: &[Video]) -> Vec<Suggestion> {
    analyze_timing_at(videos, Utc.fix())
}

/// Ties go to the earliest day of the week, counting from Sunday.
pub fn analyze_timing_at(videos: &[Video], offset: FixedOffset) -> Vec<Suggestion> {
    if videos.len() < MIN_CHANNEL_VIDEOS {
        return Vec::new();
    }

    let mut days = [Bucket::default(); 7];
    for video in videos {
        let (Some(published_at), Some(views)) = (video.published_at, video.views) else {
            continue;
        };
        let day = published_at
            .with_timezone(&offset)
            .weekday()
            .num_days_from_sunday() as usize;
        days[day].views += views as f64;
        days[day].count += 1;
    }

    let mut best: Option<(usize, f64)> = None;
    for (day, bucket) in days.iter().enumerate() {
        if bucket.count < MIN_BUCKET_VIDEOS {
            continue;
        }
        let mean = bucket.mean();
        if best.map_or(true, |(_, best_mean)| mean > best_mean) {
            best = Some((day, mean));
        }
    }

    let Some((day, day_mean)) = best else {
        return Vec::new();
    };

    let total = days.iter().fold(Bucket::default(), |acc, bucket| Bucket {
        views: acc.views + bucket.views,
        count: acc.count + bucket.count,
    });

    tracing::debug!(day = DAY_NAMES[day], day_mean, "best publish day found");

    vec![Suggestion::for_channel(
        most_recent(videos),
        SuggestionKind::Timing,
        Priority::Moderate,
        format!(
            "Your best upload day is {} - consider posting consistently on this day",
            DAY_NAMES[day]
        ),
        format!(
            "Videos posted on {} average {:.0} views vs {:.0} overall",
            DAY_NAMES[day],
            day_mean,
            total.mean()
        ),
    )]
}
