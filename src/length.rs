use crate::models::{most_recent, Priority, Suggestion, SuggestionKind, Video};
use crate::timing::{MIN_BUCKET_VIDEOS, MIN_CHANNEL_VIDEOS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    Short,
    Medium,
    Long,
}

impl Bracket {
    pub const ALL: [Bracket; 3] = [Bracket::Short, Bracket::Medium, Bracket::Long];

    pub fn from_seconds(seconds: f64) -> Self {
        let minutes = seconds / 60.0;
        if minutes > 12.0 {
            Bracket::Long
        } else if minutes > 5.0 {
            Bracket::Medium
        } else {
            Bracket::Short
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Bracket::Short => "3-5 minute",
            Bracket::Medium => "8-12 minute",
            Bracket::Long => "15+ minute",
        }
    }

    fn index(self) -> usize {
        match self {
            Bracket::Short => 0,
            Bracket::Medium => 1,
            Bracket::Long => 2,
        }
    }
}

pub fn analyze_length(videos: &[Video]) -> Vec<Suggestion> {
    if videos.len() < MIN_CHANNEL_VIDEOS {
        return Vec::new();
    }

    let mut totals = [(0.0f64, 0usize); 3];
    for video in videos {
        let (Some(duration), Some(views)) = (video.avg_view_duration, video.views) else {
            continue;
        };
        let slot = &mut totals[Bracket::from_seconds(duration).index()];
        slot.0 += views as f64;
        slot.1 += 1;
    }

    let best = Bracket::ALL
        .iter()
        .filter_map(|bracket| {
            let (views, count) = totals[bracket.index()];
            (count >= MIN_BUCKET_VIDEOS).then(|| (*bracket, views / count as f64))
        })
        .fold(None, |best: Option<(Bracket, f64)>, candidate| match best {
            Some((_, best_mean)) if best_mean >= candidate.1 => best,
            _ => Some(candidate),
        });

    let Some((bracket, bracket_mean)) = best else {
        return Vec::new();
    };

    let (all_views, all_count) = totals
        .iter()
        .fold((0.0f64, 0usize), |(views, count), slot| (views + slot.0, count + slot.1));
    let overall_mean = all_views / all_count as f64;

    tracing::debug!(bracket = bracket.label(), bracket_mean, "best length bracket found");

    vec![Suggestion::for_channel(
        most_recent(videos),
        SuggestionKind::Length,
        Priority::Minor,
        format!(
            "Your {} videos perform best - aim for this length",
            bracket.label()
        ),
        format!(
            "These videos average {:.0} views vs {:.0} overall",
            bracket_mean, overall_mean
        ),
    )]
}
