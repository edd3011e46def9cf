use chrono::{FixedOffset, Offset, Utc};
use serde::Serialize;

use crate::averages::compute_averages;
use crate::length::analyze_length;
use crate::models::{ChannelAverages, Suggestion, Video};
use crate::rules::evaluate_video;
use crate::timing::analyze_timing_at;

#[derive(Debug, Clone, Copy)]
pub struct AnalysisOptions {
    /// Offset used to decide which weekday a video went out on.
    pub utc_offset: FixedOffset,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            utc_offset: Utc.fix(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelAnalysis {
    pub channel_id: String,
    pub averages: ChannelAverages,
    pub suggestions: Vec<Suggestion>,
    pub videos_analyzed: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisSummary {
    pub channels: Vec<ChannelAnalysis>,
    pub total_videos: usize,
    pub total_suggestions: usize,
}

impl AnalysisSummary {
    fn push(mut self, analysis: ChannelAnalysis) -> Self {
        self.total_videos += analysis.videos_analyzed;
        self.total_suggestions += analysis.suggestions.len();
        self.channels.push(analysis);
        self
    }
}

/// One full pass over a channel: per-video rules in input order, then the
/// channel-wide timing and length suggestions.
pub fn analyze_channel(
    channel_id: &str,
    videos: &[Video],
    options: &AnalysisOptions,
) -> ChannelAnalysis {
    let averages = compute_averages(videos);

    let mut suggestions: Vec<Suggestion> = videos
        .iter()
        .flat_map(|video| evaluate_video(video, &averages))
        .collect();
    suggestions.extend(analyze_timing_at(videos, options.utc_offset));
    suggestions.extend(analyze_length(videos));

    tracing::info!(
        channel_id,
        videos = videos.len(),
        complete = averages.sample_size,
        suggestions = suggestions.len(),
        "Channel analyzed"
    );

    ChannelAnalysis {
        channel_id: channel_id.to_string(),
        averages,
        suggestions,
        videos_analyzed: videos.len(),
    }
}

pub fn analyze_channels<'a, I>(channels: I, options: &AnalysisOptions) -> AnalysisSummary
where
    I: IntoIterator<Item = (&'a str, &'a [Video])>,
{
    channels
        .into_iter()
        .map(|(channel_id, videos)| analyze_channel(channel_id, videos, options))
        .fold(AnalysisSummary::default(), AnalysisSummary::push)
}

/// Highest priority first. Stable, so rule order survives among equals.
pub fn rank(suggestions: &[Suggestion]) -> Vec<&Suggestion> {
    let mut ranked: Vec<&Suggestion> = suggestions.iter().collect();
    ranked.sort_by(|a, b| b.priority.cmp(&a.priority));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, SuggestionKind, SuggestionScope};
    use chrono::{Duration, TimeZone};

    fn channel_videos(count: usize) -> Vec<Video> {
        let start = Utc.with_ymd_and_hms(2024, 1, 3, 15, 0, 0).unwrap();
        (0..count)
            .map(|i| {
                let mut video = Video::new(format!("v{i}"));
                video.title = Some(format!("How to film {i} shots"));
                video.published_at = Some(start + Duration::weeks(i as i64));
                video.views = Some(1000 + 100 * i as u64);
                video.ctr = Some(0.05);
                video.avg_view_duration = Some(240.0);
                video.thumbnail_url = Some(format!("https://cdn.example.com/{i}.jpg"));
                video
            })
            .collect()
    }

    #[test]
    fn channel_pass_appends_channel_wide_suggestions_last() {
        let mut videos = channel_videos(6);
        videos[0].thumbnail_url = None;

        let analysis = analyze_channel("chan", &videos, &AnalysisOptions::default());
        assert_eq!(analysis.videos_analyzed, 6);
        assert_eq!(analysis.averages.sample_size, 6);

        // Uniform retention sits above 60% of the average, so every video
        // gets a strong-hook note.
        let kinds: Vec<SuggestionKind> = analysis.suggestions.iter().map(|s| s.kind).collect();
        let mut expected = vec![SuggestionKind::Hook, SuggestionKind::Thumbnail];
        expected.extend([SuggestionKind::Hook; 5]);
        expected.extend([SuggestionKind::Timing, SuggestionKind::Length]);
        assert_eq!(kinds, expected);
        assert_eq!(analysis.suggestions[1].video_id.as_deref(), Some("v0"));

        let channel_wide = &analysis.suggestions[analysis.suggestions.len() - 2..];
        assert!(channel_wide
            .iter()
            .all(|s| s.scope == SuggestionScope::Channel && s.video_id.as_deref() == Some("v5")));
    }

    #[test]
    fn summary_folds_totals_across_channels() {
        let busy = channel_videos(6);
        let mut quiet = channel_videos(2);
        for video in &mut quiet {
            video.thumbnail_url = None;
        }

        let summary = analyze_channels(
            [("busy", busy.as_slice()), ("quiet", quiet.as_slice())],
            &AnalysisOptions::default(),
        );
        assert_eq!(summary.channels.len(), 2);
        assert_eq!(summary.total_videos, 8);
        assert_eq!(summary.total_suggestions, 8 + 4);
        assert_eq!(summary.channels[1].channel_id, "quiet");
    }

    #[test]
    fn empty_channel_produces_nothing() {
        let analysis = analyze_channel("empty", &[], &AnalysisOptions::default());
        assert!(analysis.suggestions.is_empty());
        assert!(analysis.averages.is_empty());
    }

    #[test]
    fn rank_is_stable_by_priority() {
        let mut video = Video::new("v1");
        video.title = Some("plain".to_string());
        let suggestions = evaluate_video(&video, &compute_averages(&[]));
        let ranked = rank(&suggestions);
        let priorities: Vec<Priority> = ranked.iter().map(|s| s.priority).collect();
        assert_eq!(
            priorities,
            vec![Priority::Urgent, Priority::Minor, Priority::Minor]
        );
        assert!(ranked[1].suggestion.contains("number"));
    }
}
