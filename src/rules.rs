use crate::models::{ChannelAverages, Priority, Suggestion, SuggestionKind, Video};

pub const MAX_TITLE_CHARS: usize = 60;
pub const POWER_WORDS: [&str; 6] = ["how to", "why", "secret", "ultimate", "complete", "guide"];

pub const LOW_CTR_RATIO: f64 = 0.5;
pub const HIGH_CTR_RATIO: f64 = 1.5;
pub const WEAK_HOOK_RATIO: f64 = 0.3;
pub const STRONG_HOOK_RATIO: f64 = 0.6;
pub const LOW_VIEWS_RATIO: f64 = 0.3;

/// Runs every per-video rule against one video. Suggestions come back in
/// rule order, not priority order.
pub fn evaluate_video(video: &Video, averages: &ChannelAverages) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if let Some(title) = present(&video.title) {
        title_rules(video, title, &mut suggestions);
    }

    if let Some((ctr, ratio)) = video
        .ctr
        .and_then(|ctr| ratio(ctr, averages.avg_ctr).map(|ratio| (ctr, ratio)))
    {
        if ratio < LOW_CTR_RATIO {
            suggestions.push(Suggestion::for_video(
                &video.id,
                SuggestionKind::Ctr,
                Priority::Urgent,
                "Low CTR detected - consider changing thumbnail and title",
                format!(
                    "CTR is {:.1}% vs channel average of {:.1}%",
                    ctr * 100.0,
                    averages.avg_ctr * 100.0
                ),
            ));
        } else if ratio > HIGH_CTR_RATIO {
            suggestions.push(Suggestion::for_video(
                &video.id,
                SuggestionKind::Ctr,
                Priority::Low,
                "High performer! Analyze what worked here and replicate in future videos",
                format!(
                    "CTR is {:.0}% of your channel average - this thumbnail/title combo works",
                    ratio * 100.0
                ),
            ));
        }
    }

    if let Some(ratio) = video
        .avg_view_duration
        .and_then(|duration| ratio(duration, averages.avg_duration))
    {
        if ratio < WEAK_HOOK_RATIO {
            suggestions.push(Suggestion::for_video(
                &video.id,
                SuggestionKind::Hook,
                Priority::High,
                "Poor retention in the opening - your hook needs work",
                format!(
                    "Viewers drop off quickly ({:.0}% of your average view duration of {:.0}s)",
                    ratio * 100.0,
                    averages.avg_duration
                ),
            ));
        } else if ratio > STRONG_HOOK_RATIO {
            suggestions.push(Suggestion::for_video(
                &video.id,
                SuggestionKind::Hook,
                Priority::Low,
                "Strong hook! Use a similar opening pattern in future videos",
                format!(
                    "Retention holds up ({:.0}% of your average view duration of {:.0}s)",
                    ratio * 100.0,
                    averages.avg_duration
                ),
            ));
        }
    }

    let default_thumbnail =
        present(&video.thumbnail_url).map_or(true, |url| url.contains("default"));
    if default_thumbnail {
        suggestions.push(Suggestion::for_video(
            &video.id,
            SuggestionKind::Thumbnail,
            Priority::Urgent,
            "Add a custom thumbnail - videos without custom thumbnails get far fewer views",
            "Auto-generated thumbnails perform poorly compared to custom designs.",
        ));
    }

    if let Some(ratio) = video
        .views
        .and_then(|views| ratio(views as f64, averages.avg_views))
    {
        if ratio < LOW_VIEWS_RATIO {
            suggestions.push(Suggestion::for_video(
                &video.id,
                SuggestionKind::Engagement,
                Priority::High,
                "This video is underperforming - consider updating title/thumbnail or promoting it",
                format!(
                    "Only {:.0}% of your average views ({:.0})",
                    ratio * 100.0,
                    averages.avg_views
                ),
            ));
        }
    }

    suggestions
}

fn title_rules(video: &Video, title: &str, suggestions: &mut Vec<Suggestion>) {
    let length = title.chars().count();
    if length > MAX_TITLE_CHARS {
        suggestions.push(Suggestion::for_video(
            &video.id,
            SuggestionKind::Title,
            Priority::Moderate,
            format!("Shorten title to under {MAX_TITLE_CHARS} characters (currently {length})"),
            format!(
                "Titles over {MAX_TITLE_CHARS} characters are truncated in search results, reducing click-through rate."
            ),
        ));
    }

    if !title.chars().any(|c| c.is_ascii_digit()) {
        suggestions.push(Suggestion::for_video(
            &video.id,
            SuggestionKind::Title,
            Priority::Minor,
            "Consider adding a number to your title (e.g., \"5 Reasons...\", \"The #1 Way...\")",
            "Titles with numbers tend to earn a higher click-through rate.",
        ));
    }

    let lowered = title.to_lowercase();
    if !POWER_WORDS.iter().any(|word| lowered.contains(word)) {
        suggestions.push(Suggestion::for_video(
            &video.id,
            SuggestionKind::Title,
            Priority::Minor,
            "Try engaging words like \"How to\", \"Why\", \"Ultimate Guide\", or \"Secret\"",
            "These phrases are associated with higher click-through rates.",
        ));
    }
}

// Blank text counts as missing.
fn present(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|s| !s.trim().is_empty())
}

// NaN averages fail the `> 0.0` check as well.
fn ratio(value: f64, average: f64) -> Option<f64> {
    if average > 0.0 {
        Some(value / average)
    } else {
        None
    }
}
