use std::collections::HashMap;
use std::fmt::Write;

use serde::Serialize;

use crate::engine::{rank, ChannelAnalysis};
use crate::models::{Suggestion, SuggestionKind, SuggestionScope};

#[derive(Debug, Clone, Serialize)]
pub struct KindSummary {
    pub kind: SuggestionKind,
    pub count: usize,
    pub avg_priority: f64,
}

/// Suggestion counts per type, most frequent first. Equal counts are
/// ordered by type for a stable report.
pub fn summarize_by_kind(suggestions: &[Suggestion]) -> Vec<KindSummary> {
    let mut map: HashMap<SuggestionKind, (usize, u32)> = HashMap::new();

    for suggestion in suggestions {
        let entry = map.entry(suggestion.kind).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += u32::from(suggestion.priority.level());
    }

    let mut summaries: Vec<KindSummary> = map
        .into_iter()
        .map(|(kind, (count, total_priority))| KindSummary {
            kind,
            count,
            avg_priority: total_priority as f64 / count as f64,
        })
        .collect();

    summaries.sort_by(|a, b| b.count.cmp(&a.count).then(a.kind.cmp(&b.kind)));
    summaries
}

pub fn build_report(channel_label: &str, analysis: &ChannelAnalysis, limit: usize) -> String {
    let summaries = summarize_by_kind(&analysis.suggestions);
    let mut output = String::new();

    let _ = writeln!(output, "# Channel Suggestions Report");
    let _ = writeln!(
        output,
        "Generated for {} ({} videos analyzed)",
        channel_label, analysis.videos_analyzed
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Channel Averages");

    let averages = &analysis.averages;
    if averages.is_empty() {
        let _ = writeln!(
            output,
            "Not enough complete data: no video reports views, CTR and view duration together."
        );
    } else {
        let _ = writeln!(
            output,
            "- Views: {:.0}\n- CTR: {:.1}%\n- Average view duration: {:.0}s\n- Based on {} videos",
            averages.avg_views,
            averages.avg_ctr * 100.0,
            averages.avg_duration,
            averages.sample_size
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Suggestion Mix");

    if summaries.is_empty() {
        let _ = writeln!(output, "No suggestions for this channel.");
    } else {
        for summary in summaries.iter() {
            let _ = writeln!(
                output,
                "- {}: {} suggestions (avg priority {:.1})",
                summary.kind, summary.count, summary.avg_priority
            );
        }
    }

    let per_video: Vec<Suggestion> = analysis
        .suggestions
        .iter()
        .filter(|s| s.scope == SuggestionScope::Video)
        .cloned()
        .collect();

    let _ = writeln!(output);
    let _ = writeln!(output, "## Top Suggestions");

    if per_video.is_empty() {
        let _ = writeln!(output, "No per-video suggestions.");
    } else {
        for suggestion in rank(&per_video).into_iter().take(limit) {
            let _ = writeln!(
                output,
                "- [P{}] {} ({}): {}",
                suggestion.priority,
                suggestion.video_id.as_deref().unwrap_or("-"),
                suggestion.kind,
                suggestion.suggestion
            );
            if let Some(reason) = suggestion.reason.as_deref() {
                let _ = writeln!(output, "  - {}", reason);
            }
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Channel-Wide Patterns");

    let mut channel_wide = analysis
        .suggestions
        .iter()
        .filter(|s| s.scope == SuggestionScope::Channel)
        .peekable();

    if channel_wide.peek().is_none() {
        let _ = writeln!(
            output,
            "Not enough history for timing or length patterns (needs at least 5 videos)."
        );
    } else {
        for suggestion in channel_wide {
            let _ = writeln!(output, "- {}", suggestion.suggestion);
            if let Some(reason) = suggestion.reason.as_deref() {
                let _ = writeln!(output, "  - {}", reason);
            }
        }
    }

    output
}
