use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use channel_suggestions::config::{utc_offset, Config};
use channel_suggestions::engine::{analyze_channels, rank, AnalysisOptions, AnalysisSummary};
use channel_suggestions::input::{group_by_channel, load_videos};
use channel_suggestions::models::Video;
use channel_suggestions::record::StoredSuggestion;
use channel_suggestions::report::build_report;

#[derive(Parser)]
#[command(name = "channel-suggestions")]
#[command(about = "Rule-based improvement suggestions for a creator's videos", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate suggestions for every video in an export
    Analyze {
        /// Video export (.csv or .json)
        #[arg(long)]
        input: PathBuf,
        /// Only analyze this channel
        #[arg(long)]
        channel: Option<String>,
        /// Suggestions printed per channel
        #[arg(long)]
        limit: Option<usize>,
        /// Write every suggestion as a pending record to this JSON file
        #[arg(long)]
        out: Option<PathBuf>,
        /// Channel's local offset from UTC, in minutes
        #[arg(long, allow_hyphen_values = true)]
        utc_offset_minutes: Option<i32>,
    },
    /// Generate a markdown report
    Report {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        channel: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, allow_hyphen_values = true)]
        utc_offset_minutes: Option<i32>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Validate an export without analyzing it
    Check {
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Analyze {
            input,
            channel,
            limit,
            out,
            utc_offset_minutes,
        } => {
            let options = options(&config, utc_offset_minutes)?;
            let summary = run(&input, channel.as_deref(), &options)?;
            let limit = limit.unwrap_or(config.report_limit);

            if summary.total_suggestions == 0 {
                println!("No suggestions for these videos.");
            }

            for analysis in summary.channels.iter() {
                if analysis.suggestions.is_empty() {
                    continue;
                }
                println!("Top suggestions for channel {}:", analysis.channel_id);
                for suggestion in rank(&analysis.suggestions).into_iter().take(limit) {
                    println!(
                        "- [P{}] {} ({}): {}",
                        suggestion.priority,
                        suggestion.video_id.as_deref().unwrap_or("channel"),
                        suggestion.kind,
                        suggestion.suggestion
                    );
                }
            }

            println!(
                "Generated {} suggestions across {} videos in {} channels.",
                summary.total_suggestions,
                summary.total_videos,
                summary.channels.len()
            );

            if let Some(out) = out {
                let created_at = Utc::now();
                let records: Vec<StoredSuggestion> = summary
                    .channels
                    .into_iter()
                    .flat_map(|analysis| analysis.suggestions)
                    .map(|suggestion| StoredSuggestion::pending(suggestion, created_at))
                    .collect();
                let json = serde_json::to_string_pretty(&records)?;
                std::fs::write(&out, json)
                    .with_context(|| format!("failed to write {}", out.display()))?;
                println!("Suggestions written to {}.", out.display());
            }
        }
        Commands::Report {
            input,
            channel,
            limit,
            utc_offset_minutes,
            out,
        } => {
            let options = options(&config, utc_offset_minutes)?;
            let summary = run(&input, channel.as_deref(), &options)?;
            let limit = limit.unwrap_or(config.report_limit);

            let report = summary
                .channels
                .iter()
                .map(|analysis| build_report(&analysis.channel_id, analysis, limit))
                .collect::<Vec<_>>()
                .join("\n");
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Check { input } => {
            let videos = load(&input)?;
            let complete = videos
                .iter()
                .filter(|v| v.views.is_some() && v.ctr.is_some() && v.avg_view_duration.is_some())
                .count();
            let channels = group_by_channel(videos);
            for (channel_id, videos) in channels.iter() {
                println!("- {}: {} videos", channel_id, videos.len());
            }
            println!(
                "{} is valid: {} channels, {} videos with complete metrics.",
                input.display(),
                channels.len(),
                complete
            );
        }
    }

    Ok(())
}

fn options(config: &Config, override_minutes: Option<i32>) -> anyhow::Result<AnalysisOptions> {
    let minutes = override_minutes.unwrap_or(config.utc_offset_minutes);
    Ok(AnalysisOptions {
        utc_offset: utc_offset(minutes)?,
    })
}

fn load(input: &Path) -> anyhow::Result<Vec<Video>> {
    load_videos(input).with_context(|| format!("failed to load videos from {}", input.display()))
}

fn run(
    input: &Path,
    channel: Option<&str>,
    options: &AnalysisOptions,
) -> anyhow::Result<AnalysisSummary> {
    let mut channels = group_by_channel(load(input)?);
    if let Some(wanted) = channel {
        channels.retain(|(channel_id, _)| channel_id == wanted);
        anyhow::ensure!(!channels.is_empty(), "channel {wanted} not found in {}", input.display());
    }

    Ok(analyze_channels(
        channels
            .iter()
            .map(|(channel_id, videos)| (channel_id.as_str(), videos.as_slice())),
        options,
    ))
}
