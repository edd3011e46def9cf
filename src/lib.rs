//! Rule-based suggestions for a creator's channel.
//!
//! The analyzers are pure functions over in-memory [`Video`] records:
//! [`compute_averages`] derives channel means, [`evaluate_video`] applies the
//! per-video rules, and [`analyze_timing`] / [`analyze_length`] look for
//! channel-wide publish-day and length patterns. [`analyze_channel`] runs all
//! of them for one channel.

pub mod averages;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod length;
pub mod models;
pub mod record;
pub mod report;
pub mod rules;
pub mod timing;

pub use averages::compute_averages;
pub use engine::{
    analyze_channel, analyze_channels, rank, AnalysisOptions, AnalysisSummary, ChannelAnalysis,
};
pub use length::analyze_length;
pub use models::{ChannelAverages, Priority, Suggestion, SuggestionKind, SuggestionScope, Video};
pub use rules::evaluate_video;
pub use timing::{analyze_timing, analyze_timing_at};
