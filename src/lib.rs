//! Chirp text library: mention/hashtag segmentation for posts and comments.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod cli;
pub mod core;

#[cfg(test)]
pub mod test_support;

pub use crate::core::roster::RosterUser;
pub use crate::core::segment::{MentionSegment, Segment, SegmentKind};
pub use crate::core::segmenter::{render_segments, segment_hashtags, segment_mentions};

/// How the CLI prints its results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Lines,
}
