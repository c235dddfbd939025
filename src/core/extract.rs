//! # Token Extraction
//!
//! Pulls the distinct mentions and hashtags out of a post, for indexing and
//! for deciding who gets a mention notification. Uses the same token grammar
//! as the segmenter.
//!
//! Extracted names are lower-cased and de-duplicated, keeping the order of
//! first appearance.

use regex::Regex;
use std::collections::HashSet;

use crate::core::roster::{Roster, RosterUser};
use crate::core::segmenter::{HASHTAG_REGEX, MENTION_REGEX};

/// Distinct mentioned usernames, without the `@`.
pub fn extract_mentions<'a>(text: impl Into<Option<&'a str>>) -> Vec<String> {
    distinct_lowercase(&MENTION_REGEX, text.into().unwrap_or_default())
}

/// Distinct hashtags, without the `#`.
pub fn extract_hashtags<'a>(text: impl Into<Option<&'a str>>) -> Vec<String> {
    distinct_lowercase(&HASHTAG_REGEX, text.into().unwrap_or_default())
}

/// Ids of roster users mentioned in `text`, each listed once.
///
/// Resolution is case-sensitive, exactly as in [`segment_mentions`].
///
/// [`segment_mentions`]: crate::core::segmenter::segment_mentions
pub fn mentioned_user_ids<'a>(
    text: impl Into<Option<&'a str>>,
    users: &'a [RosterUser],
) -> Vec<&'a str> {
    let text = text.into().unwrap_or_default();
    let roster = Roster::new(users);
    let mut seen = HashSet::new();

    MENTION_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter_map(|name| roster.get(name.as_str()))
        .map(|user| user.id.as_str())
        .filter(|id| seen.insert(*id))
        .collect()
}

fn distinct_lowercase(re: &Regex, text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str().to_lowercase())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
