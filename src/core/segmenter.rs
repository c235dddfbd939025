//! # Text Segmenter
//!
//! Turns raw post/comment text into an ordered sequence of [`Segment`]s so a
//! renderer can style mentions and hashtags without re-scanning the string.
//!
//! Tokens are a sigil (`@` or `#`) followed by one or more ASCII word
//! characters (`[A-Za-z0-9_]`). No unicode letters, dots or hyphens.
//!
//! ```text
//! text ──► segment_mentions ──► Text │ Mention │ Text ...
//!                                 │
//!                                 └─► segment_hashtags (Text only)
//!                                           │
//!                                           ▼
//!                         Text │ Mention │ Text │ Hashtag ...
//! ```
//!
//! Mentions always run first and hashtags are only looked for inside the
//! resulting text segments. Every function here is total: any input,
//! however malformed, yields segments whose contents concatenate back to it.

use log::debug;
use regex::Regex;
use std::sync::LazyLock;

use crate::core::roster::{Roster, RosterUser};
use crate::core::segment::{MentionSegment, Segment};

pub(crate) static MENTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([A-Za-z0-9_]+)").expect("valid mention regex"));

pub(crate) static HASHTAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([A-Za-z0-9_]+)").expect("valid hashtag regex"));

/// Split `text` into text and mention segments, resolving each mention
/// against `users`.
///
/// Unknown usernames still produce a mention segment, just with no user.
pub fn segment_mentions<'a>(
    text: impl Into<Option<&'a str>>,
    users: &'a [RosterUser],
) -> Vec<Segment<'a>> {
    let text = text.into().unwrap_or_default();
    let roster = Roster::new(users);
    mentions_with(text, &roster)
}

/// Split `text` into text and hashtag segments.
pub fn segment_hashtags<'a>(text: impl Into<Option<&'a str>>) -> Vec<Segment<'a>> {
    let mut out = Vec::new();
    push_hashtags(text.into().unwrap_or_default(), &mut out);
    out
}

/// Full segmentation: mentions over the whole text, then hashtags within the
/// remaining plain text. `None` and `""` both give an empty list.
pub fn render_segments<'a>(
    text: impl Into<Option<&'a str>>,
    users: &'a [RosterUser],
) -> Vec<Segment<'a>> {
    let text = text.into().unwrap_or_default();
    if text.is_empty() {
        return Vec::new();
    }

    let roster = Roster::new(users);
    let mut out = Vec::new();
    for segment in mentions_with(text, &roster) {
        match segment {
            Segment::Text { content } => push_hashtags(content, &mut out),
            other => out.push(other),
        }
    }

    debug!(
        "Segmented {} bytes into {} segments (roster: {} users)",
        text.len(),
        out.len(),
        roster.len()
    );
    out
}

fn mentions_with<'a>(text: &'a str, roster: &Roster<'a>) -> Vec<Segment<'a>> {
    let mut out = Vec::new();
    let mut last = 0;

    for caps in MENTION_REGEX.captures_iter(text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            out.push(Segment::Text {
                content: &text[last..whole.start()],
            });
        }
        let username = name.as_str();
        out.push(Segment::Mention(MentionSegment {
            content: whole.as_str(),
            username,
            user: roster.get(username),
        }));
        last = whole.end();
    }

    if last < text.len() {
        out.push(Segment::Text {
            content: &text[last..],
        });
    }
    out
}

fn push_hashtags<'a>(text: &'a str, out: &mut Vec<Segment<'a>>) {
    let mut last = 0;

    for m in HASHTAG_REGEX.find_iter(text) {
        if m.start() > last {
            out.push(Segment::Text {
                content: &text[last..m.start()],
            });
        }
        out.push(Segment::Hashtag { content: m.as_str() });
        last = m.end();
    }

    if last < text.len() {
        out.push(Segment::Text {
            content: &text[last..],
        });
    }
}
