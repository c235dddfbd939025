//! # Mention Autocomplete
//!
//! Text-side logic behind the `@` suggestion popup in the post composer:
//! detect the partial mention under the cursor, filter a roster for
//! candidates, and splice the chosen username back into the text.
//!
//! Cursors are byte offsets into the text. Offsets past the end or inside a
//! multi-byte character are pulled back to the nearest char boundary.

use serde::Serialize;

use crate::core::roster::RosterUser;

/// Longest partial username, in UTF-16 code units, that still counts as
/// "typing a mention". Same unit the browser composer measures in.
pub const DEFAULT_MAX_QUERY_CHARS: usize = 20;

/// How many suggestions the popup shows.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// The partial mention being typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MentionQuery<'a> {
    /// Byte offset of the `@`.
    pub start: usize,
    /// Text between the `@` and the cursor. May be empty.
    pub query: &'a str,
}

/// Result of accepting a suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub cursor: usize,
}

fn clamp_cursor(text: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(text.len());
    while !text.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}

/// Finds the mention being typed at `cursor`, if any.
///
/// Looks at the last `@` before the cursor. The popup stays open only while
/// the text after that `@` has no whitespace and is at most
/// `max_query_chars` UTF-16 code units long.
pub fn active_mention(text: &str, cursor: usize, max_query_chars: usize) -> Option<MentionQuery<'_>> {
    let cursor = clamp_cursor(text, cursor);
    let before = &text[..cursor];
    let start = before.rfind('@')?;
    let query = &before[start + 1..];

    if query.chars().any(char::is_whitespace) || query.encode_utf16().count() > max_query_chars {
        return None;
    }
    Some(MentionQuery { start, query })
}

/// Replaces the `@partial` before `cursor` with `@username ` and returns the
/// new text with the cursor placed after the inserted space.
///
/// Returns `None` when there is no `@` before the cursor.
pub fn insert_mention(text: &str, cursor: usize, username: &str) -> Option<Completion> {
    let cursor = clamp_cursor(text, cursor);
    let start = text[..cursor].rfind('@')?;

    let mention = format!("@{username} ");
    let mut out = String::with_capacity(text.len() + mention.len());
    out.push_str(&text[..start]);
    out.push_str(&mention);
    let new_cursor = out.len();
    out.push_str(&text[cursor..]);

    Some(Completion {
        text: out,
        cursor: new_cursor,
    })
}

/// Local roster filter: users whose username or display name starts with
/// `query`, ignoring case. An empty query returns the first `limit` users.
pub fn suggest<'a>(users: &'a [RosterUser], query: &str, limit: usize) -> Vec<&'a RosterUser> {
    let needle = query.to_lowercase();
    users
        .iter()
        .filter(|u| {
            needle.is_empty()
                || u.username.to_lowercase().starts_with(&needle)
                || u
                    .display_name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().starts_with(&needle))
        })
        .take(limit)
        .collect()
}
