//! # Segments
//!
//! A `Segment` is a typed, contiguous slice of source text: plain text, an
//! `@mention`, or a `#hashtag`. Segments borrow from the input text (and the
//! roster, for resolved mentions), so producing them never copies the text.
//!
//! ```text
//! "@carol loves #coding"
//!  ├── Mention  "@carol"   → user: Some(carol)
//!  ├── Text     " loves "
//!  └── Hashtag  "#coding"
//! ```
//!
//! Concatenating every segment's `content()` in order gives back the input.

use serde::ser::{Serialize, Serializer};

use crate::core::roster::RosterUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Text,
    Mention,
    Hashtag,
}

impl SegmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentKind::Text => "text",
            SegmentKind::Mention => "mention",
            SegmentKind::Hashtag => "hashtag",
        }
    }
}

/// An `@username` token and the roster entry it resolved to, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionSegment<'a> {
    /// The full token, sigil included (`@alice`).
    pub content: &'a str,
    /// The token without the sigil (`alice`).
    pub username: &'a str,
    pub user: Option<&'a RosterUser>,
}

impl<'a> MentionSegment<'a> {
    /// Id of the resolved user. `None` marks an unresolved mention.
    pub fn user_id(&self) -> Option<&'a str> {
        self.user.map(|u| u.id.as_str())
    }

    pub fn is_resolved(&self) -> bool {
        self.user.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text { content: &'a str },
    Mention(MentionSegment<'a>),
    Hashtag { content: &'a str },
}

impl<'a> Segment<'a> {
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Text { .. } => SegmentKind::Text,
            Segment::Mention(_) => SegmentKind::Mention,
            Segment::Hashtag { .. } => SegmentKind::Hashtag,
        }
    }

    /// The exact substring of the source text this segment covers.
    pub fn content(&self) -> &'a str {
        match self {
            Segment::Text { content } | Segment::Hashtag { content } => *content,
            Segment::Mention(m) => m.content,
        }
    }

    pub fn as_mention(&self) -> Option<&MentionSegment<'a>> {
        match self {
            Segment::Mention(m) => Some(m),
            _ => None,
        }
    }

    /// Only resolved mentions navigate anywhere; hashtags are styling only.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Segment::Mention(m) if m.is_resolved())
    }
}

/// Rebuilds the source text from its segments.
pub fn concat(segments: &[Segment<'_>]) -> String {
    segments.iter().map(Segment::content).collect()
}

// ── Serialization ───────────────────────────────────────────────────────────

/// Flat wire shape consumed by renderers:
/// `{ kind, content, username?, userId?, userRef? }`.
#[derive(serde::Serialize)]
struct SegmentRecord<'a> {
    kind: &'static str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a str>,
    #[serde(rename = "userRef", skip_serializing_if = "Option::is_none")]
    user_ref: Option<&'a RosterUser>,
}

impl Serialize for Segment<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mention = self.as_mention();
        SegmentRecord {
            kind: self.kind().as_str(),
            content: self.content(),
            username: mention.map(|m| m.username),
            user_id: mention.and_then(MentionSegment::user_id),
            user_ref: mention.and_then(|m| m.user),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::user;

    #[test]
    fn test_resolved_mention_is_interactive() {
        let alice = user("1", "alice");
        let seg = Segment::Mention(MentionSegment {
            content: "@alice",
            username: "alice",
            user: Some(&alice),
        });
        assert!(seg.is_interactive());
        assert_eq!(seg.as_mention().and_then(|m| m.user_id()), Some("1"));
    }

    #[test]
    fn test_unresolved_mention_and_hashtag_are_not_interactive() {
        let mention = Segment::Mention(MentionSegment {
            content: "@bob",
            username: "bob",
            user: None,
        });
        let tag = Segment::Hashtag { content: "#now" };
        assert!(!mention.is_interactive());
        assert!(!tag.is_interactive());
        assert_eq!(mention.kind(), SegmentKind::Mention);
    }

    #[test]
    fn test_concat_joins_contents() {
        let segs = vec![
            Segment::Text { content: "check " },
            Segment::Hashtag { content: "#trending" },
        ];
        assert_eq!(concat(&segs), "check #trending");
    }

    #[test]
    fn test_serialize_resolved_mention() {
        let mut carol = user("2", "carol");
        carol.display_name = Some("Carol King".to_string());
        let seg = Segment::Mention(MentionSegment {
            content: "@carol",
            username: "carol",
            user: Some(&carol),
        });
        let json = serde_json::to_value(&seg).unwrap();
        assert_eq!(json["kind"], "mention");
        assert_eq!(json["content"], "@carol");
        assert_eq!(json["username"], "carol");
        assert_eq!(json["userId"], "2");
        assert_eq!(json["userRef"]["display_name"], "Carol King");
    }

    #[test]
    fn test_serialize_omits_absent_fields() {
        let unresolved = Segment::Mention(MentionSegment {
            content: "@bob",
            username: "bob",
            user: None,
        });
        assert_eq!(
            serde_json::to_string(&unresolved).unwrap(),
            r#"{"kind":"mention","content":"@bob","username":"bob"}"#
        );
        assert_eq!(
            serde_json::to_string(&Segment::Text { content: " hi" }).unwrap(),
            r#"{"kind":"text","content":" hi"}"#
        );
    }
}
