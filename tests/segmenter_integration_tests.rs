use chirp::core::extract::{extract_hashtags, extract_mentions, mentioned_user_ids};
use chirp::core::roster::parse_roster;
use chirp::core::segment::concat;
use chirp::{RosterUser, Segment, SegmentKind, render_segments, segment_hashtags, segment_mentions};
use proptest::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

fn user(id: &str, username: &str) -> RosterUser {
    RosterUser::new(id, username)
}

/// (kind, content, userId) per segment, for literal comparisons.
fn flatten<'a>(segments: &[Segment<'a>]) -> Vec<(SegmentKind, &'a str, Option<&'a str>)> {
    segments
        .iter()
        .map(|s| (s.kind(), s.content(), s.as_mention().and_then(|m| m.user_id())))
        .collect()
}

// ============================================================================
// Boundary Cases
// ============================================================================

#[test]
fn test_empty_text_yields_no_segments() {
    assert!(render_segments("", &[user("1", "alice")]).is_empty());
}

#[test]
fn test_missing_text_yields_no_segments() {
    let body: Option<&str> = None;
    assert!(render_segments(body, &[user("1", "alice")]).is_empty());
}

#[test]
fn test_plain_text_is_one_segment() {
    let segs = render_segments("no special tokens here", &[]);
    assert_eq!(
        flatten(&segs),
        vec![(SegmentKind::Text, "no special tokens here", None)]
    );
}

#[test]
fn test_resolved_mention_then_text() {
    let users = vec![user("1", "alice")];
    let segs = render_segments("@alice says hi", &users);
    assert_eq!(
        flatten(&segs),
        vec![
            (SegmentKind::Mention, "@alice", Some("1")),
            (SegmentKind::Text, " says hi", None),
        ]
    );
    assert_eq!(segs[0].as_mention().unwrap().username, "alice");
}

#[test]
fn test_unresolved_mention_then_text() {
    let segs = render_segments("@bob is unknown", &[]);
    assert_eq!(
        flatten(&segs),
        vec![
            (SegmentKind::Mention, "@bob", None),
            (SegmentKind::Text, " is unknown", None),
        ]
    );
    let bob = segs[0].as_mention().unwrap();
    assert_eq!(bob.username, "bob");
    assert!(!segs[0].is_interactive());
}

#[test]
fn test_hashtags_between_text() {
    let segs = render_segments("check #trending and #now", &[]);
    assert_eq!(
        flatten(&segs),
        vec![
            (SegmentKind::Text, "check ", None),
            (SegmentKind::Hashtag, "#trending", None),
            (SegmentKind::Text, " and ", None),
            (SegmentKind::Hashtag, "#now", None),
        ]
    );
}

#[test]
fn test_mention_text_hashtag() {
    let users = vec![user("2", "carol")];
    let segs = render_segments("@carol loves #coding", &users);
    assert_eq!(
        flatten(&segs),
        vec![
            (SegmentKind::Mention, "@carol", Some("2")),
            (SegmentKind::Text, " loves ", None),
            (SegmentKind::Hashtag, "#coding", None),
        ]
    );
    assert!(segs[0].is_interactive());
}

#[test]
fn test_adjacent_sigils() {
    let segs = render_segments("@@dave", &[]);
    assert_eq!(
        flatten(&segs),
        vec![
            (SegmentKind::Text, "@", None),
            (SegmentKind::Mention, "@dave", None),
        ]
    );
}

#[test]
fn test_hashtag_before_mention_without_space() {
    let users = vec![user("7", "b")];
    let segs = render_segments("#a@b", &users);
    assert_eq!(
        flatten(&segs),
        vec![
            (SegmentKind::Hashtag, "#a", None),
            (SegmentKind::Mention, "@b", Some("7")),
        ]
    );
}

#[test]
fn test_single_passes_match_composition_without_overlap() {
    let users = vec![user("1", "alice")];
    let text = "@alice #one two";
    assert_eq!(
        flatten(&segment_mentions(text, &users)),
        vec![
            (SegmentKind::Mention, "@alice", Some("1")),
            (SegmentKind::Text, " #one two", None),
        ]
    );
    assert_eq!(
        flatten(&segment_hashtags(text)),
        vec![
            (SegmentKind::Text, "@alice ", None),
            (SegmentKind::Hashtag, "#one", None),
            (SegmentKind::Text, " two", None),
        ]
    );
    assert_eq!(
        flatten(&render_segments(text, &users)),
        vec![
            (SegmentKind::Mention, "@alice", Some("1")),
            (SegmentKind::Text, " ", None),
            (SegmentKind::Hashtag, "#one", None),
            (SegmentKind::Text, " two", None),
        ]
    );
}

#[test]
fn test_roster_from_search_payload() {
    let users = parse_roster(
        r#"{"success": true, "users": [
            {"_id": "65f0", "username": "alice", "full_name": "Alice Liddell"}
        ]}"#,
    )
    .unwrap();
    let segs = render_segments("cc @alice", &users);
    let json = serde_json::to_value(&segs).unwrap();
    assert_eq!(json[1]["userId"], "65f0");
    assert_eq!(json[1]["userRef"]["display_name"], "Alice Liddell");
}

#[test]
fn test_extraction_agrees_with_segmentation() {
    let users = vec![user("1", "alice"), user("2", "carol")];
    let text = "@alice meet @carol at #RustConf #rustconf";
    assert_eq!(extract_mentions(text), vec!["alice", "carol"]);
    assert_eq!(extract_hashtags(text), vec!["rustconf"]);
    assert_eq!(mentioned_user_ids(text, &users), vec!["1", "2"]);
}

#[test]
fn test_concurrent_calls_share_roster() {
    let users = vec![user("1", "alice")];
    let text = "@alice #x @bob";
    let users = &users;
    let expected = render_segments(text, users);
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(move || render_segments(text, users)))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}

// ============================================================================
// Properties
// ============================================================================

fn roster_strategy() -> impl Strategy<Value = Vec<RosterUser>> {
    prop::collection::vec(("[0-9]{1,3}", "[A-Za-z0-9_]{1,6}"), 0..5)
        .prop_map(|pairs| pairs.into_iter().map(|(id, name)| RosterUser::new(id, name)).collect())
}

/// Text biased toward sigils and word characters so tokens show up often.
fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[@#a-cA-C0-9_ .\\-\n]{0,40}",
        any::<String>(),
        "(@|#|é|✨| |[a-z_]){0,30}",
    ]
}

proptest! {
    #[test]
    fn prop_round_trip(text in text_strategy(), users in roster_strategy()) {
        let segs = render_segments(text.as_str(), &users);
        prop_assert_eq!(concat(&segs), text.as_str());
    }

    #[test]
    fn prop_idempotent(text in text_strategy(), users in roster_strategy()) {
        prop_assert_eq!(
            render_segments(text.as_str(), &users),
            render_segments(text.as_str(), &users)
        );
    }

    #[test]
    fn prop_contiguous_and_well_formed(text in text_strategy(), users in roster_strategy()) {
        let segs = render_segments(text.as_str(), &users);
        let mut offset = 0;
        for seg in &segs {
            let content = seg.content();
            prop_assert!(!content.is_empty());
            prop_assert_eq!(&text[offset..offset + content.len()], content);
            offset += content.len();
            match seg.kind() {
                SegmentKind::Mention => prop_assert!(content.starts_with('@')),
                SegmentKind::Hashtag => prop_assert!(content.starts_with('#')),
                SegmentKind::Text => {}
            }
        }
        prop_assert_eq!(offset, text.len());
    }

    #[test]
    fn prop_text_segments_hold_no_tokens(text in text_strategy(), users in roster_strategy()) {
        for seg in render_segments(text.as_str(), &users) {
            if seg.kind() == SegmentKind::Text {
                // Re-segmenting a text span must give it back unchanged.
                let again = render_segments(seg.content(), &[]);
                prop_assert_eq!(again.len(), 1);
                prop_assert_eq!(again[0].kind(), SegmentKind::Text);
            }
        }
    }

    #[test]
    fn prop_mentions_resolve_iff_in_roster(text in text_strategy(), users in roster_strategy()) {
        for seg in render_segments(text.as_str(), &users) {
            if let Some(m) = seg.as_mention() {
                let expected = users.iter().find(|u| u.username == m.username).map(|u| u.id.as_str());
                prop_assert_eq!(m.user_id(), expected);
            }
        }
    }
}
