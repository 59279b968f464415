//! Property-based tests for Word Counting
//!
//! Tests invariants:
//! - Count equals the number of generated tokens, whatever separates them
//! - Whitespace-only bodies count zero and cannot be submitted
//! - The limit warning shows exactly when the count exceeds the limit
//! - A filled form submits iff it is within the limit

use proptest::prelude::*;

use crate::core::message::{word_count, MessageDraft, SubmitBlocked};
use crate::core::team::MemberId;

// ============================================================================
// Strategies
// ============================================================================

/// A run of ASCII and Unicode whitespace.
fn separator() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![' ', '\t', '\n', '\r', '\u{a0}', '\u{2003}']),
        1..4,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn token() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9'!?.,éü✅-]{1,12}"
}

/// Tokens joined by arbitrary whitespace, with optional leading and trailing
/// whitespace.
fn body() -> impl Strategy<Value = (Vec<String>, String)> {
    (
        prop::collection::vec(token(), 0..40),
        prop::collection::vec(separator(), 41),
        separator(),
        separator(),
        any::<bool>(),
    )
        .prop_map(|(tokens, seps, lead, trail, padded)| {
            let mut text = String::new();
            if padded {
                text.push_str(&lead);
            }
            for (i, token) in tokens.iter().enumerate() {
                if i > 0 {
                    text.push_str(&seps[i]);
                }
                text.push_str(token);
            }
            if padded {
                text.push_str(&trail);
            }
            (tokens, text)
        })
}

fn draft(body: &str) -> MessageDraft {
    MessageDraft {
        sender_name: "Grace".to_string(),
        sender_email: "grace@guest.example".to_string(),
        body: body.to_string(),
        recipient: Some(MemberId(1)),
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn count_matches_token_count((tokens, text) in body()) {
        prop_assert_eq!(word_count(&text), tokens.len());
    }

    #[test]
    fn whitespace_only_never_submits(sep in separator(), max in 1usize..600) {
        let draft = draft(&sep);
        let validation = draft.validate(max);
        prop_assert_eq!(validation.word_count, 0);
        prop_assert!(!validation.can_submit);
        prop_assert_eq!(draft.prepare_submit(max), Err(SubmitBlocked::Empty));
    }

    #[test]
    fn warning_shows_only_above_limit((tokens, text) in body(), max in 0usize..45) {
        let validation = draft(&text).validate(max);
        prop_assert_eq!(validation.over_limit, tokens.len() > max);
        if validation.over_limit {
            prop_assert!(!validation.can_submit);
        }
    }

    #[test]
    fn filled_form_submits_within_limit((tokens, text) in body(), max in 1usize..45) {
        let draft = draft(&text);
        let result = draft.prepare_submit(max);
        match tokens.len() {
            0 => prop_assert_eq!(result, Err(SubmitBlocked::Empty)),
            n if n > max => prop_assert_eq!(
                result,
                Err(SubmitBlocked::TooLong { words: n, max })
            ),
            _ => {
                let message = result.unwrap();
                prop_assert_eq!(message.message, text);
                prop_assert_eq!(message.member_id, "1");
            }
        }
    }
}
