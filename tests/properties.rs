//! Property-based tests for the block parser and the highlighter.
//!
//! Tests validate:
//! 1. Plain mode emits one verbatim paragraph per line
//! 2. Runs of same-style bullets collapse into one list
//! 3. Adjacent lists always differ in style
//! 4. Highlight segments concatenate back to the input

use faqtext::{Block, Highlighter, MatchMode, Mode, highlight, parse, parse_with_mode};
use proptest::prelude::*;

fn answer_line() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("- dash item"),
        Just("* star item"),
        Just("• dot item"),
        Just("1. first"),
        Just("22. second"),
        Just("- Notes:"),
        Just(""),
        Just("   "),
        Just("Title:"),
        Just(":"),
        Just("plain text"),
        Just("  indented text  "),
        Just("-not a bullet"),
    ]
}

fn answer() -> impl Strategy<Value = String> {
    prop::collection::vec(answer_line(), 0..30).prop_map(|lines| lines.join("\n"))
}

fn item() -> impl Strategy<Value = String> {
    "[a-z]([a-z :]{0,8}[a-z])?"
}

// ===== Property 1: Plain Mode =====

proptest! {
    #[test]
    fn plain_mode_preserves_lines(text in any::<String>()) {
        let blocks = parse_with_mode(Some(&text), Mode::Plain);

        if text.is_empty() {
            prop_assert!(blocks.is_empty());
        } else {
            let lines: Vec<&str> = text.split('\n').collect();
            prop_assert_eq!(blocks.len(), lines.len());
            for (i, (block, line)) in blocks.iter().zip(lines).enumerate() {
                prop_assert_eq!(block.line, i);
                prop_assert_eq!(&block.block, &Block::paragraph(line));
            }
        }
    }
}

// ===== Property 2: List Merging =====

proptest! {
    #[test]
    fn unordered_run_is_one_list(
        items in prop::collection::vec(item(), 1..20),
        markers in prop::collection::vec(prop_oneof![Just("-"), Just("*"), Just("•")], 20),
    ) {
        let text = items
            .iter()
            .zip(&markers)
            .map(|(item, marker)| format!("{marker} {item}"))
            .collect::<Vec<_>>()
            .join("\n");

        prop_assert_eq!(parse(&text), vec![Block::list(false, items)]);
    }

    #[test]
    fn ordered_run_is_one_list(items in prop::collection::vec(item(), 1..20)) {
        let text = items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}.  {item}", i + 1))
            .collect::<Vec<_>>()
            .join("\n");

        prop_assert_eq!(parse(&text), vec![Block::list(true, items)]);
    }
}

// ===== Property 3: Block Sequence Shape =====

proptest! {
    #[test]
    fn adjacent_lists_differ_in_style(text in answer()) {
        let blocks = parse(&text);

        for pair in blocks.windows(2) {
            if let (Block::List(a), Block::List(b)) = (&pair[0], &pair[1]) {
                prop_assert_ne!(a.ordered, b.ordered);
            }
        }
    }

    #[test]
    fn never_more_blocks_than_lines(text in any::<String>()) {
        let blocks = parse(&text);
        prop_assert!(blocks.len() <= text.split('\n').count());
    }

    #[test]
    fn items_account_for_every_bullet_line(text in answer()) {
        let blocks = parse_with_mode(Some(&text), Mode::Markdown);
        let list_items: usize = blocks
            .iter()
            .map(|b| match &b.block {
                Block::List(list) => list.items.len(),
                _ => 1,
            })
            .sum();

        let lines = if text.is_empty() { 0 } else { text.split('\n').count() };
        prop_assert_eq!(list_items, lines);
    }
}

// ===== Property 4: Highlight Round-Trip =====

proptest! {
    #[test]
    fn highlight_round_trips(text in any::<String>(), term in any::<String>()) {
        let joined: String = highlight(&text, &term).iter().map(|s| s.text).collect();
        prop_assert_eq!(joined, text);
    }

    #[test]
    fn pattern_mode_round_trips(text in any::<String>(), term in any::<String>()) {
        let highlighter = Highlighter::new(&term, MatchMode::Pattern);
        let joined: String = highlighter.segments(&text).iter().map(|s| s.text).collect();
        prop_assert_eq!(joined, text);
    }

    #[test]
    fn segments_alternate(text in "[a-zA-Z ]{0,40}", term in "[a-zA-Z]{1,3}") {
        let segments = highlight(&text, &term);

        if segments.len() > 1 {
            for segment in &segments {
                prop_assert!(!segment.text.is_empty());
            }
        }
        for pair in segments.windows(2) {
            prop_assert!(pair[0].is_match || pair[1].is_match);
        }
        for segment in segments.iter().filter(|s| s.is_match) {
            prop_assert_eq!(segment.text.to_ascii_lowercase(), term.to_ascii_lowercase());
        }
    }

    #[test]
    fn empty_term_is_single_segment(text in any::<String>()) {
        let segments = highlight(&text, "");
        prop_assert_eq!(segments.len(), 1);
        prop_assert!(!segments[0].is_match);
        prop_assert_eq!(segments[0].text, text.as_str());
    }
}
