//! Randomized round-trip and bijection checks with fixed seeds.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rich_text_core::normalizer::apply_style;
use rich_text_core::{
    Document, HIGHLIGHT_STYLE, Position, Range, RichSpan, RichSpanId, SEARCH_MATCH_STYLE,
    StyleAttributes, StyleSpan, StyledText,
};

const WORDS: &[&str] = &["lorem", "ipsum", "dolor", "sit", "amet", "héllo", "中文", "e\u{301}"];
const INSERTS: &[&str] = &["x", "yz", "\n", "ab\ncd", "é", "\n\n", " word ", "tail\n"];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    text: String,
    spans: Vec<Vec<StyleSpan>>,
    rich_spans: Vec<(RichSpanId, RichSpan)>,
}

fn snapshot(doc: &Document) -> Snapshot {
    Snapshot {
        text: doc.text(),
        spans: doc
            .lines()
            .iter()
            .map(|line| line.spans().to_vec())
            .collect(),
        rich_spans: doc
            .rich_spans()
            .iter()
            .map(|(id, span)| (id, *span))
            .collect(),
    }
}

fn random_attributes(rng: &mut StdRng) -> StyleAttributes {
    match rng.gen_range(0..4) {
        0 => StyleAttributes::bold(),
        1 => StyleAttributes::italic(),
        2 => StyleAttributes::underline(),
        _ => StyleAttributes::color("red"),
    }
}

fn random_position(doc: &Document, rng: &mut StdRng) -> Position {
    doc.index_to_position(rng.gen_range(0..=doc.char_count()))
}

fn random_range(doc: &Document, rng: &mut StdRng) -> Range {
    Range::ordered(random_position(doc, rng), random_position(doc, rng))
}

fn random_document(rng: &mut StdRng) -> Document {
    let line_count = rng.gen_range(1..6);
    let lines: Vec<String> = (0..line_count)
        .map(|_| {
            let words = rng.gen_range(0..6);
            (0..words)
                .map(|_| WORDS[rng.gen_range(0..WORDS.len())])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    let mut doc = Document::new(&lines.join("\n"));
    for _ in 0..rng.gen_range(0..8) {
        let range = random_range(&doc, rng);
        let attributes = random_attributes(rng);
        doc.add_style(range, attributes);
    }
    for _ in 0..rng.gen_range(0..5) {
        let range = random_range(&doc, rng);
        let style = if rng.gen_bool(0.5) {
            HIGHLIGHT_STYLE
        } else {
            SEARCH_MATCH_STYLE
        };
        doc.add_rich_span(range, style);
    }
    doc
}

fn random_edit(doc: &mut Document, rng: &mut StdRng) {
    match rng.gen_range(0..7) {
        0 | 1 => {
            let position = random_position(doc, rng);
            doc.set_cursor(position);
            doc.insert_text(INSERTS[rng.gen_range(0..INSERTS.len())]);
        }
        2 => {
            let range = random_range(doc, rng);
            doc.delete_range(range);
        }
        3 => {
            let range = random_range(doc, rng);
            let text = INSERTS[rng.gen_range(0..INSERTS.len())];
            let styled = if rng.gen_bool(0.5) {
                StyledText::styled(text, random_attributes(rng))
            } else {
                StyledText::plain(text)
            };
            let inherit = rng.gen_bool(0.5);
            doc.replace_range(range, styled, inherit);
        }
        4 => {
            let range = random_range(doc, rng);
            let attributes = random_attributes(rng);
            doc.add_style(range, attributes);
        }
        5 => {
            let range = random_range(doc, rng);
            let attributes = random_attributes(rng);
            doc.remove_style(range, attributes);
        }
        _ => {
            let position = random_position(doc, rng);
            doc.set_cursor(position);
            if rng.gen_bool(0.5) {
                doc.backspace();
            } else {
                doc.delete_forward();
            }
        }
    }
}

#[test]
fn test_random_edits_undo_to_initial_state() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0001);

    for _ in 0..200 {
        let mut doc = random_document(&mut rng);
        let base_depth = doc.undo_depth();
        let initial = snapshot(&doc);

        let mut states = Vec::new();
        for _ in 0..rng.gen_range(1..12) {
            let depth = doc.undo_depth();
            random_edit(&mut doc, &mut rng);
            if doc.undo_depth() > depth {
                states.push(snapshot(&doc));
            }
        }
        let last = states.last().cloned();

        while doc.undo_depth() > base_depth {
            assert!(doc.undo());
        }
        assert_eq!(snapshot(&doc), initial);

        while doc.redo() {}
        if let Some(last) = last {
            let redone = snapshot(&doc);
            assert_eq!(redone.text, last.text);
            assert_eq!(redone.spans, last.spans);
        }
    }
}

#[test]
fn test_each_undo_steps_back_exactly_once() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0002);

    for _ in 0..100 {
        let mut doc = random_document(&mut rng);
        let base_depth = doc.undo_depth();
        let mut states = vec![snapshot(&doc)];

        for _ in 0..rng.gen_range(1..8) {
            let depth = doc.undo_depth();
            random_edit(&mut doc, &mut rng);
            if doc.undo_depth() > depth {
                states.push(snapshot(&doc));
            }
        }

        states.pop();
        while let Some(expected) = states.pop() {
            assert!(doc.undo());
            assert_eq!(snapshot(&doc), expected);
        }
        assert_eq!(doc.undo_depth(), base_depth);
    }
}

#[test]
fn test_span_invariants_hold_after_random_edits() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0003);

    for _ in 0..200 {
        let mut doc = random_document(&mut rng);
        for _ in 0..10 {
            random_edit(&mut doc, &mut rng);
        }

        assert!(doc.line_count() >= 1);
        for line in doc.lines() {
            let spans = line.spans();
            for span in spans {
                assert!(span.start < span.end, "zero-width span {span:?}");
                assert!(span.end <= line.len(), "span {span:?} past line end");
            }
            for pair in spans.windows(2) {
                assert!(pair[0].start <= pair[1].start, "unsorted spans {spans:?}");
            }
            for (idx, a) in spans.iter().enumerate() {
                for b in &spans[idx + 1..] {
                    if a.attributes == b.attributes {
                        assert!(!a.touches(b.start, b.end), "unmerged {a:?} / {b:?}");
                    }
                }
            }
        }
        for (_, span) in doc.rich_spans().iter() {
            assert!(span.range.is_valid(), "degenerate rich span {span:?}");
        }
    }
}

#[test]
fn test_offset_bijection() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0004);

    for _ in 0..100 {
        let doc = random_document(&mut rng);
        for index in 0..=doc.char_count() {
            let position = doc.index_to_position(index);
            assert_eq!(doc.position_to_index(position), index);
        }
        for (line_idx, line) in doc.lines().iter().enumerate() {
            for column in 0..=line.len() {
                let position = Position::new(line_idx, column);
                assert_eq!(
                    doc.index_to_position(doc.position_to_index(position)),
                    position
                );
            }
        }
    }
}

#[test]
fn test_apply_style_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0005);

    for _ in 0..500 {
        let len = rng.gen_range(1..40);
        let mut spans = Vec::new();
        for _ in 0..rng.gen_range(0..6) {
            let start = rng.gen_range(0..len);
            let end = rng.gen_range(start + 1..=len);
            spans = apply_style(&spans, start, end, &random_attributes(&mut rng));
        }

        let start = rng.gen_range(0..len);
        let end = rng.gen_range(start + 1..=len);
        let attributes = random_attributes(&mut rng);

        let once = apply_style(&spans, start, end, &attributes);
        let twice = apply_style(&once, start, end, &attributes);
        assert_eq!(once, twice);
    }
}
