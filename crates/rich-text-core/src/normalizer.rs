//! Per-line style span normalization.
//!
//! Keeps a line's [`StyleSpan`] list minimal: sorted by start, no zero-width spans, and no two
//! spans with identical attributes overlapping or touching. [`normalize`] applies a pending
//! deletion and/or insertion in a single pass so that a replacement never has to run two
//! separate passes over the boundary spans.

use crate::style::{StyleAttributes, StyleSpan};
use std::ops::Range as ColumnRange;

/// Text inserted into a line, expressed in columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Insertion {
    /// Column where the text is inserted (after any deletion has been applied).
    pub point: usize,
    /// Number of inserted characters.
    pub len: usize,
    /// Spans carried by the inserted text, relative to the inserted text itself.
    pub spans: Vec<StyleSpan>,
}

/// A pending single-line edit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpanEdit {
    /// Columns removed from the line.
    pub deletion: Option<ColumnRange<usize>>,
    /// Text inserted into the line.
    pub insertion: Option<Insertion>,
}

impl SpanEdit {
    /// Pure insertion of `len` characters at `point`.
    pub fn insert(point: usize, len: usize, spans: Vec<StyleSpan>) -> Self {
        Self {
            deletion: None,
            insertion: Some(Insertion { point, len, spans }),
        }
    }

    /// Pure deletion of `[start, end)`.
    pub fn delete(start: usize, end: usize) -> Self {
        Self {
            deletion: Some(start..end),
            insertion: None,
        }
    }

    /// Deletion of `[start, end)` followed by insertion of `len` characters at `start`.
    pub fn splice(start: usize, end: usize, len: usize, spans: Vec<StyleSpan>) -> Self {
        Self {
            deletion: Some(start..end),
            insertion: Some(Insertion {
                point: start,
                len,
                spans,
            }),
        }
    }

    fn deleted_len(&self) -> usize {
        self.deletion
            .as_ref()
            .map(|range| range.end.saturating_sub(range.start))
            .unwrap_or(0)
    }

    fn inserted_len(&self) -> usize {
        self.insertion.as_ref().map(|ins| ins.len).unwrap_or(0)
    }
}

/// Apply `edit` to the spans of a line that was `line_len` characters long before the edit.
pub fn normalize(spans: &[StyleSpan], line_len: usize, edit: &SpanEdit) -> Vec<StyleSpan> {
    let mut out = dedup(spans);

    if let Some(deletion) = edit.deletion.as_ref()
        && deletion.start < deletion.end
    {
        out = apply_deletion(out, deletion.start, deletion.end);
    }

    if let Some(insertion) = edit.insertion.as_ref()
        && insertion.len > 0
    {
        out = apply_insertion(out, insertion);
    }

    let final_len = line_len.saturating_sub(edit.deleted_len()) + edit.inserted_len();
    merge_and_clip(out, final_len)
}

fn dedup(spans: &[StyleSpan]) -> Vec<StyleSpan> {
    let mut out = spans.to_vec();
    out.sort_by(|a, b| {
        (a.start, a.end, &a.attributes).cmp(&(b.start, b.end, &b.attributes))
    });
    out.dedup();
    out
}

fn apply_deletion(spans: Vec<StyleSpan>, start: usize, end: usize) -> Vec<StyleSpan> {
    let deleted = end - start;
    let mut out = Vec::with_capacity(spans.len());

    for mut span in spans {
        if span.end <= start {
            // Entirely before the deletion.
        } else if span.start >= end {
            span.start -= deleted;
            span.end -= deleted;
        } else if span.start >= start && span.end <= end {
            continue;
        } else if span.start < start && span.end > end {
            span.end -= deleted;
        } else if span.start < start {
            span.end = start;
        } else {
            span.start = start;
            span.end -= deleted;
        }
        out.push(span);
    }

    out
}

fn apply_insertion(spans: Vec<StyleSpan>, insertion: &Insertion) -> Vec<StyleSpan> {
    let point = insertion.point;
    let len = insertion.len;
    let mut out = Vec::with_capacity(spans.len() + insertion.spans.len());

    for mut span in spans {
        if span.end <= point {
            // Ends at or before the insertion point: a style boundary at the caret is kept.
        } else if span.start >= point {
            span.start += len;
            span.end += len;
        } else {
            span.end += len;
        }
        out.push(span);
    }

    out.extend(
        insertion
            .spans
            .iter()
            .filter(|span| span.start < span.end && span.start < len)
            .map(|span| {
                StyleSpan::new(
                    span.attributes.clone(),
                    span.start + point,
                    span.end.min(len) + point,
                )
            }),
    );

    out
}

/// Sort, merge identical overlapping/touching spans, then clip to `[0, line_len]`.
pub fn merge_and_clip(spans: Vec<StyleSpan>, line_len: usize) -> Vec<StyleSpan> {
    let mut spans = merge(spans);
    for span in &mut spans {
        span.start = span.start.min(line_len);
        span.end = span.end.min(line_len);
    }
    spans.retain(|span| span.start < span.end);
    spans
}

/// Sort by start and merge spans with identical attributes that overlap or touch.
pub fn merge(mut spans: Vec<StyleSpan>) -> Vec<StyleSpan> {
    spans.retain(|span| span.start < span.end);
    spans.sort_by(|a, b| {
        (a.start, a.end, &a.attributes).cmp(&(b.start, b.end, &b.attributes))
    });

    let mut out: Vec<StyleSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        let previous = out
            .iter_mut()
            .rev()
            .find(|existing| existing.attributes == span.attributes);

        match previous {
            Some(existing) if existing.end >= span.start => {
                existing.end = existing.end.max(span.end);
            }
            _ => out.push(span),
        }
    }

    out
}

/// Apply `attributes` to `[start, end)`.
///
/// Spans with identical attributes that overlap or touch the range are unioned into a single
/// span; spans with other attributes are left as they are.
pub fn apply_style(
    spans: &[StyleSpan],
    start: usize,
    end: usize,
    attributes: &StyleAttributes,
) -> Vec<StyleSpan> {
    if start >= end {
        return spans.to_vec();
    }

    let mut combined = StyleSpan::new(attributes.clone(), start, end);
    let mut out = Vec::with_capacity(spans.len() + 1);

    for span in spans {
        if span.attributes == *attributes && span.touches(combined.start, combined.end) {
            combined.start = combined.start.min(span.start);
            combined.end = combined.end.max(span.end);
        } else {
            out.push(span.clone());
        }
    }

    out.push(combined);
    merge(out)
}

/// Remove `attributes` from `[start, end)`, splitting matching spans at the boundaries.
pub fn remove_style(
    spans: &[StyleSpan],
    start: usize,
    end: usize,
    attributes: &StyleAttributes,
) -> Vec<StyleSpan> {
    if start >= end {
        return spans.to_vec();
    }

    let mut out = Vec::with_capacity(spans.len() + 1);
    for span in spans {
        if span.attributes != *attributes || !span.overlaps(start, end) {
            out.push(span.clone());
            continue;
        }
        if span.start < start {
            out.push(StyleSpan::new(span.attributes.clone(), span.start, start));
        }
        if span.end > end {
            out.push(StyleSpan::new(span.attributes.clone(), end, span.end));
        }
    }

    merge(out)
}

/// Attributes of spans covering `[start, end)` entirely.
pub(crate) fn attributes_covering(
    spans: &[StyleSpan],
    start: usize,
    end: usize,
) -> Vec<StyleAttributes> {
    spans
        .iter()
        .filter(|span| span.start <= start && span.end >= end)
        .map(|span| span.attributes.clone())
        .collect()
}

/// Spans clipped to `[start, end)` and re-based so that `start` becomes column 0.
pub(crate) fn slice(spans: &[StyleSpan], start: usize, end: usize) -> Vec<StyleSpan> {
    spans
        .iter()
        .filter(|span| span.overlaps(start, end))
        .map(|span| {
            StyleSpan::new(
                span.attributes.clone(),
                span.start.max(start) - start,
                span.end.min(end) - start,
            )
        })
        .collect()
}
