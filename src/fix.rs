use std::cmp::Ordering;

use serde::Serialize;

/// Represents a single in-file edit proposed by a check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

impl TextEdit {
    pub fn new(start: usize, end: usize, replacement: impl Into<String>) -> Self {
        assert!(start <= end, "text edit start must not exceed end");
        Self {
            start,
            end,
            replacement: replacement.into(),
        }
    }
}

/// A proposed automatic source edit attached to a warning.
///
/// A hint may be null: present as an object but carrying no edit. Null hints
/// are filtered out before a diagnostic reaches the sink.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FixitHint {
    edit: Option<TextEdit>,
}

impl FixitHint {
    pub fn replacement(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            edit: Some(TextEdit::new(start, end, text)),
        }
    }

    pub fn insertion(at: usize, text: impl Into<String>) -> Self {
        Self::replacement(at, at, text)
    }

    pub fn removal(start: usize, end: usize) -> Self {
        Self::replacement(start, end, "")
    }

    /// Removal widened to the whole line(s) covering `start..end`.
    pub fn removal_of_line(source: &str, start: usize, end: usize) -> Self {
        let (start, end) = covering_line_range(source, start, end);
        Self::removal(start, end)
    }

    pub fn null() -> Self {
        Self { edit: None }
    }

    pub fn is_null(&self) -> bool {
        self.edit.is_none()
    }

    pub fn edit(&self) -> Option<&TextEdit> {
        self.edit.as_ref()
    }
}

/// Applies a sequence of edits to `source` and returns the updated text.
pub fn apply_text_edits(source: &str, edits: &[TextEdit]) -> String {
    let mut sorted = edits.to_vec();
    sorted.sort_by(|a, b| match a.start.cmp(&b.start) {
        Ordering::Equal => a.end.cmp(&b.end),
        ordering => ordering,
    });

    let mut result = String::with_capacity(source.len());
    let mut cursor = 0;
    for edit in sorted {
        if cursor > edit.start {
            panic!("overlapping edits are not supported");
        }

        result.push_str(&source[cursor..edit.start]);
        result.push_str(&edit.replacement);
        cursor = edit.end;
    }

    result.push_str(&source[cursor..]);
    result
}

/// Applies the non-null hints of `hints` to `source`.
pub fn apply_fixits(source: &str, hints: &[FixitHint]) -> String {
    let edits: Vec<TextEdit> = hints
        .iter()
        .filter_map(FixitHint::edit)
        .cloned()
        .collect();
    apply_text_edits(source, &edits)
}

/// Expands the range defined by `start`/`end` to cover the entire line it sits on.
pub fn covering_line_range(source: &str, start: usize, end: usize) -> (usize, usize) {
    let start = line_start(source, start);
    let end = line_end(source, end);
    (start, end)
}

fn line_start(source: &str, idx: usize) -> usize {
    let idx = idx.min(source.len());
    match source[..idx].rfind('\n') {
        Some(pos) => pos + 1,
        None => 0,
    }
}

fn line_end(source: &str, idx: usize) -> usize {
    let mut pos = idx.min(source.len());
    while pos < source.len() {
        let ch = source.as_bytes()[pos];
        pos += 1;
        if ch == b'\n' {
            break;
        }
    }
    pos
}
