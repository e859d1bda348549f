//! Diff segments
//!
//! The merge-facing form of a diff: consecutive edits of the same kind
//! coalesced into `(kind, text)` runs. Rendering a segment sequence keeps
//! the Equal and Insert runs, which reproduces the new side of the diff.

use crate::artifacts::diff::myers::{Edit, MyersDiff};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Equal,
    Insert,
    Delete,
}

/// A run of consecutive same-kind lines. `text` is the concatenation of
/// the run's lines, newlines included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

/// Line-diff two contents into coalesced segments.
pub fn segments_between(old: &str, new: &str) -> Vec<Segment> {
    coalesce(&MyersDiff::new(old, new).diff())
}

fn coalesce(edits: &[Edit<'_>]) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();

    for edit in edits {
        let (kind, text) = match edit {
            Edit::Delete { line } => (SegmentKind::Delete, line.text),
            Edit::Insert { line } => (SegmentKind::Insert, line.text),
            Edit::Equal { line_a, .. } => (SegmentKind::Equal, line_a.text),
        };

        match segments.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(text),
            _ => segments.push(Segment {
                kind,
                text: text.to_string(),
            }),
        }
    }

    segments
}

/// Resulting content of a segment sequence: Equal and Insert runs
/// concatenated, Delete runs dropped. For a base→X diff this is exactly
/// X's content.
pub fn render(segments: &[Segment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind != SegmentKind::Delete)
        .map(|s| s.text.as_str())
        .collect()
}
