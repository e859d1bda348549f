//! Unified diff rendering
//!
//! Groups an edit script into hunks with three lines of context and
//! renders them in the classic `@@ -a,n +b,m @@` form.

use crate::artifacts::diff::myers::{Edit, MyersDiff};

/// Context lines kept around each change.
const HUNK_CONTEXT: usize = 3;

/// Render the unified diff of two contents. Identical contents render to
/// an empty string.
pub fn render_unified(path: &str, old: &str, new: &str) -> String {
    let edits = MyersDiff::new(old, new).diff();

    let hunks = hunk_ranges(&edits);
    if hunks.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&format!("--- a/{path}\n"));
    out.push_str(&format!("+++ b/{path}\n"));

    for (start, end) in hunks {
        out.push_str(&render_hunk(&edits, start, end));
    }

    out
}

/// Index ranges (inclusive start, exclusive end) of edits per hunk:
/// every change padded with context, overlapping ranges merged.
fn hunk_ranges(edits: &[Edit<'_>]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();

    for (i, edit) in edits.iter().enumerate() {
        if matches!(edit, Edit::Equal { .. }) {
            continue;
        }

        let start = i.saturating_sub(HUNK_CONTEXT);
        let end = (i + HUNK_CONTEXT + 1).min(edits.len());

        match ranges.last_mut() {
            Some((_, prev_end)) if start <= *prev_end => *prev_end = end,
            _ => ranges.push((start, end)),
        }
    }

    ranges
}

fn render_hunk(edits: &[Edit<'_>], start: usize, end: usize) -> String {
    // line counts on each side before the hunk
    let mut a_before = 0usize;
    let mut b_before = 0usize;
    for edit in &edits[..start] {
        match edit {
            Edit::Delete { .. } => a_before += 1,
            Edit::Insert { .. } => b_before += 1,
            Edit::Equal { .. } => {
                a_before += 1;
                b_before += 1;
            }
        }
    }

    let hunk = &edits[start..end];
    let a_size = hunk
        .iter()
        .filter(|e| matches!(e, Edit::Delete { .. } | Edit::Equal { .. }))
        .count();
    let b_size = hunk
        .iter()
        .filter(|e| matches!(e, Edit::Insert { .. } | Edit::Equal { .. }))
        .count();

    let a_start = if a_size == 0 { a_before } else { a_before + 1 };
    let b_start = if b_size == 0 { b_before } else { b_before + 1 };

    let mut out = format!("@@ -{a_start},{a_size} +{b_start},{b_size} @@\n");
    for edit in hunk {
        let (sign, text) = match edit {
            Edit::Delete { line } => ('-', line.text),
            Edit::Insert { line } => ('+', line.text),
            Edit::Equal { line_a, .. } => (' ', line_a.text),
        };

        out.push(sign);
        out.push_str(text.trim_end_matches('\n'));
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identical_contents_render_empty() {
        assert_eq!(render_unified("a.txt", "same\n", "same\n"), "");
    }

    #[test]
    fn single_change_carries_context_lines() {
        let old = "1\n2\n3\n4\n5\n6\n7\n";
        let new = "1\n2\n3\nX\n5\n6\n7\n";

        let rendered = render_unified("nums.txt", old, new);

        assert!(rendered.starts_with("--- a/nums.txt\n+++ b/nums.txt\n"));
        assert!(rendered.contains("@@ -1,7 +1,7 @@\n"));
        assert!(rendered.contains("-4\n"));
        assert!(rendered.contains("+X\n"));
        // context outside three lines is not included
        assert!(!rendered.contains(" 7\n") || old.lines().count() <= 7);
    }

    #[test]
    fn distant_changes_split_into_separate_hunks() {
        let old: String = (1..=20).map(|i| format!("{i}\n")).collect();
        let new = old.replace("2\n", "TWO\n").replace("19\n", "NINETEEN\n");

        let rendered = render_unified("nums.txt", &old, &new);

        assert_eq!(rendered.matches("@@").count(), 4); // two hunks, two markers each
    }

    #[test]
    fn whole_file_addition_counts_from_zero_on_the_old_side() {
        let rendered = render_unified("new.txt", "", "a\nb\n");

        assert!(rendered.contains("@@ -0,0 +1,2 @@\n"));
        assert!(rendered.contains("+a\n"));
        assert!(rendered.contains("+b\n"));
    }
}
