//! Plain-text presentation of a line diff.
//!
//! Unified output is produced as a list of [`UnifiedEntry`] values so a
//! caller can decorate each entry (for example with terminal colors)
//! without re-deriving the layout. Side-by-side output pairs removed and
//! added runs row by row, and [`inline_changes`] marks the words that
//! differ inside such a pair.

use similar::{ChangeTag, TextDiff};

use crate::config::RenderConfig;
use crate::hunk::hunks;
use crate::line_diff::{DiffLine, LineKind};

/// One output line of a unified rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnifiedEntry {
    /// A hunk header, only present when context is limited.
    Header(String),
    /// A formatted diff line.
    Line { kind: LineKind, text: String },
    /// The truncation marker.
    Note(String),
}

impl UnifiedEntry {
    pub fn text(&self) -> &str {
        match self {
            UnifiedEntry::Header(text) | UnifiedEntry::Note(text) => text,
            UnifiedEntry::Line { text, .. } => text,
        }
    }
}

fn marker(kind: LineKind) -> char {
    match kind {
        LineKind::Unchanged => ' ',
        LineKind::Added => '+',
        LineKind::Removed => '-',
    }
}

/// Digits needed for the widest line number in `lines`.
fn gutter_width(lines: &[DiffLine]) -> usize {
    lines
        .iter()
        .filter_map(DiffLine::line_number)
        .max()
        .map_or(1, |n| n.to_string().len())
}

/// Format one numbered line. `width` of `None` omits the gutter.
fn format_line(line: &DiffLine, width: Option<usize>) -> String {
    match (width, line.line_number()) {
        (Some(w), Some(n)) => format!("{n:>w$} {}{}", marker(line.kind()), line.content()),
        _ => format!("{}{}", marker(line.kind()), line.content()),
    }
}

/// Lay out a diff for unified display.
pub fn unified_entries(lines: &[DiffLine], config: &RenderConfig) -> Vec<UnifiedEntry> {
    let width = config.line_numbers.then(|| gutter_width(lines));
    let line_entry = |line: &DiffLine| UnifiedEntry::Line {
        kind: line.kind(),
        text: format_line(line, width),
    };

    let mut entries = Vec::new();
    match config.context {
        Some(context) => {
            for hunk in hunks(lines, context) {
                entries.push(UnifiedEntry::Header(hunk.header()));
                entries.extend(hunk.lines.iter().map(line_entry));
            }
        }
        None => entries.extend(lines.iter().filter(|l| !l.is_sentinel()).map(line_entry)),
    }

    entries.extend(
        lines
            .iter()
            .filter(|l| l.is_sentinel())
            .map(|l| UnifiedEntry::Note(l.content().to_string())),
    );
    entries
}

/// Render a diff as unified text, one line per entry.
pub fn render_unified(lines: &[DiffLine], config: &RenderConfig) -> String {
    let mut out = String::new();
    for entry in unified_entries(lines, config) {
        out.push_str(entry.text());
        out.push('\n');
    }
    out
}

/// One side of a side-by-side row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub line_number: usize,
    pub content: String,
    pub kind: LineKind,
}

/// A row of side-by-side output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SideBySideRow {
    Line {
        old: Option<Cell>,
        new: Option<Cell>,
    },
    /// Full-width note (the truncation marker).
    Note(String),
}

/// Pair a diff up for side-by-side display.
///
/// Unchanged lines fill both columns. Each run of removed lines is paired
/// row by row with the run of added lines that follows it.
pub fn side_by_side(lines: &[DiffLine]) -> Vec<SideBySideRow> {
    let mut rows = Vec::new();
    let mut old_next = 1;
    let mut i = 0;

    while i < lines.len() {
        match &lines[i] {
            DiffLine::Unchanged { content, line_number } => {
                rows.push(SideBySideRow::Line {
                    old: Some(Cell {
                        line_number: old_next,
                        content: content.clone(),
                        kind: LineKind::Unchanged,
                    }),
                    new: Some(Cell {
                        line_number: *line_number,
                        content: content.clone(),
                        kind: LineKind::Unchanged,
                    }),
                });
                old_next += 1;
                i += 1;
            }
            DiffLine::Truncated { content } => {
                rows.push(SideBySideRow::Note(content.clone()));
                i += 1;
            }
            DiffLine::Removed { .. } | DiffLine::Added { .. } => {
                let mut removed = Vec::new();
                while let Some(DiffLine::Removed { content, line_number }) = lines.get(i) {
                    old_next = line_number + 1;
                    removed.push(Cell {
                        line_number: *line_number,
                        content: content.clone(),
                        kind: LineKind::Removed,
                    });
                    i += 1;
                }
                let mut added = Vec::new();
                while let Some(DiffLine::Added { content, line_number }) = lines.get(i) {
                    added.push(Cell {
                        line_number: *line_number,
                        content: content.clone(),
                        kind: LineKind::Added,
                    });
                    i += 1;
                }

                let height = removed.len().max(added.len());
                let mut removed = removed.into_iter();
                let mut added = added.into_iter();
                for _ in 0..height {
                    rows.push(SideBySideRow::Line {
                        old: removed.next(),
                        new: added.next(),
                    });
                }
            }
        }
    }
    rows
}

/// A run of text within a line, flagged when it differs from the other side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub emphasized: bool,
}

fn push_segment(segments: &mut Vec<Segment>, text: &str, emphasized: bool) {
    match segments.last_mut() {
        Some(last) if last.emphasized == emphasized => last.text.push_str(text),
        _ => segments.push(Segment {
            text: text.to_string(),
            emphasized,
        }),
    }
}

/// Word-level comparison of a removed line against the added line it was
/// paired with. Concatenating a side's segments reproduces that line.
pub fn inline_changes(old: &str, new: &str) -> (Vec<Segment>, Vec<Segment>) {
    let diff = TextDiff::from_words(old, new);
    let mut old_segments = Vec::new();
    let mut new_segments = Vec::new();

    for change in diff.iter_all_changes() {
        let text = change.value();
        match change.tag() {
            ChangeTag::Equal => {
                push_segment(&mut old_segments, text, false);
                push_segment(&mut new_segments, text, false);
            }
            ChangeTag::Delete => push_segment(&mut old_segments, text, true),
            ChangeTag::Insert => push_segment(&mut new_segments, text, true),
        }
    }
    (old_segments, new_segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_diff::{compute_line_diff, compute_line_diff_with};
    use crate::config::DiffConfig;
    use proptest::prelude::*;

    fn plain(line_numbers: bool, context: Option<usize>) -> RenderConfig {
        RenderConfig {
            line_numbers,
            context,
            ..RenderConfig::default()
        }
    }

    fn seg(text: &str, emphasized: bool) -> Segment {
        Segment {
            text: text.into(),
            emphasized,
        }
    }

    #[test]
    fn unified_without_numbers() {
        let diff = compute_line_diff("a\nb\nc", "a\nx\nc");
        assert_eq!(render_unified(&diff, &plain(false, None)), " a\n-b\n+x\n c\n");
    }

    #[test]
    fn unified_with_numbers() {
        let diff = compute_line_diff("a\nb\nc", "a\nx\nc");
        assert_eq!(render_unified(&diff, &plain(true, None)), "1  a\n2 -b\n2 +x\n3  c\n");
    }

    #[test]
    fn gutter_is_right_aligned() {
        let old: Vec<String> = (1..=10).map(|i| i.to_string()).collect();
        let diff = compute_line_diff(&old.join("\n"), &old.join("\n"));
        let text = render_unified(&diff, &plain(true, None));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], " 1  1");
        assert_eq!(lines[9], "10  10");
    }

    #[test]
    fn unified_with_context_prints_hunks() {
        let diff = compute_line_diff("a\nb\nc\nd\ne\nf", "a\nb\nc\nd\ne\nF");
        assert_eq!(
            render_unified(&diff, &plain(false, Some(1))),
            "@@ -5,2 +5,2 @@\n e\n-f\n+F\n"
        );
    }

    #[test]
    fn identical_documents_with_context_render_nothing() {
        let diff = compute_line_diff("a\nb", "a\nb");
        assert_eq!(render_unified(&diff, &plain(true, Some(3))), "");
    }

    #[test]
    fn sentinel_rendered_last_without_marker() {
        let config = DiffConfig { max_lines: 1 };
        let diff = compute_line_diff_with("a\nb", "a\nc", &config);
        let entries = unified_entries(&diff, &plain(true, None));
        assert_eq!(
            entries.last(),
            Some(&UnifiedEntry::Note("... (truncated — showing first 1 lines)".into()))
        );
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn side_by_side_pairs_replacements() {
        let diff = compute_line_diff("a\nb\nc", "a\nx\ny\nc");
        let rows = side_by_side(&diff);
        assert_eq!(rows.len(), 4);

        match &rows[1] {
            SideBySideRow::Line { old: Some(old), new: Some(new) } => {
                assert_eq!((old.line_number, old.content.as_str()), (2, "b"));
                assert_eq!((new.line_number, new.content.as_str()), (2, "x"));
            }
            other => panic!("expected paired row, got {:?}", other),
        }
        match &rows[2] {
            SideBySideRow::Line { old: None, new: Some(new) } => {
                assert_eq!((new.line_number, new.content.as_str()), (3, "y"));
            }
            other => panic!("expected added-only row, got {:?}", other),
        }
        match &rows[3] {
            SideBySideRow::Line { old: Some(old), new: Some(new) } => {
                assert_eq!(old.line_number, 3);
                assert_eq!(new.line_number, 4);
            }
            other => panic!("expected unchanged row, got {:?}", other),
        }
    }

    #[test]
    fn side_by_side_tracks_old_numbers_after_deletions() {
        let diff = compute_line_diff("a\nb\nc\nd", "a\nd");
        let rows = side_by_side(&diff);
        let last = rows.last().unwrap();
        match last {
            SideBySideRow::Line { old: Some(old), new: Some(new) } => {
                assert_eq!(old.line_number, 4);
                assert_eq!(new.line_number, 2);
            }
            other => panic!("expected unchanged row, got {:?}", other),
        }
    }

    #[test]
    fn side_by_side_note_for_sentinel() {
        let diff = compute_line_diff_with("a\nb", "a\nb", &DiffConfig { max_lines: 1 });
        let rows = side_by_side(&diff);
        assert!(matches!(rows.last(), Some(SideBySideRow::Note(_))));
    }

    #[test]
    fn inline_marks_changed_word() {
        let (old, new) = inline_changes("hello world", "hello universe");
        assert_eq!(old, vec![seg("hello ", false), seg("world", true)]);
        assert_eq!(new, vec![seg("hello ", false), seg("universe", true)]);
    }

    #[test]
    fn inline_identical_lines_have_no_emphasis() {
        let (old, new) = inline_changes("same text", "same text");
        assert_eq!(old, vec![seg("same text", false)]);
        assert_eq!(old, new);
    }

    proptest! {
        #[test]
        fn inline_segments_rebuild_both_lines(
            old in "[ab ]{0,24}",
            new in "[ab ]{0,24}",
        ) {
            let (old_segs, new_segs) = inline_changes(&old, &new);
            let rebuilt_old: String = old_segs.iter().map(|s| s.text.as_str()).collect();
            let rebuilt_new: String = new_segs.iter().map(|s| s.text.as_str()).collect();
            prop_assert_eq!(rebuilt_old, old);
            prop_assert_eq!(rebuilt_new, new);
        }
    }
}
