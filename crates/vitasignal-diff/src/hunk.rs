//! Grouping of a line diff into unified-diff hunks.

use serde::{Deserialize, Serialize};

use crate::line_diff::{DiffLine, LineKind};

/// A contiguous region of changes with surrounding context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffHunk {
    /// Line number in the old document where this hunk starts (1-based).
    pub old_start: usize,
    /// Number of lines from the old document in this hunk.
    pub old_count: usize,
    /// Line number in the new document where this hunk starts (1-based).
    pub new_start: usize,
    /// Number of lines from the new document in this hunk.
    pub new_count: usize,
    /// The diff lines in this hunk, in document order.
    pub lines: Vec<DiffLine>,
}

impl DiffHunk {
    /// The `@@ -a,b +c,d @@` header line.
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_count, self.new_start, self.new_count
        )
    }
}

/// Group the changed lines of `lines` into hunks with up to `context`
/// unchanged lines on each side. Hunks whose context windows touch are
/// merged. The truncation marker never belongs to a hunk.
pub fn hunks(lines: &[DiffLine], context: usize) -> Vec<DiffHunk> {
    let end = lines
        .iter()
        .position(DiffLine::is_sentinel)
        .unwrap_or(lines.len());
    let body = &lines[..end];

    // Lines consumed from each document before each entry.
    let mut positions = Vec::with_capacity(body.len());
    let (mut old, mut new) = (0usize, 0usize);
    for line in body {
        positions.push((old, new));
        match line.kind() {
            LineKind::Removed => old += 1,
            LineKind::Added => new += 1,
            LineKind::Unchanged => {
                old += 1;
                new += 1;
            }
        }
    }

    let mut windows: Vec<(usize, usize)> = Vec::new();
    for (idx, line) in body.iter().enumerate() {
        if !line.is_change() {
            continue;
        }
        let start = idx.saturating_sub(context);
        let stop = (idx + context + 1).min(body.len());
        match windows.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(stop),
            _ => windows.push((start, stop)),
        }
    }

    windows
        .into_iter()
        .map(|(start, stop)| {
            let slice = &body[start..stop];
            let (old_before, new_before) = positions[start];
            DiffHunk {
                old_start: old_before + 1,
                old_count: slice.iter().filter(|l| l.kind() != LineKind::Added).count(),
                new_start: new_before + 1,
                new_count: slice.iter().filter(|l| l.kind() != LineKind::Removed).count(),
                lines: slice.to_vec(),
            }
        })
        .collect()
}
