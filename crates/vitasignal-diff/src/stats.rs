use serde::{Deserialize, Serialize};

use crate::line_diff::DiffLine;

/// Summary counts over a diff.
///
/// `total` is the number of entries in the diff, including the truncation
/// marker when one was appended. The marker is not counted as added,
/// removed or unchanged, so on a truncated diff
/// `added + removed + unchanged == total - 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
    pub total: usize,
}

impl DiffStats {
    /// Number of added plus removed lines.
    pub fn changed(&self) -> usize {
        self.added + self.removed
    }

    /// Returns `true` if nothing was added or removed.
    pub fn is_identical(&self) -> bool {
        self.changed() == 0
    }
}

/// Count the entries of a diff by kind.
pub fn compute_diff_stats(lines: &[DiffLine]) -> DiffStats {
    let mut stats = DiffStats {
        total: lines.len(),
        ..DiffStats::default()
    };
    for line in lines {
        match line {
            DiffLine::Added { .. } => stats.added += 1,
            DiffLine::Removed { .. } => stats.removed += 1,
            DiffLine::Unchanged { .. } => stats.unchanged += 1,
            DiffLine::Truncated { .. } => {}
        }
    }
    stats
}
