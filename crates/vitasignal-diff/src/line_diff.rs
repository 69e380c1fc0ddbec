//! Line-level diff: LCS alignment of two text documents.
//!
//! The edit script is reconstructed by walking the LCS table backward from
//! the bottom-right corner. When an insertion and a deletion are equally
//! good the walk takes the insertion first, so in document order removals
//! come before insertions at every point of divergence. Output depends on
//! this tie-break and must stay byte-for-byte stable.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::DiffConfig;

/// Upper bound on the lines per side that take part in alignment.
pub const MAX_DIFF_LINES: usize = 500;

/// The kind of a line in an edit script.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Unchanged,
    Added,
    Removed,
}

/// A single line of diff output.
///
/// `Removed` lines are numbered in the old document, `Added` and
/// `Unchanged` lines in the new document. Numbers are 1-based.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DiffLine {
    /// A line present in both documents.
    Unchanged {
        content: String,
        #[serde(rename = "lineNumber")]
        line_number: usize,
    },
    /// A line only present in the new document.
    Added {
        content: String,
        #[serde(rename = "lineNumber")]
        line_number: usize,
    },
    /// A line only present in the old document.
    Removed {
        content: String,
        #[serde(rename = "lineNumber")]
        line_number: usize,
    },
    /// Marker appended when the inputs were cut at the line cap. It reads
    /// as an unchanged line but has no number and is not counted as one.
    Truncated { content: String },
}

impl DiffLine {
    pub fn kind(&self) -> LineKind {
        match self {
            DiffLine::Unchanged { .. } | DiffLine::Truncated { .. } => LineKind::Unchanged,
            DiffLine::Added { .. } => LineKind::Added,
            DiffLine::Removed { .. } => LineKind::Removed,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            DiffLine::Unchanged { content, .. }
            | DiffLine::Added { content, .. }
            | DiffLine::Removed { content, .. }
            | DiffLine::Truncated { content } => content,
        }
    }

    /// The line number, or `None` for the truncation marker.
    pub fn line_number(&self) -> Option<usize> {
        match self {
            DiffLine::Unchanged { line_number, .. }
            | DiffLine::Added { line_number, .. }
            | DiffLine::Removed { line_number, .. } => Some(*line_number),
            DiffLine::Truncated { .. } => None,
        }
    }

    /// Returns `true` for the truncation marker.
    pub fn is_sentinel(&self) -> bool {
        matches!(self, DiffLine::Truncated { .. })
    }

    /// Returns `true` for added and removed lines.
    pub fn is_change(&self) -> bool {
        matches!(self, DiffLine::Added { .. } | DiffLine::Removed { .. })
    }
}

/// An ordered edit script from the old document to the new one.
pub type DiffResult = Vec<DiffLine>;

/// Text of the marker line appended when either side exceeds `cap` lines.
pub fn truncation_notice(cap: usize) -> String {
    format!("... (truncated — showing first {cap} lines)")
}

/// Compute the line diff between two documents with the default line cap.
///
/// Never fails. `compute_line_diff("", "")` is empty.
pub fn compute_line_diff(old_text: &str, new_text: &str) -> DiffResult {
    compute_line_diff_with(old_text, new_text, &DiffConfig::default())
}

/// Compute the line diff using the line cap from `config`.
///
/// The cap never exceeds [`MAX_DIFF_LINES`], so the alignment table stays
/// within 500×500 cells whatever the configuration says.
pub fn compute_line_diff_with(old_text: &str, new_text: &str, config: &DiffConfig) -> DiffResult {
    let old_lines = split_lines(old_text);
    let new_lines = split_lines(new_text);
    let cap = config.max_lines.min(MAX_DIFF_LINES);

    let truncated = old_lines.len() > cap || new_lines.len() > cap;
    let a = &old_lines[..old_lines.len().min(cap)];
    let b = &new_lines[..new_lines.len().min(cap)];

    let mut result = number_lines(edit_script(a, b));

    if truncated {
        warn!(
            old_lines = old_lines.len(),
            new_lines = new_lines.len(),
            cap,
            "diff input truncated"
        );
        result.push(DiffLine::Truncated {
            content: truncation_notice(cap),
        });
    }

    debug!(
        old_lines = a.len(),
        new_lines = b.len(),
        truncated,
        entries = result.len(),
        "line diff computed"
    );
    result
}

/// Split on `'\n'` without any normalization. Empty text has no lines.
fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').collect()
    }
}

/// Build the LCS table over `a` and `b` and walk it back into an edit
/// script in document order.
fn edit_script<'a>(a: &[&'a str], b: &[&'a str]) -> Vec<(LineKind, &'a str)> {
    let m = a.len();
    let n = b.len();

    let mut dp = vec![vec![0u32; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            dp[i][j] = if a[i - 1] == b[j - 1] {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i - 1][j].max(dp[i][j - 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(m + n);
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && a[i - 1] == b[j - 1] {
            ops.push((LineKind::Unchanged, a[i - 1]));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || dp[i][j - 1] >= dp[i - 1][j]) {
            ops.push((LineKind::Added, b[j - 1]));
            j -= 1;
        } else {
            ops.push((LineKind::Removed, a[i - 1]));
            i -= 1;
        }
    }

    ops.reverse();
    ops
}

/// Assign line numbers in one forward pass over the ordered script.
fn number_lines(ops: Vec<(LineKind, &str)>) -> DiffResult {
    let mut old_line = 1;
    let mut new_line = 1;

    ops.into_iter()
        .map(|(kind, text)| {
            let content = text.to_string();
            match kind {
                LineKind::Removed => {
                    let line = DiffLine::Removed {
                        content,
                        line_number: old_line,
                    };
                    old_line += 1;
                    line
                }
                LineKind::Added => {
                    let line = DiffLine::Added {
                        content,
                        line_number: new_line,
                    };
                    new_line += 1;
                    line
                }
                LineKind::Unchanged => {
                    let line = DiffLine::Unchanged {
                        content,
                        line_number: new_line,
                    };
                    old_line += 1;
                    new_line += 1;
                    line
                }
            }
        })
        .collect()
}
