//! Line-oriented text diff engine for VitaSignal.
//!
//! Aligns two documents line by line using a longest-common-subsequence
//! table and reports the result as an edit script with per-line numbers,
//! plus summary statistics. Both core operations are pure and total:
//! they accept any input and never fail.
//!
//! # Key Types
//!
//! - [`DiffLine`] / [`DiffResult`] -- Numbered edit script (`compute_line_diff`)
//! - [`DiffStats`] -- Per-kind counts (`compute_diff_stats`)
//! - [`DiffHunk`] -- Changed regions with context, for unified output
//! - [`Config`] -- Line cap and rendering options, loadable from TOML
//!
//! Inputs longer than [`MAX_DIFF_LINES`] lines per side are cut at the cap
//! and a [`DiffLine::Truncated`] marker is appended to the result.

pub mod config;
pub mod error;
pub mod hunk;
pub mod line_diff;
pub mod render;
pub mod stats;

pub use config::{Config, DiffConfig, RenderConfig};
pub use error::{DiffError, Result};
pub use hunk::{hunks, DiffHunk};
pub use line_diff::{
    compute_line_diff, compute_line_diff_with, truncation_notice, DiffLine, DiffResult, LineKind,
    MAX_DIFF_LINES,
};
pub use render::{
    inline_changes, render_unified, side_by_side, unified_entries, Cell, Segment, SideBySideRow,
    UnifiedEntry,
};
pub use stats::{compute_diff_stats, DiffStats};
