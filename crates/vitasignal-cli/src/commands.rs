use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use vitasignal_diff::{
    compute_diff_stats, compute_line_diff_with, hunks, inline_changes, side_by_side,
    unified_entries, Cell, Config, DiffLine, DiffStats, LineKind, Segment, SideBySideRow,
    UnifiedEntry,
};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if cli.no_color {
        config.render.color = false;
    }
    if !config.render.color {
        colored::control::set_override(false);
    }

    let output = match cli.command {
        Command::Diff(args) => cmd_diff(args, config, cli.format)?,
        Command::Stats(args) => cmd_stats(args, config, cli.format)?,
        Command::Hunks(args) => cmd_hunks(args, config, cli.format)?,
    };
    print!("{output}");
    Ok(())
}

#[derive(Serialize)]
struct DiffReport<'a> {
    lines: &'a [DiffLine],
    stats: DiffStats,
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read input");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read both inputs and diff them under `config`, after applying the
/// command-line line cap.
fn load_diff(input: &InputArgs, config: &mut Config) -> anyhow::Result<Vec<DiffLine>> {
    if let Some(max_lines) = input.max_lines {
        config.diff.max_lines = max_lines;
    }
    config.validate()?;

    let old = read_input(&input.old)?;
    let new = read_input(&input.new)?;
    let lines = compute_line_diff_with(&old, &new, &config.diff);

    let stats = compute_diff_stats(&lines);
    tracing::info!(
        old = %input.old.display(),
        new = %input.new.display(),
        added = stats.added,
        removed = stats.removed,
        unchanged = stats.unchanged,
        "compared documents"
    );
    Ok(lines)
}

pub fn cmd_diff(args: DiffArgs, mut config: Config, format: OutputFormat) -> anyhow::Result<String> {
    if args.context.is_some() {
        config.render.context = args.context;
    }
    if args.side_by_side {
        config.render.side_by_side = true;
    }
    if args.no_line_numbers {
        config.render.line_numbers = false;
    }

    let lines = load_diff(&args.input, &mut config)?;

    let output = match format {
        OutputFormat::Json => {
            let report = DiffReport {
                lines: &lines,
                stats: compute_diff_stats(&lines),
            };
            serde_json::to_string_pretty(&report)? + "\n"
        }
        OutputFormat::Text if config.render.side_by_side => render_side_by_side(&lines, args.width),
        OutputFormat::Text => render_unified_colored(&lines, &config),
    };

    if output.is_empty() {
        return Ok("No changes.\n".into());
    }
    Ok(output)
}

pub fn cmd_stats(args: StatsArgs, mut config: Config, format: OutputFormat) -> anyhow::Result<String> {
    let lines = load_diff(&args.input, &mut config)?;
    let stats = compute_diff_stats(&lines);

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&stats)? + "\n"),
        OutputFormat::Text => Ok(format!(
            "{} {} ={} ({} entries)\n",
            format!("+{}", stats.added).green(),
            format!("-{}", stats.removed).red(),
            stats.unchanged,
            stats.total,
        )),
    }
}

pub fn cmd_hunks(args: HunksArgs, mut config: Config, format: OutputFormat) -> anyhow::Result<String> {
    let lines = load_diff(&args.input, &mut config)?;
    let regions = hunks(&lines, args.context);

    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(&regions)? + "\n");
    }
    if regions.is_empty() {
        return Ok("No changes.\n".into());
    }

    let mut out = String::new();
    for hunk in &regions {
        let added = hunk.lines.iter().filter(|l| l.kind() == LineKind::Added).count();
        let removed = hunk.lines.iter().filter(|l| l.kind() == LineKind::Removed).count();
        out.push_str(&format!(
            "{} {} {}\n",
            hunk.header().cyan(),
            format!("+{added}").green(),
            format!("-{removed}").red(),
        ));
    }
    Ok(out)
}

fn paint(text: &str, kind: LineKind) -> String {
    match kind {
        LineKind::Added => text.green().to_string(),
        LineKind::Removed => text.red().to_string(),
        LineKind::Unchanged => text.to_string(),
    }
}

fn render_unified_colored(lines: &[DiffLine], config: &Config) -> String {
    let mut out = String::new();
    for entry in unified_entries(lines, &config.render) {
        let text = match &entry {
            UnifiedEntry::Header(header) => header.cyan().to_string(),
            UnifiedEntry::Line { kind, text } => paint(text, *kind),
            UnifiedEntry::Note(note) => note.dimmed().to_string(),
        };
        out.push_str(&text);
        out.push('\n');
    }
    out
}

fn marker(cell: Option<&Cell>) -> char {
    match cell.map(|c| c.kind) {
        Some(LineKind::Added) => '+',
        Some(LineKind::Removed) => '-',
        _ => ' ',
    }
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

/// Painted cell text and its visible width.
fn cell_text(cell: Option<&Cell>, width: usize) -> (String, usize) {
    match cell {
        Some(cell) => {
            let text = clip(&cell.content, width);
            let visible = text.chars().count();
            (paint(&text, cell.kind), visible)
        }
        None => (String::new(), 0),
    }
}

fn segments_text(segments: &[Segment], kind: LineKind) -> (String, usize) {
    let mut out = String::new();
    let mut visible = 0;
    for segment in segments {
        visible += segment.text.chars().count();
        let painted = match (segment.emphasized, kind) {
            (true, LineKind::Added) => segment.text.green().bold().underline().to_string(),
            (true, LineKind::Removed) => segment.text.red().bold().underline().to_string(),
            _ => paint(&segment.text, kind),
        };
        out.push_str(&painted);
    }
    (out, visible)
}

fn fits(cell: &Cell, width: usize) -> bool {
    cell.content.chars().count() <= width
}

fn render_side_by_side(lines: &[DiffLine], width: usize) -> String {
    let num_width = lines
        .iter()
        .filter_map(DiffLine::line_number)
        .max()
        .map_or(1, |n| n.to_string().len());
    let number = |cell: Option<&Cell>| match cell {
        Some(c) => format!("{:>num_width$}", c.line_number),
        None => " ".repeat(num_width),
    };

    let mut out = String::new();
    for row in side_by_side(lines) {
        match row {
            SideBySideRow::Note(note) => {
                out.push_str(&note.dimmed().to_string());
                out.push('\n');
            }
            SideBySideRow::Line { old, new } => {
                let (old, new) = (old.as_ref(), new.as_ref());
                let ((left, left_width), (right, _)) = match (old, new) {
                    (Some(o), Some(n))
                        if o.kind == LineKind::Removed && fits(o, width) && fits(n, width) =>
                    {
                        let (old_segments, new_segments) = inline_changes(&o.content, &n.content);
                        (
                            segments_text(&old_segments, o.kind),
                            segments_text(&new_segments, n.kind),
                        )
                    }
                    _ => (cell_text(old, width), cell_text(new, width)),
                };
                let padding = " ".repeat(width.saturating_sub(left_width));
                out.push_str(&format!(
                    "{} {}{}{} │ {} {}{}\n",
                    number(old),
                    marker(old),
                    left,
                    padding,
                    number(new),
                    marker(new),
                    right,
                ));
            }
        }
    }
    out
}
