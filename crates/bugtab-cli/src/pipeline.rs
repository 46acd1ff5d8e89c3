//! Reusable pipeline stages behind the CLI commands.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use bugtab_ingest::{ExportOptions, read_export};
use bugtab_model::Table;
use bugtab_transform::{ReduceStats, reduce_resolved_issues};

/// Outcome of a full process run.
#[derive(Debug)]
pub struct ProcessResult {
    /// Where the processed table was written.
    pub output_path: PathBuf,
    /// Columns in the processed table.
    pub columns: usize,
    /// Row accounting from the reduction.
    pub stats: ReduceStats,
}

/// Default output path: `<stem>-processed.csv` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("export");
    input.with_file_name(format!("{stem}-processed.csv"))
}

/// Loads an export into a table, with path context on failure.
pub fn load_table(input: &Path, options: &ExportOptions) -> Result<Table> {
    read_export(input, options).with_context(|| format!("read export {}", input.display()))
}

/// Full pipeline: read the export, reduce it to resolved issues, write the
/// processed table.
pub fn process_export(
    input: &Path,
    output: Option<&Path>,
    options: &ExportOptions,
) -> Result<ProcessResult> {
    let span = info_span!("process", export = %input.display());
    let _guard = span.enter();

    let load_start = Instant::now();
    let mut table = load_table(input, options)?;
    info!(
        rows = table.len(),
        duration_ms = load_start.elapsed().as_millis(),
        "export loaded"
    );

    let stats = reduce_resolved_issues(&mut table).context("reduce to resolved issues")?;

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input));
    table
        .save(&output_path)
        .with_context(|| format!("write processed table {}", output_path.display()))?;
    info!(
        rows = stats.kept_rows,
        output = %output_path.display(),
        "processed table written"
    );

    Ok(ProcessResult {
        output_path,
        columns: table.header_names().map(<[String]>::len).unwrap_or(0),
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_sits_next_to_the_input() {
        let output = default_output_path(Path::new("/data/tracker.csv"));
        assert_eq!(output, PathBuf::from("/data/tracker-processed.csv"));
    }
}
