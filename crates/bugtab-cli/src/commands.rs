use anyhow::{Context, Result, bail};

use bugtab_cli::pipeline::{ProcessResult, load_table, process_export};
use bugtab_transform::encode_columns;

use crate::cli::{EncodeArgs, ExportArgs, ProcessArgs};
use crate::summary::{print_encoding_tables, print_headers_table};

pub fn run_process(args: &ProcessArgs) -> Result<ProcessResult> {
    let options = args.export.export_options();
    process_export(&args.export.export_file, args.output.as_deref(), &options)
}

pub fn run_headers(args: &ExportArgs) -> Result<()> {
    let table = load_table(&args.export_file, &args.export_options())?;
    let Some(names) = table.header_names() else {
        bail!("export was read without a header; nothing to list");
    };
    print_headers_table(names);
    Ok(())
}

pub fn run_encode(args: &EncodeArgs) -> Result<()> {
    let table = load_table(&args.export.export_file, &args.export.export_options())?;
    let columns: Vec<&str> = args.columns.iter().map(String::as_str).collect();
    let encodings = encode_columns(&table, &columns).context("encode categorical columns")?;
    print_encoding_tables(&encodings);
    Ok(())
}
