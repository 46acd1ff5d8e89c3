use std::collections::BTreeMap;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use bugtab_cli::pipeline::ProcessResult;
use bugtab_transform::CategoryRanks;

pub fn print_process_summary(result: &ProcessResult) {
    println!("Output: {}", result.output_path.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows In"),
        header_cell("Kept"),
        header_cell("Filtered"),
        header_cell("Skipped"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut table);
    for column in 0..5 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(result.stats.input_rows),
        Cell::new(result.stats.kept_rows),
        Cell::new(result.stats.filtered_rows),
        Cell::new(result.stats.skipped_rows),
        Cell::new(result.columns),
    ]);
    println!("{table}");
}

pub fn print_headers_table(names: &[String]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Index"), header_cell("Column")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, name) in names.iter().enumerate() {
        table.add_row(vec![Cell::new(index), Cell::new(name)]);
    }
    println!("{table}");
}

pub fn print_encoding_tables(encodings: &BTreeMap<String, CategoryRanks>) {
    for (column, ranks) in encodings {
        let mut by_rank: Vec<(&String, usize)> =
            ranks.iter().map(|(value, rank)| (value, *rank)).collect();
        by_rank.sort_by_key(|(_, rank)| *rank);

        let mut table = Table::new();
        table.set_header(vec![header_cell("Rank"), header_cell("Value")]);
        apply_table_style(&mut table);
        align_column(&mut table, 0, CellAlignment::Right);
        for (value, rank) in by_rank {
            table.add_row(vec![Cell::new(rank), Cell::new(value)]);
        }
        println!("{column}:");
        println!("{table}");
    }
}

fn header_cell(title: &str) -> Cell {
    Cell::new(title).add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}
