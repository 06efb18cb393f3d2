use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table, presets::UTF8_FULL,
};

use crate::{
    byte_size::{ByteSize, ByteUnit},
    report::DirReport,
};

pub fn create_summary_table(reports: &[DirReport], binary: bool) -> Table {
    let mut table = Table::new();

    let header = vec![Cell::new("Directory"), Cell::new("Size"), Cell::new("Bytes")];
    let mut rows: Vec<Vec<Cell>> = reports
        .iter()
        .map(|report| {
            vec![
                Cell::new(&report.display_name),
                Cell::new(format!("{} {}", report.shown_value(), report.unit))
                    .fg(Color::Yellow)
                    .add_attribute(Attribute::Bold),
                Cell::new(report.size.raw_bytes()).set_alignment(CellAlignment::Right),
            ]
        })
        .collect();

    let total: u64 = reports.iter().map(|r| r.size.raw_bytes()).sum();
    rows.push(vec![
        Cell::new("total").add_attribute(Attribute::Bold),
        Cell::new(ByteSize::new(total, ByteUnit::B, binary))
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        Cell::new(total).set_alignment(CellAlignment::Right),
    ]);

    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100)
        .set_header(header)
        .add_rows(rows);

    table
}
