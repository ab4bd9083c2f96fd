//! Tables printed by the commands.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use gamedata_model::{ParsedNode, Value};

/// One top-level field of a decoded tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSummary {
    pub name: String,
    pub kind: &'static str,
    /// Scalar value or element count.
    pub value: String,
    /// Absent elements of a gated structure array.
    pub absent: Option<usize>,
    pub exported: bool,
}

/// Summaries of the fields of `node`, in declaration order.
pub fn summarize(node: &ParsedNode) -> Vec<FieldSummary> {
    node.fields
        .iter()
        .map(|field| {
            let (value, absent) = describe(&field.value);
            FieldSummary {
                name: field.name.clone(),
                kind: field.value.kind_name(),
                value,
                absent,
                exported: field.exported,
            }
        })
        .collect()
}

fn describe(value: &Value) -> (String, Option<usize>) {
    match value {
        Value::Int(v) => (v.to_string(), None),
        Value::UInt(v) => (v.to_string(), None),
        Value::Float(v) => (v.to_string(), None),
        Value::Text(v) => (format!("{v:?}"), None),
        Value::IntArray(v) | Value::IdArray(v) => (format!("{} entries", v.len()), None),
        Value::FloatArray(v) => (format!("{} entries", v.len()), None),
        Value::Nodes(nodes) => {
            let absent = nodes.iter().filter(|node| node.is_none()).count();
            (format!("{} elements", nodes.len()), Some(absent))
        }
    }
}

pub fn print_summary(node: &ParsedNode) {
    println!("Structure: {}", node.structure);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Value"),
        header_cell("Absent"),
        header_cell("Exported"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);

    for summary in summarize(node) {
        let name_cell = if summary.exported {
            Cell::new(&summary.name)
        } else {
            dim_cell(&summary.name)
        };
        table.add_row(vec![
            name_cell,
            Cell::new(summary.kind),
            Cell::new(&summary.value),
            absent_cell(summary.absent),
            exported_cell(summary.exported),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn absent_cell(count: Option<usize>) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(Color::Yellow),
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn exported_cell(exported: bool) -> Cell {
    if exported {
        Cell::new("✓").fg(Color::Green)
    } else {
        dim_cell("-")
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
