//! Terminal tables for projections and tile listings.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use bingo_index::{Column, DatasetInfo, Efficiency, Projection};
use bingo_model::Tile;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn is_numeric(column: Column) -> bool {
    matches!(
        column,
        Column::DropRate | Column::Effort | Column::Efficiency
    )
}

fn efficiency_cell(efficiency: Efficiency) -> Cell {
    match efficiency {
        Efficiency::Rate(_) => Cell::new(efficiency).add_attribute(Attribute::Bold),
        Efficiency::ZeroEffort => Cell::new(efficiency).fg(Color::Yellow),
        Efficiency::MissingRate => dim_cell(efficiency),
    }
}

/// Render a projection with its own column order.
pub fn projection_table(projection: &Projection) -> Table {
    let mut table = Table::new();
    table.set_header(
        projection
            .columns
            .iter()
            .map(|column| header_cell(column.label()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for row in &projection.rows {
        table.add_row(
            projection
                .columns
                .iter()
                .map(|&column| match column {
                    Column::Efficiency => efficiency_cell(row.efficiency),
                    Column::Type if row.type_display == "-" => dim_cell("-"),
                    Column::DropRate if row.drop_rate.is_none() => dim_cell("-"),
                    _ => Cell::new(Projection::cell(row, column)),
                })
                .collect::<Vec<_>>(),
        );
    }
    for (index, &column) in projection.columns.iter().enumerate() {
        if is_numeric(column) {
            align_column(&mut table, index, CellAlignment::Right);
        }
    }
    table
}

pub fn dataset_table(datasets: &[DatasetInfo], active: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Key"), header_cell("Dataset")]);
    apply_table_style(&mut table);
    for info in datasets {
        let key = if info.key == active {
            Cell::new(&info.key)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(&info.key)
        };
        table.add_row(vec![key, Cell::new(&info.label)]);
    }
    table
}

/// One listed tile: its visible index, absolute index, and record.
pub struct TileLine<'a> {
    pub visible: usize,
    pub absolute: usize,
    pub tile: &'a Tile,
}

pub fn tile_table<'a>(lines: impl IntoIterator<Item = TileLine<'a>>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Pos"),
        header_cell("Id"),
        header_cell("Name"),
        header_cell("Type"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    for line in lines {
        let summary = line.tile.summary();
        table.add_row(vec![
            Cell::new(line.visible),
            dim_cell(line.absolute),
            Cell::new(line.tile.id_text()),
            Cell::new(line.tile.name()).add_attribute(Attribute::Bold),
            Cell::new(line.tile.kind()),
            if summary.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(summary)
            },
        ]);
    }
    table
}
