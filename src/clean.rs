//! Row and cell sanitisation applied to each normalized extract.

use crate::schema;
use crate::table::{Cell, Table};

/// Marker the publisher uses for counts below the disclosure threshold.
const CENSORED: &str = "<5";
/// Leading text of the placeholder row holding counts not attributable to a
/// specific municipality.
const UNCLASSIFIED: &str = "SIN DISTRIBUCIÓN";

/// Drop footnote/legend rows (province starts with `(`), unclassified
/// distribution placeholders, and fully blank separator rows. The predicates
/// are independent; order does not matter.
pub fn drop_invalid_rows(table: &mut Table) {
    let province = table.column(schema::PROVINCE);
    let municipality = table.column(schema::MUNICIPALITY);

    table.rows.retain(|row| {
        if row.iter().all(Cell::is_empty) {
            return false;
        }
        if let Some(i) = province {
            if matches!(row.get(i), Some(Cell::Text(s)) if s.starts_with('(')) {
                return false;
            }
        }
        if let Some(i) = municipality {
            if matches!(row.get(i), Some(Cell::Text(s)) if s.starts_with(UNCLASSIFIED)) {
                return false;
            }
        }
        true
    });
}

/// Coerce every regime-count column present in the table to numbers. The
/// censored marker becomes missing, as does any text that fails numeric
/// coercion; suppressed cells are expected and never abort a combine.
pub fn sanitize_counts(table: &mut Table) {
    let columns: Vec<usize> = schema::COUNT_COLUMNS
        .iter()
        .filter_map(|name| table.column(name))
        .collect();

    for row in &mut table.rows {
        for &i in &columns {
            if let Some(cell) = row.get_mut(i) {
                *cell = coerce(std::mem::replace(cell, Cell::Empty));
            }
        }
    }
}

fn coerce(cell: Cell) -> Cell {
    match cell {
        Cell::Number(v) => Cell::Number(v),
        Cell::Empty => Cell::Empty,
        Cell::Text(s) => {
            let trimmed = s.trim();
            if trimmed == CENSORED {
                return Cell::Empty;
            }
            trimmed.parse::<f64>().map(Cell::Number).unwrap_or(Cell::Empty)
        }
    }
}
