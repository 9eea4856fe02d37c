//! The tabular value model shared by every pipeline stage: ordered headers
//! plus rows of typed cells. One `Table` per source file, and one for the
//! combined dataset.

/// A single cell after loading. `Empty` is the missing marker throughout the
/// pipeline; numeric sanitisation turns unusable text into `Empty`, never
/// into an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Render for CSV output. Integral values print without a fraction so
    /// year/month and whole counts survive a write/read cycle unchanged.
    pub fn to_field(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(v) if v.fract() == 0.0 && v.abs() < 9.0e15 => format!("{}", *v as i64),
            Cell::Number(v) => format!("{}", v),
        }
    }

    /// Parse a CSV field back into a cell: empty → missing, numeric text →
    /// number, anything else stays text.
    pub fn from_field(field: &str) -> Cell {
        if field.is_empty() {
            return Cell::Empty;
        }
        match field.parse::<f64>() {
            Ok(v) => Cell::Number(v),
            Err(_) => Cell::Text(field.to_string()),
        }
    }
}

/// One tabular extract. Rows always have exactly one cell per header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Index of the first column named `name`.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Append a column holding the same cell in every row.
    pub fn push_constant_column(&mut self, name: &str, cell: Cell) {
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.push(cell.clone());
        }
    }
}

/// Concatenate tables over the union of their columns, in first-seen order.
/// Columns a table lacks are filled with `Empty` in its rows.
pub fn concat(tables: &[Table]) -> Table {
    let mut headers: Vec<String> = Vec::new();
    for table in tables {
        for header in &table.headers {
            if !headers.contains(header) {
                headers.push(header.clone());
            }
        }
    }

    let mut combined = Table::new(headers);
    for table in tables {
        let source: Vec<Option<usize>> = combined
            .headers
            .iter()
            .map(|h| table.column(h))
            .collect();
        for row in &table.rows {
            combined.rows.push(
                source
                    .iter()
                    .map(|idx| {
                        idx.and_then(|i| row.get(i))
                            .cloned()
                            .unwrap_or(Cell::Empty)
                    })
                    .collect(),
            );
        }
    }
    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn concat_takes_union_of_columns_and_fills_missing() {
        let mut a = Table::new(vec!["PROVINCIA".into(), "GENERAL".into()]);
        a.rows.push(vec![text("MADRID"), Cell::Number(10.0)]);

        let mut b = Table::new(vec!["PROVINCIA".into(), "HOGAR".into()]);
        b.rows.push(vec![text("SEVILLA"), Cell::Number(3.0)]);

        let combined = concat(&[a, b]);
        assert_eq!(combined.headers, vec!["PROVINCIA", "GENERAL", "HOGAR"]);
        assert_eq!(
            combined.rows[0],
            vec![text("MADRID"), Cell::Number(10.0), Cell::Empty]
        );
        assert_eq!(
            combined.rows[1],
            vec![text("SEVILLA"), Cell::Empty, Cell::Number(3.0)]
        );
    }

    #[test]
    fn fields_round_trip() {
        for cell in [
            Cell::Empty,
            Cell::Number(2011.0),
            Cell::Number(12.5),
            text("12040 EJEMPLO"),
        ] {
            assert_eq!(Cell::from_field(&cell.to_field()), cell);
        }
        // whole numbers render without a fraction
        assert_eq!(Cell::Number(1200.0).to_field(), "1200");
    }

    #[test]
    fn push_constant_column_extends_every_row() {
        let mut table = Table::new(vec!["PROVINCIA".into()]);
        table.rows.push(vec![text("MADRID")]);
        table.rows.push(vec![text("SEVILLA")]);
        table.push_constant_column("year", Cell::Number(2011.0));
        assert_eq!(table.headers, vec!["PROVINCIA", "year"]);
        assert!(table
            .rows
            .iter()
            .all(|r| r[1] == Cell::Number(2011.0)));
    }
}
