use std::fmt;

use eframe::egui::Color32;

use crate::error::DataError;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a loaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, the way a CSV reader with numeric inference
/// would see it.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Numeric view of the cell, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Textual view of the cell. Numbers are not stringified.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – one loaded CSV file
// ---------------------------------------------------------------------------

/// A named table with ordered headers and rows of cells.
#[derive(Debug, Clone)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(name: &str, columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Table {
            name: name.to_string(),
            columns,
            rows,
        }
    }

    /// Position of a required column.
    pub fn column_index(&self, column: &str) -> Result<usize, DataError> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| DataError::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Text of a cell. Missing cells and non-text cells yield `None`.
    pub fn text(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_text()
    }

    /// Numeric value of a required cell.
    pub fn number(&self, row: usize, col: usize) -> Result<f64, DataError> {
        let cell = self.rows.get(row).and_then(|r| r.get(col));
        cell.and_then(CellValue::as_f64)
            .ok_or_else(|| DataError::NotNumeric {
                table: self.name.clone(),
                row,
                column: self.columns.get(col).cloned().unwrap_or_default(),
                value: cell.unwrap_or(&CellValue::Null).to_string(),
            })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// The five source tables, loaded once at startup.
#[derive(Debug, Clone)]
pub struct RawTables {
    pub robbery: Table,
    pub population: Table,
    pub salary: Table,
    pub age_brackets: Table,
    pub property: Table,
}

// ---------------------------------------------------------------------------
// Chart – output of a preparation function
// ---------------------------------------------------------------------------

/// The value(s) a neighborhood contributes to a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    Single(f64),
    BySex { male: f64, female: f64 },
}

impl Measure {
    /// Value used for ordering and axis scaling.
    pub fn total(&self) -> f64 {
        match *self {
            Measure::Single(v) => v,
            Measure::BySex { male, female } => male + female,
        }
    }

    /// Largest single bar this measure draws.
    pub fn peak(&self) -> f64 {
        match *self {
            Measure::Single(v) => v,
            Measure::BySex { male, female } => male.max(female),
        }
    }
}

/// One neighborhood's row in a prepared chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    pub neighborhood: String,
    pub measure: Measure,
    pub color: Color32,
}

/// Rows in display order: slot 0 first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chart {
    pub rows: Vec<ChartRow>,
}

impl Chart {
    /// Largest bar across all rows, 0 for an empty chart.
    pub fn peak(&self) -> f64 {
        self.rows
            .iter()
            .map(|r| r.measure.peak())
            .fold(0.0, f64::max)
    }

    /// `(neighborhood, total)` pairs, handy for inspection and tests.
    pub fn totals(&self) -> Vec<(&str, f64)> {
        self.rows
            .iter()
            .map(|r| (r.neighborhood.as_str(), r.measure.total()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
