//! Cell grid model
//!
//! Worksheets reach the core as post-calculation values: every cell is text,
//! a number, or empty. Grids are read-only input for a single parse pass.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value of a single worksheet cell.
///
/// Serialized untagged so an exported sheet reads naturally as JSON:
/// `null`, a number, or a string.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Empty / unset cell.
    #[default]
    Empty,
    /// IEEE-754 double precision number.
    Number(f64),
    /// Plain text.
    Text(String),
}

static EMPTY: CellValue = CellValue::Empty;

impl CellValue {
    /// True for [`CellValue::Empty`] and for text that is blank after trimming.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(_) => false,
            CellValue::Text(s) => s.trim().is_empty(),
        }
    }

    /// Numeric content, if this is a number cell.
    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text content, if this is a text cell.
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Display text with surrounding whitespace removed.
    ///
    /// Labels are compared on this form, whatever the cell type.
    #[must_use]
    pub fn label_text(&self) -> String {
        self.to_string().trim().to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

/// One worksheet as an ordered sequence of rows.
///
/// Rows may be ragged; cells past the end of a row read as empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetGrid {
    rows: Vec<Vec<CellValue>>,
}

impl SheetGrid {
    /// Create grid from rows
    #[inline]
    #[must_use]
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// All rows, top to bottom
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of rows
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the grid has no rows
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `(row, col)`, empty when out of range
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .map_or(&EMPTY, |r| cell_at(r, col))
    }

    /// Append a row
    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }
}

impl From<Vec<Vec<CellValue>>> for SheetGrid {
    fn from(rows: Vec<Vec<CellValue>>) -> Self {
        Self::new(rows)
    }
}

/// Cell `col` of `row`, empty when the row is shorter.
#[inline]
#[must_use]
pub fn cell_at(row: &[CellValue], col: usize) -> &CellValue {
    row.get(col).unwrap_or(&EMPTY)
}

/// Workbook as sheet name → grid, in workbook order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Workbook {
    sheets: IndexMap<String, SheetGrid>,
}

impl Workbook {
    /// Create empty workbook
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a sheet, builder style
    #[must_use]
    pub fn with_sheet(mut self, name: impl Into<String>, grid: SheetGrid) -> Self {
        self.insert_sheet(name, grid);
        self
    }

    /// Add or replace a sheet
    pub fn insert_sheet(&mut self, name: impl Into<String>, grid: SheetGrid) {
        self.sheets.insert(name.into(), grid);
    }

    /// Sheet by exact name
    #[inline]
    #[must_use]
    pub fn sheet(&self, name: &str) -> Option<&SheetGrid> {
        self.sheets.get(name)
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }
}
