use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use tracing::debug;

use crate::error::AppError;

/// Literal value of one grid position. Formulas are never evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// String view used by every downstream comparison.
    ///
    /// Integral numbers lose their fractional part so that a numeric
    /// employee number `7` reads back as `"7"`, not `"7.0"`.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Empty => String::new(),
        }
    }

    /// Finite decimal value, if the cell holds one (numbers stored as text included).
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            CellValue::Empty => None,
        }
        .filter(|n| n.is_finite())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
                CellValue::Text(s.clone())
            }
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::Error(_) | Data::Empty => CellValue::Empty,
        }
    }
}

/// Inclusive bounds of the non-empty cells of a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsedRange {
    pub min_row: u32,
    pub max_row: u32,
    pub min_col: u32,
    pub max_col: u32,
}

impl UsedRange {
    fn single(row: u32, col: u32) -> Self {
        Self {
            min_row: row,
            max_row: row,
            min_col: col,
            max_col: col,
        }
    }

    fn include(&mut self, row: u32, col: u32) {
        self.min_row = self.min_row.min(row);
        self.max_row = self.max_row.max(row);
        self.min_col = self.min_col.min(col);
        self.max_col = self.max_col.max(col);
    }
}

/// One named grid, stored sparsely by zero-based `(row, col)`.
#[derive(Debug, Clone)]
pub struct Sheet {
    name: String,
    cells: HashMap<(u32, u32), CellValue>,
    used: Option<UsedRange>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: HashMap::new(),
            used: None,
        }
    }

    /// Stores a value; empty values are dropped and do not widen the used range.
    pub fn insert(&mut self, row: u32, col: u32, value: CellValue) {
        if value.is_empty() {
            return;
        }
        match self.used.as_mut() {
            Some(used) => used.include(row, col),
            None => self.used = Some(UsedRange::single(row, col)),
        }
        self.cells.insert((row, col), value);
    }

    fn from_range(name: String, range: &Range<Data>) -> Self {
        let mut sheet = Sheet::new(name);
        let Some((start_row, start_col)) = range.start() else {
            return sheet;
        };
        for (row, col, data) in range.used_cells() {
            sheet.insert(
                start_row + row as u32,
                start_col + col as u32,
                CellValue::from(data),
            );
        }
        sheet
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn used_range(&self) -> Option<UsedRange> {
        self.used
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.cells.get(&(row, col))
    }

    /// Text of a cell, `""` when the position is empty.
    pub fn text(&self, row: u32, col: u32) -> String {
        self.cell(row, col).map(CellValue::as_text).unwrap_or_default()
    }

    pub fn number(&self, row: u32, col: u32) -> Option<f64> {
        self.cell(row, col).and_then(CellValue::as_number)
    }

    /// Row indices of the used range, top to bottom.
    pub fn rows(&self) -> std::ops::Range<u32> {
        match self.used {
            Some(used) => used.min_row..used.max_row + 1,
            None => 0..0,
        }
    }
}

/// A parsed spreadsheet: its sheets in stored order.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    #[cfg(test)]
    pub fn from_sheets(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Parses xlsx, xlsm, xlsb, xls or ods content.
    pub fn load(bytes: Vec<u8>) -> Result<Self, AppError> {
        let mut reader = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| AppError::UnreadableWorkbook(e.to_string()))?;

        let names = reader.sheet_names();
        let mut sheets = Vec::with_capacity(names.len());
        for name in names {
            let range = reader
                .worksheet_range(&name)
                .map_err(|e| AppError::UnreadableWorkbook(format!("sheet '{name}': {e}")))?;
            sheets.push(Sheet::from_range(name, &range));
        }

        debug!(sheets = sheets.len(), "Workbook loaded");
        Ok(Self { sheets })
    }

    pub fn open(path: &Path) -> Result<Self, AppError> {
        let bytes = std::fs::read(path)
            .map_err(|e| AppError::UnreadableWorkbook(format!("{}: {e}", path.display())))?;
        Self::load(bytes)
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn into_sheets(self) -> Vec<Sheet> {
        self.sheets
    }
}
