use tracing::debug;

use crate::error::AppError;

use super::workbook::{Sheet, Workbook};

/// Name fragments that mark the attendance grid, including a common misspelling.
const SHEET_MARKERS: [&str; 2] = ["present", "presant"];

pub fn is_attendance_sheet_name(name: &str) -> bool {
    let name = name.trim().to_lowercase();
    SHEET_MARKERS.iter().any(|marker| name.contains(marker))
}

/// First sheet, in stored order, whose name marks it as the attendance grid.
/// The other sheets are dropped.
pub fn into_attendance_sheet(workbook: Workbook) -> Result<Sheet, AppError> {
    let found = workbook
        .sheets()
        .iter()
        .position(|sheet| is_attendance_sheet_name(sheet.name()));

    let Some(index) = found else {
        let names: Vec<&str> = workbook.sheets().iter().map(Sheet::name).collect();
        debug!(sheets = ?names, "No attendance sheet in workbook");
        return Err(AppError::SheetNotFound);
    };
    Ok(workbook.into_sheets().swap_remove(index))
}
