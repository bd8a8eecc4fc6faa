//! Attendance extraction from monthly spreadsheet exports.
//!
//! Every function here is a pure scan over an already loaded [`Sheet`];
//! loading and locating happen once per request in [`open_attendance_sheet`].

pub mod classifier;
pub mod daily;
pub mod details;
pub mod directory;
pub mod locator;
pub mod resolver;
pub mod summary;
pub mod text;
pub mod workbook;

use std::ops::RangeInclusive;
use std::path::Path;

use tracing::debug;

use crate::error::AppError;
pub use workbook::{Sheet, Workbook};

// Identity columns
pub const NUMBER_COL: u32 = 1;
pub const NAME_COL: u32 = 2;

// Day grid: column 3 is day 1, at most 31 days
pub const FIRST_DAY_COL: u32 = 3;
pub const LAST_DAY_COL: u32 = 33;

// Summary block to the right of the day grid
pub const MINUS_COL: u32 = 36;
pub const WEEKOFF_TOTAL_COL: u32 = 37;
pub const ATD_COL: u32 = 38;
pub const KITCHEN_COL: u32 = 39;
pub const OT_TOTAL_COL: u32 = 41;

// Contact block
pub const MOBILE1_COL: u32 = 42;
pub const MOBILE2_COL: u32 = 43;
pub const ADDRESS_COL: u32 = 44;

/// Day columns actually scanned for `sheet`: from [`FIRST_DAY_COL`] up to
/// the used range's last column, never past [`LAST_DAY_COL`].
pub fn day_columns(sheet: &Sheet) -> RangeInclusive<u32> {
    let last = sheet
        .used_range()
        .map(|used| used.max_col.min(LAST_DAY_COL))
        .unwrap_or(0);
    // An empty range when the sheet stops before the first day column.
    FIRST_DAY_COL..=last
}

/// 1-based day of month for a day column.
pub fn day_number(col: u32) -> u32 {
    col - (FIRST_DAY_COL - 1)
}

/// Reads the stored workbook and keeps only its attendance sheet.
pub fn open_attendance_sheet(path: &Path) -> Result<Sheet, AppError> {
    let workbook = Workbook::open(path)?;
    let sheet = locator::into_attendance_sheet(workbook)?;
    debug!(sheet = sheet.name(), path = %path.display(), "Attendance sheet located");
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::workbook::CellValue;
    use crate::test_support::sheet_from_rows;

    #[test]
    fn day_window_is_clipped_to_used_range() {
        let sheet = sheet_from_rows("PRESENT", &[&["", "1", "A", "P", "P", "P"]]);
        assert_eq!(day_columns(&sheet), 3..=5);
    }

    #[test]
    fn day_window_never_exceeds_31_days() {
        let mut sheet = Sheet::new("PRESENT");
        sheet.insert(0, 50, CellValue::Text("far".into()));
        let window = day_columns(&sheet);
        assert_eq!(window, 3..=33);
        assert_eq!(window.count(), 31);
    }

    #[test]
    fn day_window_is_empty_for_narrow_sheets() {
        let sheet = sheet_from_rows("PRESENT", &[&["", "1", "A"]]);
        assert_eq!(day_columns(&sheet).count(), 0);
        assert_eq!(day_columns(&Sheet::new("empty")).count(), 0);
    }

    #[test]
    fn day_numbers_start_at_one() {
        assert_eq!(day_number(FIRST_DAY_COL), 1);
        assert_eq!(day_number(LAST_DAY_COL), 31);
    }
}
