use crate::model::attendance::DailyEntry;

use super::classifier::{extract_ot, normalize_code};
use super::workbook::Sheet;
use super::{day_columns, day_number};

/// One entry per scanned day column, in column order, for calendar display.
///
/// Uses the same window and OT extraction as [`super::summary::summarize`],
/// so the entries' `ot` values add up to the unoverridden OT total.
pub fn build_daily(sheet: &Sheet, row: u32) -> Vec<DailyEntry> {
    day_columns(sheet)
        .map(|col| {
            let code = normalize_code(&sheet.text(row, col));
            DailyEntry {
                day: day_number(col),
                ot: extract_ot(&code),
                code,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::summary::summarize;
    use crate::test_support::sheet_from_rows;

    #[test]
    fn entries_follow_day_columns() {
        let sheet = sheet_from_rows(
            "PRESENT",
            &[&["", "007", "John Doe", " p ", "", "OT 2.5", "w/o"]],
        );
        let days = build_daily(&sheet, 0);

        let view: Vec<_> = days
            .iter()
            .map(|d| (d.day, d.code.as_str(), d.ot))
            .collect();
        assert_eq!(
            view,
            vec![(1, "P", 0.0), (2, "", 0.0), (3, "OT 2.5", 2.5), (4, "W/O", 0.0)]
        );
    }

    #[test]
    fn ot_matches_summary_without_override() {
        let sheet = sheet_from_rows(
            "PRESENT",
            &[&["", "007", "John Doe", "P/OT1", "OT2.5", "A", "OT"]],
        );
        let daily_ot: f64 = build_daily(&sheet, 0).iter().map(|d| d.ot).sum();
        assert_eq!(daily_ot, summarize(&sheet, 0).ot_hours);
        assert_eq!(daily_ot, 3.5);
    }

    #[test]
    fn narrow_sheet_has_no_days() {
        let sheet = sheet_from_rows("PRESENT", &[&["", "007", "John Doe"]]);
        assert!(build_daily(&sheet, 0).is_empty());
    }
}
