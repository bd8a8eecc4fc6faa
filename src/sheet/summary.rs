use crate::model::attendance::AttendanceSummary;

use super::classifier::classify;
use super::workbook::Sheet;
use super::{ATD_COL, KITCHEN_COL, MINUS_COL, OT_TOTAL_COL, WEEKOFF_TOTAL_COL, day_columns};

/// Monthly totals for one employee row.
///
/// Day cells are classified and summed first. A parseable number in the
/// weekoff or OT total column then replaces the corresponding sum, since
/// those columns carry the sheet author's adjusted figures.
pub fn summarize(sheet: &Sheet, row: u32) -> AttendanceSummary {
    let mut summary = AttendanceSummary::default();

    for col in day_columns(sheet) {
        let day = classify(&sheet.text(row, col));
        summary.present += day.present;
        summary.absent += day.absent;
        summary.weekoff += f64::from(day.weekoff);
        summary.ot_hours += day.ot;
    }

    if let Some(weekoff) = sheet.number(row, WEEKOFF_TOTAL_COL) {
        summary.weekoff = weekoff;
    }
    if let Some(ot_hours) = sheet.number(row, OT_TOTAL_COL) {
        summary.ot_hours = ot_hours;
    }

    summary.atd = sheet.number(row, ATD_COL);
    summary.minus = sheet.number(row, MINUS_COL);
    summary.kitchen = sheet.number(row, KITCHEN_COL);

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::workbook::CellValue;
    use crate::test_support::sheet_from_rows;

    #[test]
    fn counts_day_codes() {
        let sheet = sheet_from_rows(
            "PRESENT",
            &[&["", "007", "John Doe", "P", "A", "WO", "P/OT2", "OT1.5", "CL", ""]],
        );
        let summary = summarize(&sheet, 0);
        assert_eq!(summary.present, 2);
        assert_eq!(summary.absent, 1);
        assert_eq!(summary.weekoff, 1.0);
        assert_eq!(summary.ot_hours, 3.5);
        assert_eq!(summary.atd, None);
        assert_eq!(summary.minus, None);
        assert_eq!(summary.kitchen, None);
    }

    #[test]
    fn override_columns_replace_day_totals() {
        let mut sheet = sheet_from_rows("PRESENT", &[&["", "007", "John Doe", "WO", "WO", "OT2"]]);
        sheet.insert(0, WEEKOFF_TOTAL_COL, CellValue::Text("3".into()));
        sheet.insert(0, OT_TOTAL_COL, CellValue::Number(7.5));

        let summary = summarize(&sheet, 0);
        assert_eq!(summary.weekoff, 3.0);
        assert_eq!(summary.ot_hours, 7.5);
    }

    #[test]
    fn unparseable_override_keeps_day_totals() {
        let mut sheet = sheet_from_rows("PRESENT", &[&["", "007", "John Doe", "WO", "OT2"]]);
        sheet.insert(0, WEEKOFF_TOTAL_COL, CellValue::Text("n/a".into()));
        sheet.insert(0, OT_TOTAL_COL, CellValue::Text("-".into()));

        let summary = summarize(&sheet, 0);
        assert_eq!(summary.weekoff, 1.0);
        assert_eq!(summary.ot_hours, 2.0);
    }

    #[test]
    fn zero_override_still_wins() {
        let mut sheet = sheet_from_rows("PRESENT", &[&["", "007", "John Doe", "WO", "WO"]]);
        sheet.insert(0, WEEKOFF_TOTAL_COL, CellValue::Number(0.0));
        assert_eq!(summarize(&sheet, 0).weekoff, 0.0);
    }

    #[test]
    fn optional_fields_read_from_summary_block() {
        let mut sheet = sheet_from_rows("PRESENT", &[&["", "007", "John Doe", "P"]]);
        sheet.insert(0, ATD_COL, CellValue::Number(27.0));
        sheet.insert(0, MINUS_COL, CellValue::Text("1.5".into()));
        sheet.insert(0, KITCHEN_COL, CellValue::Text("yes".into()));

        let summary = summarize(&sheet, 0);
        assert_eq!(summary.atd, Some(27.0));
        assert_eq!(summary.minus, Some(1.5));
        assert_eq!(summary.kitchen, None);
    }

    #[test]
    fn day_scan_stops_at_day_31() {
        let mut sheet = sheet_from_rows("PRESENT", &[&["", "007", "John Doe"]]);
        for col in 3..=35 {
            sheet.insert(0, col, CellValue::Text("P".into()));
        }
        let summary = summarize(&sheet, 0);
        assert_eq!(summary.present, 31);
        assert!(summary.present + summary.absent <= 31);
    }

    #[test]
    fn other_rows_do_not_leak_in() {
        let sheet = sheet_from_rows(
            "PRESENT",
            &[&["", "1", "A", "P", "P"], &["", "2", "B", "A", "A"]],
        );
        let summary = summarize(&sheet, 1);
        assert_eq!((summary.present, summary.absent), (0, 2));
    }
}
