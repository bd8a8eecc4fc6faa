use std::collections::HashSet;

use crate::model::employee::Employee;

use super::text::{identity_key, is_marker};
use super::workbook::Sheet;
use super::{NAME_COL, NUMBER_COL};

/// Identity cells of `row`, or `None` when the row holds no employee.
///
/// Header tokens and `"."` in either cell skip the row; so does a row with
/// both cells blank. One blank cell is fine (name-only or number-only rows).
pub fn employee_at(sheet: &Sheet, row: u32) -> Option<Employee> {
    let number = sheet.text(row, NUMBER_COL).trim().to_string();
    let name = sheet.text(row, NAME_COL).trim().to_string();

    if is_marker(&number) || is_marker(&name) {
        return None;
    }
    if number.is_empty() && name.is_empty() {
        return None;
    }
    Some(Employee { number, name })
}

/// Deduplication key: the number when present, otherwise the name.
pub fn employee_key(employee: &Employee) -> String {
    if employee.number.is_empty() {
        identity_key(&employee.name)
    } else {
        identity_key(&employee.number)
    }
}

/// Every employee of the sheet, first occurrence wins, in sheet order.
pub fn list_employees(sheet: &Sheet) -> Vec<Employee> {
    let mut seen = HashSet::new();
    sheet
        .rows()
        .filter_map(|row| employee_at(sheet, row))
        .filter(|employee| seen.insert(employee_key(employee)))
        .collect()
}
