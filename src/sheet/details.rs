use crate::model::employee::EmployeeDetails;

use super::workbook::Sheet;
use super::{ADDRESS_COL, MOBILE1_COL, MOBILE2_COL};

fn field(sheet: &Sheet, row: u32, col: u32) -> Option<String> {
    let value = sheet.text(row, col).trim().to_string();
    (!value.is_empty() && value != ".").then_some(value)
}

pub fn employee_details(sheet: &Sheet, row: u32) -> EmployeeDetails {
    EmployeeDetails {
        mobile1: field(sheet, row, MOBILE1_COL),
        mobile2: field(sheet, row, MOBILE2_COL),
        present_address: field(sheet, row, ADDRESS_COL),
    }
}
