use tracing::debug;

use crate::error::AppError;
use crate::model::employee::Employee;

use super::directory::employee_at;
use super::text::lookup_key;
use super::workbook::Sheet;
use super::{NAME_COL, NUMBER_COL};

/// Search terms for one employee; either may be absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmployeeLookup<'a> {
    pub number: Option<&'a str>,
    pub name: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRow {
    pub row: u32,
    pub employee: Employee,
}

fn normalized_term(term: Option<&str>) -> Option<String> {
    term.map(lookup_key).filter(|key| !key.is_empty())
}

/// First row, top to bottom, whose number or name matches the lookup.
pub fn find_employee_row(sheet: &Sheet, lookup: EmployeeLookup<'_>) -> Result<ResolvedRow, AppError> {
    let number = normalized_term(lookup.number);
    let name = normalized_term(lookup.name);
    if number.is_none() && name.is_none() {
        return Err(AppError::EmployeeNotFound);
    }

    for row in sheet.rows() {
        let Some(employee) = employee_at(sheet, row) else {
            continue;
        };

        let number_hit = number
            .as_deref()
            .is_some_and(|q| lookup_key(&sheet.text(row, NUMBER_COL)) == q);
        let name_hit = name
            .as_deref()
            .is_some_and(|q| lookup_key(&sheet.text(row, NAME_COL)) == q);

        if number_hit || name_hit {
            debug!(row, number = %employee.number, sheet = sheet.name(), "Employee row resolved");
            return Ok(ResolvedRow { row, employee });
        }
    }

    Err(AppError::EmployeeNotFound)
}
