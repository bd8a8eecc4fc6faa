use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::api::{EmployeeQuery, blocking, required};
use crate::error::AppError;
use crate::model::attendance::{AttendanceSummary, DailyEntry};
use crate::model::employee::{Employee, EmployeeDetails};
use crate::sheet::daily::build_daily;
use crate::sheet::details::employee_details;
use crate::sheet::resolver::{EmployeeLookup, find_employee_row};
use crate::sheet::summary::summarize;
use crate::sheet::{Sheet, open_attendance_sheet};
use crate::utils::file_store::Storage;

#[derive(Serialize, ToSchema)]
pub struct SummaryResponse {
    pub file: String,
    pub employee: Employee,
    pub summary: AttendanceSummary,
}

#[derive(Serialize, ToSchema)]
pub struct DailyResponse {
    pub file: String,
    pub employee: Employee,
    pub days: Vec<DailyEntry>,
}

#[derive(Serialize, ToSchema)]
pub struct DetailsResponse {
    pub file: String,
    pub employee: Employee,
    pub details: EmployeeDetails,
}

#[derive(Serialize, ToSchema)]
pub struct ReportResponse {
    pub file: String,
    pub employee: Employee,
    pub summary: AttendanceSummary,
    pub days: Vec<DailyEntry>,
    pub details: EmployeeDetails,
}

/// Loads the attendance sheet, resolves the employee row and applies `view` to it.
async fn with_employee<T, F>(
    storage: &Storage,
    query: &EmployeeQuery,
    view: F,
) -> Result<(String, Employee, T), AppError>
where
    F: FnOnce(&Sheet, u32) -> T + Send + 'static,
    T: Send + 'static,
{
    let file = required(&query.file, "file")?.to_string();
    let (number, name) = query.terms()?;
    let path = storage.spreadsheets.path(&file)?;

    let (employee, value) = blocking(move || {
        let sheet = open_attendance_sheet(&path)?;
        let lookup = EmployeeLookup {
            number: number.as_deref(),
            name: name.as_deref(),
        };
        let resolved = find_employee_row(&sheet, lookup)?;
        debug!(row = resolved.row, "Employee resolved");
        Ok((resolved.employee, view(&sheet, resolved.row)))
    })
    .await?;

    Ok((file, employee, value))
}

/// Monthly attendance totals for one employee
#[utoipa::path(
    get,
    path = "/summary",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Monthly totals", body = SummaryResponse),
        (status = 400, description = "Missing parameters, unreadable workbook or no attendance sheet"),
        (status = 404, description = "File or employee not found", body = Object, example = json!({
            "error": "EmployeeNotFound",
            "message": "employee not found"
        }))
    ),
    tag = "Attendance"
)]
#[instrument(name = "attendance_summary", skip(storage, query), fields(file = ?query.file))]
pub async fn summary(
    storage: web::Data<Storage>,
    query: web::Query<EmployeeQuery>,
) -> actix_web::Result<impl Responder> {
    let (file, employee, summary) = with_employee(&storage, &query, summarize).await?;
    Ok(HttpResponse::Ok().json(SummaryResponse {
        file,
        employee,
        summary,
    }))
}

/// Day-by-day codes for the calendar view
#[utoipa::path(
    get,
    path = "/daily",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "One entry per day column", body = DailyResponse),
        (status = 400, description = "Missing parameters, unreadable workbook or no attendance sheet"),
        (status = 404, description = "File or employee not found")
    ),
    tag = "Attendance"
)]
#[instrument(name = "attendance_daily", skip(storage, query), fields(file = ?query.file))]
pub async fn daily(
    storage: web::Data<Storage>,
    query: web::Query<EmployeeQuery>,
) -> actix_web::Result<impl Responder> {
    let (file, employee, days) = with_employee(&storage, &query, build_daily).await?;
    Ok(HttpResponse::Ok().json(DailyResponse {
        file,
        employee,
        days,
    }))
}

/// Contact details kept next to the attendance grid
#[utoipa::path(
    get,
    path = "/details",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Employee contact details", body = DetailsResponse),
        (status = 400, description = "Missing parameters, unreadable workbook or no attendance sheet"),
        (status = 404, description = "File or employee not found")
    ),
    tag = "Attendance"
)]
#[instrument(name = "attendance_details", skip(storage, query), fields(file = ?query.file))]
pub async fn details(
    storage: web::Data<Storage>,
    query: web::Query<EmployeeQuery>,
) -> actix_web::Result<impl Responder> {
    let (file, employee, details) = with_employee(&storage, &query, employee_details).await?;
    Ok(HttpResponse::Ok().json(DetailsResponse {
        file,
        employee,
        details,
    }))
}

/// Summary, daily codes and details in one call
#[utoipa::path(
    get,
    path = "/report",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Full monthly report", body = ReportResponse),
        (status = 400, description = "Missing parameters, unreadable workbook or no attendance sheet"),
        (status = 404, description = "File or employee not found")
    ),
    tag = "Attendance"
)]
#[instrument(name = "attendance_report", skip(storage, query), fields(file = ?query.file))]
pub async fn report(
    storage: web::Data<Storage>,
    query: web::Query<EmployeeQuery>,
) -> actix_web::Result<impl Responder> {
    let (file, employee, (summary, days, details)) =
        with_employee(&storage, &query, |sheet, row| {
            (
                summarize(sheet, row),
                build_daily(sheet, row),
                employee_details(sheet, row),
            )
        })
        .await?;

    Ok(HttpResponse::Ok().json(ReportResponse {
        file,
        employee,
        summary,
        days,
        details,
    }))
}
