use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::api::{FileQuery, blocking, required};
use crate::model::employee::Employee;
use crate::sheet::{directory, open_attendance_sheet};
use crate::utils::file_store::Storage;

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    #[schema(example = "3f2c8c1e-6a0b-4d6e-9a59-1c1f3b1e2d4a.xlsx")]
    pub file: String,
    pub employees: Vec<Employee>,
}

/// List employees of an uploaded attendance file
#[utoipa::path(
    get,
    path = "/employees",
    params(FileQuery),
    responses(
        (status = 200, description = "Deduplicated employees in sheet order", body = EmployeeListResponse),
        (status = 400, description = "Missing file, unreadable workbook or no attendance sheet", body = Object, example = json!({
            "error": "SheetNotFound",
            "message": "attendance sheet not found (no sheet name contains \"present\")"
        })),
        (status = 404, description = "File not found", body = Object, example = json!({
            "error": "FileNotFound",
            "message": "file not found: missing.xlsx"
        }))
    ),
    tag = "Employee"
)]
#[instrument(name = "list_employees", skip(storage, query), fields(file = ?query.file))]
pub async fn list_employees(
    storage: web::Data<Storage>,
    query: web::Query<FileQuery>,
) -> actix_web::Result<impl Responder> {
    let file = required(&query.file, "file")?.to_string();
    let path = storage.spreadsheets.path(&file)?;

    let employees = blocking(move || {
        let sheet = open_attendance_sheet(&path)?;
        Ok(directory::list_employees(&sheet))
    })
    .await?;

    debug!(count = employees.len(), "Employees listed");
    Ok(HttpResponse::Ok().json(EmployeeListResponse { file, employees }))
}
