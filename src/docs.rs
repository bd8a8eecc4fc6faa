use crate::api::attendance::{DailyResponse, DetailsResponse, ReportResponse, SummaryResponse};
use crate::api::employee::EmployeeListResponse;
use crate::api::files::FileListResponse;
use crate::api::media::MediaUploadResponse;
use crate::api::notify::{NotifyRequest, NotifyResponse};
use crate::model::attendance::{AttendanceSummary, DailyEntry};
use crate::model::employee::{Employee, EmployeeDetails};
use crate::model::file::StoredFile;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Viewer API",
        version = "0.1.0",
        description = r#"
## Monthly Attendance Viewer

Reads the monthly attendance workbook kept by the office and answers per-employee questions about it.

### 🔹 Key Features
- **Files**
  - Upload, list and delete monthly spreadsheets (xlsx, xlsm, xlsb, xls, ods)
- **Employees**
  - List the employees found on the attendance sheet
- **Attendance**
  - Monthly totals, day-by-day codes and contact details for one employee
- **Media & Notify**
  - Store a rendered report image behind a signed URL and send it over WhatsApp

### 🔎 Employee lookup
Pass `number` and/or `name`. The first row matching either term wins;
both are compared ignoring case, spaces and periods.

### 📦 Response Format
- JSON responses; errors carry `{ "error": <Kind>, "message": <text> }`

---
Built with **Rust**, **Actix Web**, **calamine** and **Utoipa**.
"#,
    ),
    paths(
        crate::api::files::upload_file,
        crate::api::files::list_files,
        crate::api::files::delete_file,

        crate::api::employee::list_employees,

        crate::api::attendance::summary,
        crate::api::attendance::daily,
        crate::api::attendance::details,
        crate::api::attendance::report,

        crate::api::media::upload_media,
        crate::api::media::get_media,

        crate::api::notify::notify
    ),
    components(
        schemas(
            StoredFile,
            FileListResponse,
            Employee,
            EmployeeListResponse,
            EmployeeDetails,
            AttendanceSummary,
            DailyEntry,
            SummaryResponse,
            DailyResponse,
            DetailsResponse,
            ReportResponse,
            MediaUploadResponse,
            NotifyRequest,
            NotifyResponse
        )
    ),
    tags(
        (name = "Files", description = "Uploaded attendance spreadsheets"),
        (name = "Employee", description = "Employees on the attendance sheet"),
        (name = "Attendance", description = "Per-employee monthly attendance"),
        (name = "Media", description = "Signed report images"),
        (name = "Notify", description = "WhatsApp delivery"),
    )
)]
pub struct ApiDoc;
