use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::api::{blocking, read_upload, required};
use crate::config::Config;
use crate::model::file::StoredFile;
use crate::utils::file_store::Storage;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UploadQuery {
    /// Original file name; only its extension is kept
    pub name: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct FileListResponse {
    pub files: Vec<StoredFile>,
}

/// Upload a monthly attendance spreadsheet (raw request body)
#[utoipa::path(
    post,
    path = "/files",
    params(UploadQuery),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 201, description = "File stored", body = StoredFile),
        (status = 400, description = "Missing name, empty body or unsupported extension"),
        (status = 413, description = "File too large")
    ),
    tag = "Files"
)]
pub async fn upload_file(
    config: web::Data<Config>,
    storage: web::Data<Storage>,
    query: web::Query<UploadQuery>,
    payload: web::Payload,
) -> actix_web::Result<impl Responder> {
    let name = required(&query.name, "name")?.to_string();
    let body = read_upload(payload, config.max_upload_bytes).await?;
    let store = storage.spreadsheets.clone();

    let stored = blocking(move || store.save(&name, &body)).await?;
    Ok(HttpResponse::Created().json(stored))
}

/// List uploaded spreadsheets, newest first
#[utoipa::path(
    get,
    path = "/files",
    responses(
        (status = 200, description = "Uploaded files", body = FileListResponse)
    ),
    tag = "Files"
)]
pub async fn list_files(storage: web::Data<Storage>) -> actix_web::Result<impl Responder> {
    let store = storage.spreadsheets.clone();
    let files = blocking(move || store.list()).await?;
    Ok(HttpResponse::Ok().json(FileListResponse { files }))
}

/// Delete an uploaded spreadsheet
#[utoipa::path(
    delete,
    path = "/files/{file_id}",
    params(
        ("file_id" = String, Path, description = "Stored file id")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 404, description = "File not found")
    ),
    tag = "Files"
)]
pub async fn delete_file(
    storage: web::Data<Storage>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let file_id = path.into_inner();
    let store = storage.spreadsheets.clone();

    blocking(move || store.delete(&file_id)).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully deleted"
    })))
}
