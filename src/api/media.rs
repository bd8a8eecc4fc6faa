use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::api::files::UploadQuery;
use crate::api::{blocking, read_upload, required};
use crate::config::Config;
use crate::error::AppError;
use crate::utils::file_store::Storage;
use crate::utils::signed_url::{public_url, sign, verify};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TokenQuery {
    /// Signed token issued with the media URL
    pub token: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaUploadResponse {
    #[schema(example = "5b0d7f2e-1c1a-4f0e-8d5a-0c4b3f6e9a21.png")]
    pub id: String,
    #[schema(example = "http://127.0.0.1:8080/media/5b0d7f2e-1c1a-4f0e-8d5a-0c4b3f6e9a21.png?token=eyJ...")]
    pub url: String,
    /// Unix seconds
    pub expires_at: u64,
}

fn content_type_for(id: &str) -> &'static str {
    match id.rsplit('.').next().map(str::to_lowercase).as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Store a rendered report image and issue a signed URL for it
#[utoipa::path(
    post,
    path = "/media",
    params(UploadQuery),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 201, description = "Image stored", body = MediaUploadResponse),
        (status = 400, description = "Missing name, empty body or unsupported extension"),
        (status = 413, description = "Image too large")
    ),
    tag = "Media"
)]
pub async fn upload_media(
    config: web::Data<Config>,
    storage: web::Data<Storage>,
    query: web::Query<UploadQuery>,
    payload: web::Payload,
) -> actix_web::Result<impl Responder> {
    let name = required(&query.name, "name")?.to_string();
    let body = read_upload(payload, config.max_upload_bytes).await?;
    let store = storage.media.clone();
    let stored = blocking(move || store.save(&name, &body)).await?;

    let signed = sign(&stored.id, &config.media_signing_key, config.media_url_ttl)?;
    let url = public_url(config.base_url(), &stored.id, &signed.token);

    Ok(HttpResponse::Created().json(MediaUploadResponse {
        id: stored.id,
        url,
        expires_at: signed.expires_at,
    }))
}

/// Fetch a stored image through its signed URL
#[utoipa::path(
    get,
    path = "/media/{media_id}",
    params(
        ("media_id" = String, Path, description = "Stored image id"),
        TokenQuery
    ),
    responses(
        (status = 200, description = "Image bytes", body = Vec<u8>, content_type = "image/png"),
        (status = 403, description = "Invalid or expired token"),
        (status = 404, description = "Image not found")
    ),
    tag = "Media"
)]
pub async fn get_media(
    config: web::Data<Config>,
    storage: web::Data<Storage>,
    path: web::Path<String>,
    query: web::Query<TokenQuery>,
) -> actix_web::Result<impl Responder> {
    let media_id = path.into_inner();
    let token = query.token.as_deref().ok_or(AppError::InvalidSignature)?;
    verify(&media_id, token, &config.media_signing_key)?;

    let file = storage.media.path(&media_id)?;
    let bytes = blocking(move || {
        std::fs::read(&file)
            .map_err(|e| AppError::Internal(format!("failed to read {}: {e}", file.display())))
    })
    .await?;

    info!(media_id = %media_id, size = bytes.len(), "Media served");
    Ok(HttpResponse::Ok()
        .content_type(content_type_for(&media_id))
        .body(bytes))
}
