use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use utoipa::ToSchema;

use crate::config::Config;
use crate::error::AppError;
use crate::relay::whatsapp::WhatsAppRelay;
use crate::utils::file_store::Storage;
use crate::utils::signed_url::{public_url, sign};

#[derive(Debug, Deserialize, ToSchema)]
pub struct NotifyRequest {
    /// Recipient phone number; a 10-digit number gets the default country code
    #[schema(example = "98765 43210")]
    pub to: String,
    /// Id of an image previously stored through `POST /media`
    #[schema(example = "5b0d7f2e-1c1a-4f0e-8d5a-0c4b3f6e9a21.png")]
    pub media: String,
    #[schema(example = "Attendance for January")]
    pub caption: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotifyResponse {
    #[schema(example = "919876543210")]
    pub to: String,
    pub media_url: String,
    #[schema(value_type = Object)]
    pub provider_response: Value,
}

/// Send a stored report image over WhatsApp
#[utoipa::path(
    post,
    path = "/notify",
    request_body = NotifyRequest,
    responses(
        (status = 200, description = "Message accepted by the provider", body = NotifyResponse),
        (status = 400, description = "Missing field or invalid phone number"),
        (status = 404, description = "Image not found"),
        (status = 502, description = "Provider rejected the message"),
        (status = 503, description = "Provider not configured")
    ),
    tag = "Notify"
)]
pub async fn notify(
    config: web::Data<Config>,
    storage: web::Data<Storage>,
    relay: web::Data<WhatsAppRelay>,
    payload: web::Json<NotifyRequest>,
) -> actix_web::Result<impl Responder> {
    if !relay.is_configured() {
        return Err(AppError::RelayNotConfigured.into());
    }
    if payload.to.trim().is_empty() {
        return Err(AppError::MissingParameter("to".into()).into());
    }
    let media = payload.media.trim();
    if media.is_empty() {
        return Err(AppError::MissingParameter("media".into()).into());
    }
    storage.media.path(media)?;

    let signed = sign(media, &config.media_signing_key, config.media_url_ttl)?;
    let media_url = public_url(config.base_url(), media, &signed.token);
    let caption = payload.caption.as_deref().unwrap_or_default();

    let receipt = relay.send_image(&payload.to, &media_url, caption).await?;
    info!(to = %receipt.to, media, "Report relayed");

    Ok(HttpResponse::Ok().json(NotifyResponse {
        to: receipt.to,
        media_url,
        provider_response: receipt.provider_response,
    }))
}
