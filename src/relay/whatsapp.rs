use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppError;

/// Outcome of a delivered message.
#[derive(Debug, Clone)]
pub struct RelayReceipt {
    pub to: String,
    pub provider_response: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Json,
    Form,
}

#[derive(Serialize)]
struct ImagePayload<'a> {
    link: &'a str,
    caption: &'a str,
}

#[derive(Serialize)]
struct ImageMessage<'a> {
    messaging_product: &'a str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    image: ImagePayload<'a>,
}

/// Posts rendered report images to the WhatsApp provider.
#[derive(Clone)]
pub struct WhatsAppRelay {
    client: Client,
    api_url: String,
    token: String,
    default_country_code: String,
}

/// Digits only, leading zeros dropped, country code added to 10-digit numbers.
pub fn normalize_phone(raw: &str, default_country_code: &str) -> Result<String, AppError> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_start_matches('0');

    match digits.len() {
        0..=9 => Err(AppError::InvalidPhone(raw.to_string())),
        10 => Ok(format!("{default_country_code}{digits}")),
        _ => Ok(digits.to_string()),
    }
}

/// Only client errors other than auth failures are worth a second encoding.
fn should_retry_with_form(status: StatusCode) -> bool {
    status.is_client_error() && status != StatusCode::UNAUTHORIZED && status != StatusCode::FORBIDDEN
}

impl WhatsAppRelay {
    pub fn new(api_url: String, token: String, default_country_code: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            token,
            default_country_code,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.whatsapp_api_url.clone(),
            config.whatsapp_token.clone(),
            config.default_country_code.clone(),
        )
    }

    pub fn is_configured(&self) -> bool {
        !self.api_url.trim().is_empty() && !self.token.trim().is_empty()
    }

    pub async fn send_image(
        &self,
        to: &str,
        image_url: &str,
        caption: &str,
    ) -> Result<RelayReceipt, AppError> {
        if !self.is_configured() {
            return Err(AppError::RelayNotConfigured);
        }
        let to = normalize_phone(to, &self.default_country_code)?;
        let message = ImageMessage {
            messaging_product: "whatsapp",
            to: &to,
            kind: "image",
            image: ImagePayload {
                link: image_url,
                caption,
            },
        };

        let (status, body) = self.post(Encoding::Json, &message).await?;
        if status.is_success() {
            info!(to = %to, "Report delivered");
            return Ok(RelayReceipt { to, provider_response: body });
        }
        if !should_retry_with_form(status) {
            return Err(AppError::Relay(format!("provider answered {status}: {body}")));
        }

        warn!(to = %to, %status, "Provider rejected JSON body, retrying form-encoded");
        let (status, body) = self.post(Encoding::Form, &message).await?;
        if status.is_success() {
            info!(to = %to, "Report delivered (form-encoded)");
            Ok(RelayReceipt { to, provider_response: body })
        } else {
            Err(AppError::Relay(format!("provider answered {status}: {body}")))
        }
    }

    async fn post(
        &self,
        encoding: Encoding,
        message: &ImageMessage<'_>,
    ) -> Result<(StatusCode, Value), AppError> {
        let request = self.client.post(&self.api_url).bearer_auth(&self.token);
        let request = match encoding {
            Encoding::Json => request.json(message),
            Encoding::Form => request.form(&[
                ("messaging_product", message.messaging_product),
                ("to", message.to),
                ("type", message.kind),
                ("image[link]", message.image.link),
                ("image[caption]", message.image.caption),
            ]),
        };

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Relay(format!("request failed: {e}")))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::Relay(format!("failed to read response: {e}")))?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };
        Ok((status, body))
    }
}
