use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use strum::IntoStaticStr;
use tracing::{debug, error};

/// Every failure a request can end in.
///
/// The variant name doubles as the machine-readable `error` field of the
/// JSON body, so renaming a variant is a breaking API change.
#[derive(Debug, Display, IntoStaticStr)]
pub enum AppError {
    #[display(fmt = "missing required parameter: {}", _0)]
    MissingParameter(String),

    #[display(fmt = "file not found: {}", _0)]
    FileNotFound(String),

    #[display(fmt = "unreadable workbook: {}", _0)]
    UnreadableWorkbook(String),

    #[display(fmt = "attendance sheet not found (no sheet name contains \"present\")")]
    SheetNotFound,

    #[display(fmt = "employee not found")]
    EmployeeNotFound,

    #[display(fmt = "unsupported file type: {}", _0)]
    UnsupportedFileType(String),

    #[display(fmt = "upload exceeds {} bytes", _0)]
    PayloadTooLarge(usize),

    #[display(fmt = "invalid phone number: {}", _0)]
    InvalidPhone(String),

    #[display(fmt = "invalid or expired media token")]
    InvalidSignature,

    #[display(fmt = "messaging provider is not configured")]
    RelayNotConfigured,

    #[display(fmt = "messaging provider error: {}", _0)]
    Relay(String),

    #[display(fmt = "internal error: {}", _0)]
    Internal(String),
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingParameter(_)
            | AppError::UnreadableWorkbook(_)
            | AppError::SheetNotFound
            | AppError::UnsupportedFileType(_)
            | AppError::InvalidPhone(_) => StatusCode::BAD_REQUEST,
            AppError::FileNotFound(_) | AppError::EmployeeNotFound => StatusCode::NOT_FOUND,
            AppError::InvalidSignature => StatusCode::FORBIDDEN,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::RelayNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Relay(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, kind = self.kind(), "Request failed");
        } else {
            debug!(error = %self, kind = self.kind(), "Request rejected");
        }

        HttpResponse::build(status).json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            AppError::MissingParameter("file".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::SheetNotFound.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::UnreadableWorkbook("zip".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::FileNotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::EmployeeNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::InvalidSignature.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::PayloadTooLarge(10).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AppError::RelayNotConfigured.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn kind_is_variant_name() {
        assert_eq!(AppError::SheetNotFound.kind(), "SheetNotFound");
        assert_eq!(AppError::Relay("boom".into()).kind(), "Relay");
    }

    #[actix_web::test]
    async fn error_body_carries_kind_and_message() {
        let resp = AppError::MissingParameter("file".into()).error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "MissingParameter");
        assert_eq!(value["message"], "missing required parameter: file");
    }
}
