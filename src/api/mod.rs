pub mod attendance;
pub mod employee;
pub mod files;
pub mod media;
pub mod notify;

use actix_web::web;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::AppError;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FileQuery {
    /// Stored spreadsheet id
    pub file: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeeQuery {
    /// Stored spreadsheet id
    pub file: Option<String>,
    /// Employee number (compared ignoring spaces and periods)
    pub number: Option<String>,
    /// Employee name (compared ignoring case, spaces and periods)
    pub name: Option<String>,
}

/// Trimmed, non-empty value of a query parameter.
pub(crate) fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::MissingParameter(name.to_string()))
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl EmployeeQuery {
    /// The `number` and `name` terms; at least one must be given.
    pub(crate) fn terms(&self) -> Result<(Option<String>, Option<String>), AppError> {
        let number = present(&self.number);
        let name = present(&self.name);
        if number.is_none() && name.is_none() {
            return Err(AppError::MissingParameter("number or name".into()));
        }
        Ok((number, name))
    }
}

/// Collects a raw upload body, refusing anything over `limit` bytes.
pub(crate) async fn read_upload(payload: web::Payload, limit: usize) -> Result<web::Bytes, AppError> {
    payload
        .to_bytes_limited(limit)
        .await
        .map_err(|_| AppError::PayloadTooLarge(limit))?
        .map_err(|e| AppError::Internal(format!("failed to read upload: {e}")))
}

/// Runs file and workbook work on the blocking pool.
pub(crate) async fn blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    web::block(work)
        .await
        .map_err(|e| AppError::Internal(format!("blocking task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank_values() {
        assert_eq!(required(&Some(" a.xlsx ".into()), "file").unwrap(), "a.xlsx");
        assert!(matches!(required(&Some("  ".into()), "file"), Err(AppError::MissingParameter(_))));
        assert!(matches!(required(&None, "file"), Err(AppError::MissingParameter(_))));
    }

    #[test]
    fn employee_terms_need_number_or_name() {
        let query = EmployeeQuery {
            file: Some("x".into()),
            number: Some(" ".into()),
            name: None,
        };
        assert!(matches!(query.terms(), Err(AppError::MissingParameter(_))));

        let query = EmployeeQuery {
            file: Some("x".into()),
            number: None,
            name: Some(" John ".into()),
        };
        assert_eq!(query.terms().unwrap(), (None, Some("John".to_string())));
    }
}
