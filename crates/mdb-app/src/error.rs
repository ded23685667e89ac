use std::collections::BTreeMap;

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde::Serialize;
use tracing::{debug, error};

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Record not found: {0}")]
    ResourceNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] garde::Report),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Database error: {0}")]
    DatabaseError(#[source] mdb_dal::Error),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<mdb_dal::Error> for ApiError {
    fn from(e: mdb_dal::Error) -> Self {
        match e {
            mdb_dal::Error::RecordNotFound(entity) => ApiError::ResourceNotFound(entity),
            mdb_dal::Error::InvalidReference(msg) | mdb_dal::Error::InvalidData(msg) => {
                ApiError::InvalidRequest(msg)
            }
            other => ApiError::DatabaseError(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, Vec<String>>>,
}

/// Groups validation messages by field path, errors not bound to a field go under `body`
pub fn field_errors(report: &garde::Report) -> BTreeMap<String, Vec<String>> {
    let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (path, error) in report.iter() {
        let name = match path.to_string() {
            p if p.is_empty() => "body".to_string(),
            p => p,
        };
        fields.entry(name).or_default().push(error.message().to_string());
    }
    fields
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::DatabaseError(_) | ApiError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ApiError::Validation(report) => {
                debug!("Validation failed: {report}");
                ErrorBody {
                    error: "Validation failed".to_string(),
                    fields: Some(field_errors(&report)),
                }
            }
            other @ (ApiError::DatabaseError(_) | ApiError::InternalError(_)) => {
                error!("Request failed: {other}");
                ErrorBody {
                    error: "Internal server error".to_string(),
                    fields: None,
                }
            }
            other => {
                debug!("Request rejected: {other}");
                ErrorBody {
                    error: other.to_string(),
                    fields: None,
                }
            }
        };
        (status, Json(body)).into_response()
    }
}
