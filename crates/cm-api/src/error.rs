//! HTTP mapping for the domain error taxonomy.

use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use cm_core::error::AppError;

/// Wrapper carrying `AppError` across the actix boundary.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            AppError::NotFound(..) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // internal details go to the log, not the client
        if let AppError::Internal(detail) = &self.0 {
            log::error!("internal error: {detail}");
            return HttpResponse::InternalServerError().body("internal server error");
        }
        HttpResponse::build(self.status_code()).body(self.0.to_string())
    }
}

/// A specialized Result type for handler functions.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = ApiError(AppError::NotFound("post".into(), "1".into()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = ApiError(AppError::Unauthorized("nope".into()));
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err = ApiError(AppError::Conflict("taken".into()));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_internal_detail_is_not_leaked() {
        let err = ApiError(AppError::Internal("dsn mysql://root:secret@db".into()));
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
