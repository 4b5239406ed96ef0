use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::telemetry::{REQUEST_ID_HEADER, RequestId, request_id_header_value};

#[derive(Debug, Error)]
pub enum AppErrorKind {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found")]
    NotFound,
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("unexpected error: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
#[error("{kind}")]
pub struct AppError {
    kind: AppErrorKind,
    request_id: Option<String>,
}

impl AppError {
    pub fn new(kind: AppErrorKind) -> Self {
        Self {
            kind,
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, id: String) -> Self {
        self.request_id = Some(id);
        self
    }

    fn status(&self) -> StatusCode {
        match self.kind {
            AppErrorKind::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppErrorKind::NotFound => StatusCode::NOT_FOUND,
            AppErrorKind::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppErrorKind::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        Self::new(AppErrorKind::Unauthorized(message.into()))
    }

    pub fn bad_request<T: Into<String>>(message: T) -> Self {
        Self::new(AppErrorKind::BadRequest(message.into()))
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
    request_id: Option<&'a str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let request_id = self.request_id.clone();
        let body = Json(ErrorBody {
            error: match &self.kind {
                AppErrorKind::BadRequest(_) => "bad_request",
                AppErrorKind::NotFound => "not_found",
                AppErrorKind::Unauthorized(_) => "unauthorized",
                AppErrorKind::Internal(_) => "internal",
            },
            message: self.kind.to_string(),
            request_id: request_id.as_deref(),
        });

        let mut response = (status, body).into_response();
        if let Some(id) = request_id {
            response
                .headers_mut()
                .insert(REQUEST_ID_HEADER, request_id_header_value(&id));
        }
        response
    }
}

impl From<tokenvault_core::Error> for AppError {
    fn from(value: tokenvault_core::Error) -> Self {
        let kind = match value {
            tokenvault_core::Error::NotFound { .. } => AppErrorKind::NotFound,
            tokenvault_core::Error::InvalidToken(_) => AppErrorKind::BadRequest(value.to_string()),
            tokenvault_core::Error::Storage(_) | tokenvault_core::Error::AlreadyExists => {
                AppErrorKind::Internal(value.to_string())
            }
        };
        AppError::new(kind)
    }
}

pub fn attach_request_id(err: AppError, request_id: &RequestId) -> AppError {
    err.with_request_id(request_id.0.clone())
}
