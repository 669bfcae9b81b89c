use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use super::super::helpers::error_chain_fmt;
use crate::email_client::SendEmailError;

#[derive(thiserror::Error)]
pub enum SubmissionError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Failed to send email")]
    DispatchError(#[source] SendEmailError),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for SubmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubmissionError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubmissionError::ValidationError(_) => StatusCode::BAD_REQUEST,
            SubmissionError::DispatchError(_) | SubmissionError::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        match self {
            // The parse failure itself stays in the logs; the caller gets
            // the one fixed message for every missing-field shape.
            SubmissionError::ValidationError(_) => HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": "Email and subscriptions required" })),
            SubmissionError::DispatchError(source) => {
                let mut body = serde_json::json!({ "error": self.to_string() });
                if let SendEmailError::Provider { detail, .. } = source {
                    body["details"] = detail.clone();
                }
                HttpResponse::InternalServerError().json(body)
            }
            // The cause chain is logged, never leaked to the caller.
            SubmissionError::UnexpectedError(_) => HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Internal server error" })),
        }
    }
}
