use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Nothing to do: {0}")]
    NothingToDo(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Page fetch failed: {0}")]
    FetchFailure(String),

    #[error("Generator call failed: {0}")]
    GenerationFailure(String),

    #[error("Generator response rejected: {0}")]
    GenerationParseFailure(String),

    #[error("Generator call timed out after {0}s")]
    GenerationTimeout(u64),

    #[error("Uniqueness conflict: {0}")]
    ConflictFailure(String),

    #[error("Storage error: {0}")]
    StorageFailure(String),
}

impl AppError {
    /// Message safe to return to the caller. Upstream and storage failures
    /// keep their detail in the server log only.
    fn public_message(&self) -> String {
        match self {
            AppError::InvalidRequest(_) | AppError::NothingToDo(_) | AppError::NotFound(_) => {
                self.to_string()
            }
            AppError::FetchFailure(_) => "Failed to fetch page content".to_string(),
            AppError::GenerationFailure(_)
            | AppError::GenerationParseFailure(_)
            | AppError::GenerationTimeout(_) => "Failed to generate quiz".to_string(),
            AppError::ConflictFailure(_) | AppError::StorageFailure(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) | AppError::NothingToDo(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::FetchFailure(_)
            | AppError::GenerationFailure(_)
            | AppError::GenerationParseFailure(_)
            | AppError::GenerationTimeout(_)
            | AppError::ConflictFailure(_)
            | AppError::StorageFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("request failed: {}", self);
        }
        HttpResponse::build(status).json(ErrorResponse {
            error: self.public_message(),
            code: status.as_u16(),
        })
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            AppError::ConflictFailure(err.to_string())
        } else {
            AppError::StorageFailure(err.to_string())
        }
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::StorageFailure(format!("BSON serialization error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidRequest(err.to_string())
    }
}

const DUPLICATE_KEY_CODE: i32 = 11000;

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match &*err.kind {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

pub type AppResult<T> = Result<T, AppError>;
