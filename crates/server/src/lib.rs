use api_types::{ApiResponse, FieldError};
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::EngineError;

pub use server::{ServerState, router, run_with_listener};

mod expenses;
mod server;
mod validation;

pub mod types {
    pub mod expense {
        pub use api_types::expense::{ExpensePayload, ExpenseView};
    }

    pub use api_types::{ApiResponse, FieldError};
}

pub enum ServerError {
    Engine(EngineError),
    Validation(Vec<FieldError>),
    BadRequest(String),
    NotFound(String),
    MethodNotAllowed(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::ExpenseNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidExpense(_) => StatusCode::BAD_REQUEST,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

fn envelope(status: StatusCode, message: String) -> axum::response::Response {
    (
        status,
        Json(ApiResponse::<()>::message_only(status.as_u16(), message)),
    )
        .into_response()
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ServerError::Engine(err) => {
                envelope(status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Validation(errors) => {
                let status = StatusCode::BAD_REQUEST;
                (
                    status,
                    Json(ApiResponse::new(status.as_u16(), "Validation failed", errors)),
                )
                    .into_response()
            }
            ServerError::BadRequest(message) => envelope(StatusCode::BAD_REQUEST, message),
            ServerError::NotFound(message) => envelope(StatusCode::NOT_FOUND, message),
            ServerError::MethodNotAllowed(message) => {
                envelope(StatusCode::METHOD_NOT_ALLOWED, message)
            }
        }
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<PathRejection> for ServerError {
    fn from(value: PathRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}
