use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub enum AuthError {
    LoginExpired,
    StateMismatch,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::LoginExpired => (
                StatusCode::UNAUTHORIZED,
                "Authorization request expired, restart login",
            )
                .into_response(),
            AuthError::StateMismatch => {
                (StatusCode::UNAUTHORIZED, "Invalid state").into_response()
            }
        }
    }
}
