use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};

/// Error payload returned by every failing endpoint: a machine-readable
/// name plus a message code (or human text where the client renders it).
#[derive(Object, Debug)]
pub struct ErrorResponse {
    pub name: String,
    pub message: String,
}

/// Maps a domain error onto an HTTP status and error payload.
pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}
