// Status translation: HTTP status code + server message -> categorized Error.
//
// The success path (exactly 200) never reaches this module.

use crate::error::Error;

/// Fallback message when a non-200 response body carries no `message` field.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Map a non-200 status code and message onto an error category.
///
/// Codes without a dedicated category become [`Error::UnknownStatus`],
/// which embeds the numeric code in its message.
pub fn translate(status: u16, message: impl Into<String>) -> Error {
    let message = message.into();
    match status {
        401 => Error::Unauthorized { message },
        403 => Error::Forbidden { message },
        404 => Error::NotFound { message },
        405 => Error::MethodNotAllowed { message },
        429 => Error::RateLimited { message },
        500 => Error::ServerError { message },
        502 => Error::BadGateway { message },
        503 => Error::ServiceUnavailable { message },
        status => Error::UnknownStatus { status, message },
    }
}
