use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Header carrying the Site Manager API key.
pub const API_KEY_HEADER: &str = "x-api-key";

const ACCEPT_JSON: &str = "application/json";

/// Build the `X-API-KEY` header value, marked sensitive so it never shows up
/// in `Debug` output or verbose transport logs.
pub(crate) fn api_key_value(api_key: &SecretString) -> Result<HeaderValue, Error> {
    let mut value = HeaderValue::from_str(api_key.expose_secret()).map_err(|_| {
        Error::InvalidHeader {
            name: "X-API-KEY",
        }
    })?;
    value.set_sensitive(true);
    Ok(value)
}

/// Stamp the authentication and `Accept` headers onto `headers`.
///
/// Any caller-supplied values for these two headers are replaced.
pub(crate) fn apply(headers: &mut HeaderMap, api_key: &HeaderValue) {
    headers.insert(API_KEY_HEADER, api_key.clone());
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_caller_supplied_auth_and_accept() {
        let key = api_key_value(&SecretString::from("secret".to_string())).expect("valid key");
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("spoofed"));
        headers.insert(ACCEPT, HeaderValue::from_static("text/html"));
        headers.insert("x-trace", HeaderValue::from_static("keep"));

        apply(&mut headers, &key);

        assert_eq!(headers.get_all(API_KEY_HEADER).iter().count(), 1);
        assert_eq!(headers[API_KEY_HEADER], "secret");
        assert!(headers[API_KEY_HEADER].is_sensitive());
        assert_eq!(headers[ACCEPT], "application/json");
        assert_eq!(headers["x-trace"], "keep");
    }

    #[test]
    fn rejects_keys_that_are_not_header_safe() {
        let result = api_key_value(&SecretString::from("bad\nkey".to_string()));
        assert!(matches!(result, Err(Error::InvalidHeader { .. })));
    }
}
