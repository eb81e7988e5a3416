//
// Copyright (c) 2024, 2025 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
use num_enum::TryFromPrimitive;

include!(concat!(env!("OUT_DIR"), "/ua.rs"));

pub(crate) fn sdk_version() -> &'static str {
    SDK_VERSION
}

pub(crate) fn user_agent() -> &'static str {
    USER_AGENT
}

/// Error returned by all operations in this library.
///
/// Errors that originate from an HTTP response carry the response status in
/// [`HBaseError::status`]. For well-known statuses, [`HBaseError::code`] is the
/// matching [`HBaseErrorCode`] (for example, a missing row or column is
/// [`HBaseErrorCode::NotFound`]).
#[derive(Debug, Clone)]
pub struct HBaseError {
    pub code: HBaseErrorCode,
    pub message: String,
    pub status: Option<u16>,
}

impl std::error::Error for HBaseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl std::fmt::Display for HBaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if let Some(s) = self.status {
            return write!(
                f,
                "code={:?} status={} message=\"{}\"",
                self.code, s, self.message
            );
        }
        write!(f, "code={:?} message=\"{}\"", self.code, self.message)
    }
}

impl HBaseError {
    pub fn new(code: HBaseErrorCode, msg: &str) -> HBaseError {
        HBaseError {
            code,
            message: msg.to_string(),
            status: None,
        }
    }

    /// Create an error from an HTTP response status and body text.
    ///
    /// Statuses without a dedicated [`HBaseErrorCode`] map to
    /// [`HBaseErrorCode::UnknownError`]; the raw status is always kept.
    pub fn from_http_status(status: u16, msg: &str) -> HBaseError {
        let code = match HBaseErrorCode::try_from(status as i32) {
            Ok(c) if c.is_http_status() => c,
            _ => HBaseErrorCode::UnknownError,
        };
        HBaseError {
            code,
            message: msg.to_string(),
            status: Some(status),
        }
    }

    /// Returns true if this error means the requested row or column does not exist.
    pub fn is_not_found(&self) -> bool {
        self.code == HBaseErrorCode::NotFound
    }
}

macro_rules! ia_error {
    ($($t:tt)*) => {{
        let m = format!($($t)*);
        HBaseError {
            code: crate::error::HBaseErrorCode::IllegalArgument,
            message: format!("{} ({})", m, crate::error::sdk_version()),
            status: None,
        }
    }};
}

pub(crate) use ia_error;

macro_rules! ia_err {
    ($($t:tt)*) => {{
        let m = format!($($t)*);
        Err(HBaseError {
            code: crate::error::HBaseErrorCode::IllegalArgument,
            message: format!("{} ({})", m, crate::error::sdk_version()),
            status: None,
        })
    }};
}

pub(crate) use ia_err;

impl From<reqwest::Error> for HBaseError {
    fn from(e: reqwest::Error) -> Self {
        let mut code = HBaseErrorCode::ServerError;
        if e.is_timeout() {
            code = HBaseErrorCode::RequestTimeout;
        } else if e.is_decode() {
            code = HBaseErrorCode::BadProtocolMessage;
        }
        HBaseError {
            code,
            message: format!("reqwest error: {} ({})", e, crate::error::sdk_version()),
            status: e.status().map(|s| s.as_u16()),
        }
    }
}

impl From<reqwest::header::InvalidHeaderValue> for HBaseError {
    fn from(e: reqwest::header::InvalidHeaderValue) -> Self {
        ia_error!("invalid header value: {}", e)
    }
}

impl From<url::ParseError> for HBaseError {
    fn from(e: url::ParseError) -> Self {
        ia_error!("error parsing url: {}", e)
    }
}

impl From<serde_json::Error> for HBaseError {
    fn from(e: serde_json::Error) -> Self {
        HBaseError::new(
            HBaseErrorCode::BadProtocolMessage,
            &format!("invalid REST response body: {}", e),
        )
    }
}

impl From<base64::DecodeError> for HBaseError {
    fn from(e: base64::DecodeError) -> Self {
        HBaseError::new(
            HBaseErrorCode::BadProtocolMessage,
            &format!("invalid base64 in REST response: {}", e),
        )
    }
}

// HBaseErrorCode represents the error code.
// Error codes are divided into categories as follows:
//
// 1. Errors raised locally by this library, range from 1 to 100(exclusive).
// These include illegal arguments and unreadable responses.
//
// 2. Errors derived from an HTTP response status. The code value is the
// status itself, so a 404 response is NotFound = 404.
//
// 3. UnknownError (1000) for responses whose status has no dedicated code.
//
#[derive(Debug, Clone, Copy, Eq, PartialEq, TryFromPrimitive)]
#[repr(i32)]
pub enum HBaseErrorCode {
    /// IllegalArgument error represents the application provided an illegal
    /// argument for the operation, such as mismatched column and value counts.
    IllegalArgument = 1,

    /// BadProtocolMessage error represents a response body that could not be
    /// decoded as a REST cell set (invalid JSON, base64 or UTF-8).
    BadProtocolMessage = 2,

    /// RequestTimeout error represents the request did not complete before
    /// the configured timeout elapsed.
    RequestTimeout = 3,

    /// BadRequest is returned for HTTP 400, typically a malformed row or
    /// column specification.
    BadRequest = 400,

    /// Unauthorized is returned for HTTP 401.
    Unauthorized = 401,

    /// Forbidden is returned for HTTP 403.
    Forbidden = 403,

    /// NotFound is returned for HTTP 404: the table, row or column does not exist.
    NotFound = 404,

    /// MethodNotAllowed is returned for HTTP 405, for example when the REST
    /// server runs in read-only mode.
    MethodNotAllowed = 405,

    /// NotAcceptable is returned for HTTP 406.
    NotAcceptable = 406,

    /// ServerError represents an internal problem on the REST gateway (HTTP 500)
    /// or a transport failure.
    ServerError = 500,

    /// BadGateway is returned for HTTP 502.
    BadGateway = 502,

    /// ServiceUnavailable is returned for HTTP 503.
    ServiceUnavailable = 503,

    /// GatewayTimeout is returned for HTTP 504.
    GatewayTimeout = 504,

    /// UnknownError represents a response status with no dedicated code.
    UnknownError = 1000,
}

impl HBaseErrorCode {
    fn is_http_status(&self) -> bool {
        let v = *self as i32;
        (400..600).contains(&v)
    }
}
