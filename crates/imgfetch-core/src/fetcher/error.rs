//! Transport error taxonomy for a single GET.
//!
//! Classified so the fetcher can hand the session one specific message per
//! failure mode instead of a generic transport string.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransferError {
    /// The whole-request timeout elapsed before the transfer finished.
    #[error("connection timeout: server took too long to respond")]
    Timeout,
    /// The server could not be reached (connect or DNS failure).
    #[error("connection error: could not reach the server")]
    Connect,
    /// The response had a non-2xx status.
    #[error("HTTP error: status {0}")]
    HttpStatus(u32),
    /// More body bytes arrived than the enforced cap allows. Raised even when
    /// `Content-Length` claimed otherwise.
    #[error("response body exceeded the {0} byte cap")]
    BodyTooLarge(u64),
    /// Any other libcurl failure (TLS, protocol, malformed URL, ...).
    #[error("request error: {0}")]
    Curl(#[from] curl::Error),
}
