//! Single blocking HTTP GET via libcurl.
//!
//! Headers are parsed as soon as the first body byte arrives so the caller's
//! head filter can reject a response before its body is transferred. The body
//! is buffered in memory with a hard byte cap, independent of what
//! `Content-Length` claims.

use std::cell::{Cell, RefCell};
use std::str;
use std::time::Duration;

use super::error::TransferError;
use super::headers;

/// Parameters for one GET request.
#[derive(Debug, Clone)]
pub struct TransferOptions {
    /// Whole-request timeout (also used as the connect timeout).
    pub timeout: Duration,
    /// Identifying User-Agent header.
    pub user_agent: String,
    /// Hard cap on buffered body bytes; exceeding it aborts the transfer.
    pub max_body_bytes: u64,
}

/// Declared metadata of the (final) response.
#[derive(Debug, Clone, Default)]
pub struct ResponseHead {
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
}

/// A completed (or head-rejected) GET: final response headers plus body.
/// When the head filter rejected the response the body is empty.
#[derive(Debug)]
pub struct FetchedResource {
    pub head: ResponseHead,
    pub body: Vec<u8>,
}

/// Performs a blocking GET on `url`.
///
/// `accept_head` is consulted once, when the first body byte arrives; a
/// `false` verdict aborts the download and yields an `Ok` resource with an
/// empty body, leaving the caller to re-derive the rejection reason from the
/// returned head. Follows redirects. Non-2xx statuses and transport failures
/// map to [`TransferError`].
pub fn get(
    url: &str,
    opts: &TransferOptions,
    accept_head: impl Fn(&ResponseHead) -> bool,
) -> Result<FetchedResource, TransferError> {
    let header_lines: RefCell<Vec<String>> = RefCell::new(Vec::new());
    let body: RefCell<Vec<u8>> = RefCell::new(Vec::new());
    // None until the first body byte; Some(verdict) afterwards.
    let head_verdict: Cell<Option<bool>> = Cell::new(None);
    let oversized = Cell::new(false);

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.useragent(&opts.user_agent)?;
    easy.connect_timeout(opts.timeout)?;
    easy.timeout(opts.timeout)?;

    let perform_result = {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                header_lines.borrow_mut().push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.write_function(|data| {
            let accepted = match head_verdict.get() {
                Some(v) => v,
                None => {
                    let head = headers::parse_head(&header_lines.borrow());
                    let v = accept_head(&head);
                    head_verdict.set(Some(v));
                    v
                }
            };
            if !accepted {
                return Ok(0); // abort transfer, head already tells the story
            }
            let mut body = body.borrow_mut();
            if body.len() as u64 + data.len() as u64 > opts.max_body_bytes {
                oversized.set(true);
                return Ok(0);
            }
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()
    };

    if let Err(err) = perform_result {
        if err.is_write_error() && oversized.get() {
            return Err(TransferError::BodyTooLarge(opts.max_body_bytes));
        }
        if err.is_write_error() && head_verdict.get() == Some(false) {
            // rejected by the head filter; not a transport failure
        } else if err.is_operation_timedout() {
            return Err(TransferError::Timeout);
        } else if err.is_couldnt_connect() || err.is_couldnt_resolve_host() {
            return Err(TransferError::Connect);
        } else {
            return Err(TransferError::Curl(err));
        }
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(TransferError::HttpStatus(code));
    }

    let head = headers::parse_head(&header_lines.borrow());
    Ok(FetchedResource {
        head,
        body: body.into_inner(),
    })
}
