//! Caller identity extraction
//!
//! Authentication happens upstream; the proxy in front of this service
//! forwards the verified identity in request headers.

use axum::http::HeaderMap;

use crate::errors::{RecordError, RecordResult};
use crate::scope::{CallerContext, Privilege};

pub const USER_HEADER: &str = "x-caller-user";
pub const ORGANIZATION_HEADER: &str = "x-caller-organization";
pub const ROLE_HEADER: &str = "x-caller-role";

fn header<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .unwrap_or("")
}

/// Build the caller context; a request without an organization is
/// unauthenticated
pub fn extract_caller(headers: &HeaderMap) -> RecordResult<CallerContext> {
    let organization = header(headers, ORGANIZATION_HEADER);
    if organization.is_empty() {
        return Err(RecordError::Unauthenticated);
    }

    let privilege: Privilege = header(headers, ROLE_HEADER).parse()?;
    Ok(CallerContext::new(
        header(headers, USER_HEADER),
        organization,
        privilege,
    ))
}
