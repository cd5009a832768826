//! On-demand page revalidation
//!
//! A shared-secret token gates cache invalidation of rendered pages. The HTTP
//! layer maps [`RevalidateError`] to its status and body.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Path revalidated when the request names none
pub const DEFAULT_PATH: &str = "/";

/// Incoming revalidation request (token from the query, path from the body)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RevalidateRequest {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

/// Successful revalidation response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Revalidated {
    pub revalidated: bool,
    pub path: String,
    /// Unix time in milliseconds
    pub now: u64,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RevalidateError {
    #[error("Invalid token")]
    Unauthorized,
}

impl RevalidateError {
    pub fn status(&self) -> u16 {
        match self {
            RevalidateError::Unauthorized => 401,
        }
    }

    pub fn body(&self) -> Value {
        json!({ "message": self.to_string() })
    }
}

/// Check the token and resolve the path to invalidate
///
/// An unconfigured secret rejects every request.
pub fn revalidate(
    request: &RevalidateRequest,
    expected_token: Option<&str>,
    now_ms: u64,
) -> Result<Revalidated, RevalidateError> {
    let authorized = match (expected_token, request.token.as_deref()) {
        (Some(expected), Some(given)) => !expected.is_empty() && expected == given,
        _ => false,
    };
    if !authorized {
        log::warn!("Rejected revalidation request");
        return Err(RevalidateError::Unauthorized);
    }

    let path = match request.path.as_deref().map(str::trim) {
        None | Some("") => DEFAULT_PATH.to_string(),
        Some(p) if p.starts_with('/') => p.to_string(),
        Some(p) => format!("/{p}"),
    };
    log::info!("Revalidating {}", path);

    Ok(Revalidated {
        revalidated: true,
        path,
        now: now_ms,
    })
}
