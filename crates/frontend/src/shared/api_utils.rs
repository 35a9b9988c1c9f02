//! API utilities for talking to the reporting API
//!
//! Provides helper functions for constructing API URLs.

/// Build a full API URL from the configured base and a path
///
/// # Arguments
/// * `base` - API base URL from `[api] base_url`, with or without trailing slash
/// * `path` - The API path (should start with "/")
///
/// # Example
/// ```ignore
/// let url = api_url("http://127.0.0.1:8000/", "/preventa");
/// assert_eq!(url, "http://127.0.0.1:8000/preventa");
/// ```
pub fn api_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}
