//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the API server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Join a collection URL and a path segment, escaping the segment
///
/// # Example
/// ```rust,ignore
/// let url = item_url("http://localhost:3000/bp/products", "trj crd");
/// assert_eq!(url, "http://localhost:3000/bp/products/trj%20crd");
/// ```
pub fn item_url(collection_url: &str, segment: &str) -> String {
    format!(
        "{}/{}",
        collection_url.trim_end_matches('/'),
        urlencoding::encode(segment)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_url_escapes_segment() {
        assert_eq!(
            item_url("http://localhost:3000/bp/products/", "trj crd"),
            "http://localhost:3000/bp/products/trj%20crd"
        );
        assert_eq!(
            item_url("/bp/products", "verification"),
            "/bp/products/verification"
        );
    }
}
