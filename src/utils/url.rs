//! URL utilities shared by the provider store and the navigation path.

use url::Url;

/// Whether `input` is an absolute `http` or `https` URL.
///
/// This gates every provider URL accepted into the store and every
/// navigation request coming from a UI surface. Relative references and
/// any other scheme (`file`, `javascript`, `ftp`, ...) are rejected.
///
/// # Examples
///
/// ```
/// use chatdock::utils::url::is_valid_url;
///
/// assert!(is_valid_url("https://claude.ai/"));
/// assert!(is_valid_url("http://localhost:8080/chat"));
/// assert!(!is_valid_url("ftp://x"));
/// assert!(!is_valid_url("/relative/path"));
/// ```
pub fn is_valid_url(input: &str) -> bool {
    match Url::parse(input.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
