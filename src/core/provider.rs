//! Provider records, id generation, and the tab matching policy.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

/// Maximum length of the label-derived part of a generated id.
pub const SLUG_MAX_LEN: usize = 20;
const SLUG_FALLBACK: &str = "prov";
const SUFFIX_LEN: usize = 5;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub label: String,
    pub url: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub pinned: bool,
}

/// Lowercase the label and collapse every run of non-alphanumeric
/// characters into a single `-`.
///
/// # Examples
///
/// ```
/// use chatdock::core::provider::slugify;
///
/// assert_eq!(slugify("My Bot"), "my-bot");
/// assert_eq!(slugify("  Perplexity.ai!! "), "perplexity-ai");
/// assert_eq!(slugify("???"), "prov");
/// ```
pub fn slugify(label: &str) -> String {
    let mut slug = String::new();
    let mut pending_separator = false;

    for c in label.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    // ASCII only, so byte truncation is safe
    slug.truncate(SLUG_MAX_LEN);
    let slug = slug.trim_end_matches('-');

    if slug.is_empty() {
        SLUG_FALLBACK.to_string()
    } else {
        slug.to_string()
    }
}

fn random_suffix(attempt: u32) -> String {
    let mut bytes = [0u8; SUFFIX_LEN];
    if let Err(err) = getrandom::fill(&mut bytes) {
        warn!(error = %err, "system randomness unavailable, using clock-derived id suffix");
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let mut seed = nanos ^ u128::from(attempt).rotate_left(64);
        for byte in bytes.iter_mut() {
            *byte = (seed % 251) as u8;
            seed /= 251;
        }
    }

    bytes
        .iter()
        .map(|b| BASE36[usize::from(*b) % BASE36.len()] as char)
        .collect()
}

/// Generate an id of the form `<slug>-<suffix>` that is absent from `taken`.
pub fn generate_id(label: &str, taken: &HashSet<String>) -> String {
    let slug = slugify(label);
    let mut attempt = 0u32;
    loop {
        let candidate = format!("{slug}-{}", random_suffix(attempt));
        if !taken.contains(&candidate) {
            return candidate;
        }
        attempt = attempt.wrapping_add(1);
    }
}

/// Whether a tab configured with `tab_url` should be highlighted while the
/// content surface shows `active_url`.
///
/// Matching is by containment rather than equality so that deep links into
/// a site (conversation pages, query strings) keep its tab active.
pub fn tab_matches(tab_url: &str, active_url: &str) -> bool {
    if tab_url.is_empty() {
        return false;
    }
    active_url.starts_with(tab_url) || active_url.contains(tab_url)
}

/// First provider, in collection order, whose tab matches `active_url`.
pub fn active_provider<'a>(providers: &'a [Provider], active_url: &str) -> Option<&'a Provider> {
    providers.iter().find(|p| tab_matches(&p.url, active_url))
}
