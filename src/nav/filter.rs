//! Link binding policy.
//!
//! Decides which anchors get instant-navigation handlers. Rules are applied
//! in a fixed order; the first match skips the link and names why, so skip
//! decisions can be logged and asserted on.

use url::Url;

/// Why a link was left to native navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Empty or missing href
    Empty,
    /// `mailto:` or `tel:` scheme
    MailOrTel,
    /// Different origin than the current page
    CrossOrigin,
    /// URL contains a fragment marker
    Fragment,
    /// `javascript:` pseudo-scheme
    ScriptScheme,
    /// URL path contains the admin prefix
    Admin,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SkipReason::Empty => "empty href",
            SkipReason::MailOrTel => "mailto/tel scheme",
            SkipReason::CrossOrigin => "cross-origin",
            SkipReason::Fragment => "fragment",
            SkipReason::ScriptScheme => "javascript scheme",
            SkipReason::Admin => "admin path",
        };
        f.write_str(s)
    }
}

/// Whether the user agent belongs to a mobile device. Preloading is not
/// worth the cost without hover, so the whole mechanism stays off there.
pub fn is_mobile_agent(user_agent: &str) -> bool {
    user_agent.contains("Mobi") || user_agent.contains("Android")
}

/// Resolve a potentially relative href against the current page URL.
pub fn resolve_url(base: &Url, href: &str) -> Option<String> {
    if href.starts_with("//") {
        return Url::parse(&format!("{}:{}", base.scheme(), href))
            .ok()
            .map(|u| u.to_string());
    }
    base.join(href).ok().map(|u| u.to_string())
}

/// Apply the exclusion rules to a raw href. Returns the absolute URL a
/// handler should be bound to, or the first matching [`SkipReason`].
pub fn evaluate(base: &Url, href: &str, admin_prefix: &str) -> Result<String, SkipReason> {
    let trimmed = href.trim();

    // 1. empty/missing URL
    if trimmed.is_empty() {
        return Err(SkipReason::Empty);
    }

    let lower = trimmed.to_lowercase();

    // 2. mail/tel schemes
    if lower.starts_with("mailto:") || lower.starts_with("tel:") {
        return Err(SkipReason::MailOrTel);
    }

    // 3. cross-origin absolute URLs (javascript: is rule 5, not an origin)
    if let Ok(abs) = Url::parse(trimmed) {
        if abs.scheme() != "javascript" && abs.origin() != base.origin() {
            return Err(SkipReason::CrossOrigin);
        }
    }

    // 4. fragments (anywhere in the href, matching the observed behavior)
    if trimmed.contains('#') {
        return Err(SkipReason::Fragment);
    }

    // 5. javascript: pseudo-scheme
    if lower.starts_with("javascript:") {
        return Err(SkipReason::ScriptScheme);
    }

    let resolved = resolve_url(base, trimmed).ok_or(SkipReason::Empty)?;
    let parsed = Url::parse(&resolved).map_err(|_| SkipReason::Empty)?;

    // Protocol-relative hrefs only reveal their origin after resolution
    if parsed.origin() != base.origin() {
        return Err(SkipReason::CrossOrigin);
    }

    // 6. admin panel stays on native navigation
    if parsed.path().contains(admin_prefix) {
        return Err(SkipReason::Admin);
    }

    Ok(resolved)
}
