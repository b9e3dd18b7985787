//! Official-site confidence scoring for a search candidate.
//!
//! An additive point system over a fixed rule table; the tables are data,
//! not tunables; they define behavioral parity with the selection
//! heuristic this replaces. Pure and deterministic: same inputs, same score.

/// Generic business-entity words stripped from the query before tokenizing.
const GENERIC_TERMS: &[&str] = &[
    "software", "hardware", "inc", "corp", "ltd", "llc", "sa", "srl", "gmbh", "ag",
];

/// TLDs that official company sites commonly use.
const PREFERRED_TLDS: &[&str] = &[".com", ".net", ".org", ".io", ".tech"];

/// Social/marketplace/reference platforms that are never an official site.
const PLATFORM_DENYLIST: &[&str] = &[
    "facebook.com",
    "twitter.com",
    "linkedin.com",
    "youtube.com",
    "instagram.com",
    "wikipedia.org",
    "crunchbase.com",
    "bloomberg.com",
    "reuters.com",
    "amazon.com",
    "ebay.com",
    "alibaba.com",
    "github.com",
];

/// Title words that mark a site as official.
const OFFICIAL_MARKERS: &[&str] = &["official", "homepage", "corporate", "company"];

/// Subdomain prefixes that point at support surfaces, not the main site.
const SUBDOMAIN_PENALTIES: &[&str] = &[
    "support.",
    "help.",
    "docs.",
    "forum.",
    "community.",
    "blog.",
];

/// Maximum number of `/` in a URL before the depth penalty applies.
/// `https://acme.com/about` sits exactly at the limit.
const MAX_URL_SLASHES: usize = 3;

/// Query tokens worth matching: generic terms removed, short words dropped.
fn query_tokens(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|w| !GENERIC_TERMS.contains(w))
        .filter(|w| w.len() > 2)
        .map(str::to_string)
        .collect()
}

/// Score a `(url, domain, title, snippet)` candidate against the query.
///
/// Returns an integer clamped to [0, 100]. The snippet is accepted for
/// interface stability but carries no scoring signal.
pub fn score_candidate(url: &str, domain: &str, title: &str, _snippet: &str, query: &str) -> i32 {
    let domain_lower = domain.to_lowercase();
    let title_lower = title.to_lowercase();
    let tokens = query_tokens(query);

    let mut score: i32 = 0;

    // Query token appears anywhere in the domain.
    for token in &tokens {
        if domain_lower.contains(token.as_str()) {
            score += 25;
        }
    }

    // Query token is a full domain label (acme.com, www.acme.com).
    if tokens
        .iter()
        .any(|t| domain_lower.starts_with(&format!("{t}.")) || domain_lower.contains(&format!(".{t}.")))
    {
        score += 40;
    }

    // Common commercial TLD.
    if PREFERRED_TLDS.iter().any(|tld| domain_lower.ends_with(tld)) {
        score += 15;
    }

    // Social/marketplace platforms are penalized once.
    if PLATFORM_DENYLIST
        .iter()
        .any(|platform| domain_lower.contains(platform))
    {
        score -= 30;
    }

    // "Official"-style markers in the title.
    if OFFICIAL_MARKERS.iter().any(|w| title_lower.contains(w)) {
        score += 10;
    }

    // Query tokens echoed in the title.
    let tokens_in_title = tokens.iter().filter(|t| title_lower.contains(t.as_str())).count();
    score += tokens_in_title as i32 * 5;

    // Support/docs subdomains are rarely the main site.
    if SUBDOMAIN_PENALTIES
        .iter()
        .any(|sub| domain_lower.contains(sub))
    {
        score -= 10;
    }

    // Deep paths are penalized, except client-side-routed apps (`/#/`).
    if url.matches('/').count() > MAX_URL_SLASHES && !url.contains("/#/") {
        score -= 5;
    }

    // Secure scheme.
    if url.starts_with("https://") {
        score += 5;
    }

    score.clamp(0, 100)
}
