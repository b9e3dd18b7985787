//! Fuzzy column resolution by header keyword match.

/// Header fragments that mark a column as the organization name.
/// Includes the Spanish variants the input sheets commonly use.
pub const NAME_COLUMN_KEYWORDS: &[&str] = &["company", "name", "publisher", "empresa", "nombre"];

/// Header fragments that mark a column as the website.
pub const WEBSITE_COLUMN_KEYWORDS: &[&str] = &["website", "url", "site", "web", "sitio"];

/// Resolve the name and website columns from the header row.
///
/// First header containing a name keyword wins; a header claimed as the
/// name column is never also the website column. Falls back to the first
/// column as the name when nothing matches.
pub fn resolve_columns(headers: &[String]) -> (usize, Option<usize>) {
    let mut name_col: Option<usize> = None;
    let mut website_col: Option<usize> = None;

    for (idx, header) in headers.iter().enumerate() {
        let lower = header.to_lowercase();
        if NAME_COLUMN_KEYWORDS.iter().any(|k| lower.contains(k)) {
            if name_col.is_none() {
                name_col = Some(idx);
            }
        } else if WEBSITE_COLUMN_KEYWORDS.iter().any(|k| lower.contains(k))
            && website_col.is_none()
        {
            website_col = Some(idx);
        }
    }

    (name_col.unwrap_or(0), website_col)
}
