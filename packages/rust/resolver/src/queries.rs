//! Search-query generation for an organization name.

/// Build the query ladder for one organization.
///
/// Ordered from most to least specific; the orchestrator submits only the
/// first few (provider quota is the scarce resource here).
pub fn build_queries(name: &str) -> Vec<String> {
    let name = name.trim();
    vec![
        format!("\"{name}\" official website"),
        format!("{name} official site"),
        format!("{name} homepage"),
        format!("{name} company website"),
        format!("{name} software company"),
        format!("{name} technology company"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_query_is_quoted_exact_phrase() {
        let queries = build_queries("  Acme Interactive ");
        assert_eq!(queries[0], "\"Acme Interactive\" official website");
        assert_eq!(queries.len(), 6);
    }
}
