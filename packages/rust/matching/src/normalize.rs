//! Organization-name canonicalization for comparison.

/// Legal-entity and filler tokens stripped from names before comparison.
///
/// Whole-word matches only: "Incredible" keeps its "inc" prefix. Covers the
/// common English corporate suffixes plus the European legal forms (GmbH,
/// AG, SA, SRL, SpA, BV, NV, Oy, AB, AS).
const CORPORATE_SUFFIXES: &[&str] = &[
    "inc",
    "corp",
    "corporation",
    "ltd",
    "limited",
    "llc",
    "llp",
    "lp",
    "co",
    "company",
    "enterprises",
    "group",
    "holding",
    "international",
    "global",
    "worldwide",
    "systems",
    "solutions",
    "software",
    "technologies",
    "technology",
    "tech",
    "services",
    "consulting",
    "digital",
    "media",
    "studios",
    "games",
    "entertainment",
    "publishing",
    "publishers",
    "hardware",
    "computers",
    "computing",
    "gmbh",
    "ag",
    "sa",
    "srl",
    "spa",
    "bv",
    "nv",
    "oy",
    "ab",
    "as",
];

/// Canonicalize an organization name for similarity comparison.
///
/// Lowercases, replaces every non-alphanumeric character with a space,
/// drops corporate-suffix tokens, and collapses whitespace. Empty or
/// whitespace-only input yields an empty string; the function never fails.
pub fn normalize_name(raw: &str) -> String {
    let lowered = raw.to_lowercase();

    let tokens: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .filter(|t| !CORPORATE_SUFFIXES.contains(t))
        .collect();

    tokens.join(" ")
}
