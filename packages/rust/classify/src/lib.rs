//! Keyword-signal classification of organizations into a coarse taxonomy.
//!
//! Categories and their keyword lists live in [`taxonomy`] as static data so
//! they can be extended without touching the scoring logic. Classification
//! is pure: name + website in, `(type, description)` out.

mod taxonomy;

use tracing::trace;

pub use taxonomy::{CATEGORIES, Category};

/// Maximum length of the exported category description.
const MAX_DESCRIPTION_LEN: usize = 50;

/// Weight for a keyword found in the organization name itself.
const NAME_HIT_WEIGHT: u32 = 3;

/// Weight for a keyword found only in the name+website blob.
const BLOB_HIT_WEIGHT: u32 = 1;

/// Classify an organization from its name and (optional) website.
///
/// Returns `(company_type, category_description)`. A missing name yields
/// `("Unknown", "No data")`; no keyword signal at all yields
/// `("Unknown", "Unclassified")`.
pub fn classify(name: &str, website: Option<&str>) -> (String, String) {
    if name.trim().is_empty() {
        return ("Unknown".into(), "No data".into());
    }

    let name_lower = name.to_lowercase();
    let website_lower = website.unwrap_or_default().to_lowercase();
    let blob = format!("{name_lower} {website_lower}");

    let mut best: Option<(&Category, u32)> = None;
    for category in CATEGORIES {
        let mut score = 0u32;
        for keyword in category.keywords {
            if name_lower.contains(keyword) {
                score += NAME_HIT_WEIGHT;
            } else if blob.contains(keyword) {
                score += BLOB_HIT_WEIGHT;
            }
        }
        trace!(category = category.name, score, "category score");

        // Strictly greater: ties break toward the first-declared category.
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((category, score));
        }
    }

    match best {
        Some((category, score)) if score > 0 => {
            let (company_type, description) = coarse_type(category.name);
            (company_type.into(), truncate(&description))
        }
        _ => ("Unknown".into(), "Unclassified".into()),
    }
}

/// Map a category name to its coarse type by suffix pattern.
///
/// Branch order is part of the contract: `* Provider` categories map to
/// "Hardware Provider" even when they are service-flavored, because the
/// Provider check precedes the Services check.
fn coarse_type(category_name: &str) -> (&'static str, String) {
    if category_name.contains("Publisher") {
        ("Publisher", category_name.replace(" Publisher", ""))
    } else if category_name.contains("Hardware") || category_name.contains("Provider") {
        (
            "Hardware Provider",
            category_name.replace(" Hardware", "").replace(" Provider", ""),
        )
    } else if category_name.contains("Services") {
        (
            "Service Provider",
            category_name.replace(" Services", "").replace(" Provider", ""),
        )
    } else {
        ("Other", category_name.to_string())
    }
}

fn truncate(description: &str) -> String {
    description.chars().take(MAX_DESCRIPTION_LEN).collect()
}
