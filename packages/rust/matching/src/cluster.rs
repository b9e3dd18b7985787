//! Fuzzy-duplicate clustering over normalized organization names.

use strsim::normalized_levenshtein;
use tracing::debug;

use sitescout_shared::DuplicateGroup;

/// Default similarity threshold on a 0–1 scale.
pub const DEFAULT_THRESHOLD: f64 = 0.85;

/// Similarity between two normalized names, 0.0–1.0.
///
/// Normalized Levenshtein is deterministic and symmetric, which the
/// clustering contract requires.
pub fn similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b)
}

/// Group records whose normalized names are similar at or above `threshold`.
///
/// Greedy, input-order pass: each unassigned index seeds a group and
/// gathers every later unassigned record clearing the threshold against the
/// seed. Assigned members are never reconsidered as seeds, so groups come
/// out disjoint. Records with empty normalized names never cluster, and
/// singletons produce no group.
pub fn find_duplicate_groups(normalized_names: &[String], threshold: f64) -> Vec<DuplicateGroup> {
    let mut groups: Vec<DuplicateGroup> = Vec::new();
    let mut assigned = vec![false; normalized_names.len()];

    for seed in 0..normalized_names.len() {
        if assigned[seed] || normalized_names[seed].is_empty() {
            continue;
        }

        let mut members = vec![seed];

        for other in seed + 1..normalized_names.len() {
            if assigned[other] || normalized_names[other].is_empty() {
                continue;
            }

            if similarity(&normalized_names[seed], &normalized_names[other]) >= threshold {
                members.push(other);
                assigned[other] = true;
            }
        }

        if members.len() > 1 {
            assigned[seed] = true;
            let label = format!("Group_{}", groups.len() + 1);
            debug!(%label, members = members.len(), name = %normalized_names[seed], "duplicate group");
            groups.push(DuplicateGroup { label, members });
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter()
            .map(|n| crate::normalize_name(n))
            .collect()
    }

    #[test]
    fn near_identical_names_cluster() {
        let names = names(&["Acme Inc", "Acme Corporation", "Globex Ltd"]);
        let groups = find_duplicate_groups(&names, DEFAULT_THRESHOLD);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "Group_1");
        assert_eq!(groups[0].members, vec![0, 1]);
    }

    #[test]
    fn dissimilar_names_never_cluster() {
        let names = names(&["Acme Inc", "Globex Ltd", "Initech LLC"]);
        let groups = find_duplicate_groups(&names, DEFAULT_THRESHOLD);
        assert!(groups.is_empty());
    }

    #[test]
    fn groups_are_disjoint() {
        let names = names(&[
            "Acme Inc",
            "Acme Corp",
            "Acme Co",
            "Globex Software",
            "Globex Systems",
        ]);
        let groups = find_duplicate_groups(&names, DEFAULT_THRESHOLD);

        assert_eq!(groups.len(), 2);
        let mut seen = std::collections::HashSet::new();
        for group in &groups {
            for &idx in &group.members {
                assert!(seen.insert(idx), "index {idx} appears in two groups");
            }
        }
    }

    #[test]
    fn empty_names_never_cluster() {
        let names = vec![String::new(), String::new(), "acme".to_string()];
        let groups = find_duplicate_groups(&names, DEFAULT_THRESHOLD);
        assert!(groups.is_empty());
    }

    #[test]
    fn threshold_is_inclusive() {
        // "abcd" vs "abcx": distance 1 over length 4 → similarity 0.75.
        let names = vec!["abcd".to_string(), "abcx".to_string()];
        assert!(find_duplicate_groups(&names, 0.75).len() == 1);
        assert!(find_duplicate_groups(&names, 0.76).is_empty());
    }

    #[test]
    fn similarity_is_symmetric() {
        let a = "acme interactive";
        let b = "acme interactiv";
        assert_eq!(similarity(a, b), similarity(b, a));
    }

    #[test]
    fn group_labels_follow_discovery_order() {
        let names = names(&[
            "Zeta Works",
            "Zeta Workz",
            "Alpha Labs",
            "Alpha Lab",
        ]);
        let groups = find_duplicate_groups(&names, DEFAULT_THRESHOLD);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "Group_1");
        assert_eq!(groups[0].members, vec![0, 1]);
        assert_eq!(groups[1].label, "Group_2");
        assert_eq!(groups[1].members, vec![2, 3]);
    }
}
