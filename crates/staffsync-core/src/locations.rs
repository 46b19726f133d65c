//! Company location records and the snapshot diff.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// The company that owns a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRef {
    pub id: String,
    pub name: String,
}

/// A B2B company location as returned by the Admin API.
///
/// `id` is the Shopify GID (`gid://shopify/CompanyLocation/...`). It never
/// changes once issued and is the only field compared when diffing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: String,
    pub name: String,
    pub company: CompanyRef,
}

/// Returns the records in `remote` whose `id` does not appear in `stored`.
///
/// Output preserves the order of `remote`. Only ids are compared, so a
/// location that was renamed or moved to another company is not reported.
#[must_use]
pub fn detect_new_locations(
    remote: &[LocationRecord],
    stored: &[LocationRecord],
) -> Vec<LocationRecord> {
    let stored_ids: HashSet<&str> = stored.iter().map(|loc| loc.id.as_str()).collect();
    remote
        .iter()
        .filter(|loc| !stored_ids.contains(loc.id.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(id: &str, name: &str) -> LocationRecord {
        LocationRecord {
            id: format!("gid://shopify/CompanyLocation/{id}"),
            name: name.to_string(),
            company: CompanyRef {
                id: "gid://shopify/Company/1".to_string(),
                name: "Acme".to_string(),
            },
        }
    }

    #[test]
    fn returns_only_unseen_ids() {
        let remote = vec![loc("1", "North"), loc("2", "South")];
        let stored = vec![loc("1", "North")];

        let new = detect_new_locations(&remote, &stored);

        assert_eq!(new, vec![loc("2", "South")]);
    }

    #[test]
    fn empty_snapshot_reports_everything_in_remote_order() {
        let remote = vec![loc("3", "C"), loc("1", "A"), loc("2", "B")];
        let new = detect_new_locations(&remote, &[]);
        assert_eq!(new, remote);
    }

    #[test]
    fn empty_remote_reports_nothing() {
        let stored = vec![loc("1", "A")];
        assert!(detect_new_locations(&[], &stored).is_empty());
    }

    #[test]
    fn renamed_location_is_not_new() {
        let remote = vec![loc("1", "Renamed")];
        let stored = vec![loc("1", "Original")];
        assert!(detect_new_locations(&remote, &stored).is_empty());
    }

    #[test]
    fn moved_to_other_company_is_not_new() {
        let mut moved = loc("1", "A");
        moved.company.id = "gid://shopify/Company/99".to_string();
        assert!(detect_new_locations(&[moved], &[loc("1", "A")]).is_empty());
    }

    #[test]
    fn repeated_calls_are_identical() {
        let remote = vec![loc("5", "E"), loc("4", "D"), loc("1", "A"), loc("6", "F")];
        let stored = vec![loc("1", "A"), loc("2", "B")];

        let first = detect_new_locations(&remote, &stored);
        let second = detect_new_locations(&remote, &stored);

        assert_eq!(first, second);
        let ids: Vec<&str> = first.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "gid://shopify/CompanyLocation/5",
                "gid://shopify/CompanyLocation/4",
                "gid://shopify/CompanyLocation/6",
            ]
        );
    }

    #[test]
    fn never_returns_a_stored_id() {
        let remote: Vec<LocationRecord> = (0..50).map(|i| loc(&i.to_string(), "x")).collect();
        let stored: Vec<LocationRecord> = (0..50)
            .filter(|i| i % 3 == 0)
            .map(|i| loc(&i.to_string(), "x"))
            .collect();

        let new = detect_new_locations(&remote, &stored);

        assert_eq!(new.len(), 33);
        for record in &new {
            assert!(
                !stored.iter().any(|s| s.id == record.id),
                "{} is in the snapshot but was reported as new",
                record.id
            );
        }
    }

    #[test]
    fn deserializes_graphql_node_shape() {
        let node = serde_json::json!({
            "id": "gid://shopify/CompanyLocation/7",
            "name": "Warehouse",
            "company": { "id": "gid://shopify/Company/3", "name": "Globex" }
        });
        let record: LocationRecord = serde_json::from_value(node).expect("parse");
        assert_eq!(record.id, "gid://shopify/CompanyLocation/7");
        assert_eq!(record.company.name, "Globex");
    }
}
