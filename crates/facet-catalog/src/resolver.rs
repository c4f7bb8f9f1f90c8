//! Selection resolution: tokens → validated aspect ids.

use std::collections::HashSet;

use facet_core::{Error, Result};

use crate::catalog::AspectCatalog;

/// Resolves a comma-separated selection of aspect ids and group names into
/// an ordered, deduplicated list of validated aspect ids.
///
/// Group tokens expand to their members in declared order; anything else
/// passes through as a literal id. Duplicates keep their first occurrence.
/// The resolved list is used unchanged for every entry attached in the run.
///
/// # Errors
///
/// - `Error::Config` when the selection contains no tokens.
/// - `Error::UnknownAspects` when any expanded id is not defined, listing
///   every offending id at once. Nothing is partially resolved.
pub fn resolve_selection(catalog: &AspectCatalog, selection: &str) -> Result<Vec<String>> {
    let tokens: Vec<&str> = selection
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.is_empty() {
        return Err(Error::config(
            "aspect selection is empty; provide at least one aspect or group",
        ));
    }

    let mut expanded = Vec::new();
    for token in tokens {
        if let Some(members) = catalog.group(token) {
            expanded.extend(members.iter().cloned());
        } else {
            expanded.push(token.to_string());
        }
    }

    let mut seen = HashSet::new();
    expanded.retain(|id| seen.insert(id.clone()));

    let unknown: Vec<String> = expanded
        .iter()
        .filter(|id| !catalog.contains(id))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(Error::UnknownAspects {
            ids: unknown,
            available: catalog.definition_ids().map(str::to_string).collect(),
        });
    }

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> AspectCatalog {
        AspectCatalog::from_document(json!({
            "ownership": {},
            "classification": {},
            "quality": {},
            "retention": {},
            "groups": {
                "mandatory": ["ownership", "classification"],
                "governance": ["classification", "retention"]
            }
        }))
        .unwrap()
    }

    #[test]
    fn expands_groups_in_declared_order() {
        let resolved = resolve_selection(&catalog(), "mandatory").unwrap();
        assert_eq!(resolved, ["ownership", "classification"]);
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        // "ownership" arrives once via the group and once literally.
        let resolved = resolve_selection(&catalog(), "mandatory,ownership").unwrap();
        assert_eq!(resolved, ["ownership", "classification"]);

        // Overlapping groups dedup the shared member at its first position.
        let resolved = resolve_selection(&catalog(), "mandatory,governance").unwrap();
        assert_eq!(resolved, ["ownership", "classification", "retention"]);
    }

    #[test]
    fn literal_ids_pass_through() {
        let resolved = resolve_selection(&catalog(), "quality, retention").unwrap();
        assert_eq!(resolved, ["quality", "retention"]);
    }

    #[test]
    fn empty_selection_is_a_config_error() {
        for selection in ["", "  ", ",,", " , "] {
            let err = resolve_selection(&catalog(), selection).unwrap_err();
            assert!(matches!(err, Error::Config { .. }), "for {selection:?}");
        }
    }

    #[test]
    fn unknown_ids_fail_closed_and_are_all_reported() {
        let err = resolve_selection(&catalog(), "ownership,ghost,phantom").unwrap_err();
        match err {
            Error::UnknownAspects { ids, available } => {
                assert_eq!(ids, ["ghost", "phantom"]);
                assert_eq!(
                    available,
                    ["ownership", "classification", "quality", "retention"]
                );
            }
            other => panic!("expected UnknownAspects, got {other:?}"),
        }
    }

    #[test]
    fn unknown_group_member_fails_the_whole_selection() {
        let catalog = AspectCatalog::from_document(json!({
            "ownership": {},
            "groups": {"mandatory": ["ownership", "ghost"]}
        }))
        .unwrap();
        let err = resolve_selection(&catalog, "mandatory").unwrap_err();
        assert!(matches!(err, Error::UnknownAspects { ids, .. } if ids == ["ghost"]));
    }

    #[test]
    fn group_names_are_not_attachable_ids() {
        // A group name is only meaningful as a token; expansion never leaves
        // the name itself in the resolved list.
        let resolved = resolve_selection(&catalog(), "governance").unwrap();
        assert!(!resolved.contains(&"governance".to_string()));
    }
}
