//! The aspect catalog: payload templates and named groups.

use indexmap::IndexMap;
use serde_json::Value;

use facet_core::{Error, Result};

/// Reserved top-level key holding the group definitions.
pub const GROUPS_KEY: &str = "groups";

/// An immutable catalog of aspect definitions and aspect groups.
///
/// Loaded once at startup and read-only for the rest of the run. Definition
/// and group order follow the source document.
#[derive(Debug, Clone, Default)]
pub struct AspectCatalog {
    definitions: IndexMap<String, Value>,
    groups: IndexMap<String, Vec<String>>,
}

impl AspectCatalog {
    /// Builds a catalog from the one-document form: every top-level key is
    /// an aspect definition except [`GROUPS_KEY`], which maps group names to
    /// member id lists.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` when the document is not an object or
    /// the group definitions are not string lists. Group members are *not*
    /// validated here; unknown members surface during selection resolution.
    pub fn from_document(document: Value) -> Result<Self> {
        let Value::Object(entries) = document else {
            return Err(Error::serialization(
                "aspect catalog must be a JSON object",
            ));
        };

        let mut definitions = IndexMap::new();
        let mut groups = IndexMap::new();

        for (key, value) in entries {
            if key == GROUPS_KEY {
                groups = parse_groups(value)?;
            } else {
                definitions.insert(key, value);
            }
        }

        Ok(Self {
            definitions,
            groups,
        })
    }

    /// Parses a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` when the text is not valid JSON or the
    /// document shape is wrong.
    pub fn from_json(text: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(text)
            .map_err(|e| Error::serialization(format!("invalid aspect catalog JSON: {e}")))?;
        Self::from_document(document)
    }

    /// Returns the payload template of an aspect, if defined.
    #[must_use]
    pub fn definition(&self, aspect_id: &str) -> Option<&Value> {
        self.definitions.get(aspect_id)
    }

    /// Returns the member ids of a group, if defined.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&[String]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    /// Returns true if an aspect id is defined.
    #[must_use]
    pub fn contains(&self, aspect_id: &str) -> bool {
        self.definitions.contains_key(aspect_id)
    }

    /// Returns the defined aspect ids in document order.
    pub fn definition_ids(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    /// Returns the number of defined aspects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns true when no aspects are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn parse_groups(value: Value) -> Result<IndexMap<String, Vec<String>>> {
    let Value::Object(entries) = value else {
        return Err(Error::serialization(
            "aspect catalog `groups` must be a JSON object",
        ));
    };

    let mut groups = IndexMap::new();
    for (name, members) in entries {
        let Value::Array(members) = members else {
            return Err(Error::serialization(format!(
                "aspect group `{name}` must be a list of aspect ids"
            )));
        };
        let members = members
            .into_iter()
            .map(|member| match member {
                Value::String(id) => Ok(id),
                other => Err(Error::serialization(format!(
                    "aspect group `{name}` contains a non-string member: {other}"
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        groups.insert(name, members);
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> AspectCatalog {
        AspectCatalog::from_document(json!({
            "ownership": {"owner": "", "team": ""},
            "classification": {"level": "internal"},
            "groups": {
                "mandatory": ["ownership", "classification"]
            }
        }))
        .unwrap()
    }

    #[test]
    fn groups_key_is_not_a_definition() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.contains(GROUPS_KEY));
        assert!(catalog.contains("ownership"));
        assert_eq!(
            catalog.group("mandatory"),
            Some(&["ownership".to_string(), "classification".to_string()][..])
        );
    }

    #[test]
    fn definition_order_follows_the_document() {
        let catalog = catalog();
        let ids: Vec<_> = catalog.definition_ids().collect();
        assert_eq!(ids, ["ownership", "classification"]);
    }

    #[test]
    fn rejects_non_object_document() {
        let err = AspectCatalog::from_document(json!(["ownership"])).unwrap_err();
        assert!(matches!(err, Error::Serialization { .. }));
    }

    #[test]
    fn rejects_malformed_group() {
        let err = AspectCatalog::from_document(json!({
            "ownership": {},
            "groups": {"mandatory": "ownership"}
        }))
        .unwrap_err();
        assert!(matches!(err, Error::Serialization { .. }));

        let err = AspectCatalog::from_document(json!({
            "ownership": {},
            "groups": {"mandatory": [1, 2]}
        }))
        .unwrap_err();
        assert!(matches!(err, Error::Serialization { .. }));
    }

    #[test]
    fn unknown_group_members_load_fine() {
        // Validation is the resolver's job, matching fail-closed semantics
        // at selection time rather than load time.
        let catalog = AspectCatalog::from_document(json!({
            "ownership": {},
            "groups": {"mandatory": ["ownership", "ghost"]}
        }))
        .unwrap();
        assert_eq!(catalog.group("mandatory").unwrap().len(), 2);
    }
}
