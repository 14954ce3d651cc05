//! Read-only item and skill catalogs that scripts are resolved against.
//!
//! Catalogs are built once and then shared immutably between parse passes.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Canonical catalog entry for an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u16,
    pub name: String,
}

/// A validated reference to a catalog item, as stored in parsed documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: u16,
    pub name: String,
}

impl From<&Item> for ItemRef {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemCatalog {
    items: BTreeMap<u16, Item>,
}

impl ItemCatalog {
    /// Build a catalog; a later entry with the same id replaces an earlier one.
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            items: items.into_iter().map(|item| (item.id, item)).collect(),
        }
    }

    pub fn resolve(&self, id: u16) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub group: Option<String>,
}

/// Skills keyed by lowercase name; lookups ignore ASCII case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillCatalog {
    skills: HashMap<String, Skill>,
}

impl SkillCatalog {
    pub fn new(skills: impl IntoIterator<Item = Skill>) -> Self {
        Self {
            skills: skills
                .into_iter()
                .map(|skill| (skill.name.to_ascii_lowercase(), skill))
                .collect(),
        }
    }

    pub fn resolve(&self, name: &str) -> Option<&Skill> {
        self.skills.get(&name.trim().to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u16, name: &str) -> Item {
        Item {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn items_resolve_by_id() {
        let catalog = ItemCatalog::new([item(42, "sword"), item(7, "apple")]);
        assert_eq!(catalog.resolve(42).map(|i| i.name.as_str()), Some("sword"));
        assert!(catalog.resolve(43).is_none());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn later_items_replace_earlier_ones() {
        let catalog = ItemCatalog::new([item(1, "old"), item(1, "new")]);
        assert_eq!(catalog.resolve(1).map(|i| i.name.as_str()), Some("new"));
    }

    #[test]
    fn skills_resolve_ignoring_case() {
        let catalog = SkillCatalog::new([Skill {
            name: "Mining".into(),
            group: None,
        }]);
        assert_eq!(catalog.resolve("MINING").map(|s| s.name.as_str()), Some("Mining"));
        assert!(catalog.resolve("fishing").is_none());
    }
}
