//! Loading item and skill catalogs from TOML files.
//!
//! ```toml
//! [[items]]
//! id = 2763
//! name = "pick-axe"
//!
//! [[skills]]
//! name = "mining"
//! group = "crafting"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use easynpc_data::{Item, ItemCatalog, Skill, SkillCatalog};
use log::info;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("reading catalog '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing catalog '{path}': {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("duplicate item id {0} in catalog")]
    DuplicateItem(u16),
}

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    items: Vec<Item>,
    #[serde(default)]
    skills: Vec<Skill>,
}

/// Parse an item catalog from TOML text. Duplicate ids are rejected.
pub fn parse_item_catalog(text: &str) -> Result<ItemCatalog, CatalogError> {
    let file = parse_file(text, Path::new("<inline>"))?;
    build_items(file.items)
}

pub fn parse_skill_catalog(text: &str) -> Result<SkillCatalog, CatalogError> {
    let file = parse_file(text, Path::new("<inline>"))?;
    Ok(SkillCatalog::new(file.skills))
}

/// Load the `[[items]]` tables of a catalog file.
pub fn load_item_catalog(path: &Path) -> Result<ItemCatalog, CatalogError> {
    let file = read_file(path)?;
    let catalog = build_items(file.items)?;
    info!("{} items loaded from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Load the `[[skills]]` tables of a catalog file.
pub fn load_skill_catalog(path: &Path) -> Result<SkillCatalog, CatalogError> {
    let file = read_file(path)?;
    let catalog = SkillCatalog::new(file.skills);
    info!("{} skills loaded from {}", catalog.len(), path.display());
    Ok(catalog)
}

fn read_file(path: &Path) -> Result<CatalogFile, CatalogError> {
    let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_file(&text, path)
}

fn parse_file(text: &str, path: &Path) -> Result<CatalogFile, CatalogError> {
    toml::from_str(text).map_err(|source| CatalogError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

fn build_items(items: Vec<Item>) -> Result<ItemCatalog, CatalogError> {
    let mut seen = std::collections::HashSet::new();
    for item in &items {
        if !seen.insert(item.id) {
            return Err(CatalogError::DuplicateItem(item.id));
        }
    }
    Ok(ItemCatalog::new(items))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn items_and_skills_share_one_file_format() {
        let text = r#"
[[items]]
id = 42
name = "sword"

[[items]]
id = 7
name = "apple"

[[skills]]
name = "Mining"
"#;
        let items = parse_item_catalog(text).expect("items parse");
        let skills = parse_skill_catalog(text).expect("skills parse");
        assert_eq!(items.len(), 2);
        assert_eq!(items.resolve(7).map(|i| i.name.as_str()), Some("apple"));
        assert!(skills.resolve("mining").is_some());
    }

    #[test]
    fn duplicate_item_ids_are_rejected() {
        let text = "[[items]]\nid = 1\nname = \"a\"\n[[items]]\nid = 1\nname = \"b\"\n";
        let err = parse_item_catalog(text).expect_err("duplicate id");
        assert!(matches!(err, CatalogError::DuplicateItem(1)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[[items]]\nid = 2763\nname = \"pick-axe\"").expect("write catalog");
        let catalog = load_item_catalog(file.path()).expect("load catalog");
        assert_eq!(catalog.resolve(2763).map(|i| i.name.as_str()), Some("pick-axe"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_skill_catalog(Path::new("/definitely/not/here.toml")).expect_err("missing file");
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
