pub mod models;

pub use models::{Difficulty, RankedRecipe, Recipe, Step};

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

/// Immutable, in-memory recipe collection loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    /// Build a catalog, rejecting records that break the data-model invariants
    pub fn new(recipes: Vec<Recipe>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(recipes.len());

        for recipe in &recipes {
            recipe
                .validate()
                .map_err(|e| Error::Catalog(e.to_string()))?;

            if !seen.insert(recipe.id.as_str()) {
                return Err(Error::Catalog(format!(
                    "Duplicate recipe id: {}",
                    recipe.id
                )));
            }
        }

        Ok(Self { recipes })
    }

    /// Parse a JSON array of recipes
    pub fn from_json(content: &str) -> Result<Self> {
        let recipes: Vec<Recipe> = serde_json::from_str(content)
            .map_err(|e| Error::Catalog(format!("Failed to parse recipe catalog: {e}")))?;
        Self::new(recipes)
    }

    /// Load catalog from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Catalog(format!("Failed to read catalog {}: {e}", path.display()))
        })?;

        let catalog = Self::from_json(&content)?;
        info!("Loaded {} recipes from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_RECIPES: &str = r#"[
        {
            "id": "a", "name": "红烧肉", "cuisine": "家常菜", "emoji": "🥩",
            "ingredients": ["五花肉"], "cookingTime": 90, "difficulty": "中等",
            "flavor": "咸甜", "description": "经典",
            "steps": [{"step": 1, "description": "焯水"}]
        },
        {
            "id": "b", "name": "拍黄瓜", "cuisine": "凉菜", "emoji": "🥒",
            "ingredients": ["黄瓜"], "cookingTime": 5, "difficulty": "simple",
            "flavor": "酸辣", "description": "爽口",
            "steps": [{"step": 1, "description": "拍碎"}],
            "tips": ["现拌现吃"]
        }
    ]"#;

    #[test]
    fn test_from_json_and_lookup() {
        let catalog = Catalog::from_json(TWO_RECIPES).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("b").unwrap().name, "拍黄瓜");
        assert_eq!(catalog.get("a").unwrap().difficulty, Difficulty::Medium);
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let dup = TWO_RECIPES.replace("\"id\": \"b\"", "\"id\": \"a\"");
        let err = Catalog::from_json(&dup).unwrap_err();
        assert!(err.to_string().contains("Duplicate recipe id"));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(Catalog::from_json("{\"not\": \"an array\"}").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Catalog::from_file("/nonexistent/recipes.json").unwrap_err();
        assert!(matches!(err, Error::Catalog(_)));
    }
}
