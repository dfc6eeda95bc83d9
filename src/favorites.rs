use crate::catalog::Recipe;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Client-side set of favorite recipes, keyed by recipe id
pub trait FavoritesStore {
    fn list(&self) -> &[Recipe];

    fn contains(&self, recipe_id: &str) -> bool {
        self.list().iter().any(|r| r.id == recipe_id)
    }

    /// Add a recipe. Returns `false` when a recipe with the same id is already saved.
    fn add(&mut self, recipe: &Recipe) -> Result<bool>;

    /// Remove by id. Returns `false` when nothing was removed.
    fn remove(&mut self, recipe_id: &str) -> Result<bool>;
}

/// Favorites persisted as a JSON array of full recipe records.
///
/// Full records are stored so generated recipes, which are not part of the
/// catalog, survive a restart.
#[derive(Debug)]
pub struct JsonFileFavorites {
    path: PathBuf,
    favorites: Vec<Recipe>,
}

impl JsonFileFavorites {
    /// Open the store at `path`. A missing file is an empty set; an unreadable
    /// or corrupt file is logged and also treated as empty.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();

        let favorites = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<Recipe>>(&content) {
                Ok(favorites) => favorites,
                Err(e) => {
                    error!("Failed to load favorites from {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                error!("Failed to read favorites from {}: {}", path.display(), e);
                Vec::new()
            }
        };

        debug!("Loaded {} favorites from {:?}", favorites.len(), path);
        Self { path, favorites }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.favorites)?;
        fs::write(&self.path, content).map_err(|e| {
            Error::Favorites(format!(
                "Failed to write favorites to {}: {e}",
                self.path.display()
            ))
        })
    }
}

impl FavoritesStore for JsonFileFavorites {
    fn list(&self) -> &[Recipe] {
        &self.favorites
    }

    fn add(&mut self, recipe: &Recipe) -> Result<bool> {
        if self.contains(&recipe.id) {
            return Ok(false);
        }

        self.favorites.push(recipe.clone());
        self.persist()?;
        Ok(true)
    }

    fn remove(&mut self, recipe_id: &str) -> Result<bool> {
        let before = self.favorites.len();
        self.favorites.retain(|r| r.id != recipe_id);

        if self.favorites.len() == before {
            return Ok(false);
        }

        self.persist()?;
        Ok(true)
    }
}
