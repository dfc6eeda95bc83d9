pub mod catalog;
pub mod config;
pub mod error;

// Search pipeline
pub mod search;

// Client-side favorites
pub mod favorites;

pub mod cli;

// Utilities
pub mod utils;

// Re-exports
pub use catalog::{Catalog, RankedRecipe, Recipe};
pub use config::Settings;
pub use error::{Error, Result};
pub use search::{QueryResolver, SearchResults};
