// Command-line interface

pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "recipe-finder")]
#[command(about = "Recipe Finder - browse, search and favorite recipes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search recipes, using the generative endpoint when configured
    Search {
        /// Free-text query
        query: String,

        /// Skip the generative endpoint and rank the local catalog
        #[arg(long)]
        local: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every recipe in the catalog
    List,

    /// Show a recipe in full
    Show {
        /// Recipe ID
        id: String,
    },

    /// Manage favorite recipes
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum FavoritesAction {
    /// List saved favorites
    List,

    /// Save a catalog recipe as a favorite
    Add {
        /// Recipe ID
        id: String,
    },

    /// Remove a favorite
    Remove {
        /// Recipe ID
        id: String,
    },
}
