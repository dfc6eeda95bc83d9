use crate::catalog::{Catalog, Recipe};
use crate::favorites::FavoritesStore;
use crate::search::{QueryResolver, SearchResults};
use crate::utils::sanitize::truncate;
use crate::utils::validation::validate_recipe_id;
use crate::{Error, Result};

/// Search for recipes and print them
pub async fn search(resolver: &QueryResolver, query: &str, local: bool, json: bool) -> Result<()> {
    let results = if local {
        resolver.search_local(query)
    } else {
        resolver.search(query).await
    };

    if json {
        let rendered = match &results {
            SearchResults::Generated(recipes) => serde_json::to_string_pretty(recipes)?,
            SearchResults::Ranked { recipes, .. } => serde_json::to_string_pretty(recipes)?,
        };
        println!("{rendered}");
        return Ok(());
    }

    print_search_results(&results);
    Ok(())
}

/// Print the whole catalog
pub fn list(catalog: &Catalog) {
    println!("\n{} recipes in catalog:\n", catalog.len());
    print_recipe_table(catalog.recipes().iter());
}

/// Print one recipe with its steps
pub fn show(catalog: &Catalog, id: &str) -> Result<()> {
    let id = validate_recipe_id(id)?;
    let recipe = catalog
        .get(id)
        .ok_or_else(|| Error::NotFound(format!("Recipe {id} not found")))?;

    print_recipe_detail(recipe);
    Ok(())
}

pub fn list_favorites(store: &impl FavoritesStore) {
    let favorites = store.list();
    if favorites.is_empty() {
        println!("No favorites saved");
        return;
    }

    println!("\n{} favorites:\n", favorites.len());
    print_recipe_table(favorites.iter());
}

pub fn add_favorite(catalog: &Catalog, store: &mut impl FavoritesStore, id: &str) -> Result<()> {
    let id = validate_recipe_id(id)?;
    let recipe = catalog
        .get(id)
        .ok_or_else(|| Error::NotFound(format!("Recipe {id} not found")))?;

    if store.add(recipe)? {
        println!("✓ Added {} {} to favorites", recipe.emoji, recipe.name);
    } else {
        println!("{} is already a favorite", recipe.name);
    }
    Ok(())
}

pub fn remove_favorite(store: &mut impl FavoritesStore, id: &str) -> Result<()> {
    let id = validate_recipe_id(id)?;

    if store.remove(id)? {
        println!("✓ Removed {id} from favorites");
    } else {
        println!("{id} was not a favorite");
    }
    Ok(())
}

fn print_search_results(results: &SearchResults) {
    if results.is_empty() {
        println!("No recipes found");
        return;
    }

    match results {
        SearchResults::Generated(recipes) => {
            println!("\nGenerated {} recipes:\n", recipes.len());
            for recipe in recipes {
                print_recipe_detail(recipe);
            }
        }
        SearchResults::Ranked { recipes, reason } => {
            println!("\nFound {} recipes ({reason}):\n", recipes.len());
            println!(
                "{:<20} {:<24} {:<10} {:>6} {:>6}",
                "ID", "Name", "Cuisine", "Time", "Score"
            );
            println!("{}", "-".repeat(70));

            for ranked in recipes {
                let recipe = &ranked.recipe;
                println!(
                    "{:<20} {:<24} {:<10} {:>4}m {:>6}",
                    truncate(&recipe.id, 20),
                    truncate(&format!("{} {}", recipe.emoji, recipe.name), 22),
                    truncate(&recipe.cuisine, 10),
                    recipe.cooking_time,
                    ranked.match_score
                );
            }

            println!("\nTo view a recipe: recipe-finder show <ID>");
        }
    }
}

fn print_recipe_table<'a>(recipes: impl Iterator<Item = &'a Recipe>) {
    println!(
        "{:<20} {:<24} {:<10} {:>6} {:<6}",
        "ID", "Name", "Cuisine", "Time", "Level"
    );
    println!("{}", "-".repeat(70));

    for recipe in recipes {
        println!(
            "{:<20} {:<24} {:<10} {:>4}m {:<6}",
            truncate(&recipe.id, 20),
            truncate(&format!("{} {}", recipe.emoji, recipe.name), 22),
            truncate(&recipe.cuisine, 10),
            recipe.cooking_time,
            recipe.difficulty.label()
        );
    }
}

fn print_recipe_detail(recipe: &Recipe) {
    println!("{} {}  [{}]", recipe.emoji, recipe.name, recipe.id);
    println!(
        "  {} · {} · {} · {} min",
        recipe.cuisine, recipe.flavor, recipe.difficulty, recipe.cooking_time
    );
    println!("  {}", recipe.description);
    println!("  Ingredients: {}", recipe.ingredients.join("、"));

    for step in &recipe.steps {
        let mut line = format!("  {}. {}", step.step, step.description);
        if let Some(time) = step.time {
            line.push_str(&format!(" ({time} min)"));
        }
        if let Some(temperature) = &step.temperature {
            line.push_str(&format!(" [{temperature}]"));
        }
        println!("{line}");
    }

    if let Some(tips) = recipe.tips.as_ref().filter(|t| !t.is_empty()) {
        println!("  Tips:");
        for tip in tips {
            println!("    - {tip}");
        }
    }
    println!();
}
