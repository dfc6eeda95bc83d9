use recipe_finder::catalog::Catalog;
use recipe_finder::search::ranking::{self, MAX_RESULTS};

fn catalog() -> Catalog {
    Catalog::from_json(include_str!("../data/recipes.json")).expect("bundled catalog is valid")
}

fn ids(query: &str) -> Vec<String> {
    ranking::rank(catalog().recipes(), query)
        .into_iter()
        .map(|r| r.recipe.id)
        .collect()
}

#[test]
fn test_no_matches_yields_empty_list() {
    assert!(ids("披萨").is_empty());
    assert!(ids("").is_empty());
    assert!(ids("   ").is_empty());
}

#[test]
fn test_difficulty_matches_chinese_label_only() {
    for query in ["im", "ed", "ha", "simple", "medium", "hard"] {
        assert!(ids(query).is_empty(), "{query:?} should match nothing");
    }

    let ranked = ranking::rank(catalog().recipes(), "困难");
    assert!(!ranked.is_empty());
    assert!(ranked
        .iter()
        .all(|r| r.match_score == ranking::DIFFICULTY_WEIGHT));
}

#[test]
fn test_exact_name_outranks_substring_matches() {
    let catalog = catalog();
    let ranked = ranking::rank(catalog.recipes(), "红烧肉");

    assert_eq!(ranked[0].recipe.id, "hongshaorou");
    assert!(ranked[0].match_score >= ranking::EXACT_NAME_WEIGHT);

    // Dongpo pork only mentions 红烧肉 in its description
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[1].recipe.id, "dongpo-pork");
    assert!(ranked[1].match_score < ranked[0].match_score);
}

#[test]
fn test_every_name_ranks_its_recipe_first() {
    let catalog = catalog();
    // Multi-word names are split into keywords, so exact matching doesn't apply
    let single_word = catalog
        .recipes()
        .iter()
        .filter(|r| r.name.split_whitespace().count() == 1);

    for recipe in single_word {
        let ranked = ranking::rank(catalog.recipes(), &recipe.name.to_uppercase());
        assert_eq!(ranked[0].recipe.id, recipe.id, "query {}", recipe.name);
        assert!(ranked[0].match_score >= ranking::EXACT_NAME_WEIGHT);
    }
}

#[test]
fn test_equal_scores_prefer_shorter_cooking_time() {
    let catalog = catalog();
    let ranked = ranking::rank(catalog.recipes(), "排骨");

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].match_score, ranked[1].match_score);
    assert_eq!(ranked[0].recipe.id, "sweet-sour-ribs");
    assert_eq!(ranked[1].recipe.id, "hongshao-paigu");
}

#[test]
fn test_results_capped_at_twelve() {
    // "菜" hits the cuisine of fourteen recipes
    let ranked = ids("菜");
    assert_eq!(ranked.len(), MAX_RESULTS);
    assert!(!ranked.contains(&"dongpo-pork".to_string()));
    assert!(!ranked.contains(&"potato-beef".to_string()));
    assert_eq!(ranked[0], "smashed-cucumber");
}

#[test]
fn test_category_suffix_matches_on_root() {
    assert_eq!(ids("海鲜类"), vec!["seafood-congee", "garlic-shrimp"]);
    assert_eq!(ids("海鲜类"), ids("海鲜"));
}

#[test]
fn test_scores_accumulate_across_keywords() {
    let catalog = catalog();
    let ranked = ranking::rank(catalog.recipes(), "酸甜 排骨");

    assert_eq!(ranked[0].recipe.id, "sweet-sour-ribs");
    assert_eq!(ranked[0].match_score, 31);
    assert_eq!(ranked.last().unwrap().recipe.id, "tomato-egg");
}

#[test]
fn test_case_insensitive_matching() {
    assert_eq!(ids("CAESAR Salad"), vec!["caesar-salad"]);
    assert_eq!(ids("romaine"), vec!["caesar-salad"]);
}

#[test]
fn test_ranking_is_deterministic() {
    assert_eq!(ids("简单"), ids("简单"));
    assert_eq!(ids("简单").len(), 8);
}
