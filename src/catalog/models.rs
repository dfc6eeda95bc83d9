use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub cuisine: String,
    pub emoji: String,
    pub ingredients: Vec<String>,
    pub cooking_time: u32,
    pub difficulty: Difficulty,
    pub flavor: String,
    pub description: String,
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub step: u32,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
}

/// Three-level difficulty scale.
///
/// Serialized in English; the Chinese labels used by the bundled catalog and
/// by generated recipes are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[serde(alias = "简单", alias = "easy")]
    Simple,
    #[serde(alias = "中等")]
    Medium,
    #[serde(alias = "困难", alias = "difficult")]
    Hard,
}

impl Difficulty {
    /// Chinese display label
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Simple => "简单",
            Difficulty::Medium => "中等",
            Difficulty::Hard => "困难",
        }
    }

    /// Parse either the English name or the Chinese label, ignoring case and padding
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "simple" | "easy" | "简单" => Some(Difficulty::Simple),
            "medium" | "中等" => Some(Difficulty::Medium),
            "hard" | "difficult" | "困难" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A recipe paired with its relevance score for one search call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub match_score: u32,
}

impl Recipe {
    /// Check the data-model invariants for a single record
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(format!(
                "Recipe '{}' has an empty id",
                self.name
            )));
        }

        if self.ingredients.is_empty() {
            return Err(Error::Validation(format!(
                "Recipe {} has no ingredients",
                self.id
            )));
        }

        if self.steps.is_empty() {
            return Err(Error::Validation(format!("Recipe {} has no steps", self.id)));
        }

        for (expected, step) in (1u32..).zip(&self.steps) {
            if step.step != expected {
                return Err(Error::Validation(format!(
                    "Recipe {} step {} is out of sequence (expected {})",
                    self.id, step.step, expected
                )));
            }
            if step.description.trim().is_empty() {
                return Err(Error::Validation(format!(
                    "Recipe {} step {} has an empty description",
                    self.id, step.step
                )));
            }
            if step.time == Some(0) {
                return Err(Error::Validation(format!(
                    "Recipe {} step {} has a zero duration",
                    self.id, step.step
                )));
            }
        }

        Ok(())
    }
}
