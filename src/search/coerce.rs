//! Field-by-field coercion of untrusted generated JSON into [`Recipe`] records.
//!
//! Every field is parsed strictly into a [`Field`] outcome first; missing or
//! invalid values are then replaced by a placeholder and recorded in the
//! returned [`Coerced`] report. A record is never dropped.

use crate::catalog::{Difficulty, Recipe, Step};
use serde_json::{Map, Value};

pub const DEFAULT_NAME: &str = "未命名菜品";
pub const DEFAULT_CUISINE: &str = "其他";
pub const DEFAULT_EMOJI: &str = "🍽️";
pub const DEFAULT_COOKING_TIME: u32 = 30;
pub const DEFAULT_DIFFICULTY: Difficulty = Difficulty::Medium;
pub const DEFAULT_FLAVOR: &str = "咸鲜";
pub const DEFAULT_DESCRIPTION: &str = "美味可口的家常菜";
pub const DEFAULT_STEP_DESCRIPTION: &str = "按照传统方法操作";

const DEFAULT_INGREDIENTS: [&str; 3] = ["主要食材", "调料", "辅料"];
const DEFAULT_TIPS: [&str; 2] = ["注意火候", "适量调味"];

/// Outcome of strictly parsing a single field
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Valid(T),
    Missing,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldIssue {
    Missing,
    Invalid,
}

/// A coerced recipe plus the fields that had to be defaulted
#[derive(Debug, Clone)]
pub struct Coerced {
    pub recipe: Recipe,
    pub defaulted: Vec<(&'static str, FieldIssue)>,
}

impl Coerced {
    pub fn is_clean(&self) -> bool {
        self.defaulted.is_empty()
    }
}

fn field<T>(obj: &Map<String, Value>, key: &str, parse: impl FnOnce(&Value) -> Option<T>) -> Field<T> {
    match obj.get(key) {
        None | Some(Value::Null) => Field::Missing,
        Some(value) => parse(value).map_or(Field::Invalid, Field::Valid),
    }
}

/// Collects default substitutions while a record is being built
struct Defaults {
    applied: Vec<(&'static str, FieldIssue)>,
}

impl Defaults {
    fn resolve<T>(&mut self, name: &'static str, field: Field<T>, default: impl FnOnce() -> T) -> T {
        match field {
            Field::Valid(value) => value,
            Field::Missing => {
                self.applied.push((name, FieldIssue::Missing));
                default()
            }
            Field::Invalid => {
                self.applied.push((name, FieldIssue::Invalid));
                default()
            }
        }
    }
}

fn text(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn text_list(value: &Value) -> Option<Vec<String>> {
    let items: Vec<String> = value.as_array()?.iter().filter_map(text).collect();
    (!items.is_empty()).then_some(items)
}

/// Positive whole minutes; accepts integers, floats and numeric strings
fn minutes(value: &Value) -> Option<u32> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    let rounded = raw.round();
    (rounded >= 1.0 && rounded <= f64::from(u32::MAX)).then_some(rounded as u32)
}

fn difficulty(value: &Value) -> Option<Difficulty> {
    value.as_str().and_then(Difficulty::parse)
}

fn steps(value: &Value) -> Option<Vec<Step>> {
    let items = value.as_array()?;
    if items.is_empty() {
        return None;
    }

    // Numbering always follows position so the sequence is 1..n
    let steps = (1u32..)
        .zip(items)
        .map(|(index, item)| match item {
            Value::Object(obj) => Step {
                step: index,
                description: obj
                    .get("description")
                    .and_then(text)
                    .unwrap_or_else(|| DEFAULT_STEP_DESCRIPTION.to_string()),
                time: obj.get("time").and_then(minutes),
                temperature: obj.get("temperature").and_then(text),
            },
            other => Step {
                step: index,
                description: text(other).unwrap_or_else(|| DEFAULT_STEP_DESCRIPTION.to_string()),
                time: None,
                temperature: None,
            },
        })
        .collect();

    Some(steps)
}

fn default_steps() -> Vec<Step> {
    vec![
        Step {
            step: 1,
            description: "准备所需食材，清洗干净".to_string(),
            time: None,
            temperature: None,
        },
        Step {
            step: 2,
            description: "按照传统方法进行烹饪".to_string(),
            time: Some(15),
            temperature: None,
        },
        Step {
            step: 3,
            description: "调味并装盘".to_string(),
            time: Some(2),
            temperature: None,
        },
    ]
}

/// Synthesized id for the `index`-th record of a batch generated at `stamp_ms`
pub fn synthesized_id(stamp_ms: i64, index: usize) -> String {
    format!("ai-{stamp_ms}-{index}")
}

/// Coerce one element of a generated array into a complete recipe.
///
/// Non-object elements are treated as an empty object and come back fully
/// defaulted.
pub fn coerce_recipe(value: &Value, index: usize, stamp_ms: i64) -> Coerced {
    let empty = Map::new();
    let obj = value.as_object().unwrap_or(&empty);
    let mut defaults = Defaults {
        applied: Vec::new(),
    };

    let recipe = Recipe {
        id: synthesized_id(stamp_ms, index),
        name: defaults.resolve("name", field(obj, "name", text), || DEFAULT_NAME.to_string()),
        cuisine: defaults.resolve("cuisine", field(obj, "cuisine", text), || {
            DEFAULT_CUISINE.to_string()
        }),
        emoji: defaults.resolve("emoji", field(obj, "emoji", text), || DEFAULT_EMOJI.to_string()),
        ingredients: defaults.resolve("ingredients", field(obj, "ingredients", text_list), || {
            DEFAULT_INGREDIENTS.iter().map(|s| s.to_string()).collect()
        }),
        cooking_time: defaults.resolve("cookingTime", field(obj, "cookingTime", minutes), || {
            DEFAULT_COOKING_TIME
        }),
        difficulty: defaults.resolve("difficulty", field(obj, "difficulty", difficulty), || {
            DEFAULT_DIFFICULTY
        }),
        flavor: defaults.resolve("flavor", field(obj, "flavor", text), || DEFAULT_FLAVOR.to_string()),
        description: defaults.resolve("description", field(obj, "description", text), || {
            DEFAULT_DESCRIPTION.to_string()
        }),
        steps: defaults.resolve("steps", field(obj, "steps", steps), default_steps),
        tips: Some(defaults.resolve("tips", field(obj, "tips", text_list), || {
            DEFAULT_TIPS.iter().map(|s| s.to_string()).collect()
        })),
    };

    Coerced {
        recipe,
        defaulted: defaults.applied,
    }
}
