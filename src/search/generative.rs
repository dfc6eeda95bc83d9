use crate::catalog::Recipe;
use crate::config::GenerativeConfig;
use crate::error::{Error, Result};
use crate::search::coerce::coerce_recipe;
use crate::utils::sanitize::{single_line, truncate};
use regex::Regex;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

/// Every way the generative path can fail. Each variant routes the search to
/// the local ranking engine.
#[derive(Error, Debug)]
pub enum GenerativeError {
    #[error("generative endpoint or API key not configured")]
    NotConfigured,

    #[error("request to generative endpoint failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("generative endpoint did not answer within {0:?}")]
    Timeout(Duration),

    #[error("generative endpoint returned HTTP {status}")]
    UpstreamStatus { status: StatusCode, body: String },

    #[error("malformed generative response: {0}")]
    ResponseShape(String),
}

const SYSTEM_PROMPT: &str = r#"你是一个专业的菜谱生成助手。根据用户的搜索关键词，生成3-4个相关的详细菜谱。

重要：只返回纯JSON数组，不要任何解释或markdown标记。

返回格式：
[
  {
    "name": "菜名（中文）",
    "cuisine": "菜系（如：川菜/粤菜/家常菜/湘菜等）",
    "emoji": "合适的食物emoji",
    "ingredients": ["食材1", "食材2", "食材3", "食材4", "食材5"],
    "cookingTime": 30,
    "difficulty": "简单",
    "flavor": "口味（如：咸鲜/麻辣/酸甜等）",
    "description": "简短描述（中文）",
    "steps": [
      {"step": 1, "description": "详细的第一步操作"},
      {"step": 2, "description": "详细的第二步操作", "time": 5},
      {"step": 3, "description": "详细的第三步操作", "time": 10}
    ],
    "tips": ["烹饪技巧1", "烹饪技巧2"]
  }
]

要求：
1. steps必须包含5-8个详细步骤
2. 每个步骤描述具体可操作，不少于10个字
3. 炒、煮、蒸、焖等关键步骤必须包含time字段（单位：分钟）
4. tips提供2-3个实用的烹饪技巧
5. ingredients至少5个
6. 所有文字使用中文
7. cookingTime是总时间（数字，分钟）
8. difficulty只能是：简单/中等/困难
9. 确保JSON格式正确，不要有多余的逗号"#;

fn user_prompt(query: &str) -> String {
    format!("请为\"{query}\"生成详细菜谱，包含完整的烹饪步骤和时间")
}

/// Chat completion request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat completions endpoint that asks the
/// model for recipes matching a query
#[derive(Clone)]
pub struct GenerativeClient {
    client: Client,
    config: GenerativeConfig,
}

impl GenerativeClient {
    pub fn new(config: GenerativeConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("recipe-finder/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Http)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GenerativeConfig {
        &self.config
    }

    /// Build the chat request for a query
    pub fn build_request(&self, query: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::new("system", SYSTEM_PROMPT),
                ChatMessage::new("user", user_prompt(query)),
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }

    /// Ask the endpoint for recipes matching `query`.
    ///
    /// The whole round trip runs under the configured deadline. When it
    /// elapses the in-flight request is dropped, which cancels it, and the
    /// timer is released along with the future.
    pub async fn generate(&self, query: &str) -> std::result::Result<Vec<Recipe>, GenerativeError> {
        let (url, api_key) = self.config.endpoint().ok_or(GenerativeError::NotConfigured)?;
        let request = self.build_request(query);
        let deadline = self.config.timeout();

        info!(
            "Requesting generated recipes (model: {}, query: {:?})",
            self.config.model, query
        );

        let content = match timeout(deadline, self.complete(url, api_key, &request)).await {
            Ok(result) => result?,
            Err(_) => {
                warn!("Generative request cancelled after {:?}", deadline);
                return Err(GenerativeError::Timeout(deadline));
            }
        };

        parse_recipes(&content, chrono::Utc::now().timestamp_millis())
    }

    /// Send the request and return the model's reply text
    async fn complete(
        &self,
        url: &str,
        api_key: &str,
        request: &ChatRequest,
    ) -> std::result::Result<String, GenerativeError> {
        let mut http_request = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {api_key}"))
            .json(request);

        if let Some(referer) = &self.config.referer {
            http_request = http_request.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.config.title {
            http_request = http_request.header("X-Title", title);
        }

        debug!("POST {}", url);
        let response = http_request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let excerpt = truncate(&single_line(&body), 500);
            error!("Generative endpoint error: {} - {}", status, excerpt);
            return Err(GenerativeError::UpstreamStatus {
                status,
                body: excerpt,
            });
        }

        let body = response.text().await?;
        extract_content(&body)
    }
}

/// Pull `choices[0].message.content` out of a chat completion body
pub fn extract_content(body: &str) -> std::result::Result<String, GenerativeError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| GenerativeError::ResponseShape(format!("invalid completion body: {e}")))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| GenerativeError::ResponseShape("no message content in choices".to_string()))
}

fn fence_patterns() -> &'static (Regex, Regex) {
    static PATTERNS: OnceLock<(Regex, Regex)> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        (
            Regex::new(r"^```(?i:json)?\s*").expect("valid opening fence pattern"),
            Regex::new(r"\s*```$").expect("valid closing fence pattern"),
        )
    })
}

/// Strip a surrounding ```json ... ``` or ``` ... ``` fence, if present
pub fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let (opening, closing) = fence_patterns();
    let start = opening.find(trimmed).map_or(0, |m| m.end());
    let rest = &trimmed[start..];
    let end = closing.find(rest).map_or(rest.len(), |m| m.start());
    &rest[..end]
}

/// Parse the model's reply into coerced recipes.
///
/// `stamp_ms` seeds the synthesized ids. An empty array is treated as a
/// failed generation.
pub fn parse_recipes(content: &str, stamp_ms: i64) -> std::result::Result<Vec<Recipe>, GenerativeError> {
    let payload = strip_code_fence(content);

    let value: Value = serde_json::from_str(payload).map_err(|e| {
        debug!("Unparseable reply: {}", truncate(&single_line(content), 300));
        GenerativeError::ResponseShape(format!("reply is not valid JSON: {e}"))
    })?;

    let items = value
        .as_array()
        .ok_or_else(|| GenerativeError::ResponseShape("reply is not a JSON array".to_string()))?;

    if items.is_empty() {
        return Err(GenerativeError::ResponseShape(
            "reply contained no recipes".to_string(),
        ));
    }

    let recipes = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let coerced = coerce_recipe(item, index, stamp_ms);
            if !coerced.is_clean() {
                debug!(
                    "Generated recipe {} defaulted fields: {:?}",
                    coerced.recipe.id, coerced.defaulted
                );
            }
            coerced.recipe
        })
        .collect::<Vec<_>>();

    info!("Parsed {} generated recipes", recipes.len());
    Ok(recipes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fence("```JSON [1] ```"), "[1]");
        assert_eq!(strip_code_fence("  ```\n[1]\n```  "), "[1]");
        assert_eq!(strip_code_fence("[1]"), "[1]");
        // Unterminated fence only loses its opening marker
        assert_eq!(strip_code_fence("```json\n[1]"), "[1]");
    }

    #[test]
    fn test_build_request_shape() {
        let client = GenerativeClient::new(GenerativeConfig {
            model: "test-model".to_string(),
            ..GenerativeConfig::default()
        })
        .unwrap();

        let request = client.build_request("红烧肉");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "test-model");
        assert_eq!(value["max_tokens"], 3000);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert!(value["messages"][1]["content"]
            .as_str()
            .unwrap()
            .contains("红烧肉"));
        assert!(value["messages"][0]["content"]
            .as_str()
            .unwrap()
            .contains("JSON"));
    }

    #[test]
    fn test_extract_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"[]"}}]}"#;
        assert_eq!(extract_content(body).unwrap(), "[]");

        assert!(matches!(
            extract_content(r#"{"choices":[]}"#),
            Err(GenerativeError::ResponseShape(_))
        ));
        assert!(matches!(
            extract_content("<html>bad gateway</html>"),
            Err(GenerativeError::ResponseShape(_))
        ));
    }

    #[test]
    fn test_parse_recipes_rejects_non_arrays() {
        assert!(matches!(
            parse_recipes(r#"{"name": "X"}"#, 0),
            Err(GenerativeError::ResponseShape(_))
        ));
        assert!(matches!(
            parse_recipes("Sure! Here are some recipes:", 0),
            Err(GenerativeError::ResponseShape(_))
        ));
        assert!(matches!(
            parse_recipes("```json\n[]\n```", 0),
            Err(GenerativeError::ResponseShape(_))
        ));
    }

    #[test]
    fn test_parse_recipes_assigns_unique_ids() {
        let recipes = parse_recipes(r#"[{"name": "A"}, {"name": "B"}, {}]"#, 42).unwrap();
        let ids: Vec<_> = recipes.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["ai-42-0", "ai-42-1", "ai-42-2"]);
    }

    #[tokio::test]
    async fn test_generate_without_config_is_not_configured() {
        let client = GenerativeClient::new(GenerativeConfig::default()).unwrap();
        let result = client.generate("红烧肉").await;
        assert!(matches!(result, Err(GenerativeError::NotConfigured)));
    }
}
