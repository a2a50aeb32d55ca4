#![allow(
    clippy::as_conversions,
    clippy::cast_possible_truncation,
    reason = "model scores are small; fractional suggestions truncate toward zero"
)]

use async_trait::async_trait;
use base64::Engine as _;
use cloud_hunter_core::{Classification, DEFAULT_SUGGESTED_SCORE, MISSING_TEXT, UNKNOWN_CLOUD_NAME};
use serde_json::{Map, Value};

use crate::ai_types::{Content, GenerateContentRequest, GenerationConfig, InlineData, Part};
use crate::client::{GeminiClient, truncate};
use crate::error::LlmError;

/// Instruction sent alongside every image.
pub const CLASSIFY_PROMPT: &str = r#"任务：识别图片中的云彩。
第一步：判断这张图片是否包含云彩或天空现象。
- 如果是猫、狗、室内、黑屏、文字截图等非天空图片，返回 {"is_cloud": false}
- 如果包含云，返回 {"is_cloud": true, ...}

第二步：如果是云，请进行分类。
返回 JSON 格式：
{
    "is_cloud": true/false,
    "cloud_name": "标准学术名称(中文，如：积云、高积云、波状高积云)",
    "score_suggestion": 估算分数(10-100),
    "science_fact": "科普(30字内)",
    "weather_tip": "预告(20字内)"
}"#;

/// Anything that can turn an image into a [`Classification`].
#[async_trait]
pub trait CloudClassifier: Send + Sync {
    /// Classify one image.
    ///
    /// # Errors
    /// Returns an error if no model produced a usable answer.
    async fn classify(&self, image: &[u8], mime_type: &str) -> Result<Classification, LlmError>;
}

#[async_trait]
impl CloudClassifier for GeminiClient {
    async fn classify(&self, image: &[u8], mime_type: &str) -> Result<Classification, LlmError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: CLASSIFY_PROMPT.to_owned() },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.to_owned(),
                            data: base64::engine::general_purpose::STANDARD.encode(image),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_owned(),
            },
        };

        let text = self.generate_content(&request).await?;
        let classification = parse_classification(&text)?;
        tracing::debug!(
            is_cloud = classification.is_cloud,
            cloud_name = %classification.cloud_name,
            suggested = classification.score_suggestion,
            "Image classified"
        );
        Ok(classification)
    }
}

/// Strip a surrounding ```` ```json ```` / ```` ``` ```` fence, if any.
#[must_use]
pub fn strip_markdown_json(content: &str) -> &str {
    let trimmed = content.trim();
    let inner = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"));
    inner.map_or(trimmed, str::trim)
}

/// Parse the model's JSON answer leniently.
///
/// Missing or mistyped fields fall back to defaults rather than failing:
/// an absent `is_cloud` means not a cloud, the name defaults to "未知", the
/// score to 10 (fractions truncate, numeric strings parse, negatives clamp
/// to 0), and trivia to "暂无".
///
/// # Errors
/// Returns an error if the text is not a JSON object.
pub fn parse_classification(raw: &str) -> Result<Classification, LlmError> {
    let content = strip_markdown_json(raw);
    let value: Value = serde_json::from_str(content).map_err(|e| LlmError::JsonParse {
        context: format!("classification (content: {})", truncate(content, 300)),
        source: e,
    })?;
    let Value::Object(fields) = value else {
        return Err(LlmError::MalformedClassification(format!(
            "expected a JSON object, got: {}",
            truncate(content, 100)
        )));
    };

    Ok(Classification {
        is_cloud: read_flag(&fields, "is_cloud"),
        cloud_name: read_text(&fields, "cloud_name").unwrap_or_else(|| UNKNOWN_CLOUD_NAME.to_owned()),
        score_suggestion: read_score(&fields, "score_suggestion"),
        science_fact: read_text(&fields, "science_fact").unwrap_or_else(|| MISSING_TEXT.to_owned()),
        weather_tip: read_text(&fields, "weather_tip").unwrap_or_else(|| MISSING_TEXT.to_owned()),
    })
}

fn read_flag(fields: &Map<String, Value>, key: &str) -> bool {
    match fields.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn read_text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        _ => None,
    }
}

fn read_score(fields: &Map<String, Value>, key: &str) -> i64 {
    let score = match fields.get(key) {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
        },
        _ => None,
    };
    score.unwrap_or(DEFAULT_SUGGESTED_SCORE).max(0)
}
