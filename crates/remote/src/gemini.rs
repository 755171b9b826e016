//! Gemini-backed implementation of the remote extraction contract.

use crate::config::RemoteConfig;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use omnitext_core::{Error, RemoteExtractor, Result};
use serde::{Deserialize, Serialize};

/// Literal marker the service must emit for an entirely blank page.
pub const BLANK_PAGE_MARKER: &str = "(Trang trống)";

/// Literal marker the service must emit for an unreadable page.
pub const UNREADABLE_PAGE_MARKER: &str = "(Không thể trích xuất nội dung trang này)";

/// Fixed instruction sent with every request.
///
/// Demands verbatim, lossless extraction: no summarization, translation,
/// spelling correction, or added/removed content, with line breaks and
/// spacing preserved as far as the source allows.
const EXTRACTION_INSTRUCTION: &str = concat!(
    "Extract ALL text content from this file, verbatim and lossless. ",
    "Do not summarize, translate, correct spelling, or add or remove anything. ",
    "Preserve line breaks, spacing, and structure as closely as possible. ",
    "If a page is entirely blank, output exactly \"(Trang trống)\" for it. ",
    "If a page cannot be read, output exactly ",
    "\"(Không thể trích xuất nội dung trang này)\" for it. ",
    "Respond with plain text only. Never wrap the output in a fenced code block.",
);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum Part {
    InlineData(InlineData),
    Text(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    candidate_count: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Adapter around the Gemini generateContent endpoint.
///
/// Issues exactly one deterministic request per payload (temperature zero,
/// single candidate) and performs no retries.
pub struct GeminiExtractor {
    config: RemoteConfig,
    client: reqwest::Client,
}

impl GeminiExtractor {
    /// Create an extractor with the given configuration.
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn build_request(&self, bytes: &[u8], media_type: &str) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData(InlineData {
                        mime_type: media_type.to_string(),
                        data: BASE64.encode(bytes),
                    }),
                    Part::Text(EXTRACTION_INSTRUCTION.to_string()),
                ],
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                candidate_count: 1,
            },
        }
    }
}

#[async_trait]
impl RemoteExtractor for GeminiExtractor {
    async fn extract(&self, bytes: &[u8], media_type: &str) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(Error::MissingCredential)?;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.endpoint, self.config.model, api_key
        );

        log::debug!(
            "remote extraction request: {} bytes as {}",
            bytes.len(),
            media_type
        );

        let request = self.build_request(bytes, media_type);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::RemoteService(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::RemoteService(format!(
                "service returned {}: {}",
                status,
                body.trim()
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::RemoteService(format!("malformed response: {}", e)))?;

        let text = collect_text(&parsed);
        if text.trim().is_empty() {
            return Err(Error::RemoteService(
                "empty response from extraction service".to_string(),
            ));
        }

        Ok(strip_code_fence(&text))
    }
}

/// Join the text parts of the first candidate.
fn collect_text(response: &GenerateResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

/// Remove a surrounding fenced code block, if the model emitted one anyway.
fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") || !trimmed.ends_with("```") || trimmed.len() < 6 {
        return trimmed.to_string();
    }

    let inner = &trimmed[3..trimmed.len() - 3];
    // Drop a language identifier on the opening fence line.
    let inner = match inner.split_once('\n') {
        Some((first, rest)) if !first.trim().contains(char::is_whitespace) => rest,
        _ => inner,
    };
    inner.trim().to_string()
}
