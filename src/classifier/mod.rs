//! The classification contract: one structured-output call to the Gemini
//! `generateContent` API, parse-then-validate, no retry.

pub mod prompt;
mod types;

use std::time::Duration;

use reqwest::Client;

use crate::config::Config;
use crate::error::ClassifierError;
use crate::model::AgencyResult;
use types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const MAX_OUTPUT_TOKENS: u32 = 8192;

/// Gemini-backed classifier.
///
/// Credential resolution order: `GEMINI_API_KEY`, then `GOOGLE_API_KEY`,
/// then the config file. Absence is only an error once [`classify`] is
/// called.
///
/// [`classify`]: GeminiClassifier::classify
pub struct GeminiClassifier {
    api_key: Option<String>,
    model: String,
    temperature: f64,
    api_base: String,
    client: Client,
}

impl GeminiClassifier {
    pub fn new(api_key: Option<&str>, model: impl Into<String>, temperature: f64) -> Self {
        let resolved_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .or_else(|| api_key.map(String::from));

        Self {
            api_key: resolved_key,
            model: model.into(),
            temperature,
            api_base: API_BASE.to_string(),
            client: build_classifier_client(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_key.as_deref(), &config.model, config.temperature)
    }

    /// Point the client at a different API root. Used by tests to stand in
    /// a local mock server.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn api_key(&self) -> Result<&str, ClassifierError> {
        self.api_key.as_deref().ok_or(ClassifierError::MissingApiKey)
    }

    /// Classify one free-text situation into the three responsibility
    /// domains.
    ///
    /// Callers reject empty-after-trim input before invoking this; no
    /// network call is made for blank text. Returns only the generated
    /// fields; timestamp and original input are attached by the caller.
    pub async fn classify(&self, free_text: &str) -> Result<AgencyResult, ClassifierError> {
        let api_key = self.api_key()?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: free_text.to_string(),
                }],
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part {
                    text: prompt::SYSTEM_PROMPT.to_string(),
                }],
            }),
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: MAX_OUTPUT_TOKENS,
                response_mime_type: "application/json",
                response_schema: prompt::response_schema(),
            },
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base, self.model, api_key
        );

        let response = self.client.post(url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Request(format!(
                "{status}: {}",
                truncate(body.trim(), 200)
            )));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| ClassifierError::Malformed(format!("response envelope: {err}")))?;

        if let Some(err) = result.error {
            return Err(ClassifierError::Request(err.message));
        }

        let text = extract_text(&result)?;
        tracing::debug!("classifier payload: {} bytes", text.len());
        parse_payload(&text)
    }
}

fn build_classifier_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(60))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Concatenated text parts of the first candidate.
fn extract_text(result: &GenerateContentResponse) -> Result<String, ClassifierError> {
    let text = result
        .candidates
        .as_ref()
        .and_then(|candidates| candidates.first())
        .map(|candidate| {
            let mut out = String::new();
            for part in &candidate.content.parts {
                if let Some(t) = &part.text {
                    if !out.is_empty() {
                        out.push('\n');
                    }
                    out.push_str(t);
                }
            }
            out
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ClassifierError::EmptyResponse);
    }

    Ok(text)
}

/// Parse the schema'd JSON text into the result contract. Any deviation
/// (missing field, extra field, wrong type, domain literal outside the set)
/// is malformed; no partial result ever escapes.
fn parse_payload(text: &str) -> Result<AgencyResult, ClassifierError> {
    serde_json::from_str(text).map_err(|err| ClassifierError::Malformed(err.to_string()))
}

fn truncate(input: &str, max: usize) -> String {
    let mut out = String::new();
    for (idx, ch) in input.chars().enumerate() {
        if idx >= max {
            out.push_str("...");
            break;
        }
        out.push(ch);
    }
    out
}
