use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use moodmix_core::domain::{AudioFeatureTargets, Track};
use moodmix_core::ports::{InterpreterError, NlInterpreter};

use crate::config::AnthropicConfig;
use crate::error::AnthropicError;
use crate::{extract, prompt};

#[derive(Debug, Serialize)]
struct MessageRequest<'a> {
  model: &'a str,
  max_tokens: u32,
  messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
  role: &'static str,
  content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
  #[serde(default)]
  content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
  #[serde(rename = "type")]
  block_type: String,
  #[serde(default)]
  text: String,
}

impl MessageResponse {
  fn text(self) -> Result<String, AnthropicError> {
    let text = self
      .content
      .into_iter()
      .filter(|b| b.block_type == "text")
      .map(|b| b.text)
      .collect::<Vec<_>>()
      .join("\n");
    if text.trim().is_empty() { Err(AnthropicError::EmptyResponse) } else { Ok(text) }
  }
}

/// Implementación de [`NlInterpreter`] sobre Claude.
pub struct ClaudeInterpreter {
  http: Client,
  config: AnthropicConfig,
}

impl ClaudeInterpreter {
  pub fn new(config: AnthropicConfig) -> Result<Self, AnthropicError> {
    let http = Client::builder().timeout(config.request_timeout()).build()?;
    Ok(Self { http, config })
  }

  pub fn has_key(&self) -> bool {
    self.config.api_key.is_some()
  }

  /// Un único mensaje de usuario; devuelve el texto de la respuesta.
  async fn complete(&self, content: &str, max_tokens: u32) -> Result<String, AnthropicError> {
    let key = self.config.api_key.as_deref().ok_or(AnthropicError::MissingKey)?;
    let body = MessageRequest {
      model: &self.config.model,
      max_tokens,
      messages: [Message { role: "user", content }],
    };

    let response = self
      .http
      .post(format!("{}/messages", self.config.api_base_url.trim_end_matches('/')))
      .header("x-api-key", key)
      .header("anthropic-version", &self.config.api_version)
      .json(&body)
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      let message = response.text().await.unwrap_or_default();
      return Err(AnthropicError::Status { status: status.as_u16(), message: message.trim().chars().take(200).collect() });
    }

    let parsed: MessageResponse = response.json().await?;
    parsed.text()
  }
}

#[async_trait]
impl NlInterpreter for ClaudeInterpreter {
  async fn interpret_emotional_text(&self, text: &str) -> Result<AudioFeatureTargets, InterpreterError> {
    let answer = self.complete(&prompt::interpret(text), self.config.interpret_max_tokens).await?;
    let targets = extract::parse_targets(&answer)?;
    debug!(features = targets.len(), "emotional text interpreted");
    Ok(targets)
  }

  async fn describe_playlist(&self, mood_summary: &str, sample: &[Track]) -> Result<String, InterpreterError> {
    let answer = self.complete(&prompt::describe(mood_summary, sample), self.config.describe_max_tokens).await?;
    Ok(prompt::clean_description(&answer))
  }
}
