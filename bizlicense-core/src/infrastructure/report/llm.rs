// bizlicense-core/src/infrastructure/report/llm.rs

// Report generation through an OpenAI-compatible chat completion endpoint.
// Any failure (no key, transport error, bad status, empty answer) degrades to
// the deterministic template so a report is always produced.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

use super::citations::CitationAnnotator;
use super::context::report_context;
use super::jinja::{JinjaRenderer, PROMPT_TEMPLATE};
use super::template::TemplateReportGenerator;
use crate::domain::{BusinessProfile, MatchResult};
use crate::error::LicenseError;
use crate::infrastructure::config::ReportConfig;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::{GeneratedReport, ReportGenerator};

pub const SYSTEM_PROMPT: &str = "You are a business licensing assistant. You receive business details and the regulatory requirements that apply to them, and you write a report in Markdown with: executive summary, mandatory requirements, recommended requirements, immediate steps (checklist), notes, information gaps.

The report must be professional, clear and practical. Use clear headings, ordered lists, and tables where they help. Focus on practical information that helps the business owner understand what to do.";

pub struct LlmReportGenerator {
    client: Client,
    settings: ReportConfig,
    api_key: Option<String>,
    renderer: Arc<JinjaRenderer>,
    fallback: TemplateReportGenerator,
    annotator: CitationAnnotator,
}

impl LlmReportGenerator {
    pub const NAME: &'static str = "llm";

    pub fn new(settings: ReportConfig, api_key: Option<String>) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        let renderer = Arc::new(JinjaRenderer::new()?);
        let annotator = CitationAnnotator::new()
            .map_err(|e| InfrastructureError::ConfigError(format!("Invalid citation pattern: {}", e)))?;

        Ok(Self {
            client,
            fallback: TemplateReportGenerator::with_renderer(Arc::clone(&renderer)),
            renderer,
            settings,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            annotator,
        })
    }

    /// Reads the API key from the variable named by `settings.api_key_env`.
    pub fn from_env(settings: ReportConfig) -> Result<Self, InfrastructureError> {
        let api_key = std::env::var(&settings.api_key_env).ok();
        Self::new(settings, api_key)
    }

    fn fallback(
        &self,
        profile: &BusinessProfile,
        matched: &MatchResult<'_>,
    ) -> Result<GeneratedReport, LicenseError> {
        Ok(GeneratedReport {
            text: self.fallback.render(profile, matched)?,
            generator: TemplateReportGenerator::NAME,
        })
    }

    async fn complete(&self, api_key: &str, user_prompt: &str) -> Result<String, InfrastructureError> {
        let body = json!({
            "model": self.settings.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": user_prompt },
            ],
            "temperature": self.settings.temperature,
            "max_tokens": self.settings.max_tokens,
        });

        let url = format!("{}/chat/completions", self.settings.base_url.trim_end_matches('/'));
        let res = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let payload: Value = res.json().await?;
        extract_content(&payload)
    }

    /// Retries only when the service reports itself overloaded (HTTP 503).
    async fn complete_with_retry(
        &self,
        api_key: &str,
        user_prompt: &str,
    ) -> Result<String, InfrastructureError> {
        let max_attempts = self.settings.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.complete(api_key, user_prompt).await {
                Ok(text) => {
                    info!(attempt, "Language model answered");
                    return Ok(text);
                }
                Err(e) if is_overloaded(&e) && attempt < max_attempts => {
                    let wait = backoff(attempt);
                    warn!(attempt, max_attempts, wait = ?wait, "Language model overloaded, retrying");
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl ReportGenerator for LlmReportGenerator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    #[instrument(skip_all, fields(model = %self.settings.model, requirements = matched.len()))]
    async fn generate(
        &self,
        profile: &BusinessProfile,
        matched: &MatchResult<'_>,
    ) -> Result<GeneratedReport, LicenseError> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!(env = %self.settings.api_key_env, "No API key configured, using template report");
            return self.fallback(profile, matched);
        };

        let user_prompt = self
            .renderer
            .render(PROMPT_TEMPLATE, &report_context(profile, matched))?;

        match self.complete_with_retry(api_key, &user_prompt).await {
            Ok(text) if !text.trim().is_empty() => Ok(GeneratedReport {
                text: self.annotator.annotate(&text, matched),
                generator: Self::NAME,
            }),
            Ok(_) => {
                warn!("Empty answer from language model, using template report");
                self.fallback(profile, matched)
            }
            Err(e) => {
                warn!(error = %e, "Language model call failed, using template report");
                self.fallback(profile, matched)
            }
        }
    }
}

/// 2s, 4s, 8s, ...
pub fn backoff(attempt: u32) -> Duration {
    Duration::from_secs(2u64.saturating_pow(attempt))
}

fn is_overloaded(err: &InfrastructureError) -> bool {
    matches!(err, InfrastructureError::Http(e) if e.status() == Some(StatusCode::SERVICE_UNAVAILABLE))
}

fn extract_content(payload: &Value) -> Result<String, InfrastructureError> {
    payload["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| InfrastructureError::LlmResponse("missing choices[0].message.content".to_string()))
}
