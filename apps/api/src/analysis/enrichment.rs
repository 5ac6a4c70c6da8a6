//! Enrichment: asks the upstream model for a structured refinement of the
//! local analysis and merges it onto the classifier result.
//!
//! The merge is all-or-nothing on `role`: an enrichment without a non-blank
//! role is discarded and the classifier output is used as is.

use std::time::Duration;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::analysis::classifier::{AnalysisResult, ConfidenceLevel};
use crate::analysis::prompts::{JD_ANALYZE_PROMPT_TEMPLATE, JD_ANALYZE_TEMPERATURE};
use crate::analysis::sectors::Sector;
use crate::llm_client::prompts::COPILOT_SYSTEM_PROMPT;
use crate::llm_client::{
    complete_with_timeout, extract_json_object, ChatMessage, ChatModel, LlmError,
};
use crate::patterns::PatternStore;

#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("enrichment call failed: {0}")]
    Unavailable(#[from] LlmError),

    #[error("enrichment response held no JSON object")]
    Unparseable,

    #[error("enrichment response had no role")]
    MissingRole,
}

impl EnrichmentError {
    /// Informational tag returned to clients alongside the fallback result.
    pub fn tag(&self) -> &'static str {
        match self {
            EnrichmentError::Unavailable(_) => "ai_unavailable",
            EnrichmentError::Unparseable => "ai_unparseable",
            EnrichmentError::MissingRole => "ai_incomplete",
        }
    }
}

/// Fields the model supplied. `None` means "not provided", so the classifier
/// value survives the merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enrichment {
    pub role: Option<String>,
    pub organization: Option<String>,
    pub sector: Option<Sector>,
    pub organization_insight: Option<String>,
    pub confidence_level: Option<ConfidenceLevel>,
    pub template: Option<String>,
    pub routing_target: Option<String>,
    pub themes: Option<Vec<String>>,
}

impl Enrichment {
    /// Reads an enrichment from model JSON. Only objects qualify; fields of
    /// the wrong type are treated as absent, and so are sector names outside
    /// the known set.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        let sector = string_field(obj, &["sector"]).and_then(|name| match name.parse::<Sector>() {
            Ok(sector) => Some(sector),
            Err(e) => {
                debug!("ignoring enrichment sector: {e}");
                None
            }
        });

        Some(Self {
            role: string_field(obj, &["role"]),
            organization: string_field(obj, &["organization", "org"]),
            sector,
            organization_insight: string_field(obj, &["organizationInsight", "orgInsight"]),
            confidence_level: string_field(obj, &["confidenceLevel", "confidence"])
                .and_then(|c| ConfidenceLevel::parse(&c)),
            template: string_field(obj, &["template"]),
            routing_target: string_field(obj, &["routingTarget", "routing"]),
            themes: themes_field(obj),
        })
    }
}

fn string_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| obj.get(*key)?.as_str().map(str::to_string))
}

fn themes_field(obj: &Map<String, Value>) -> Option<Vec<String>> {
    match obj.get("themes")? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|theme| !theme.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        Value::String(theme) if !theme.trim().is_empty() => Some(vec![theme.trim().to_string()]),
        _ => None,
    }
}

/// Overlays the enrichment on the classifier result. Returns `None` when the
/// enrichment has no usable role.
pub fn merge(base: &AnalysisResult, enrichment: Enrichment) -> Option<AnalysisResult> {
    let role = enrichment.role.filter(|role| !role.trim().is_empty())?;

    Some(AnalysisResult {
        role,
        organization: enrichment
            .organization
            .unwrap_or_else(|| base.organization.clone()),
        sector: enrichment.sector.unwrap_or(base.sector),
        organization_insight: enrichment
            .organization_insight
            .unwrap_or_else(|| base.organization_insight.clone()),
        confidence_level: enrichment.confidence_level.unwrap_or(base.confidence_level),
        template: enrichment.template.or_else(|| base.template.clone()),
        routing_target: enrichment
            .routing_target
            .or_else(|| base.routing_target.clone()),
        themes: enrichment.themes.unwrap_or_else(|| base.themes.clone()),
    })
}

pub fn build_enrichment_prompt(jd_text: &str, patterns: &PatternStore) -> String {
    let sectors = Sector::ALL
        .iter()
        .map(|s| format!("\"{s}\""))
        .collect::<Vec<_>>()
        .join(", ");

    // JD text goes in last so its contents are never treated as placeholders.
    JD_ANALYZE_PROMPT_TEMPLATE
        .replace("{sectors}", &sectors)
        .replace("{patterns}", &patterns.render_context())
        .replace("{jd_text}", jd_text)
}

/// Asks the model for an enrichment, bounded by `timeout`.
pub async fn request_enrichment(
    model: &dyn ChatModel,
    patterns: &PatternStore,
    jd_text: &str,
    timeout: Duration,
) -> Result<Enrichment, EnrichmentError> {
    let messages = [
        ChatMessage::system(COPILOT_SYSTEM_PROMPT),
        ChatMessage::user(build_enrichment_prompt(jd_text, patterns)),
    ];

    let content =
        complete_with_timeout(model, &messages, JD_ANALYZE_TEMPERATURE, timeout).await?;

    extract_json_object(&content)
        .as_ref()
        .and_then(Enrichment::from_value)
        .ok_or(EnrichmentError::Unparseable)
}

/// Full enrichment step: request, then merge onto `base`.
pub async fn enrich_analysis(
    model: &dyn ChatModel,
    patterns: &PatternStore,
    jd_text: &str,
    base: &AnalysisResult,
    timeout: Duration,
) -> Result<AnalysisResult, EnrichmentError> {
    let enrichment = request_enrichment(model, patterns, jd_text, timeout).await?;
    merge(base, enrichment).ok_or(EnrichmentError::MissingRole)
}
