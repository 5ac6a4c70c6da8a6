//! Axum route handler for JD analysis.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::classifier::AnalysisResult;
use crate::analysis::enrichment::enrich_analysis;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JdAnalyzeRequest {
    #[serde(default)]
    pub jd_text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    Ai,
    Fallback,
}

#[derive(Debug, Serialize)]
pub struct JdAnalyzeResponse {
    pub analysis: AnalysisResult,
    pub source: AnalysisSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST /api/jd-analyze
///
/// Classifies the JD locally, then tries AI enrichment when a model is
/// configured. Enrichment problems never surface as an error status; the
/// classifier result comes back with `source: "fallback"` instead.
pub async fn handle_jd_analyze(
    State(state): State<AppState>,
    Json(request): Json<JdAnalyzeRequest>,
) -> Result<Json<JdAnalyzeResponse>, AppError> {
    let jd_text = request.jd_text.unwrap_or_default();
    if jd_text.trim().is_empty() {
        return Err(AppError::Validation("jdText is required".to_string()));
    }

    let fallback = state.classifier.analyze(&jd_text);
    debug!(
        sector = %fallback.sector,
        confidence = ?fallback.confidence_level,
        "JD classified locally"
    );

    let Some(model) = state.llm.as_deref() else {
        return Ok(Json(JdAnalyzeResponse {
            analysis: fallback,
            source: AnalysisSource::Fallback,
            error: None,
        }));
    };

    let response = match enrich_analysis(
        model,
        &state.patterns,
        &jd_text,
        &fallback,
        state.config.llm_timeout,
    )
    .await
    {
        Ok(analysis) => JdAnalyzeResponse {
            analysis,
            source: AnalysisSource::Ai,
            error: None,
        },
        Err(e) => {
            warn!("JD enrichment fell back to local analysis: {e}");
            JdAnalyzeResponse {
                analysis: fallback,
                source: AnalysisSource::Fallback,
                error: Some(e.tag().to_string()),
            }
        }
    };

    Ok(Json(response))
}
