use serde::Deserialize;
use serde_json::Value;

use crate::error::PricingError;

use super::GeminiUsage;

/// REST responses use camelCase, SDK dumps use snake_case.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResponse {
    #[serde(alias = "usage_metadata")]
    usage_metadata: Option<RawUsageMetadata>,
    #[serde(alias = "model_version")]
    model_version: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUsageMetadata {
    #[serde(alias = "prompt_token_count")]
    prompt_token_count: Option<u64>,
    #[serde(alias = "cached_content_token_count")]
    cached_content_token_count: Option<u64>,
    #[serde(alias = "candidates_token_count")]
    candidates_token_count: Option<u64>,
    #[serde(alias = "thoughts_token_count")]
    thoughts_token_count: Option<u64>,
}

pub(super) fn parse(value: &Value) -> Result<GeminiUsage, PricingError> {
    let raw = RawResponse::deserialize(value)
        .map_err(|e| PricingError::unrecognized(format!("Gemini response: {e}")))?;
    let model = raw
        .model
        .or(raw.model_version)
        .ok_or_else(|| PricingError::unrecognized("Gemini response has no model"))?;
    let usage = raw
        .usage_metadata
        .ok_or_else(|| PricingError::unrecognized("Gemini response has no usage metadata"))?;

    Ok(GeminiUsage {
        model,
        prompt_tokens: usage.prompt_token_count.unwrap_or(0),
        cached_tokens: usage.cached_content_token_count.unwrap_or(0),
        candidate_tokens: usage.candidates_token_count.unwrap_or(0),
        thought_tokens: usage.thoughts_token_count.unwrap_or(0),
    })
}
