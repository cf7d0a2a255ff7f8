use serde::Deserialize;
use serde_json::Value;

use crate::error::PricingError;

use super::OpenAiUsage;

#[derive(Debug, Deserialize)]
struct RawResponse {
    model: Option<String>,
    service_tier: Option<String>,
    usage: Option<RawUsage>,
}

/// Responses API names first, Chat Completions names second.
#[derive(Debug, Deserialize)]
struct RawUsage {
    input_tokens: Option<u64>,
    output_tokens: Option<u64>,
    input_tokens_details: Option<TokenDetails>,
    prompt_tokens: Option<u64>,
    completion_tokens: Option<u64>,
    prompt_tokens_details: Option<TokenDetails>,
}

#[derive(Debug, Deserialize)]
struct TokenDetails {
    cached_tokens: Option<u64>,
}

fn cached(details: Option<TokenDetails>) -> u64 {
    details.and_then(|d| d.cached_tokens).unwrap_or(0)
}

pub(super) fn parse(value: &Value) -> Result<OpenAiUsage, PricingError> {
    let raw = RawResponse::deserialize(value)
        .map_err(|e| PricingError::unrecognized(format!("OpenAI response: {e}")))?;
    let model = raw
        .model
        .ok_or_else(|| PricingError::unrecognized("OpenAI response has no model"))?;
    let usage = raw
        .usage
        .ok_or_else(|| PricingError::unrecognized("OpenAI response has no usage"))?;

    let counts = match (usage.input_tokens, usage.prompt_tokens) {
        (Some(input), _) => (
            input,
            cached(usage.input_tokens_details),
            usage.output_tokens.unwrap_or(0),
        ),
        (None, Some(prompt)) => (
            prompt,
            cached(usage.prompt_tokens_details),
            usage.completion_tokens.unwrap_or(0),
        ),
        (None, None) => {
            return Err(PricingError::unrecognized(
                "OpenAI usage has no input or prompt token count",
            ));
        }
    };
    let (input_tokens, cached_tokens, output_tokens) = counts;

    Ok(OpenAiUsage {
        model,
        service_tier: raw.service_tier,
        input_tokens,
        cached_tokens,
        output_tokens,
    })
}
