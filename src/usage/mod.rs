//! Provider usage reports
//!
//! [`Usage`] is what the calculator prices. Raw API payloads are turned into
//! it by [`Usage::from_json`], the only place that inspects payload shape.

mod gemini;
mod openai;
mod transcription;

use std::fmt;

use serde_json::Value;

use crate::error::PricingError;

/// Token usage reported by an OpenAI Responses or Chat Completions call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenAiUsage {
    pub model: String,
    /// Tier echoed by the API (`"default"`, `"flex"`, `"priority"`, ...)
    pub service_tier: Option<String>,
    /// Total input tokens, cached ones included
    pub input_tokens: u64,
    pub cached_tokens: u64,
    pub output_tokens: u64,
}

/// Usage metadata of a Gemini `generateContent` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeminiUsage {
    pub model: String,
    /// Prompt tokens, cached ones included
    pub prompt_tokens: u64,
    pub cached_tokens: u64,
    pub candidate_tokens: u64,
    /// Thinking tokens, reported but not billed
    pub thought_tokens: u64,
}

/// Duration usage of a speech-to-text call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptionUsage {
    pub model: Option<String>,
    pub seconds: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Usage {
    OpenAi(OpenAiUsage),
    Gemini(GeminiUsage),
    Transcription(TranscriptionUsage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageKind {
    OpenAi,
    Gemini,
    Transcription,
}

impl UsageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            UsageKind::OpenAi => "openai",
            UsageKind::Gemini => "gemini",
            UsageKind::Transcription => "transcription",
        }
    }
}

impl fmt::Display for UsageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Usage {
    pub fn kind(&self) -> UsageKind {
        match self {
            Usage::OpenAi(_) => UsageKind::OpenAi,
            Usage::Gemini(_) => UsageKind::Gemini,
            Usage::Transcription(_) => UsageKind::Transcription,
        }
    }

    /// Parse a raw API payload, recognising the provider from its shape.
    pub fn from_json(value: &Value) -> Result<Usage, PricingError> {
        let kind = detect_kind(value)?;
        Self::from_json_as(kind, value)
    }

    /// Parse a raw API payload known to come from `kind`.
    pub fn from_json_as(kind: UsageKind, value: &Value) -> Result<Usage, PricingError> {
        match kind {
            UsageKind::OpenAi => openai::parse(value).map(Usage::OpenAi),
            UsageKind::Gemini => gemini::parse(value).map(Usage::Gemini),
            UsageKind::Transcription => transcription::parse(value).map(Usage::Transcription),
        }
    }
}

fn detect_kind(value: &Value) -> Result<UsageKind, PricingError> {
    let Some(object) = value.as_object() else {
        return Err(PricingError::unrecognized("expected a JSON object"));
    };
    if object.contains_key("usageMetadata") || object.contains_key("usage_metadata") {
        return Ok(UsageKind::Gemini);
    }
    match object.get("usage") {
        Some(usage) if usage.get("seconds").is_some() => Ok(UsageKind::Transcription),
        Some(usage)
            if usage.get("input_tokens").is_some() || usage.get("prompt_tokens").is_some() =>
        {
            Ok(UsageKind::OpenAi)
        }
        Some(_) => Err(PricingError::unrecognized(
            "usage has neither token counts nor a duration",
        )),
        None => Err(PricingError::unrecognized("no usage field")),
    }
}
