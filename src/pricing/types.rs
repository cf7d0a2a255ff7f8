use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PricingError;

/// API vendor a pricing row belongs to. Transcription models are OpenAI rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Gemini,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Gemini => "Gemini",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pricing category selecting which rate row applies to a model.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ServiceTier {
    #[default]
    Standard,
    Priority,
    Flex,
}

impl ServiceTier {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceTier::Standard => "standard",
            ServiceTier::Priority => "priority",
            ServiceTier::Flex => "flex",
        }
    }
}

impl fmt::Display for ServiceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceTier {
    type Err = PricingError;

    /// OpenAI reports the standard tier as `"default"` and may echo `"auto"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "standard" | "default" | "auto" => Ok(ServiceTier::Standard),
            "priority" => Ok(ServiceTier::Priority),
            "flex" => Ok(ServiceTier::Flex),
            _ => Err(PricingError::InvalidTier {
                input: trimmed.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ServiceTier {
    type Error = PricingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// What a rate is charged against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingUnit {
    /// USD per one million tokens (LLM rows)
    #[default]
    PerMillionTokens,
    /// USD per minute of audio (transcription rows)
    PerMinute,
}

impl PricingUnit {
    /// How many usage units one rate unit covers.
    pub(crate) fn scale(self) -> f64 {
        match self {
            PricingUnit::PerMillionTokens => 1_000_000.0,
            PricingUnit::PerMinute => 60.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PricingUnit::PerMillionTokens => "$/M tokens",
            PricingUnit::PerMinute => "$/min",
        }
    }
}

/// Rates for one `(provider, model, tier)` row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelPricing {
    pub input: f64,
    /// Rate for cached input; `None` leaves cached tokens unbilled
    pub input_cached: Option<f64>,
    /// `None` when the model has no separate output billing
    pub output: Option<f64>,
    pub unit: PricingUnit,
}

impl ModelPricing {
    pub const fn tokens(input: f64, input_cached: Option<f64>, output: f64) -> Self {
        Self {
            input,
            input_cached,
            output: Some(output),
            unit: PricingUnit::PerMillionTokens,
        }
    }

    pub const fn per_minute(rate: f64) -> Self {
        Self {
            input: rate,
            input_cached: None,
            output: None,
            unit: PricingUnit::PerMinute,
        }
    }

    pub(crate) fn cached_rate(&self) -> f64 {
        self.input_cached.unwrap_or(0.0)
    }

    pub(crate) fn output_rate(&self) -> f64 {
        self.output.unwrap_or(0.0)
    }

    /// Cost of `amount` usage units at `rate`.
    pub(crate) fn cost(&self, amount: f64, rate: f64) -> f64 {
        amount * rate / self.unit.scale()
    }
}
