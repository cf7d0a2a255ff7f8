use std::path::PathBuf;

use thiserror::Error;

use crate::pricing::{PricingUnit, Provider, ServiceTier};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("Unknown {provider} model: {model}")]
    UnknownModel { provider: Provider, model: String },

    #[error(
        "Service tier '{tier}' is not available for model {model} (available: {})",
        join_tiers(.available)
    )]
    UnsupportedTier {
        model: String,
        tier: ServiceTier,
        available: Vec<ServiceTier>,
    },

    #[error("Invalid service tier: {input} (expected standard, priority or flex)")]
    InvalidTier { input: String },

    #[error("Transcription usage needs a model name (none in the payload or the options)")]
    MissingModel,

    #[error("Model {model} is priced {}, which does not match this usage", .unit.label())]
    UnitMismatch { model: String, unit: PricingUnit },

    #[error("Invalid audio duration: {seconds} seconds")]
    InvalidDuration { seconds: f64 },

    #[error("Unrecognized usage payload: {reason}")]
    UnrecognizedUsage { reason: String },
}

impl PricingError {
    /// True for failures caused by a missing table entry or an unknown tier.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            PricingError::UnknownModel { .. }
                | PricingError::UnsupportedTier { .. }
                | PricingError::InvalidTier { .. }
        )
    }

    pub(crate) fn unrecognized(reason: impl Into<String>) -> Self {
        PricingError::UnrecognizedUsage {
            reason: reason.into(),
        }
    }
}

fn join_tiers(tiers: &[ServiceTier]) -> String {
    tiers
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid {field} rate {value} for model {model}")]
    InvalidRate {
        model: String,
        field: &'static str,
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_model_display() {
        let e = PricingError::UnknownModel {
            provider: Provider::OpenAi,
            model: "gpt-9".to_string(),
        };
        assert_eq!(e.to_string(), "Unknown openai model: gpt-9");
    }

    #[test]
    fn unsupported_tier_lists_available() {
        let e = PricingError::UnsupportedTier {
            model: "gpt-5-nano".to_string(),
            tier: ServiceTier::Priority,
            available: vec![ServiceTier::Standard, ServiceTier::Flex],
        };
        assert_eq!(
            e.to_string(),
            "Service tier 'priority' is not available for model gpt-5-nano (available: standard, flex)"
        );
    }

    #[test]
    fn unit_mismatch_display() {
        let e = PricingError::UnitMismatch {
            model: "whisper-1".to_string(),
            unit: PricingUnit::PerMinute,
        };
        assert_eq!(
            e.to_string(),
            "Model whisper-1 is priced $/min, which does not match this usage"
        );
    }

    #[test]
    fn lookup_errors_are_grouped() {
        assert!(
            PricingError::InvalidTier {
                input: "scale".to_string()
            }
            .is_lookup()
        );
        assert!(!PricingError::MissingModel.is_lookup());
        assert!(!PricingError::unrecognized("empty").is_lookup());
    }

    #[test]
    fn invalid_rate_display() {
        let e = ConfigError::InvalidRate {
            model: "gpt-4o".to_string(),
            field: "output",
            value: -1.0,
        };
        assert_eq!(e.to_string(), "Invalid output rate -1 for model gpt-4o");
    }
}
