//! Cost breakdowns for LLM and speech-to-text API usage.
//!
//! Usage reported by OpenAI, Gemini or a transcription endpoint is priced
//! against a static table of per-model, per-tier rates. The resulting
//! [`ResponsePrice`] values can be added together to track the running cost
//! of many calls, across providers.
//!
//! ```
//! use llm_pricing::{OpenAiUsage, PriceOptions, Usage, get_price};
//!
//! let usage = Usage::OpenAi(OpenAiUsage {
//!     model: "gpt-4.1-nano".to_string(),
//!     service_tier: Some("default".to_string()),
//!     input_tokens: 1_000,
//!     cached_tokens: 0,
//!     output_tokens: 500,
//! });
//! let price = get_price(&usage, &PriceOptions::default()).unwrap();
//! assert_eq!(
//!     price.to_string(),
//!     "$0.0001 (input, 33%) + $0.0002 (output, 67%) = $0.0003 total"
//! );
//! ```

pub mod config;
pub mod error;
pub mod pricing;
pub mod usage;

pub use config::{Config, ConfigColorMode, ModelEntry};
pub use error::{ConfigError, PricingError};
pub use pricing::{
    AppliedRates, ModelPricing, PriceDisplay, PriceOptions, PricingRow, PricingTable, PricingUnit,
    Provider, ResponsePrice, ServiceTier, get_price,
};
pub use usage::{GeminiUsage, OpenAiUsage, TranscriptionUsage, Usage, UsageKind};
