//! Built-in rate rows, USD per 1M tokens (transcription: USD per minute).

use super::types::ServiceTier::{Flex, Priority, Standard};
use super::types::{ModelPricing, Provider, ServiceTier};

pub(super) struct BuiltinRow {
    pub(super) provider: Provider,
    pub(super) model: &'static str,
    pub(super) tier: ServiceTier,
    pub(super) pricing: ModelPricing,
}

const fn openai(model: &'static str, tier: ServiceTier, pricing: ModelPricing) -> BuiltinRow {
    BuiltinRow {
        provider: Provider::OpenAi,
        model,
        tier,
        pricing,
    }
}

const fn gemini(model: &'static str, tier: ServiceTier, pricing: ModelPricing) -> BuiltinRow {
    BuiltinRow {
        provider: Provider::Gemini,
        model,
        tier,
        pricing,
    }
}

#[rustfmt::skip]
pub(super) const BUILTIN_ROWS: &[BuiltinRow] = &[
    // GPT-5
    openai("gpt-5.1",      Standard, ModelPricing::tokens(1.25,  Some(0.125),  10.00)),
    openai("gpt-5.1",      Priority, ModelPricing::tokens(2.50,  Some(0.25),   20.00)),
    openai("gpt-5.1",      Flex,     ModelPricing::tokens(0.625, Some(0.0625),  5.00)),
    openai("gpt-5",        Standard, ModelPricing::tokens(1.25,  Some(0.125),  10.00)),
    openai("gpt-5",        Priority, ModelPricing::tokens(2.50,  Some(0.25),   20.00)),
    openai("gpt-5",        Flex,     ModelPricing::tokens(0.625, Some(0.0625),  5.00)),
    openai("gpt-5-mini",   Standard, ModelPricing::tokens(0.25,  Some(0.025),   2.00)),
    openai("gpt-5-mini",   Priority, ModelPricing::tokens(0.45,  Some(0.045),   3.60)),
    openai("gpt-5-mini",   Flex,     ModelPricing::tokens(0.125, Some(0.0125),  1.00)),
    openai("gpt-5-nano",   Standard, ModelPricing::tokens(0.05,  Some(0.005),   0.40)),
    openai("gpt-5-nano",   Flex,     ModelPricing::tokens(0.025, Some(0.0025),  0.20)),
    openai("gpt-5-pro",    Standard, ModelPricing::tokens(15.00, None,        120.00)),
    // GPT-4.1
    openai("gpt-4.1",      Standard, ModelPricing::tokens(2.00,  Some(0.50),    8.00)),
    openai("gpt-4.1",      Priority, ModelPricing::tokens(3.50,  Some(0.875),  14.00)),
    openai("gpt-4.1-mini", Standard, ModelPricing::tokens(0.40,  Some(0.10),    1.60)),
    openai("gpt-4.1-mini", Priority, ModelPricing::tokens(0.70,  Some(0.175),   2.80)),
    openai("gpt-4.1-nano", Standard, ModelPricing::tokens(0.10,  Some(0.025),   0.40)),
    openai("gpt-4.1-nano", Priority, ModelPricing::tokens(0.20,  Some(0.05),    0.80)),
    // Speech-to-text
    openai("whisper-1",    Standard, ModelPricing::per_minute(0.006)),
    // Gemini 3
    gemini("gemini-3-pro-preview",   Standard, ModelPricing::tokens(2.00, None, 12.00)),
    gemini("gemini-3-flash-preview", Standard, ModelPricing::tokens(0.50, None,  3.00)),
];
