use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use serde::Serialize;

use crate::error::PricingError;
use crate::usage::{GeminiUsage, OpenAiUsage, TranscriptionUsage, Usage};

use super::builtin::BUILTIN_ROWS;
use super::price::ResponsePrice;
use super::resolver::{lookup_keys, table_key};
use super::types::{ModelPricing, PricingUnit, Provider, ServiceTier};

static BUILTIN: LazyLock<PricingTable> = LazyLock::new(|| {
    let mut table = PricingTable::default();
    for row in BUILTIN_ROWS {
        table.insert(row.provider, row.model, row.tier, row.pricing);
    }
    table
});

/// Overrides applied on top of what the usage itself reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceOptions {
    /// Tier to price at instead of the one reported by the provider
    pub service_tier: Option<ServiceTier>,
    /// Transcription model, taking precedence over the one in the payload
    pub stt_model: Option<String>,
}

/// One table entry, as listed by [`PricingTable::rows`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingRow {
    pub provider: Provider,
    pub model: String,
    pub tier: ServiceTier,
    #[serde(flatten)]
    pub pricing: ModelPricing,
}

/// Rates keyed by `(provider, model)`, then by service tier.
#[derive(Debug, Clone, Default)]
pub struct PricingTable {
    models: HashMap<(Provider, String), BTreeMap<ServiceTier, ModelPricing>>,
}

impl PricingTable {
    /// The process-wide table of built-in rates.
    pub fn builtin() -> &'static PricingTable {
        &BUILTIN
    }

    /// Add or replace a row, returning the replaced rates.
    pub fn insert(
        &mut self,
        provider: Provider,
        model: &str,
        tier: ServiceTier,
        pricing: ModelPricing,
    ) -> Option<ModelPricing> {
        self.models
            .entry((provider, table_key(provider, model)))
            .or_default()
            .insert(tier, pricing)
    }

    /// Number of `(provider, model, tier)` rows.
    pub fn len(&self) -> usize {
        self.models.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn lookup(
        &self,
        provider: Provider,
        model: &str,
        tier: ServiceTier,
    ) -> Result<&ModelPricing, PricingError> {
        let tiers = lookup_keys(provider, model)
            .into_iter()
            .find_map(|key| self.models.get(&(provider, key)))
            .ok_or_else(|| PricingError::UnknownModel {
                provider,
                model: model.to_string(),
            })?;

        let pricing = tiers
            .get(&tier)
            .ok_or_else(|| PricingError::UnsupportedTier {
                model: model.to_string(),
                tier,
                available: tiers.keys().copied().collect(),
            })?;
        tracing::debug!(%provider, model, %tier, "resolved pricing row");
        Ok(pricing)
    }

    /// Every row, sorted by provider, model and tier.
    pub fn rows(&self) -> Vec<PricingRow> {
        let mut rows: Vec<PricingRow> = self
            .models
            .iter()
            .flat_map(|((provider, model), tiers)| {
                tiers.iter().map(move |(tier, pricing)| PricingRow {
                    provider: *provider,
                    model: model.clone(),
                    tier: *tier,
                    pricing: *pricing,
                })
            })
            .collect();
        rows.sort_by(|a, b| {
            a.provider
                .cmp(&b.provider)
                .then_with(|| a.model.cmp(&b.model))
                .then_with(|| a.tier.cmp(&b.tier))
        });
        rows
    }

    pub fn get_price(
        &self,
        usage: &Usage,
        options: &PriceOptions,
    ) -> Result<ResponsePrice, PricingError> {
        let price = match usage {
            Usage::OpenAi(u) => self.price_openai(u, options)?,
            Usage::Gemini(u) => self.price_gemini(u, options)?,
            Usage::Transcription(u) => self.price_transcription(u, options)?,
        };
        tracing::debug!(
            kind = %usage.kind(),
            total = price.total_price(),
            "priced usage"
        );
        Ok(price)
    }

    fn price_openai(
        &self,
        usage: &OpenAiUsage,
        options: &PriceOptions,
    ) -> Result<ResponsePrice, PricingError> {
        let tier = match options.service_tier {
            Some(tier) => tier,
            None => usage
                .service_tier
                .as_deref()
                .map(str::parse::<ServiceTier>)
                .transpose()?
                .unwrap_or_default(),
        };
        let pricing = self.lookup(Provider::OpenAi, &usage.model, tier)?;
        expect_unit(pricing, PricingUnit::PerMillionTokens, &usage.model)?;

        let cached = usage.cached_tokens.min(usage.input_tokens);
        Ok(ResponsePrice::from_tokens(
            pricing,
            usage.input_tokens - cached,
            cached,
            usage.output_tokens,
        ))
    }

    fn price_gemini(
        &self,
        usage: &GeminiUsage,
        options: &PriceOptions,
    ) -> Result<ResponsePrice, PricingError> {
        let tier = options.service_tier.unwrap_or_default();
        let pricing = self.lookup(Provider::Gemini, &usage.model, tier)?;
        expect_unit(pricing, PricingUnit::PerMillionTokens, &usage.model)?;

        let cached = usage.cached_tokens.min(usage.prompt_tokens);
        Ok(ResponsePrice::from_tokens(
            pricing,
            usage.prompt_tokens - cached,
            cached,
            usage.candidate_tokens,
        ))
    }

    fn price_transcription(
        &self,
        usage: &TranscriptionUsage,
        options: &PriceOptions,
    ) -> Result<ResponsePrice, PricingError> {
        let model = options
            .stt_model
            .as_deref()
            .or(usage.model.as_deref())
            .ok_or(PricingError::MissingModel)?;
        if !usage.seconds.is_finite() || usage.seconds < 0.0 {
            return Err(PricingError::InvalidDuration {
                seconds: usage.seconds,
            });
        }
        let tier = options.service_tier.unwrap_or_default();
        let pricing = self.lookup(Provider::OpenAi, model, tier)?;
        expect_unit(pricing, PricingUnit::PerMinute, model)?;

        Ok(ResponsePrice::from_duration(pricing, usage.seconds))
    }
}

fn expect_unit(
    pricing: &ModelPricing,
    expected: PricingUnit,
    model: &str,
) -> Result<(), PricingError> {
    if pricing.unit == expected {
        Ok(())
    } else {
        Err(PricingError::UnitMismatch {
            model: model.to_string(),
            unit: pricing.unit,
        })
    }
}

/// Price `usage` against the built-in table.
pub fn get_price(usage: &Usage, options: &PriceOptions) -> Result<ResponsePrice, PricingError> {
    PricingTable::builtin().get_price(usage, options)
}
