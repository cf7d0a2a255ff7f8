use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::Serialize;

use super::display::PriceDisplay;
use super::types::{ModelPricing, PricingUnit};

/// Rates that were applied to produce a price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AppliedRates {
    pub input: f64,
    pub input_cached: f64,
    pub output: f64,
    pub unit: PricingUnit,
}

impl From<&ModelPricing> for AppliedRates {
    fn from(pricing: &ModelPricing) -> Self {
        Self {
            input: pricing.input,
            input_cached: pricing.cached_rate(),
            output: pricing.output_rate(),
            unit: pricing.unit,
        }
    }
}

/// Cost breakdown of one or more priced API calls.
///
/// `total_price` always equals the sum of the three category prices. The
/// `Default` value is an empty accumulator (`quantity == 0`) and is the
/// identity of [`ResponsePrice::combine`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResponsePrice {
    input_price: f64,
    input_cached_price: f64,
    output_price: f64,
    total_price: f64,
    input_tokens: u64,
    input_cached_tokens: u64,
    output_tokens: u64,
    audio_seconds: f64,
    rates: Option<AppliedRates>,
    quantity: u64,
}

impl ResponsePrice {
    /// Price a token usage. `input_tokens` excludes the cached ones.
    pub fn from_tokens(
        pricing: &ModelPricing,
        input_tokens: u64,
        input_cached_tokens: u64,
        output_tokens: u64,
    ) -> Self {
        let input_price = pricing.cost(input_tokens as f64, pricing.input);
        let input_cached_price = pricing.cost(input_cached_tokens as f64, pricing.cached_rate());
        let output_price = pricing.cost(output_tokens as f64, pricing.output_rate());
        Self {
            input_price,
            input_cached_price,
            output_price,
            total_price: input_price + input_cached_price + output_price,
            input_tokens,
            input_cached_tokens,
            output_tokens,
            audio_seconds: 0.0,
            rates: Some(AppliedRates::from(pricing)),
            quantity: 1,
        }
    }

    /// Price an audio duration. The whole cost is booked as input.
    pub fn from_duration(pricing: &ModelPricing, seconds: f64) -> Self {
        let cost = pricing.cost(seconds, pricing.input);
        Self {
            input_price: cost,
            total_price: cost,
            audio_seconds: seconds,
            rates: Some(AppliedRates::from(pricing)),
            quantity: 1,
            ..Self::default()
        }
    }

    pub fn input_price(&self) -> f64 {
        self.input_price
    }

    pub fn input_cached_price(&self) -> f64 {
        self.input_cached_price
    }

    pub fn output_price(&self) -> f64 {
        self.output_price
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    /// Non-cached input tokens
    pub fn input_tokens(&self) -> u64 {
        self.input_tokens
    }

    pub fn input_cached_tokens(&self) -> u64 {
        self.input_cached_tokens
    }

    pub fn output_tokens(&self) -> u64 {
        self.output_tokens
    }

    pub fn audio_seconds(&self) -> f64 {
        self.audio_seconds
    }

    /// Rates shared by every aggregated call, `None` when they differ.
    pub fn rates(&self) -> Option<&AppliedRates> {
        self.rates.as_ref()
    }

    /// Number of priced calls represented by this value.
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn average_price(&self) -> Option<f64> {
        (self.quantity > 0).then(|| self.total_price / self.quantity as f64)
    }

    pub fn combine(&self, other: &ResponsePrice) -> ResponsePrice {
        let input_price = self.input_price + other.input_price;
        let input_cached_price = self.input_cached_price + other.input_cached_price;
        let output_price = self.output_price + other.output_price;
        ResponsePrice {
            input_price,
            input_cached_price,
            output_price,
            total_price: input_price + input_cached_price + output_price,
            input_tokens: self.input_tokens.saturating_add(other.input_tokens),
            input_cached_tokens: self
                .input_cached_tokens
                .saturating_add(other.input_cached_tokens),
            output_tokens: self.output_tokens.saturating_add(other.output_tokens),
            audio_seconds: self.audio_seconds + other.audio_seconds,
            rates: self.merged_rates(other),
            quantity: self.quantity.saturating_add(other.quantity),
        }
    }

    fn merged_rates(&self, other: &ResponsePrice) -> Option<AppliedRates> {
        if self.quantity == 0 {
            return other.rates;
        }
        if other.quantity == 0 {
            return self.rates;
        }
        match (self.rates, other.rates) {
            (Some(a), Some(b)) if a == b => Some(a),
            _ => None,
        }
    }

    /// Human-readable breakdown, 8 decimal places unless changed.
    pub fn display(&self) -> PriceDisplay<'_> {
        PriceDisplay::new(self)
    }
}

impl fmt::Display for ResponsePrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(), f)
    }
}

impl Add for ResponsePrice {
    type Output = ResponsePrice;

    fn add(self, rhs: ResponsePrice) -> ResponsePrice {
        self.combine(&rhs)
    }
}

impl<'a> Add<&'a ResponsePrice> for &'a ResponsePrice {
    type Output = ResponsePrice;

    fn add(self, rhs: &'a ResponsePrice) -> ResponsePrice {
        self.combine(rhs)
    }
}

impl AddAssign<&ResponsePrice> for ResponsePrice {
    fn add_assign(&mut self, rhs: &ResponsePrice) {
        *self = self.combine(rhs);
    }
}

impl AddAssign for ResponsePrice {
    fn add_assign(&mut self, rhs: ResponsePrice) {
        *self += &rhs;
    }
}

impl Sum for ResponsePrice {
    fn sum<I: Iterator<Item = ResponsePrice>>(iter: I) -> Self {
        iter.fold(ResponsePrice::default(), |acc, p| acc + p)
    }
}

impl<'a> Sum<&'a ResponsePrice> for ResponsePrice {
    fn sum<I: Iterator<Item = &'a ResponsePrice>>(iter: I) -> Self {
        iter.fold(ResponsePrice::default(), |mut acc, p| {
            acc += p;
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn nano() -> ModelPricing {
        ModelPricing::tokens(0.10, Some(0.025), 0.40)
    }

    fn whisper() -> ModelPricing {
        ModelPricing::per_minute(0.006)
    }

    fn assert_additive(p: &ResponsePrice) {
        let sum = p.input_price() + p.input_cached_price() + p.output_price();
        assert!((p.total_price() - sum).abs() < EPS, "{p:?}");
    }

    fn assert_close(a: &ResponsePrice, b: &ResponsePrice) {
        assert!((a.input_price() - b.input_price()).abs() < EPS);
        assert!((a.input_cached_price() - b.input_cached_price()).abs() < EPS);
        assert!((a.output_price() - b.output_price()).abs() < EPS);
        assert!((a.total_price() - b.total_price()).abs() < EPS);
        assert!((a.audio_seconds() - b.audio_seconds()).abs() < EPS);
        assert_eq!(a.input_tokens(), b.input_tokens());
        assert_eq!(a.input_cached_tokens(), b.input_cached_tokens());
        assert_eq!(a.output_tokens(), b.output_tokens());
        assert_eq!(a.rates(), b.rates());
        assert_eq!(a.quantity(), b.quantity());
    }

    #[test]
    fn token_price_matches_rates() {
        let p = ResponsePrice::from_tokens(&nano(), 1_000, 0, 500);
        let expected = 1_000.0 / 1_000_000.0 * 0.10 + 500.0 / 1_000_000.0 * 0.40;
        assert!((p.total_price() - expected).abs() < EPS);
        assert_eq!(p.input_cached_price(), 0.0);
        assert_eq!(p.quantity(), 1);
        assert_additive(&p);
    }

    #[test]
    fn cached_tokens_use_discounted_rate() {
        let p = ResponsePrice::from_tokens(&nano(), 0, 1_000_000, 0);
        assert!((p.input_cached_price() - 0.025).abs() < EPS);
        assert_eq!(p.rates().unwrap().input_cached, 0.025);
    }

    #[test]
    fn duration_price_is_per_minute() {
        let p = ResponsePrice::from_duration(&whisper(), 15.5);
        assert!((p.total_price() - 15.5 / 60.0 * 0.006).abs() < EPS);
        assert_eq!(p.input_price(), p.total_price());
        assert_eq!(p.audio_seconds(), 15.5);
        assert_additive(&p);
    }

    #[test]
    fn combining_durations_adds_quantity_and_cost() {
        let a = ResponsePrice::from_duration(&whisper(), 15.5);
        let b = ResponsePrice::from_duration(&whisper(), 30.0);
        let total = &a + &b;
        assert_eq!(total.quantity(), 2);
        assert!((total.total_price() - (a.total_price() + b.total_price())).abs() < EPS);
        assert_eq!(total.audio_seconds(), 45.5);
        assert_additive(&total);
    }

    #[test]
    fn combine_is_commutative() {
        let a = ResponsePrice::from_tokens(&nano(), 1_200, 300, 450);
        let b = ResponsePrice::from_duration(&whisper(), 42.0);
        assert_eq!(a.combine(&b), b.combine(&a));
    }

    #[test]
    fn combine_is_associative() {
        let a = ResponsePrice::from_tokens(&nano(), 1_200, 300, 450);
        let pro = ModelPricing::tokens(2.0, None, 12.0);
        let b = ResponsePrice::from_tokens(&pro, 9_000, 1_000, 77);
        let c = ResponsePrice::from_duration(&whisper(), 61.0);
        assert_close(&a.combine(&b).combine(&c), &a.combine(&b.combine(&c)));
    }

    #[test]
    fn quantity_counts_every_call() {
        let prices: Vec<ResponsePrice> = (1..=7)
            .map(|i| ResponsePrice::from_tokens(&nano(), i * 100, 0, i * 10))
            .collect();
        let total: ResponsePrice = prices.iter().sum();
        assert_eq!(total.quantity(), 7);
        let expected: f64 = prices.iter().map(ResponsePrice::total_price).sum();
        assert!((total.total_price() - expected).abs() < EPS);
        assert_additive(&total);
    }

    #[test]
    fn token_counts_saturate() {
        let big = ResponsePrice::from_tokens(&nano(), u64::MAX, 1, u64::MAX - 1);
        let small = ResponsePrice::from_tokens(&nano(), 1, u64::MAX, 5);
        let total = &big + &small;
        assert_eq!(total.input_tokens(), u64::MAX);
        assert_eq!(total.input_cached_tokens(), u64::MAX);
        assert_eq!(total.output_tokens(), u64::MAX);
        assert_eq!(total.quantity(), 2);
    }

    #[test]
    fn default_is_identity() {
        let a = ResponsePrice::from_tokens(&nano(), 10, 5, 3);
        assert_eq!(ResponsePrice::default().combine(&a), a);
        assert_eq!(a.combine(&ResponsePrice::default()), a);
        assert_eq!(ResponsePrice::default().average_price(), None);
    }

    #[test]
    fn shared_rates_survive_mixed_rates_do_not() {
        let a = ResponsePrice::from_tokens(&nano(), 10, 0, 3);
        let b = ResponsePrice::from_tokens(&nano(), 20, 0, 6);
        assert_eq!((&a + &b).rates(), a.rates());

        let c = ResponsePrice::from_duration(&whisper(), 5.0);
        let mixed = &a + &c;
        assert_eq!(mixed.rates(), None);
        assert_eq!((&mixed + &b).rates(), None);
    }

    #[test]
    fn add_assign_accumulates() {
        let mut running = ResponsePrice::default();
        running += ResponsePrice::from_tokens(&nano(), 100, 0, 10);
        running += &ResponsePrice::from_tokens(&nano(), 100, 0, 10);
        assert_eq!(running.quantity(), 2);
        assert_eq!(running.input_tokens(), 200);
        assert_eq!(running.output_tokens(), 20);
        let avg = running.average_price().unwrap();
        assert!((avg * 2.0 - running.total_price()).abs() < EPS);
    }

    #[test]
    fn serializes_all_fields() {
        let p = ResponsePrice::from_tokens(&nano(), 1_000, 0, 500);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["input_tokens"], 1_000);
        assert_eq!(json["output_tokens"], 500);
        assert_eq!(json["quantity"], 1);
        assert_eq!(json["rates"]["unit"], "per_million_tokens");
    }
}
