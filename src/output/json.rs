use serde::Serialize;

use llm_pricing::{PricingRow, ResponsePrice};

use crate::output::PricedResponse;

#[derive(Serialize)]
struct PriceItem<'a> {
    input: &'a str,
    #[serde(flatten)]
    price: &'a ResponsePrice,
}

#[derive(Serialize)]
struct PriceReport<'a> {
    #[serde(flatten)]
    total: &'a ResponsePrice,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Vec<PriceItem<'a>>>,
}

fn to_json<T: Serialize>(value: &T, fallback: &str) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        tracing::error!("Failed to serialize JSON output: {e}");
        fallback.to_string()
    })
}

pub(crate) fn output_models_json(rows: &[PricingRow]) -> String {
    to_json(&rows, "[]")
}

/// The combined price, plus one entry per response when `breakdown` is set.
pub(crate) fn output_price_json(
    items: &[PricedResponse],
    total: &ResponsePrice,
    breakdown: bool,
) -> String {
    let report = PriceReport {
        total,
        items: breakdown.then(|| {
            items
                .iter()
                .map(|item| PriceItem {
                    input: &item.label,
                    price: &item.price,
                })
                .collect()
        }),
    };
    to_json(&report, "{}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_pricing::ModelPricing;
    use serde_json::Value;

    fn priced(label: &str, seconds: f64) -> PricedResponse {
        PricedResponse {
            label: label.to_string(),
            price: ResponsePrice::from_duration(&ModelPricing::per_minute(0.006), seconds),
        }
    }

    #[test]
    fn total_only_without_breakdown() {
        let items = vec![priced("a.json", 30.0), priced("b.json", 30.0)];
        let total: ResponsePrice = items.iter().map(|i| &i.price).sum();
        let json: Value = serde_json::from_str(&output_price_json(&items, &total, false)).unwrap();

        assert_eq!(json["quantity"], 2);
        assert!((json["total_price"].as_f64().unwrap() - 0.006).abs() < 1e-12);
        assert!(json.get("items").is_none());
    }

    #[test]
    fn items_with_breakdown() {
        let items = vec![priced("a.json", 60.0)];
        let total: ResponsePrice = items.iter().map(|i| &i.price).sum();
        let json: Value = serde_json::from_str(&output_price_json(&items, &total, true)).unwrap();

        let listed = json["items"].as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["input"], "a.json");
        assert_eq!(listed[0]["audio_seconds"], 60.0);
        assert_eq!(listed[0]["rates"]["unit"], "per_minute");
    }
}
