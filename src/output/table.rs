use comfy_table::{Cell, Color};

use llm_pricing::PricingRow;

use crate::output::format::{create_styled_table, format_rate, header_cell, right_cell};

/// Render the pricing rows as a table.
pub(crate) fn render_models_table(rows: &[PricingRow], use_color: bool) -> String {
    let mut table = create_styled_table();
    table.set_header(
        ["Provider", "Model", "Tier", "Input", "Cached", "Output", "Unit"]
            .map(|h| header_cell(h, use_color)),
    );

    let rate_color = use_color.then_some(Color::Green);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.provider.display_name()),
            Cell::new(&row.model),
            Cell::new(row.tier.as_str()),
            right_cell(&format_rate(Some(row.pricing.input)), rate_color),
            right_cell(&format_rate(row.pricing.input_cached), rate_color),
            right_cell(&format_rate(row.pricing.output), rate_color),
            Cell::new(row.pricing.unit.label()),
        ]);
    }
    table.to_string()
}

pub(crate) fn print_models_table(rows: &[PricingRow], use_color: bool) {
    if rows.is_empty() {
        println!("No models found.");
        return;
    }
    println!("{}", render_models_table(rows, use_color));
    println!("\n  {} pricing rows\n", rows.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_pricing::{ModelPricing, Provider, ServiceTier};

    #[test]
    fn renders_missing_rates_as_dash() {
        let rows = vec![PricingRow {
            provider: Provider::OpenAi,
            model: "whisper-1".to_string(),
            tier: ServiceTier::Standard,
            pricing: ModelPricing::per_minute(0.006),
        }];
        let out = render_models_table(&rows, false);
        assert!(out.contains("OpenAI"));
        assert!(out.contains("whisper-1"));
        assert!(out.contains("$0.006"));
        assert!(out.contains("$/min"));
        assert!(out.contains(" - "));
    }
}
