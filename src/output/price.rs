use llm_pricing::ResponsePrice;

use crate::output::format::paint;

/// A response priced on its own, labelled by its input.
#[derive(Debug, Clone)]
pub(crate) struct PricedResponse {
    pub(crate) label: String,
    pub(crate) price: ResponsePrice,
}

fn price_line(price: &ResponsePrice, decimals: Option<usize>) -> String {
    match decimals {
        Some(n) => price.display().decimals(n).to_string(),
        None => price.display().to_string(),
    }
}

/// Text report: optional per-response lines, then the combined price.
pub(crate) fn render_price_lines(
    items: &[PricedResponse],
    total: &ResponsePrice,
    decimals: Option<usize>,
    breakdown: bool,
    use_color: bool,
) -> Vec<String> {
    let mut lines = Vec::new();
    if breakdown {
        for item in items {
            lines.push(format!(
                "{}  {}",
                paint(&item.label, "36", use_color),
                price_line(&item.price, decimals)
            ));
        }
        lines.push(format!(
            "{}  {}",
            paint("Total", "1", use_color),
            price_line(total, decimals)
        ));
    } else {
        lines.push(price_line(total, decimals));
    }
    lines
}

pub(crate) fn print_price_lines(
    items: &[PricedResponse],
    total: &ResponsePrice,
    decimals: Option<usize>,
    breakdown: bool,
    use_color: bool,
) {
    for line in render_price_lines(items, total, decimals, breakdown, use_color) {
        println!("{line}");
    }
}
