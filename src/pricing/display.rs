use std::fmt;

use super::price::ResponsePrice;

const DEFAULT_DECIMALS: usize = 8;

/// Formatter returned by [`ResponsePrice::display`].
///
/// Renders `$<input> (input, <pct>%) + $<cached> (cached, <pct>%)` then
/// `+ $<output> (output, <pct>%) = $<total> total`, skipping zero-cost
/// categories, and appends the per-call average when more than one call was
/// aggregated.
#[derive(Debug, Clone, Copy)]
pub struct PriceDisplay<'a> {
    price: &'a ResponsePrice,
    decimals: usize,
}

impl<'a> PriceDisplay<'a> {
    pub(super) fn new(price: &'a ResponsePrice) -> Self {
        Self {
            price,
            decimals: DEFAULT_DECIMALS,
        }
    }

    pub fn decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }
}

impl fmt::Display for PriceDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.price;
        let total = p.total_price();
        let parts: Vec<String> = [
            ("input", p.input_price()),
            ("cached", p.input_cached_price()),
            ("output", p.output_price()),
        ]
        .into_iter()
        .filter(|(_, value)| *value > 0.0)
        .map(|(label, value)| {
            format!(
                "${} ({label}, {})",
                format_price(value, self.decimals),
                percentage(value, total)
            )
        })
        .collect();

        if parts.is_empty() {
            f.write_str("$0")?;
        } else {
            f.write_str(&parts.join(" + "))?;
        }
        write!(f, " = ${} total", format_price(total, self.decimals))?;

        if p.quantity() > 1
            && let Some(avg) = p.average_price()
        {
            write!(
                f,
                " (x{} appels, ${} par appel)",
                p.quantity(),
                format_price(avg, self.decimals)
            )?;
        }
        Ok(())
    }
}

/// Fixed decimals with trailing zeros trimmed, keeping one digit after the point.
fn format_price(value: f64, decimals: usize) -> String {
    let formatted = format!("{value:.decimals$}");
    if !formatted.contains('.') {
        return formatted;
    }
    let trimmed = formatted.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}

/// Share of the total from unrounded values, ties to even; a zero total reads `0%`.
fn percentage(value: f64, total: f64) -> String {
    if total == 0.0 {
        return "0%".to_string();
    }
    format!("{}%", (100.0 * value / total).round_ties_even() as i64)
}
