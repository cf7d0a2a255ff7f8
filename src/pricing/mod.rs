mod builtin;
mod display;
mod price;
mod resolver;
mod table;
mod types;

pub use display::PriceDisplay;
pub use price::{AppliedRates, ResponsePrice};
pub use table::{PriceOptions, PricingRow, PricingTable, get_price};
pub use types::{ModelPricing, PricingUnit, Provider, ServiceTier};
