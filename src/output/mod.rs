mod format;
mod json;
mod price;
mod table;

pub(crate) use json::{output_models_json, output_price_json};
pub(crate) use price::{PricedResponse, print_price_lines};
pub(crate) use table::print_models_table;
