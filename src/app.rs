use rayon::prelude::*;

use llm_pricing::{PriceOptions, PricingTable, Provider, ResponsePrice, Usage, UsageKind};

use crate::cli::{AppError, Cli, Commands, ModelsArgs, PriceArgs};
use crate::loader::{Response, load_responses};
use crate::output::{
    PricedResponse, output_models_json, output_price_json, print_models_table, print_price_lines,
};

pub(crate) struct CommandContext<'a> {
    pub(crate) table: &'a PricingTable,
    pub(crate) use_color: bool,
}

fn handle_models(args: &ModelsArgs, ctx: &CommandContext<'_>) {
    let provider = args.provider.map(Provider::from);
    let rows: Vec<_> = ctx
        .table
        .rows()
        .into_iter()
        .filter(|row| provider.is_none_or(|p| row.provider == p))
        .collect();

    if args.json {
        println!("{}", output_models_json(&rows));
    } else {
        print_models_table(&rows, ctx.use_color);
    }
}

fn price_response(
    response: Response,
    kind: Option<UsageKind>,
    table: &PricingTable,
    options: &PriceOptions,
) -> Result<PricedResponse, AppError> {
    let priced = match kind {
        Some(kind) => Usage::from_json_as(kind, &response.value),
        None => Usage::from_json(&response.value),
    }
    .and_then(|usage| table.get_price(&usage, options));

    match priced {
        Ok(price) => Ok(PricedResponse {
            label: response.label,
            price,
        }),
        Err(source) => Err(AppError::Price {
            input: response.label,
            source,
        }),
    }
}

fn handle_price(args: &PriceArgs, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let responses = load_responses(&args.inputs)?;
    let options = PriceOptions {
        service_tier: args.tier,
        stt_model: args.stt_model.clone(),
    };
    let kind = args.kind.map(UsageKind::from);

    let items = responses
        .into_par_iter()
        .map(|response| price_response(response, kind, ctx.table, &options))
        .collect::<Result<Vec<_>, _>>()?;

    // Summed in input order so the total does not depend on scheduling
    let total: ResponsePrice = items.iter().map(|item| &item.price).sum();
    tracing::debug!(responses = items.len(), total = total.total_price(), "priced inputs");

    if args.json {
        println!("{}", output_price_json(&items, &total, args.breakdown));
    } else {
        print_price_lines(
            &items,
            &total,
            args.decimals,
            args.breakdown,
            ctx.use_color,
        );
    }
    Ok(())
}

pub(crate) fn run(cli: &Cli, table: &PricingTable) -> Result<(), AppError> {
    let ctx = CommandContext {
        table,
        use_color: cli.use_color(),
    };
    match &cli.command {
        Commands::Models(args) => {
            handle_models(args, &ctx);
            Ok(())
        }
        Commands::Price(args) => handle_price(args, &ctx),
    }
}
