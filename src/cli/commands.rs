//! CLI subcommand definitions

use clap::{Args, Subcommand, ValueEnum};

use llm_pricing::{PricingError, Provider, ServiceTier, UsageKind};

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// List the known models and their rates
    Models(ModelsArgs),
    /// Price API responses read from files, globs or stdin
    Price(PriceArgs),
}

#[derive(Debug, Args)]
pub(crate) struct ModelsArgs {
    /// Only list models of this provider
    #[arg(short, long, value_enum)]
    pub(crate) provider: Option<ProviderArg>,

    /// Output as JSON
    #[arg(short, long)]
    pub(crate) json: bool,
}

#[derive(Debug, Args)]
pub(crate) struct PriceArgs {
    /// Response files, glob patterns, or `-` for stdin
    #[arg(required = true, value_name = "INPUT")]
    pub(crate) inputs: Vec<String>,

    /// Payload kind (detected from the JSON shape when omitted)
    #[arg(short, long, value_enum)]
    pub(crate) kind: Option<KindArg>,

    /// Service tier to price at (standard, priority, flex)
    #[arg(short, long, value_parser = parse_tier)]
    pub(crate) tier: Option<ServiceTier>,

    /// Transcription model for payloads that do not name one
    #[arg(long, value_name = "MODEL")]
    pub(crate) stt_model: Option<String>,

    /// Decimal places in the printed prices
    #[arg(short, long, value_name = "N")]
    pub(crate) decimals: Option<usize>,

    /// Print one line per response before the total
    #[arg(short, long)]
    pub(crate) breakdown: bool,

    /// Output as JSON
    #[arg(short, long)]
    pub(crate) json: bool,
}

fn parse_tier(s: &str) -> Result<ServiceTier, String> {
    s.parse().map_err(|e: PricingError| e.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ProviderArg {
    Openai,
    Gemini,
}

impl From<ProviderArg> for Provider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Openai => Provider::OpenAi,
            ProviderArg::Gemini => Provider::Gemini,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum KindArg {
    Openai,
    Gemini,
    Transcription,
}

impl From<KindArg> for UsageKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Openai => UsageKind::OpenAi,
            KindArg::Gemini => UsageKind::Gemini,
            KindArg::Transcription => UsageKind::Transcription,
        }
    }
}
