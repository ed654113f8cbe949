mod quote;
mod regions;
mod settings;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use pickup_core::{AppConfig, Catalog, EmptyLocationPolicy, WeightUnit};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pickup-cli")]
#[command(about = "Regional pick-up shipping: quotes, settings and reference data")]
struct Cli {
    /// Settings file (defaults to `PICKUP_SETTINGS_PATH`)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
    /// Reference data file (defaults to `PICKUP_REFERENCE_PATH`)
    #[arg(long, global = true)]
    reference: Option<PathBuf>,
    /// Message locale, e.g. `ru_RU` (defaults to `PICKUP_LOCALE`)
    #[arg(long, global = true)]
    locale: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Price an order against the settings file
    Quote {
        /// Destination country (ISO3)
        #[arg(long)]
        country: String,
        /// Destination region code
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        city: Option<String>,
        /// Total order weight
        #[arg(long)]
        weight: Decimal,
        /// Unit of `--weight`: kg, g, lb or oz
        #[arg(long, default_value = "kg")]
        unit: WeightUnit,
        /// Order subtotal in the settings currency
        #[arg(long)]
        total: Decimal,
    },
    /// Validate and normalize a settings submission (YAML or JSON)
    Normalize {
        /// Submission file
        input: PathBuf,
        /// What to do with rows whose location is empty (defaults to
        /// `PICKUP_EMPTY_LOCATION_POLICY`)
        #[arg(long)]
        policy: Option<EmptyLocationPolicy>,
        /// Emit JSON instead of YAML
        #[arg(long)]
        json: bool,
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Render the settings form as HTML
    RenderForm {
        /// Rejected submission to redisplay over the persisted settings
        #[arg(long)]
        overrides: Option<PathBuf>,
        /// Field namespace segment; repeat for nesting
        #[arg(long = "namespace")]
        namespace: Vec<String>,
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List the regions of a country in display order
    Regions {
        /// Country (ISO3)
        country: String,
    },
}

/// Resolved paths and services shared by every command.
pub(crate) struct Context {
    pub settings_path: PathBuf,
    pub reference_path: PathBuf,
    pub catalog: Catalog,
    pub empty_location_policy: EmptyLocationPolicy,
    pub region_lookup_url: String,
}

impl Context {
    fn new(cli: &Cli, config: AppConfig) -> Self {
        let locale = cli.locale.clone().unwrap_or(config.locale);
        Self {
            settings_path: cli.settings.clone().unwrap_or(config.settings_path),
            reference_path: cli.reference.clone().unwrap_or(config.reference_path),
            catalog: Catalog::for_locale(&locale),
            empty_location_policy: config.empty_location_policy,
            region_lookup_url: config.region_lookup_url,
        }
    }
}

/// Writes `content` to `output`, or to stdout when no file is given.
pub(crate) fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)?;
            tracing::info!(path = %path.display(), bytes = content.len(), "wrote output");
        }
        None => print!("{content}"),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = pickup_core::load_app_config_from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let ctx = Context::new(&cli, config);

    match cli.command {
        Commands::Quote {
            country,
            region,
            city,
            weight,
            unit,
            total,
        } => {
            let request = quote::build_request(country, region, city, weight, unit, total);
            quote::run_quote(&ctx, &request)
        }
        Commands::Normalize {
            input,
            policy,
            json,
            output,
        } => settings::run_normalize(
            &ctx,
            &input,
            policy.unwrap_or(ctx.empty_location_policy),
            json,
            output.as_deref(),
        ),
        Commands::RenderForm {
            overrides,
            namespace,
            output,
        } => settings::run_render_form(&ctx, overrides.as_deref(), namespace, output.as_deref()),
        Commands::Regions { country } => regions::run_regions(&ctx, &country),
    }
}

#[cfg(test)]
mod tests;
