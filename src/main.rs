use clap::Parser;
use cli::Args;
use indicatif::ProgressStyle;
use tracing::level_filters::LevelFilter;
use tracing_error::ErrorLayer;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub mod common_keys;
pub mod ethers_utils;
pub mod forge_utils;
pub mod serde_utils;

mod abis;
mod cli;
mod config;
mod deployment;
mod interactive;
mod report;
mod types;

const PROGRESS_TEMPLATE: &str =
    "{span_child_prefix}{spinner} {span_name}{{{span_fields}}}";

fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        // Usage errors share the exit code of every other failure
        Err(err) if err.use_stderr() => {
            err.print().ok();
            std::process::exit(1)
        }
        Err(err) => err.exit(),
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    dotenv::dotenv().ok();

    let args = parse_args();

    let indicatif_layer = IndicatifLayer::new()
        .with_progress_style(ProgressStyle::with_template(PROGRESS_TEMPLATE)?);

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_filter(filter),
        )
        .with(indicatif_layer)
        .with(ErrorLayer::default())
        .init();

    match deployment::run_deployment(args).await {
        Ok(()) => Ok(()),
        Err(err) => {
            tracing::error!("{:?}", err);
            std::process::exit(1)
        }
    }
}
