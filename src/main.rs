use anyhow::Result;
use archtrend::cli::Args;
use archtrend::generator::workflow::launch;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// 日志输出到stderr，stdout留给报告与JSON结果
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "archtrend=debug" } else { "archtrend=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(stderr_layer).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let (config, task, overrides) = args.into_parts()?;
    init_tracing(config.verbose);

    let passed = launch(&config, task, overrides).await?;
    if !passed {
        std::process::exit(1);
    }
    Ok(())
}
