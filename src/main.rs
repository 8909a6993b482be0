use anyhow::Context;
use clap::Parser;
use clim_report::cli::{run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).await.context("clim-report failed")
}
