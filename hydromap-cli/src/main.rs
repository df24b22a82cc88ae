//! HydroMap CLI - inspect and search dataset catalogs outside the map.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "hydromap-cli",
    version,
    about = "HydroMap dataset catalog toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: hydromap_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    hydromap_cmd::run(cli.command).await
}
