//! Binary crate for the `cityclock` server and command-line tool.

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    cityclock_server::init_tracing();

    let cmd = cityclock_server::cli::Cli::parse();
    cmd.run().await
}
