//! Forest backend binary.
//!
//! Serves the `/api/v1` REST routes on `--bind` / BIND_ADDR
//! against the database at `--db` / DB_URL.
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    forest_core::log()?;
    forest_core::kys();
    let args = forest_server::Args::parse();
    forest_server::run(args).await
}
