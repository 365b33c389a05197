//! Generates the static catalog file consumed by the viewer

use std::io;
use std::path::PathBuf;

use clap::Parser;
use pokedex_viewer::catalog_builder::{
    build_catalog, write_catalog, BuildOptions, DEFAULT_API_BASE, DEFAULT_CONCURRENCY,
    DEFAULT_LIMIT,
};
use pokedex_viewer::logging;

#[derive(Parser, Debug)]
#[command(name = "pokedex-build")]
#[command(about = "Build pokedex.json from PokeAPI")]
struct Args {
    /// Number of pokemon to include, starting from #1
    #[arg(long, default_value_t = DEFAULT_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
    limit: u32,

    /// Output file
    #[arg(long, short, default_value = "pokedex.json")]
    output: PathBuf,

    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Maximum concurrent detail requests
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    logging::init_stderr()?;
    let args = Args::parse();

    let options = BuildOptions {
        api_base: args.api_base,
        limit: args.limit,
        concurrency: args.concurrency,
    };

    let records = build_catalog(&options).await.map_err(io::Error::other)?;
    write_catalog(&args.output, &records)
        .await
        .map_err(io::Error::other)?;

    tracing::info!(
        count = records.len(),
        path = %args.output.display(),
        "pokedex written"
    );
    Ok(())
}
