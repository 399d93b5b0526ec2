//! Radix router service.
//!
//! Serves a route table over HTTP: every request is resolved against the
//! trie and answered with the matched route and its captures.

use std::path::PathBuf;

use clap::Parser;

use radix_router::lifecycle::startup;

#[derive(Parser, Debug)]
#[command(name = "radix-router", version, about = "Radix-trie HTTP request router")]
struct Args {
    /// Route table to serve
    #[arg(short, long, default_value = "router.toml")]
    config: PathBuf,

    /// Rebuild the trie when the route table changes
    #[arg(short, long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    startup::run(&args.config, args.watch).await
}
