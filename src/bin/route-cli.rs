use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use radix_router::config::load_config;
use radix_router::http::{MatchBody, NotFoundBody};
use radix_router::routing::{HttpMethod, RouteTarget, Router};

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Offline tooling for radix-router route tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a route table and build its trie
    Check { config: PathBuf },
    /// Resolve one request against a route table
    Match {
        config: PathBuf,
        method: HttpMethod,
        path: String,
    },
    /// Print the compiled trie
    Tree { config: PathBuf },
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config } => {
            let router = build(&config)?;
            println!("ok: {} routes, {} nodes", router.len(), router.root().node_count());
        }
        Commands::Match {
            config,
            method,
            path,
        } => {
            let router = build(&config)?;
            match router.lookup(method, &path) {
                Some(found) => {
                    println!("{}", serde_json::to_string_pretty(&MatchBody::from(found))?);
                }
                None => {
                    let body = NotFoundBody::new(method.as_str(), &path);
                    println!("{}", serde_json::to_string_pretty(&body)?);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Tree { config } => {
            let router = build(&config)?;
            print!("{router}");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn build(path: &Path) -> Result<Router<RouteTarget>, Box<dyn Error>> {
    let config = load_config(path)?;
    Ok(Router::from_config(&config.routes)?)
}
