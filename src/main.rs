// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Command-line interface for the repopage binary.
//!
//! Analyzes the public repositories of one GitHub user and writes a Jekyll
//! project page per repository.

use std::{path::PathBuf, process};

use chrono::Utc;
use clap::Parser;
use repopage::{DEFAULT_FEATURED_COUNT, DEFAULT_OUTPUT_DIR, Error, OctocrabTransport, RunConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

/// Command line interface for generating project pages from GitHub activity.
#[derive(Debug, Parser,)]
#[command(
    name = "repopage",
    version,
    about = "Analyze public GitHub repositories and render Jekyll project pages"
)]
struct Cli
{
    /// GitHub login whose public repositories are analyzed.
    #[arg(long = "username", env = "GITHUB_USERNAME", value_name = "LOGIN")]
    username: String,

    /// API token used to raise rate limits.
    #[arg(long = "token", env = "GITHUB_TOKEN", value_name = "TOKEN", hide_env_values = true)]
    token: Option<String,>,

    /// Directory that will receive the project pages.
    #[arg(long = "output", value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Analyze at most this many repositories.
    #[arg(long = "limit", value_name = "N")]
    limit: Option<usize,>,

    /// Give up after this many consecutive throttled responses.
    #[arg(long = "max-throttle-retries", value_name = "N")]
    max_throttle_retries: Option<u32,>,

    /// Number of top-scoring repositories marked as featured.
    #[arg(long = "featured", value_name = "N", default_value_t = DEFAULT_FEATURED_COUNT)]
    featured: usize,
}

impl Cli
{
    fn into_config(self,) -> RunConfig
    {
        let mut config = RunConfig::new(self.username,);
        config.token = self.token;
        config.output = self.output;
        config.limit = self.limit;
        config.featured = self.featured;
        config.client.throttle.max_retries = self.max_throttle_retries;
        config
    }
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main(flavor = "current_thread")]
async fn main()
{
    init_tracing();

    if let Err(error,) = run(Cli::parse(),).await {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

fn init_tracing()
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER,),);
    tracing_subscriber::fmt().with_env_filter(filter,).with_writer(std::io::stderr,).init();
}

/// Executes one analyzer run using parsed arguments.
///
/// # Errors
///
/// Propagates configuration, client construction and listing failures.
async fn run(cli: Cli,) -> Result<(), Error,>
{
    let config = cli.into_config();
    config.validate()?;

    let transport = OctocrabTransport::new(&config.client.api_base, config.token.as_deref(),)?;
    let summary = repopage::run(&config, transport, Utc::now(),).await?;

    println!();
    println!("{summary}");
    Ok((),)
}
