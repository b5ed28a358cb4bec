use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::info;

use omdb_proxy::{
    ApiResponse,
    omdb::{GetMovieByIdRequest, SearchMoviesRequest},
    rpc::ErrorBody,
    telemetry,
};

/// Call a running omdb-proxy and print the result
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Server address
    #[arg(long, default_value = "http://127.0.0.1:50051")]
    addr: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// GetMovieByID
    Get { id: String },
    /// SearchMovies
    Search {
        query: String,
        #[arg(long = "type", default_value = "")]
        kind: String,
        #[arg(long, default_value_t = 1)]
        page: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _guard = telemetry::init_tracing(false)?;

    let client = Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .context("failed to build HTTP client")?;
    let base = args.addr.trim_end_matches('/');

    match args.command {
        Command::Get { id } => {
            info!("calling GetMovieByID");
            call(&client, &format!("{base}/api/movies"), &GetMovieByIdRequest::new(id)).await
        }
        Command::Search { query, kind, page } => {
            info!("calling SearchMovies");
            let req = SearchMoviesRequest::new(query).with_kind(kind).with_page(page);
            call(&client, &format!("{base}/api/movies/search"), &req).await
        }
    }
}

async fn call<Q: Serialize>(client: &Client, url: &str, query: &Q) -> anyhow::Result<()> {
    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .with_context(|| format!("failed to reach {url}"))?;

    if response.status().is_success() {
        let body: ApiResponse<serde_json::Value> = response.json().await?;
        println!("{}", serde_json::to_string_pretty(&body.data)?);
        return Ok(());
    }

    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => bail!("{}: {}", body.status, body.message),
        Err(_) => bail!("server responded with HTTP {status}"),
    }
}
