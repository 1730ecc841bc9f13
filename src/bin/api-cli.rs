use clap::{Parser, Subcommand};
use overflow_api::routing::{ApiDocument, DOCUMENT_PATH};
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "api-cli")]
#[command(about = "Inspect a running Stack Overflow Lite API server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// API prefix the server was configured with
    #[arg(short, long, default_value = "/api/v1")]
    prefix: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every route as METHOD PATH
    Routes,
    /// Print the API description document
    Doc,
    /// Check server liveness
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');
    let document_url = format!("{}{}{}", base, cli.prefix, DOCUMENT_PATH);

    match cli.command {
        Commands::Routes => {
            let Some(doc) = fetch::<ApiDocument>(&client, &document_url).await? else {
                return Ok(());
            };
            for (method, path) in doc.routes() {
                println!("{:<7} {}", method, path);
            }
        }
        Commands::Doc => {
            if let Some(doc) = fetch::<ApiDocument>(&client, &document_url).await? {
                println!("{}", serde_json::to_string_pretty(&doc)?);
            }
        }
        Commands::Health => {
            if let Some(health) = fetch::<Value>(&client, &format!("{}/health", base)).await? {
                println!("{}", serde_json::to_string_pretty(&health)?);
            }
        }
    }

    Ok(())
}

async fn fetch<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let res = client.get(url).send().await?;
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: {} returned status {}", url, status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(None);
    }
    Ok(Some(res.json().await?))
}
