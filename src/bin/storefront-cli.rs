use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "storefront-cli")]
#[command(about = "Command-line client for the storefront services", long_about = None)]
struct Cli {
    /// Base URL of the quote or recommendation service
    #[arg(short, long, default_value = "http://localhost:8093")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service health
    Health,
    /// Request a shipping quote
    Quote {
        /// Number of items to ship
        #[arg(short, long)]
        items: Option<i64>,
    },
    /// Request product recommendations
    Recommend {
        /// Product IDs to leave out
        #[arg(short, long, value_delimiter = ',')]
        exclude: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Health => client.get(format!("{}/health", base)).send().await?,
        Commands::Quote { items } => {
            let body = match items {
                Some(n) => json!({ "numberOfItems": n }),
                None => json!({}),
            };
            client
                .post(format!("{}/quote", base))
                .json(&body)
                .send()
                .await?
        }
        Commands::Recommend { exclude } => {
            client
                .get(format!("{}/recommendations", base))
                .query(&[("productIds", exclude.join(","))])
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if let Some(id) = res.headers().get("x-request-id").and_then(|v| v.to_str().ok()) {
        eprintln!("Request ID: {}", id);
    }

    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
