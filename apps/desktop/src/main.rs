use std::io::Read;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{PredictionApi, PredictionClient};
use shared::domain::format_percent;
use shared::protocol::PredictRequest;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5001";

#[derive(Parser, Debug)]
#[command(
    name = "newsverify",
    about = "Command-line client for the news verification service"
)]
struct Cli {
    /// Prediction service base URL; falls back to NEWSVERIFY_SERVER_URL.
    #[arg(long)]
    server_url: Option<String>,
    /// Print the raw JSON response instead of the formatted verdict.
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit an article and print the verdict.
    Check {
        #[arg(long, default_value = "")]
        headline: String,
        /// Article text; pass "-" to read it from stdin.
        #[arg(long, default_value = "")]
        body: String,
        #[arg(long, default_value = "")]
        url: String,
    },
    /// Probe the service health endpoint.
    Health,
}

fn resolve_server_url(flag: Option<String>) -> String {
    flag.or_else(|| std::env::var("NEWSVERIFY_SERVER_URL").ok())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let cli = Cli::parse();

    let server_url = resolve_server_url(cli.server_url);
    let client = match PredictionClient::new(&server_url) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("{err}");
            return Ok(ExitCode::from(2));
        }
    };

    match cli.command {
        Command::Check {
            headline,
            body,
            url,
        } => {
            let body = if body == "-" {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                body
            };

            let request = PredictRequest::trimmed(&headline, &body, &url);
            match client.predict(&request).await {
                Ok(response) => {
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&response)?);
                    } else {
                        println!("{}", response.prediction.verdict().display_label());
                        println!("Confidence: {}", format_percent(response.confidence));
                        println!(
                            "Fake: {}  Real: {}",
                            format_percent(response.probabilities.fake),
                            format_percent(response.probabilities.real)
                        );
                    }
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    eprintln!("{err}");
                    // Validation failures exit 1, request failures exit 2.
                    Ok(ExitCode::from(if err.is_validation() { 1 } else { 2 }))
                }
            }
        }
        Command::Health => match client.health().await {
            Ok(health) => {
                println!("{}", health.status);
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                eprintln!("health check failed: {err}");
                Ok(ExitCode::from(2))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_default() {
        assert_eq!(
            resolve_server_url(Some("http://verify.internal".to_string())),
            "http://verify.internal"
        );
    }

    #[test]
    fn missing_flag_and_env_falls_back_to_default() {
        std::env::remove_var("NEWSVERIFY_SERVER_URL");
        assert_eq!(resolve_server_url(None), DEFAULT_SERVER_URL);
    }
}
