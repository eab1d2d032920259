use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "sandbox-cli")]
#[command(about = "Trigger telemetry signals on a running sandbox", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Shared secret sent as x-demo-key.
    #[arg(short, long, env = "DEMO_API_KEY")]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Level {
    Info,
    Warn,
    Error,
}

#[derive(Clone, Copy, ValueEnum)]
enum Exception {
    Handled,
    Unhandled,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit one log line at the given level
    Log { level: Level },
    /// Raise a handled or unhandled exception
    Exception { kind: Exception },
    /// Return a simulated 404
    NotFound,
    /// Respond after the given delay (1-30 seconds)
    Slow {
        #[arg(allow_negative_numbers = true)]
        seconds: i64,
    },
    /// Call the external dependency
    Dependency,
    /// Emit a burst of log lines
    Burst {
        #[arg(short, long)]
        lines: Option<i64>,
    },
    /// Liveness check
    Health,
    /// Environment snapshot
    Env,
}

impl Commands {
    fn path(&self) -> String {
        match self {
            Commands::Log { level } => match level {
                Level::Info => "/api/log/info".into(),
                Level::Warn => "/api/log/warn".into(),
                Level::Error => "/api/log/error".into(),
            },
            Commands::Exception { kind } => match kind {
                Exception::Handled => "/api/exception/handled".into(),
                Exception::Unhandled => "/api/exception/unhandled".into(),
            },
            Commands::NotFound => "/api/http/404".into(),
            Commands::Slow { seconds } => format!("/api/slow/{seconds}"),
            Commands::Dependency => "/api/dependency".into(),
            Commands::Burst { lines: Some(lines) } => format!("/api/burst?lines={lines}"),
            Commands::Burst { lines: None } => "/api/burst".into(),
            Commands::Health => "/api/health".into(),
            Commands::Env => "/api/env".into(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert("accept", HeaderValue::from_static("application/json"));
    if let Some(key) = cli.key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
        headers.insert("x-demo-key", HeaderValue::from_str(key)?);
    }

    let url = format!("{}{}", cli.url.trim_end_matches('/'), cli.command.path());
    let start = Instant::now();
    let res = client.get(&url).headers(headers).send().await?;
    let elapsed = start.elapsed().as_millis();

    print_response(res, elapsed).await
}

async fn print_response(res: reqwest::Response, elapsed_ms: u128) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let trace_id = res
        .headers()
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    println!("Status:   {}", status);
    println!("Elapsed:  {} ms", elapsed_ms);
    println!("Trace ID: {}", trace_id);

    let text = res.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) if text.is_empty() => println!("(empty)"),
        Err(_) => println!("{}", text),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_paths() {
        let cli = Cli::parse_from(["sandbox-cli", "burst", "--lines", "10"]);
        assert_eq!(cli.command.path(), "/api/burst?lines=10");

        let cli = Cli::parse_from(["sandbox-cli", "slow", "-1"]);
        assert_eq!(cli.command.path(), "/api/slow/-1");

        let cli = Cli::parse_from(["sandbox-cli", "--key", "k", "exception", "unhandled"]);
        assert_eq!(cli.key.as_deref(), Some("k"));
        assert_eq!(cli.command.path(), "/api/exception/unhandled");

        let cli = Cli::parse_from(["sandbox-cli", "not-found"]);
        assert_eq!(cli.command.path(), "/api/http/404");
    }
}
