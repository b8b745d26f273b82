use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::Value;

use api_pipeline::config::{load_config, PipelineConfig};
use api_pipeline::logging::TracingRequestLog;
use api_pipeline::monitoring::TracingMonitoringSink;
use api_pipeline::observability::logging::init_logging;
use api_pipeline::request::{correlation, Headers, Method, RequestConfigBuilder};
use api_pipeline::{ApiResponse, ApiService, PipelineResult, ReqwestTransport, ResponseOptions};

#[derive(Parser)]
#[command(name = "api-call")]
#[command(about = "Issue HTTP API calls through the standard request pipeline", long_about = None)]
struct Cli {
    /// Pipeline configuration file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Correlation ID to propagate (generated when omitted).
    #[arg(long)]
    correlation_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one request
    Call {
        /// Resource URL
        url: String,

        #[arg(short = 'X', long, default_value = "GET")]
        method: Method,

        /// JSON (or plain text) payload
        #[arg(short, long)]
        data: Option<String>,

        /// Extra header as NAME:VALUE (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// Print only the body of a 2xx response
        #[arg(long)]
        data_only: bool,
    },
    /// Ping a service's health endpoint
    Ping {
        /// Service base URL
        base_url: String,
    },
}

fn parse_headers(raw: &[String]) -> Result<Headers, String> {
    raw.iter()
        .map(|h| {
            h.split_once(':')
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                .ok_or_else(|| format!("invalid header '{}', expected NAME:VALUE", h))
        })
        .collect()
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => PipelineConfig::default(),
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Warning: logging not initialized: {}", e);
    }

    match run(cli, &config).await {
        Ok(result) => {
            match serde_json::to_string_pretty(&result) {
                Ok(text) => println!("{}", text),
                Err(e) => eprintln!("Error: {}", e),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: &PipelineConfig) -> Result<ApiResponse, Box<dyn std::error::Error>> {
    let transport = ReqwestTransport::from_config(&config.transport)?;
    let sink = TracingMonitoringSink::new();
    let service = ApiService::from_config(config, transport, Arc::new(TracingRequestLog), Some(&sink))?;

    let correlation_id = cli.correlation_id.unwrap_or_else(correlation::generate);
    tracing::info!(correlation_id = %correlation_id, "api-call starting");

    let result: PipelineResult<ApiResponse> = match cli.command {
        Commands::Call { url, method, data, headers, data_only } => {
            let body = data.map(|d| serde_json::from_str(&d).unwrap_or(Value::String(d)));
            let builder = RequestConfigBuilder::new(config.service.component_name.clone());
            let request = builder.build(&url, Some(parse_headers(&headers)?), body, Some(&correlation_id))?;
            let options = ResponseOptions {
                return_data_only: data_only,
                ..ResponseOptions::default()
            };
            service.execute(method, request, &options).await
        }
        Commands::Ping { base_url } => service.health_ping(&base_url, Some(&correlation_id)).await,
    };

    Ok(result?)
}
