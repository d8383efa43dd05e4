use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cafemetrics::cli::{Cli, Commands};
use cafemetrics::core::llm::LLMClient;
use cafemetrics::{routes, utils, AnalyticsEngine, Database, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::new()?;

    // RUST_LOG wins over the configured level when set.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level)),
        )
        .init();

    let cli = Cli::parse();

    let api_key = Settings::api_key().unwrap_or_else(|e| {
        tracing::warn!("[main] {}; AI answers will use the fallback message", e);
        String::new()
    });

    let db = Database::new(&settings.database.path);
    if let Err(e) = db.initialize() {
        tracing::warn!("[main] could not initialize the database schema: {}", e);
    }

    let llm = LLMClient::new(api_key, settings.llm.clone());
    let engine = AnalyticsEngine::new(settings.clone(), db, llm);

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| settings.server.host.clone());
            let port = port.unwrap_or(settings.server.port);
            routes::serve(engine, &host, port).await
        }
        Commands::Ask { question, days } => handle_ask(engine, question, days).await,
    }
}

async fn handle_ask(engine: AnalyticsEngine, question: String, days: Option<f64>) -> Result<()> {
    utils::print_info("Analyzing...");
    let response = engine.analyze(&question, days).await;

    utils::print_header("Assistant");
    println!("{}", response.assistant_message);

    utils::print_header("KPIs");
    for kpi in &response.kpis {
        utils::print_metric(&kpi.label, &format!("{:.2} {}", kpi.value, kpi.unit));
    }

    if !response.alerts.is_empty() {
        utils::print_header("Alerts");
        for alert in &response.alerts {
            utils::print_info(&format!("- {}", alert));
        }
    }

    Ok(())
}
