//! The metrics-aggregation and forecast engine.
//!
//! One request flows through: window resolution, the all-or-nothing
//! aggregate fetch, pure in-memory derivation (ranking, forecast, summary,
//! alerts), then the assistant answer via the intent router or the LLM.
//! A database failure degrades every aggregate to its zero default and is
//! reported in plain text; it never aborts the response.

pub mod alerts;
pub mod forecast;
pub mod intents;
pub mod ranking;
pub mod response;
pub mod summary;
pub mod window;

use chrono::{Local, NaiveDate};

use crate::config::{AnalyticsConfig, Settings};
use crate::core::llm::{ChatMessage, LLMClient, SYSTEM_PROMPT};
use crate::db::queries::{self, AggregateBundle, InventoryReport};
use crate::db::{Database, DbError};

use forecast::Forecast;
use intents::Intent;
use ranking::TopWorstSplit;
use response::AnalyzeResponse;
use window::ResolvedWindow;

/// Everything derived from one request's aggregate fetch. Constructed fresh
/// per request and dropped with the response.
#[derive(Debug, Clone)]
pub struct Metrics {
    pub windows: ResolvedWindow,
    pub bundle: AggregateBundle,
    pub split: TopWorstSplit,
    pub forecast: Forecast,
    /// Forecast input extracted from the short-window series under the
    /// configured gap policy.
    pub short_values: Vec<f64>,
    pub avg_order_value: f64,
    pub avg_daily_sales: f64,
}

impl Metrics {
    pub fn derive(windows: ResolvedWindow, bundle: AggregateBundle, cfg: &AnalyticsConfig) -> Self {
        let short_values = forecast::input_values(&bundle.short_series, cfg.zero_fill_gaps);
        let split = ranking::split(&bundle.item_sales, cfg.top_limit);
        let forecast = forecast::forecast(&short_values);

        let avg_order_value = if bundle.short_order_count > 0 {
            bundle.short_total / bundle.short_order_count as f64
        } else {
            0.0
        };
        let avg_daily_sales = if short_values.is_empty() {
            0.0
        } else {
            short_values.iter().sum::<f64>() / short_values.len() as f64
        };

        Self {
            windows,
            bundle,
            split,
            forecast,
            short_values,
            avg_order_value,
            avg_daily_sales,
        }
    }
}

pub struct AnalyticsEngine {
    settings: Settings,
    db: Database,
    llm: LLMClient,
}

impl AnalyticsEngine {
    pub fn new(settings: Settings, db: Database, llm: LLMClient) -> Self {
        Self { settings, db, llm }
    }

    /// Answer one user message. Always returns a full response; failures
    /// along the way degrade their portion of the output instead.
    pub async fn analyze(&self, message: &str, window_days: Option<f64>) -> AnalyzeResponse {
        let cfg = &self.settings.analytics;
        let windows = window::resolve(message, window_days, cfg);
        let today = Local::now().date_naive();

        tracing::info!(
            "[AnalyticsEngine] analyzing request (short={}d, long={}d)",
            windows.short_days,
            windows.long_days
        );

        let (bundle, db_error) = self.fetch_aggregates(windows, today).await;
        let metrics = Metrics::derive(windows, bundle, cfg);
        let summary_text = summary::render(&metrics);

        let alert_list = match &db_error {
            Some(error) => vec![format!("Database error: {}", error)],
            None => alerts::build_alerts(&metrics, cfg.max_alerts),
        };

        let forecast_series = forecast::forecast_series(&metrics.short_values, cfg.forecast_days);
        let assistant_message = self
            .answer(message, &metrics, &summary_text, today, db_error.as_deref())
            .await;

        AnalyzeResponse {
            assistant_message,
            kpis: response::build_kpis(&metrics),
            visualizations: response::build_visualizations(&metrics, &forecast_series, today),
            alerts: alert_list,
        }
    }

    /// The all-or-nothing fetch phase: any error empties every aggregate
    /// for this request and is carried forward as plain text.
    async fn fetch_aggregates(
        &self,
        windows: ResolvedWindow,
        today: NaiveDate,
    ) -> (AggregateBundle, Option<String>) {
        let db = self.db.clone();
        let cfg = self.settings.analytics.clone();

        let result = tokio::task::spawn_blocking(move || -> Result<AggregateBundle, DbError> {
            let conn = db.open()?;
            queries::fetch_aggregates(&conn, today, windows.short_days, windows.long_days, &cfg)
        })
        .await;

        let outcome = result
            .map_err(|e| e.to_string())
            .and_then(|r| r.map_err(|e| e.to_string()));

        match outcome {
            Ok(bundle) => (bundle, None),
            Err(error) => {
                tracing::error!("[AnalyticsEngine] aggregate fetch failed: {}", error);
                (AggregateBundle::default(), Some(error))
            }
        }
    }

    /// Assistant text, by fixed precedence: special-case intents, then the
    /// stored database error, then the LLM over the metrics summary.
    async fn answer(
        &self,
        message: &str,
        metrics: &Metrics,
        summary_text: &str,
        today: NaiveDate,
        db_error: Option<&str>,
    ) -> String {
        match intents::detect(message) {
            Some(Intent::ListUserEmails) => self.list_user_emails().await,
            Some(Intent::InventoryToday) => self.inventory_today(today).await,
            Some(Intent::CashVsQr) => {
                intents::render_cash_vs_qr(&metrics.bundle.payments, metrics.windows.short_days)
            }
            None => match db_error {
                Some(error) => format!(
                    "There was a problem reading the database, so I cannot show live metrics right now.\n\nError: {}",
                    error
                ),
                None => self.ask_ai(message, summary_text).await,
            },
        }
    }

    async fn list_user_emails(&self) -> String {
        let db = self.db.clone();
        let result = tokio::task::spawn_blocking(move || -> Result<Vec<String>, DbError> {
            let conn = db.open()?;
            queries::user_emails(&conn)
        })
        .await;

        let outcome = result
            .map_err(|e| e.to_string())
            .and_then(|r| r.map_err(|e| e.to_string()));

        match outcome {
            Ok(emails) => intents::render_emails(&emails),
            Err(error) => format!("Could not read the user list.\n\nError: {}", error),
        }
    }

    async fn inventory_today(&self, today: NaiveDate) -> String {
        let db = self.db.clone();
        let result = tokio::task::spawn_blocking(move || -> Result<InventoryReport, DbError> {
            let conn = db.open()?;
            Ok(queries::inventory_activity(&conn, today))
        })
        .await;

        let outcome = result
            .map_err(|e| e.to_string())
            .and_then(|r| r.map_err(|e| e.to_string()));

        match outcome {
            Ok(report) => intents::render_inventory(&report),
            Err(error) => format!("Could not read inventory activity.\n\nError: {}", error),
        }
    }

    /// One completion call. Any failure substitutes the deterministic
    /// fallback carrying the computed numbers and the error text.
    async fn ask_ai(&self, message: &str, summary_text: &str) -> String {
        let question = if message.trim().is_empty() {
            "(no question provided)"
        } else {
            message
        };

        let messages = vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "User question:\n{}\n\nHere are the current metrics you can use:\n{}",
                question, summary_text
            )),
        ];

        match self.llm.chat(messages).await {
            Ok(text) => text.trim().to_string(),
            Err(error) => {
                tracing::warn!("[AnalyticsEngine] AI call failed, using fallback: {}", error);
                let error_line = format!("Error from AI service: {}", error);
                [
                    "(There was a problem using the AI model, so this is a simple fallback message.)",
                    "",
                    summary_text,
                    "",
                    error_line.as_str(),
                ]
                .join("\n")
            }
        }
    }
}
