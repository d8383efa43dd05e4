//! The response contract returned to the web backend, plus the builders
//! that shape metrics into KPI cards and chart payloads.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::Metrics;
use crate::db::queries::WEEKDAY_NAMES;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kpi {
    pub label: String,
    pub value: f64,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Chart-ready payload. `type` is one of "line", "bar" or "heatmap"; only
/// the fields that chart type needs are serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visualization {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<Vec<Vec<u32>>>,
    #[serde(rename = "seriesName", skip_serializing_if = "Option::is_none")]
    pub series_name: Option<String>,
}

impl Visualization {
    fn line(id: &str, title: String, x: Vec<String>, y: Vec<f64>, series_name: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: "line".to_string(),
            title,
            x: Some(x),
            y: Some(y),
            days: None,
            hours: None,
            matrix: None,
            series_name: Some(series_name.to_string()),
        }
    }

    fn bar(id: &str, title: String, x: Vec<String>, y: Vec<f64>) -> Self {
        Self {
            id: id.to_string(),
            kind: "bar".to_string(),
            title,
            x: Some(x),
            y: Some(y),
            days: None,
            hours: None,
            matrix: None,
            series_name: None,
        }
    }

    fn heatmap(id: &str, title: String, matrix: Vec<Vec<u32>>) -> Self {
        Self {
            id: id.to_string(),
            kind: "heatmap".to_string(),
            title,
            x: None,
            y: None,
            days: Some(WEEKDAY_NAMES.iter().map(|d| d.to_string()).collect()),
            hours: Some((0..24).collect()),
            matrix: Some(matrix),
            series_name: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub assistant_message: String,
    pub kpis: Vec<Kpi>,
    pub visualizations: Vec<Visualization>,
    pub alerts: Vec<String>,
}

/// The three fixed KPI cards.
pub fn build_kpis(metrics: &Metrics) -> Vec<Kpi> {
    vec![
        Kpi {
            label: "Total Sales".to_string(),
            value: metrics.bundle.total_sales,
            unit: "USD".to_string(),
            note: Some("All-time, non-cancelled orders".to_string()),
        },
        Kpi {
            label: format!("Sales (Last {} Days)", metrics.windows.short_days),
            value: metrics.bundle.short_total,
            unit: "USD".to_string(),
            note: Some(format!("{} orders", metrics.bundle.short_order_count)),
        },
        Kpi {
            label: "Forecast (Next 7 Days)".to_string(),
            value: metrics.forecast.next_7,
            unit: "USD".to_string(),
            note: Some("Trend blended with the historical average".to_string()),
        },
    ]
}

/// Chart payloads for the dashboard. Charts with nothing to show are
/// omitted rather than sent empty.
pub fn build_visualizations(
    metrics: &Metrics,
    forecast_series: &[f64],
    today: NaiveDate,
) -> Vec<Visualization> {
    let mut charts = Vec::new();
    let short = metrics.windows.short_days;

    if !metrics.bundle.short_series.is_empty() {
        charts.push(Visualization::line(
            "sales_short_window",
            format!("Sales - Last {} Days", short),
            metrics
                .bundle
                .short_series
                .iter()
                .map(|d| d.date.format("%Y-%m-%d").to_string())
                .collect(),
            metrics.bundle.short_series.iter().map(|d| d.total).collect(),
            "Total Sales",
        ));
    }

    if forecast_series.iter().any(|&v| v > 0.0) {
        let labels: Vec<String> = (1..=forecast_series.len() as i64)
            .map(|offset| (today + Duration::days(offset)).format("%Y-%m-%d").to_string())
            .collect();
        charts.push(Visualization::line(
            "forecast_next_7",
            format!("Forecast - Next {} Days", forecast_series.len()),
            labels,
            forecast_series.to_vec(),
            "Forecast Sales",
        ));
    }

    if !metrics.split.top.is_empty() {
        charts.push(Visualization::bar(
            "top_items",
            format!("Top Sellers - Last {} Days", short),
            metrics.split.top.iter().map(|i| i.name.clone()).collect(),
            metrics.split.top.iter().map(|i| i.qty as f64).collect(),
        ));
    }

    if !metrics.split.worst.is_empty() {
        charts.push(Visualization::bar(
            "worst_items",
            format!("Weakest Sellers - Last {} Days", short),
            metrics.split.worst.iter().map(|i| i.name.clone()).collect(),
            metrics.split.worst.iter().map(|i| i.qty as f64).collect(),
        ));
    }

    if metrics.bundle.heatmap.total_orders() > 0 {
        charts.push(Visualization::heatmap(
            "orders_heatmap",
            "Orders by Weekday and Hour".to_string(),
            metrics.bundle.heatmap.to_matrix(),
        ));
    }

    charts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyticsConfig;
    use crate::db::queries::{AggregateBundle, DailySales, ItemSales};
    use crate::engine::window::ResolvedWindow;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_metrics() -> Metrics {
        let bundle = AggregateBundle {
            total_sales: 500.0,
            short_series: vec![
                DailySales { date: date("2026-08-01"), total: 100.0 },
                DailySales { date: date("2026-08-02"), total: 120.0 },
            ],
            short_total: 220.0,
            short_order_count: 11,
            item_sales: vec![
                ItemSales { id: 1, name: "Latte".into(), qty: 8 },
                ItemSales { id: 2, name: "Scone".into(), qty: 0 },
            ],
            ..Default::default()
        };
        Metrics::derive(
            ResolvedWindow { short_days: 7, long_days: 30 },
            bundle,
            &AnalyticsConfig::default(),
        )
    }

    #[test]
    fn kpis_are_three_fixed_cards() {
        let kpis = build_kpis(&sample_metrics());
        assert_eq!(kpis.len(), 3);
        assert_eq!(kpis[0].label, "Total Sales");
        assert_eq!(kpis[0].value, 500.0);
        assert_eq!(kpis[1].value, 220.0);
        assert_eq!(kpis[2].label, "Forecast (Next 7 Days)");
    }

    #[test]
    fn charts_cover_sales_forecast_and_rankings() {
        let metrics = sample_metrics();
        let series = vec![110.0; 7];
        let charts = build_visualizations(&metrics, &series, date("2026-08-02"));

        let ids: Vec<&str> = charts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["sales_short_window", "forecast_next_7", "top_items", "worst_items"]
        );

        let forecast = &charts[1];
        assert_eq!(forecast.kind, "line");
        assert_eq!(forecast.x.as_ref().unwrap()[0], "2026-08-03");
        assert_eq!(forecast.x.as_ref().unwrap().len(), 7);
    }

    #[test]
    fn heatmap_chart_present_only_with_orders() {
        let mut metrics = sample_metrics();
        let charts = build_visualizations(&metrics, &[], date("2026-08-02"));
        assert!(!charts.iter().any(|c| c.kind == "heatmap"));

        metrics.bundle.heatmap.counts[1][9] = 2;
        let charts = build_visualizations(&metrics, &[], date("2026-08-02"));
        let heatmap = charts.iter().find(|c| c.kind == "heatmap").unwrap();
        assert_eq!(heatmap.matrix.as_ref().unwrap()[1][9], 2);
        assert_eq!(heatmap.days.as_ref().unwrap().len(), 7);
        assert_eq!(heatmap.hours.as_ref().unwrap().len(), 24);
    }

    #[test]
    fn empty_metrics_produce_no_charts() {
        let metrics = Metrics::derive(
            ResolvedWindow { short_days: 7, long_days: 30 },
            AggregateBundle::default(),
            &AnalyticsConfig::default(),
        );
        let charts = build_visualizations(&metrics, &[0.0; 7], date("2026-08-02"));
        assert!(charts.is_empty());
    }

    #[test]
    fn serialization_omits_unused_fields() {
        let chart = Visualization::bar("top_items", "t".into(), vec!["A".into()], vec![1.0]);
        let json = serde_json::to_value(&chart).unwrap();
        assert!(json.get("matrix").is_none());
        assert!(json.get("seriesName").is_none());
        assert_eq!(json["type"], "bar");
    }
}
