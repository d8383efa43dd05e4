//! Renders the aggregate bundle into the text block handed to the LLM.
//!
//! Section order is fixed; the model sees the same layout every request.
//! Currency renders with 2 decimals, percentages with 1.

use super::Metrics;

pub fn render(metrics: &Metrics) -> String {
    let mut lines: Vec<String> = Vec::new();
    let bundle = &metrics.bundle;
    let short = metrics.windows.short_days;
    let long = metrics.windows.long_days;

    lines.push(format!(
        "Total sales for all non-cancelled orders (all time): {:.2} USD",
        bundle.total_sales
    ));

    if bundle.short_series.is_empty() {
        lines.push(format!(
            "No non-cancelled orders found in the last {} days.",
            short
        ));
    } else {
        lines.push(format!(
            "Sales over the last {} days (non-cancelled orders):",
            short
        ));
        for day in &bundle.short_series {
            lines.push(format!("- {}: {:.2} USD", day.date.format("%Y-%m-%d"), day.total));
        }
    }

    lines.push(format!(
        "Totals for the last {} days: {:.2} USD across {} orders",
        short, bundle.short_total, bundle.short_order_count
    ));
    lines.push(format!(
        "Average order value (last {} days): {:.2} USD",
        short, metrics.avg_order_value
    ));
    lines.push(format!(
        "Average daily sales (last {} days): {:.2} USD",
        short, metrics.avg_daily_sales
    ));

    if bundle.long_series.is_empty() {
        lines.push(format!(
            "No non-cancelled orders found in the last {} days.",
            long
        ));
    } else {
        lines.push(format!(
            "Sales over the last {} days (non-cancelled orders):",
            long
        ));
        for day in &bundle.long_series {
            lines.push(format!("- {}: {:.2} USD", day.date.format("%Y-%m-%d"), day.total));
        }
    }

    if metrics.split.top.is_empty() {
        lines.push(format!("No items were sold in the last {} days.", short));
    } else {
        lines.push(format!("Top selling items (last {} days):", short));
        for item in &metrics.split.top {
            lines.push(format!("- {}: {} sold", item.name, item.qty));
        }
    }

    if !metrics.split.worst.is_empty() {
        lines.push(format!("Weakest selling items (last {} days):", short));
        for item in &metrics.split.worst {
            lines.push(format!("- {}: {} sold", item.name, item.qty));
        }
    }

    let total_payments: i64 = bundle.payments.iter().map(|p| p.count).sum();
    if total_payments > 0 {
        lines.push(format!("Payment method breakdown (last {} days):", short));
        for payment in &bundle.payments {
            let pct = payment.count as f64 / total_payments as f64 * 100.0;
            lines.push(format!(
                "- {}: {} orders ({:.1}%)",
                payment.method, payment.count, pct
            ));
        }
    } else {
        lines.push(format!(
            "No payment methods recorded in the last {} days.",
            short
        ));
    }

    lines.push(format!(
        "Forecast for tomorrow: {:.2} USD",
        metrics.forecast.tomorrow
    ));
    lines.push(format!(
        "Forecast for the next 7 days: {:.2} USD",
        metrics.forecast.next_7
    ));

    if !bundle.low_stock.is_empty() {
        lines.push("Low stock items:".to_string());
        for item in &bundle.low_stock {
            lines.push(format!("- {}: {} left", item.name, item.stock));
        }
    }

    lines.join("\n")
}
