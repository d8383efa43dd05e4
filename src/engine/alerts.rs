//! Rule-based business alerts.
//!
//! Rules run in a fixed priority order and each one is independently gated:
//! missing inputs skip the rule, they never error. The list is capped, so
//! low-priority rules stop emitting once the cap is reached.

use super::Metrics;
use crate::db::queries::WEEKDAY_NAMES;

struct AlertSink {
    alerts: Vec<String>,
    cap: usize,
}

impl AlertSink {
    fn new(cap: usize) -> Self {
        Self {
            alerts: Vec::new(),
            cap,
        }
    }

    fn push(&mut self, alert: String) {
        if self.alerts.len() < self.cap {
            self.alerts.push(alert);
        }
    }

    fn full(&self) -> bool {
        self.alerts.len() >= self.cap
    }
}

pub fn build_alerts(metrics: &Metrics, max_alerts: usize) -> Vec<String> {
    let mut sink = AlertSink::new(max_alerts);
    let bundle = &metrics.bundle;
    let short = metrics.windows.short_days;
    let values = &metrics.short_values;

    // 1. Last recorded day vs the short-window average.
    if let Some(&last) = values.last() {
        let avg = metrics.avg_daily_sales;
        if avg > 0.0 {
            let deviation = (last - avg) / avg;
            if deviation <= -0.20 {
                sink.push(format!(
                    "Latest daily sales ({:.2} USD) are {:.1}% below the {}-day average of {:.2} USD.",
                    last,
                    deviation.abs() * 100.0,
                    short,
                    avg
                ));
            } else if deviation >= 0.20 {
                sink.push(format!(
                    "Latest daily sales ({:.2} USD) are {:.1}% above the {}-day average of {:.2} USD.",
                    last,
                    deviation * 100.0,
                    short,
                    avg
                ));
            }
        }
    }

    // 2. Day-over-day change.
    if values.len() >= 2 {
        let last = values[values.len() - 1];
        let previous = values[values.len() - 2];
        if previous > 0.0 {
            let change = (last - previous) / previous * 100.0;
            sink.push(format!(
                "Day-over-day change: {:.2} USD vs {:.2} USD the previous day ({:+.1}%).",
                last, previous, change
            ));
        }
    }

    // 3. Nothing sold, ever.
    if bundle.total_sales == 0.0 {
        sink.push("No sales have been recorded yet; the all-time total is 0.".to_string());
    }

    // 4. Best seller.
    if let Some(best) = metrics.split.top.first() {
        sink.push(format!(
            "Best seller in the last {} days: {} ({} sold).",
            short, best.name, best.qty
        ));
    }

    // 5. Weakest performer.
    if let Some(weakest) = metrics.split.worst.first() {
        sink.push(format!(
            "Weakest performer in the last {} days: {} ({} sold).",
            short, weakest.name, weakest.qty
        ));
    }

    // 6. Payment mix.
    let total_payments: i64 = bundle.payments.iter().map(|p| p.count).sum();
    if total_payments > 0 {
        let count_for = |method: &str| -> i64 {
            bundle
                .payments
                .iter()
                .find(|p| p.method == method)
                .map_or(0, |p| p.count)
        };
        let cash = count_for("CASH");
        let qr = count_for("QR");
        let other = total_payments - cash - qr;
        let pct = |count: i64| count as f64 / total_payments as f64 * 100.0;

        let mut mix = format!(
            "Payment mix (last {} days): CASH {:.1}%, QR {:.1}%",
            short,
            pct(cash),
            pct(qr)
        );
        if other > 0 {
            mix.push_str(&format!(", OTHER {:.1}%", pct(other)));
        }
        mix.push('.');
        sink.push(mix);
    }

    // 7. Average order value.
    if bundle.short_order_count > 0 {
        sink.push(format!(
            "Average order value over the last {} days: {:.2} USD.",
            short, metrics.avg_order_value
        ));
    }

    // 8. Forecast vs a typical week.
    if metrics.forecast.next_7 > 0.0 && metrics.avg_daily_sales > 0.0 {
        let typical_week = metrics.avg_daily_sales * 7.0;
        let deviation = (metrics.forecast.next_7 - typical_week) / typical_week * 100.0;
        if deviation.abs() < 10.0 {
            sink.push(format!(
                "Forecast sales for the next 7 days ({:.2} USD) are in line with a typical week ({:.2} USD).",
                metrics.forecast.next_7, typical_week
            ));
        } else if deviation > 0.0 {
            sink.push(format!(
                "Forecast sales for the next 7 days ({:.2} USD) are {:.1}% higher than a typical week ({:.2} USD).",
                metrics.forecast.next_7, deviation, typical_week
            ));
        } else {
            sink.push(format!(
                "Forecast sales for the next 7 days ({:.2} USD) are {:.1}% lower than a typical week ({:.2} USD).",
                metrics.forecast.next_7,
                deviation.abs(),
                typical_week
            ));
        }
    }

    // 9. Low stock, three lowest at most.
    if !bundle.low_stock.is_empty() {
        let listed: Vec<String> = bundle
            .low_stock
            .iter()
            .take(3)
            .map(|item| format!("{} ({})", item.name, item.stock))
            .collect();
        sink.push(format!("Low stock: {}.", listed.join(", ")));
    }

    // 10. Busiest heatmap cell.
    if !sink.full() {
        if let Some((day, hour, count)) = bundle.heatmap.busiest_cell() {
            sink.push(format!(
                "Busiest time in the last {} days: {} {:02}:00 with {} orders.",
                short, WEEKDAY_NAMES[day], hour, count
            ));
        }
    }

    sink.alerts
}
