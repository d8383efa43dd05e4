//! Special-case question routing.
//!
//! A small rule-based router, not NLP: an ordered list of (predicate,
//! handler) pairs evaluated first-match-wins. Anything unmatched falls
//! through to the LLM.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::db::queries::{InventoryReport, PaymentCount};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    ListUserEmails,
    InventoryToday,
    CashVsQr,
}

static EMAILS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\busers?\b.*\be-?mails?\b|\be-?mails?\b.*\busers?\b").expect("emails regex")
});

static INVENTORY_TODAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(inventory|stock)\b.*\btoday\b|\btoday'?s?\b.*\b(inventory|stock)\b")
        .expect("inventory regex")
});

static CASH_VS_QR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bcash\b.*\b(vs\.?|versus|or|and)\b.*\bqr\b|\bqr\b.*\b(vs\.?|versus|or|and)\b.*\bcash\b")
        .expect("cash-vs-qr regex")
});

/// First matching intent in priority order, if any.
pub fn detect(message: &str) -> Option<Intent> {
    let rules: [(&Regex, Intent); 3] = [
        (&EMAILS, Intent::ListUserEmails),
        (&INVENTORY_TODAY, Intent::InventoryToday),
        (&CASH_VS_QR, Intent::CashVsQr),
    ];

    rules
        .iter()
        .find(|(pattern, _)| pattern.is_match(message))
        .map(|&(_, intent)| intent)
}

pub fn render_emails(emails: &[String]) -> String {
    if emails.is_empty() {
        return "No registered users found.".to_string();
    }
    let mut lines = vec!["Registered user emails:".to_string()];
    lines.extend(emails.iter().map(|email| format!("- {}", email)));
    lines.join("\n")
}

pub fn render_inventory(report: &InventoryReport) -> String {
    match report {
        InventoryReport::Deltas(deltas) if !deltas.is_empty() => {
            let mut lines = vec!["Inventory changes today:".to_string()];
            lines.extend(
                deltas
                    .iter()
                    .map(|d| format!("- {}: {:+}", d.name, d.change)),
            );
            lines.join("\n")
        }
        InventoryReport::UpdatedToday(snapshots) if !snapshots.is_empty() => {
            let mut lines =
                vec!["Items updated today (current stock levels):".to_string()];
            lines.extend(
                snapshots
                    .iter()
                    .map(|s| format!("- {}: {} in stock", s.name, s.stock)),
            );
            lines.join("\n")
        }
        _ => "No inventory activity found for today.".to_string(),
    }
}

pub fn render_cash_vs_qr(payments: &[PaymentCount], window_days: i64) -> String {
    let total: i64 = payments.iter().map(|p| p.count).sum();
    if total == 0 {
        return format!(
            "No payment data recorded in the last {} days.",
            window_days
        );
    }

    let count_for = |method: &str| -> i64 {
        payments
            .iter()
            .find(|p| p.method == method)
            .map_or(0, |p| p.count)
    };
    let cash = count_for("CASH");
    let qr = count_for("QR");
    let other = total - cash - qr;
    let pct = |count: i64| count as f64 / total as f64 * 100.0;

    let mut answer = format!(
        "In the last {} days: CASH {} orders ({:.1}%), QR {} orders ({:.1}%)",
        window_days,
        cash,
        pct(cash),
        qr,
        pct(qr)
    );
    if other > 0 {
        answer.push_str(&format!(", other methods {} orders ({:.1}%)", other, pct(other)));
    }
    answer.push('.');
    answer
}
