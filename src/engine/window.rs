//! Day-window resolution from free text and caller overrides.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::AnalyticsConfig;

pub const MIN_WINDOW_DAYS: i64 = 1;
pub const MAX_WINDOW_DAYS: i64 = 365;

/// The two windows every downstream query is scoped by. An explicit mention
/// in the message or a caller override collapses them to one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedWindow {
    pub short_days: i64,
    pub long_days: i64,
}

static PHRASED_DAYS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:last|past|for|best items in)\s+(\d+)\s+days?\b").expect("phrased regex")
});

static BARE_DAYS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d+)\s+days?\b").expect("bare regex"));

/// Clamp into [1, 365]. Out-of-range input is never an error.
pub fn clamp_days(days: i64) -> i64 {
    days.clamp(MIN_WINDOW_DAYS, MAX_WINDOW_DAYS)
}

fn extract_days(message: &str, pattern: &Regex) -> Option<i64> {
    pattern
        .captures(message)
        .map(|caps| caps[1].parse::<i64>().unwrap_or(i64::MAX))
        .map(clamp_days)
}

/// Resolve the (short, long) window for a request.
///
/// Priority: a phrased mention ("last/past/for N days", "best items in N
/// days"), then any bare "N days" substring, then a finite caller override,
/// then the configured defaults (7/30).
pub fn resolve(message: &str, override_days: Option<f64>, cfg: &AnalyticsConfig) -> ResolvedWindow {
    if let Some(days) = extract_days(message, &PHRASED_DAYS) {
        return ResolvedWindow {
            short_days: days,
            long_days: days,
        };
    }

    if let Some(days) = extract_days(message, &BARE_DAYS) {
        return ResolvedWindow {
            short_days: days,
            long_days: days,
        };
    }

    if let Some(raw) = override_days.filter(|v| v.is_finite()) {
        let days = clamp_days(raw as i64);
        return ResolvedWindow {
            short_days: days,
            long_days: days,
        };
    }

    ResolvedWindow {
        short_days: clamp_days(cfg.short_days),
        long_days: clamp_days(cfg.long_days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> AnalyticsConfig {
        AnalyticsConfig::default()
    }

    #[test]
    fn defaults_when_nothing_matches() {
        let window = resolve("how are sales going?", None, &cfg());
        assert_eq!(window.short_days, 7);
        assert_eq!(window.long_days, 30);
    }

    #[test]
    fn phrased_mention_sets_both_windows() {
        let window = resolve("show me sales for the last 14 days", None, &cfg());
        assert_eq!(window, ResolvedWindow { short_days: 14, long_days: 14 });

        let window = resolve("best items in 3 days please", None, &cfg());
        assert_eq!(window, ResolvedWindow { short_days: 3, long_days: 3 });
    }

    #[test]
    fn bare_mention_is_second_priority() {
        let window = resolve("21 days of coffee", None, &cfg());
        assert_eq!(window, ResolvedWindow { short_days: 21, long_days: 21 });
    }

    #[test]
    fn message_mention_beats_override() {
        let window = resolve("past 10 days", Some(90.0), &cfg());
        assert_eq!(window.short_days, 10);
    }

    #[test]
    fn override_used_when_message_is_silent() {
        let window = resolve("how is business?", Some(60.0), &cfg());
        assert_eq!(window, ResolvedWindow { short_days: 60, long_days: 60 });
    }

    #[test]
    fn extracted_values_are_clamped() {
        let window = resolve("last 9999 days", None, &cfg());
        assert_eq!(window.short_days, 365);

        let window = resolve("last 0 days", None, &cfg());
        assert_eq!(window.short_days, 1);

        // A number too large for i64 still clamps instead of erroring.
        let window = resolve("last 99999999999999999999 days", None, &cfg());
        assert_eq!(window.short_days, 365);
    }

    #[test]
    fn override_is_clamped_and_non_finite_is_ignored() {
        let window = resolve("hello", Some(-5.0), &cfg());
        assert_eq!(window.short_days, 1);

        let window = resolve("hello", Some(f64::NAN), &cfg());
        assert_eq!(window.short_days, 7);
        assert_eq!(window.long_days, 30);
    }
}
