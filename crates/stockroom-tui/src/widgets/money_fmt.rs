//! Money, count and data-age formatting helpers.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Format an amount as dollars with thousands separators: `$403,150.00`.
pub fn fmt_money(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// Compact money for narrow stat cards: `$48.3K`, `$1.2M`.
pub fn fmt_money_short(amount: f64) -> String {
    let abs = amount.abs();
    if abs >= 1_000_000_000.0 {
        format!("${:.1}B", amount / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("${:.1}M", amount / 1_000_000.0)
    } else if abs >= 10_000.0 {
        format!("${:.1}K", amount / 1_000.0)
    } else {
        fmt_money(amount)
    }
}

/// How long ago the catalog was loaded, e.g. `"3m 12s ago"`.
pub fn fmt_age(loaded_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(at) = loaded_at else {
        return "never".into();
    };
    let secs = now.signed_duration_since(at).num_seconds().max(0);
    if secs == 0 {
        return "just now".into();
    }
    let secs = u64::try_from(secs).unwrap_or_default();
    format!("{} ago", humantime::format_duration(Duration::from_secs(secs)))
}
