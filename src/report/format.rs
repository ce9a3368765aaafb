//! Formatted terminal output for records and summaries.
//!
//! Formatting lives in one place so output changes are localized (and easy to
//! pin down in snapshot tests).

use crate::domain::{EmaWindows, EnrichedRecord};
use crate::report::{Summary, summarize};

const RULE_WIDTH: usize = 66;

/// Format the records table.
pub fn format_records(records: &[EnrichedRecord], windows: EmaWindows) -> String {
    if records.is_empty() {
        return "No records found!\n".to_string();
    }

    let ema_short = format!("ema_{}", windows.short);
    let ema_long = format!("ema_{}", windows.long);

    let mut out = String::new();
    out.push_str("Records:\n");
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(
        format!(
            "{:<10} {:>5} {:>8} {:>8} {:>8} {:>10} {:>10}",
            "date", "day", "value", "change", "rate_7d", ema_short, ema_long
        )
        .trim_end(),
    );
    out.push('\n');

    for r in records {
        out.push_str(
            format!(
                "{:<10} {:>5} {:>8.2} {:>8.2} {:>8.2} {:>10.2} {:>10.2}",
                r.date, r.offset, r.value, r.change, r.weekly_rate, r.ema_short, r.ema_long
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    out
}

/// Format the series summary (empty string for no records).
pub fn format_summary(records: &[EnrichedRecord], windows: EmaWindows) -> String {
    match summarize(records) {
        Some(summary) => format_summary_block(&summary, windows),
        None => String::new(),
    }
}

fn format_summary_block(s: &Summary, windows: EmaWindows) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Records: n={} | span={} days | {} -> {}\n",
        s.count, s.span_days, s.first_date, s.last_date
    ));
    out.push_str(&format!(
        "Value: {:.2} -> {:.2} | change={:+.2} | rate_7d={:+.2}\n",
        s.first_value, s.last_value, s.net_change, s.weekly_rate
    ));
    out.push_str(&format!(
        "Trend: ema_{}={:.2} | ema_{}={:.2}\n",
        windows.short, s.ema_short, windows.long, s.ema_long
    ));
    out
}
