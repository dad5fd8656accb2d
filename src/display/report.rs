//! Report formatting utilities for terminal output

use crate::models::{BudgetStatus, Money};

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Horizontal bar, `value / max_value` filled
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Amount with the configured currency symbol
pub fn format_money(amount: Money, symbol: &str) -> String {
    amount.format_with_symbol(symbol)
}

/// Short marker for the budget status column
pub fn status_marker(status: BudgetStatus) -> &'static str {
    match status {
        BudgetStatus::OnTrack => "",
        BudgetStatus::NearingLimit => "!",
        BudgetStatus::OverBudget => "!!",
    }
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate to `max_len` characters with an ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
