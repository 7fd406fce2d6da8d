//! Allowed values for the select controls of the configuration form.
//!
//! The backend only understands these identifiers. Optional selects may
//! also be left empty.

/// Run modes offered by the `mode` select.
pub const MODES: &[&str] = &["full_run", "backtester", "day_trader", "sentiment_analysis"];

/// Ticker sampling percentages offered by the `percentage` select.
pub const PERCENTAGES: &[&str] = &["1", "5", "10", "25", "50", "75", "100"];

/// Bar intervals offered by the `interval` select.
pub const INTERVALS: &[&str] = &["1min", "5min", "15min", "30min", "60min", "1d"];

/// Resampling periods offered by the `period` select (daily, weekly, hourly).
pub const PERIODS: &[&str] = &["D", "W", "H"];

/// Sentiment filters offered by the `sentiment_type` select.
pub const SENTIMENT_TYPES: &[&str] = &["bullish", "bearish", "neutral"];

/// Gap-filling strategies offered by the `fillna_method` select.
pub const FILLNA_METHODS: &[&str] = &["mean", "median", "zero"];

/// Date format of the `start_date` / `end_date` inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether `value` is one of `choices`.
pub fn is_choice(value: &str, choices: &[&str]) -> bool {
    choices.contains(&value)
}
