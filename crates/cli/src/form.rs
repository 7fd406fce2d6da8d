//! Command-line flags standing in for the configuration form.

use clap::Args;
use hybrid_client::form::FormReader;
use hybrid_core::submission::FormField;

/// The nine form controls as flags.
///
/// Every flag defaults to an empty string, like an untouched control;
/// the validation gate decides what is missing.
#[derive(Debug, Clone, Args)]
pub struct FormArgs {
    /// Run mode: full_run, backtester, day_trader, sentiment_analysis
    #[arg(long, default_value = "")]
    pub mode: String,

    /// First day of the run (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    pub start_date: String,

    /// Last day of the run (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    pub end_date: String,

    /// Share of tickers to process: 1, 5, 10, 25, 50, 75, 100
    #[arg(long, default_value = "")]
    pub percentage: String,

    /// Bar interval: 1min, 5min, 15min, 30min, 60min, 1d
    #[arg(long, default_value = "")]
    pub interval: String,

    /// Resampling period: D, W, H
    #[arg(long, default_value = "")]
    pub period: String,

    /// Sentiment filter: bullish, bearish, neutral
    #[arg(long, default_value = "")]
    pub sentiment_type: String,

    /// How the backend should treat missing values
    #[arg(long, default_value = "")]
    pub handle_missing_values: String,

    /// Gap-filling method: mean, median, zero
    #[arg(long, default_value = "")]
    pub fillna_method: String,
}

impl FormReader for FormArgs {
    fn value(&self, field: FormField) -> String {
        match field {
            FormField::Mode => self.mode.clone(),
            FormField::StartDate => self.start_date.clone(),
            FormField::EndDate => self.end_date.clone(),
            FormField::Percentage => self.percentage.clone(),
            FormField::Interval => self.interval.clone(),
            FormField::Period => self.period.clone(),
            FormField::SentimentType => self.sentiment_type.clone(),
            FormField::HandleMissingValues => self.handle_missing_values.clone(),
            FormField::FillnaMethod => self.fillna_method.clone(),
        }
    }
}
