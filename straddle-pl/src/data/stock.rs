//! Daily stock bars.
//!
//! Realized volatility fields are computed elsewhere from a series of
//! closes as `std(ln(p[n+1] / p[n])) * sqrt(252)` and attached afterwards;
//! until then they hold NaN.

use std::fmt;

use serde::Serialize;

use super::date_code::DateCode;
use super::quote::{DailyQuote, Quote};
use crate::format::Num;

/// Daily OHLCV bar for an underlying.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockPrice {
    #[serde(flatten)]
    quote: Quote,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
    short_term_rv: f64,
    long_term_rv: f64,
    sl_vol_ratio: f64,
}

impl StockPrice {
    pub fn new(
        ticker: impl Into<String>,
        quote_date: DateCode,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: i64,
    ) -> Self {
        Self {
            quote: Quote::new(ticker, quote_date),
            open,
            high,
            low,
            close,
            volume,
            short_term_rv: f64::NAN,
            long_term_rv: f64::NAN,
            sl_vol_ratio: f64::NAN,
        }
    }

    /// Same as [`StockPrice::new`] with an `MM/DD/YYYY` date.
    pub fn from_text_date(
        ticker: impl Into<String>,
        quote_date: &str,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: i64,
    ) -> Self {
        Self::new(
            ticker,
            DateCode::parse_or_unparseable(quote_date),
            open,
            high,
            low,
            close,
            volume,
        )
    }

    /// Attach externally computed realized volatility.
    pub fn with_volatility(mut self, short_term_rv: f64, long_term_rv: f64, sl_vol_ratio: f64) -> Self {
        self.short_term_rv = short_term_rv;
        self.long_term_rv = long_term_rv;
        self.sl_vol_ratio = sl_vol_ratio;
        self
    }

    pub fn short_term_rv(&self) -> f64 {
        self.short_term_rv
    }

    pub fn long_term_rv(&self) -> f64 {
        self.long_term_rv
    }

    pub fn sl_vol_ratio(&self) -> f64 {
        self.sl_vol_ratio
    }
}

impl DailyQuote for StockPrice {
    fn quote(&self) -> &Quote {
        &self.quote
    }
}

impl fmt::Display for StockPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{},{},{},{}",
            self.quote.ticker,
            self.quote.quote_date,
            Num(self.open),
            Num(self.high),
            Num(self.low),
            Num(self.close),
            self.volume,
            Num(self.short_term_rv),
            Num(self.long_term_rv),
            Num(self.sl_vol_ratio),
        )
    }
}
