//! Option quote records.
//!
//! Calls and puts share one record type tagged with [`OptionKind`]. The
//! only behavior that differs between them is intrinsic value.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::date_code::DateCode;
use super::quote::{DailyQuote, Quote};
use crate::format::Num;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Call,
    Put,
}

impl OptionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Put => "put",
        }
    }

    /// Type token written into serialized records and read back by the
    /// compact record schema.
    pub fn record_name(&self) -> &'static str {
        match self {
            Self::Call => "CallOption",
            Self::Put => "PutOption",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single option quote on one trading day.
///
/// `quote.ticker` identifies the option contract itself, `stock_symbol`
/// the underlying. Records are immutable once built; `mid` is fixed at
/// construction as the mean of bid and ask.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionRecord {
    #[serde(flatten)]
    quote: Quote,
    kind: OptionKind,
    stock_symbol: String,
    strike: f64,
    expiration_date: DateCode,
    /// Underlying price at quote time
    spot_price: f64,
    bid: f64,
    ask: f64,
    mid: f64,
    volume: i64,
    open_interest: i64,
    implied_volatility: f64,
}

impl OptionRecord {
    /// Column header matching the [`fmt::Display`] output.
    pub const HEADER: &'static str = "quoteDate,type,stockSymbol,spotPrice,ticker,strike,expirationDate,bid,ask,volume,openInterest,impliedVol";

    /// Moneyness band used by [`OptionRecord::is_near_the_money`].
    pub const NEAR_THE_MONEY_PCT: f64 = 0.05;

    pub fn builder(
        kind: OptionKind,
        ticker: impl Into<String>,
        stock_symbol: impl Into<String>,
    ) -> OptionRecordBuilder {
        OptionRecordBuilder::new(kind, ticker, stock_symbol)
    }

    pub fn call(ticker: impl Into<String>, stock_symbol: impl Into<String>) -> OptionRecordBuilder {
        Self::builder(OptionKind::Call, ticker, stock_symbol)
    }

    pub fn put(ticker: impl Into<String>, stock_symbol: impl Into<String>) -> OptionRecordBuilder {
        Self::builder(OptionKind::Put, ticker, stock_symbol)
    }

    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    pub fn is_call(&self) -> bool {
        self.kind == OptionKind::Call
    }

    pub fn is_put(&self) -> bool {
        self.kind == OptionKind::Put
    }

    pub fn stock_symbol(&self) -> &str {
        &self.stock_symbol
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn expiration_date(&self) -> DateCode {
        self.expiration_date
    }

    pub fn spot_price(&self) -> f64 {
        self.spot_price
    }

    pub fn bid(&self) -> f64 {
        self.bid
    }

    pub fn ask(&self) -> f64 {
        self.ask
    }

    pub fn mid(&self) -> f64 {
        self.mid
    }

    pub fn volume(&self) -> i64 {
        self.volume
    }

    pub fn open_interest(&self) -> i64 {
        self.open_interest
    }

    pub fn implied_volatility(&self) -> f64 {
        self.implied_volatility
    }

    /// Immediate exercise value, ignoring time value.
    ///
    /// A NaN price propagates instead of being floored to zero.
    pub fn intrinsic_value(&self) -> f64 {
        let payoff = match self.kind {
            OptionKind::Call => self.spot_price - self.strike,
            OptionKind::Put => self.strike - self.spot_price,
        };
        if payoff.is_nan() {
            payoff
        } else {
            payoff.max(0.0)
        }
    }

    /// Strike within 5% of spot.
    pub fn is_near_the_money(&self) -> bool {
        (self.spot_price - self.strike).abs() <= Self::NEAR_THE_MONEY_PCT * self.spot_price
    }

    /// Traded at least once on the quote date.
    pub fn is_active(&self) -> bool {
        self.volume > 0
    }

    pub fn has_open_interest(&self) -> bool {
        self.open_interest > 0
    }

    /// Calendar days from quote date to expiration.
    pub fn days_remaining(&self) -> i64 {
        DateCode::days_between(self.quote.quote_date, self.expiration_date)
    }
}

impl DailyQuote for OptionRecord {
    fn quote(&self) -> &Quote {
        &self.quote
    }
}

impl fmt::Display for OptionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{},{},{},{},{},{}",
            self.quote.quote_date,
            self.kind.record_name(),
            self.stock_symbol,
            Num(self.spot_price),
            self.quote.ticker,
            Num(self.strike),
            self.expiration_date,
            Num(self.bid),
            Num(self.ask),
            self.volume,
            self.open_interest,
            Num(self.implied_volatility),
        )
    }
}

/// Builder for [`OptionRecord`].
///
/// Dates may be supplied pre-encoded or as `MM/DD/YYYY` text, since
/// upstream data arrives in both shapes.
#[derive(Debug, Clone)]
pub struct OptionRecordBuilder {
    kind: OptionKind,
    ticker: String,
    stock_symbol: String,
    quote_date: DateCode,
    expiration_date: DateCode,
    spot_price: f64,
    strike: f64,
    bid: f64,
    ask: f64,
    volume: i64,
    open_interest: i64,
    implied_volatility: f64,
}

impl OptionRecordBuilder {
    pub fn new(
        kind: OptionKind,
        ticker: impl Into<String>,
        stock_symbol: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            ticker: ticker.into(),
            stock_symbol: stock_symbol.into(),
            quote_date: DateCode::UNPARSEABLE,
            expiration_date: DateCode::UNPARSEABLE,
            spot_price: 0.0,
            strike: 0.0,
            bid: 0.0,
            ask: 0.0,
            volume: 0,
            open_interest: 0,
            implied_volatility: 0.0,
        }
    }

    pub fn dates(mut self, quote_date: DateCode, expiration_date: DateCode) -> Self {
        self.quote_date = quote_date;
        self.expiration_date = expiration_date;
        self
    }

    /// Text dates; anything unparseable is stored as
    /// [`DateCode::UNPARSEABLE`] and logged.
    pub fn dates_from_text(self, quote_date: &str, expiration_date: &str) -> Self {
        self.dates(
            DateCode::parse_or_unparseable(quote_date),
            DateCode::parse_or_unparseable(expiration_date),
        )
    }

    pub fn spot_price(mut self, spot_price: f64) -> Self {
        self.spot_price = spot_price;
        self
    }

    pub fn strike(mut self, strike: f64) -> Self {
        self.strike = strike;
        self
    }

    pub fn bid_ask(mut self, bid: f64, ask: f64) -> Self {
        self.bid = bid;
        self.ask = ask;
        self
    }

    pub fn volume(mut self, volume: i64) -> Self {
        self.volume = volume;
        self
    }

    pub fn open_interest(mut self, open_interest: i64) -> Self {
        self.open_interest = open_interest;
        self
    }

    pub fn implied_volatility(mut self, implied_volatility: f64) -> Self {
        self.implied_volatility = implied_volatility;
        self
    }

    pub fn build(self) -> OptionRecord {
        OptionRecord {
            quote: Quote::new(self.ticker, self.quote_date),
            kind: self.kind,
            stock_symbol: self.stock_symbol,
            strike: self.strike,
            expiration_date: self.expiration_date,
            spot_price: self.spot_price,
            bid: self.bid,
            ask: self.ask,
            mid: (self.bid + self.ask) / 2.0,
            volume: self.volume,
            open_interest: self.open_interest,
            implied_volatility: self.implied_volatility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn option(kind: OptionKind, spot: f64, strike: f64) -> OptionRecord {
        OptionRecord::builder(kind, "SPY210115X00100000", "SPY")
            .dates(DateCode::encode(1, 4, 2021), DateCode::encode(1, 15, 2021))
            .spot_price(spot)
            .strike(strike)
            .bid_ask(1.0, 1.2)
            .build()
    }

    #[test]
    fn test_option_kind_labels() {
        assert_eq!(OptionKind::Call.as_str(), "call");
        assert_eq!(OptionKind::Put.to_string(), "put");
        assert_eq!(OptionKind::Call.record_name(), "CallOption");
        assert_eq!(OptionKind::Put.record_name(), "PutOption");
    }

    #[test]
    fn test_call_intrinsic_value() {
        assert_eq!(option(OptionKind::Call, 105.0, 100.0).intrinsic_value(), 5.0);
        assert_eq!(option(OptionKind::Call, 95.0, 100.0).intrinsic_value(), 0.0);
    }

    #[test]
    fn test_put_intrinsic_value() {
        assert_eq!(option(OptionKind::Put, 95.0, 100.0).intrinsic_value(), 5.0);
        assert_eq!(option(OptionKind::Put, 105.0, 100.0).intrinsic_value(), 0.0);
    }

    #[test]
    fn test_intrinsic_value_propagates_nan() {
        assert!(option(OptionKind::Call, f64::NAN, 100.0).intrinsic_value().is_nan());
    }

    #[test]
    fn test_mid_fixed_at_construction() {
        let rec = option(OptionKind::Call, 100.0, 100.0);
        assert_relative_eq!(rec.mid(), 1.1, epsilon = 1e-12);
    }

    #[test]
    fn test_near_the_money() {
        // 5% of 100 is exactly the band edge
        assert!(option(OptionKind::Call, 100.0, 105.0).is_near_the_money());
        assert!(option(OptionKind::Put, 100.0, 95.0).is_near_the_money());
        assert!(!option(OptionKind::Call, 100.0, 105.5).is_near_the_money());
    }

    #[test]
    fn test_activity_predicates() {
        let quiet = option(OptionKind::Call, 100.0, 100.0);
        assert!(!quiet.is_active());
        assert!(!quiet.has_open_interest());

        let busy = OptionRecord::call("SPY210115C00100000", "SPY")
            .volume(12)
            .open_interest(340)
            .build();
        assert!(busy.is_active());
        assert!(busy.has_open_interest());
    }

    #[test]
    fn test_days_remaining() {
        assert_eq!(option(OptionKind::Put, 100.0, 100.0).days_remaining(), 11);
    }

    #[test]
    fn test_dates_from_text() {
        let rec = OptionRecord::put("SPY200320P00300000", "SPY")
            .dates_from_text("02/14/2020", "03/20/2020")
            .build();
        assert_eq!(rec.quote_date().raw(), 20200214);
        assert_eq!(rec.expiration_date().raw(), 20200320);
        assert_eq!(rec.days_remaining(), 35);

        let bad = OptionRecord::put("X", "SPY")
            .dates_from_text("2020-02-14", "03/20/2020")
            .build();
        assert!(bad.quote_date().is_unparseable());
    }

    #[test]
    fn test_display() {
        let rec = OptionRecord::call("SPY210115C00100000", "SPY")
            .dates(DateCode::encode(1, 4, 2021), DateCode::encode(1, 15, 2021))
            .spot_price(105.0)
            .strike(100.0)
            .bid_ask(5.1, 5.3)
            .volume(12)
            .open_interest(340)
            .implied_volatility(0.25)
            .build();

        assert_eq!(
            rec.to_string(),
            "20210104,CallOption,SPY,105.0,SPY210115C00100000,100.0,20210115,5.1,5.3,12,340,0.25"
        );
        assert_eq!(OptionRecord::HEADER.split(',').count(), 12);
    }
}
