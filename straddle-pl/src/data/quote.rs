//! Daily quote header shared by option and stock records.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::date_code::DateCode;

/// Ticker and trade date of a daily price quotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    pub ticker: String,
    pub quote_date: DateCode,
}

impl Quote {
    pub fn new(ticker: impl Into<String>, quote_date: DateCode) -> Self {
        Self {
            ticker: ticker.into(),
            quote_date,
        }
    }

    /// Build from an `MM/DD/YYYY` date; unparseable dates become
    /// [`DateCode::UNPARSEABLE`].
    pub fn from_text_date(ticker: impl Into<String>, quote_date: &str) -> Self {
        Self::new(ticker, DateCode::parse_or_unparseable(quote_date))
    }
}

/// Anything quoted on a single trading day.
///
/// Quotes order by date only. Two quotes on the same day compare as
/// `Ordering::Equal` whatever their tickers, so this is deliberately not
/// an `Ord` impl on the records themselves.
pub trait DailyQuote {
    fn quote(&self) -> &Quote;

    fn ticker(&self) -> &str {
        &self.quote().ticker
    }

    fn quote_date(&self) -> DateCode {
        self.quote().quote_date
    }

    fn cmp_by_date<Q: DailyQuote + ?Sized>(&self, other: &Q) -> Ordering {
        self.quote_date().cmp(&other.quote_date())
    }
}

impl DailyQuote for Quote {
    fn quote(&self) -> &Quote {
        self
    }
}

/// Stable sort by quote date; same-day quotes keep their input order.
pub fn sort_by_quote_date<T: DailyQuote>(quotes: &mut [T]) {
    quotes.sort_by(|a, b| a.cmp_by_date(b));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_date_compares_equal() {
        let a = Quote::new("SPY", DateCode::encode(1, 15, 2021));
        let b = Quote::new("QQQ", DateCode::encode(1, 15, 2021));
        assert_eq!(a.cmp_by_date(&b), Ordering::Equal);
        assert_ne!(a, b);
    }

    #[test]
    fn test_orders_by_date_not_ticker() {
        let early = Quote::new("ZZZ", DateCode::encode(1, 4, 2021));
        let late = Quote::new("AAA", DateCode::encode(2, 1, 2021));
        assert_eq!(early.cmp_by_date(&late), Ordering::Less);
        assert_eq!(late.cmp_by_date(&early), Ordering::Greater);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut quotes = vec![
            Quote::new("B", DateCode::encode(3, 1, 2021)),
            Quote::new("A", DateCode::encode(1, 1, 2021)),
            Quote::new("C", DateCode::encode(3, 1, 2021)),
        ];
        sort_by_quote_date(&mut quotes);
        let tickers: Vec<_> = quotes.iter().map(|q| q.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_from_text_date() {
        let q = Quote::from_text_date("SPY", "01/15/2021");
        assert_eq!(q.quote_date.raw(), 20210115);
        assert!(Quote::from_text_date("SPY", "bad").quote_date.is_unparseable());
    }
}
