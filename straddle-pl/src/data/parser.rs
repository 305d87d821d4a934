//! Text record parser for option quotes.
//!
//! Two comma-separated layouts are accepted, told apart by field count:
//!
//! - **Wide** (more than 12 fields): raw vendor rows with text dates
//!   (`MM/DD/YYYY`) and a lowercase `call`/`put` kind column.
//! - **Compact** (12 fields or fewer): the layout [`OptionRecord`] writes
//!   itself, with `YYYYMMDD` dates and a `CallOption`/`PutOption` type token.
//!
//! Lines are split on `,` with trailing empty fields dropped, so a compact
//! row followed by stray commas is still a compact row. An unreadable text
//! date in a wide row does not reject the row; the date is stored as
//! [`DateCode::UNPARSEABLE`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::date_code::DateCode;
use super::types::{OptionKind, OptionRecord};
use crate::error::{ParseError, ParseResult};

/// Field positions in a wide row. Columns 2, 4 and 9 are not used.
mod wide {
    pub const STOCK_SYMBOL: usize = 0;
    pub const SPOT_PRICE: usize = 1;
    pub const TICKER: usize = 3;
    pub const KIND: usize = 5;
    pub const EXPIRATION: usize = 6;
    pub const QUOTE_DATE: usize = 7;
    pub const STRIKE: usize = 8;
    pub const BID: usize = 10;
    pub const ASK: usize = 11;
    pub const VOLUME: usize = 12;
    pub const OPEN_INTEREST: usize = 13;
    pub const IMPLIED_VOL: usize = 14;

    pub const CALL_TOKEN: &str = "call";
}

/// Field positions in a compact row (same order as `OptionRecord::HEADER`).
mod compact {
    pub const QUOTE_DATE: usize = 0;
    pub const KIND: usize = 1;
    pub const STOCK_SYMBOL: usize = 2;
    pub const SPOT_PRICE: usize = 3;
    pub const TICKER: usize = 4;
    pub const STRIKE: usize = 5;
    pub const EXPIRATION: usize = 6;
    pub const BID: usize = 7;
    pub const ASK: usize = 8;
    pub const VOLUME: usize = 9;
    pub const OPEN_INTEREST: usize = 10;
    pub const IMPLIED_VOL: usize = 11;

    pub const CALL_TOKEN: &str = "CallOption";
}

/// Input row layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSchema {
    Wide,
    Compact,
}

impl RecordSchema {
    /// Rows with at most this many fields are compact.
    pub const COMPACT_MAX_FIELDS: usize = 12;

    pub fn detect(field_count: usize) -> Self {
        if field_count > Self::COMPACT_MAX_FIELDS {
            Self::Wide
        } else {
            Self::Compact
        }
    }
}

impl fmt::Display for RecordSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wide => f.write_str("wide"),
            Self::Compact => f.write_str("compact"),
        }
    }
}

/// Split a line on commas, dropping trailing empty fields.
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(',').collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// Tokens of one row plus the schema they were detected as.
struct Fields<'a> {
    schema: RecordSchema,
    tokens: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    fn new(line: &'a str) -> Self {
        let tokens = split_fields(line);
        Self {
            schema: RecordSchema::detect(tokens.len()),
            tokens,
        }
    }

    fn text(&self, index: usize, field: &'static str) -> ParseResult<&'a str> {
        self.tokens
            .get(index)
            .copied()
            .ok_or(ParseError::MissingField {
                schema: self.schema,
                index,
                field,
            })
    }

    fn invalid(&self, field: &'static str, value: &str) -> ParseError {
        ParseError::InvalidNumber {
            schema: self.schema,
            field,
            value: value.to_string(),
        }
    }

    /// Float fields tolerate surrounding whitespace.
    fn float(&self, index: usize, field: &'static str) -> ParseResult<f64> {
        let raw = self.text(index, field)?;
        raw.trim().parse().map_err(|_| self.invalid(field, raw))
    }

    /// Counts are 32-bit in the source data; wider values are rejected.
    fn int(&self, index: usize, field: &'static str) -> ParseResult<i64> {
        let raw = self.text(index, field)?;
        raw.parse::<i32>()
            .map(i64::from)
            .map_err(|_| self.invalid(field, raw))
    }

    fn date_code(&self, index: usize, field: &'static str) -> ParseResult<DateCode> {
        let raw = self.text(index, field)?;
        raw.parse::<i32>()
            .map(DateCode::from_raw)
            .map_err(|_| self.invalid(field, raw))
    }

    /// Text dates that fail to parse keep the row, stored as
    /// [`DateCode::UNPARSEABLE`] with a warning.
    fn date_text(&self, index: usize, field: &'static str) -> ParseResult<DateCode> {
        let raw = self.text(index, field)?;
        Ok(DateCode::parse_or_unparseable(raw))
    }
}

fn parse_wide(fields: &Fields<'_>) -> ParseResult<OptionRecord> {
    let kind = if fields.text(wide::KIND, "kind")? == wide::CALL_TOKEN {
        OptionKind::Call
    } else {
        OptionKind::Put
    };

    Ok(OptionRecord::builder(
        kind,
        fields.text(wide::TICKER, "ticker")?,
        fields.text(wide::STOCK_SYMBOL, "stock_symbol")?,
    )
    .dates(
        fields.date_text(wide::QUOTE_DATE, "quote_date")?,
        fields.date_text(wide::EXPIRATION, "expiration_date")?,
    )
    .spot_price(fields.float(wide::SPOT_PRICE, "spot_price")?)
    .strike(fields.float(wide::STRIKE, "strike")?)
    .bid_ask(
        fields.float(wide::BID, "bid")?,
        fields.float(wide::ASK, "ask")?,
    )
    .volume(fields.int(wide::VOLUME, "volume")?)
    .open_interest(fields.int(wide::OPEN_INTEREST, "open_interest")?)
    .implied_volatility(fields.float(wide::IMPLIED_VOL, "implied_volatility")?)
    .build())
}

fn parse_compact(fields: &Fields<'_>) -> ParseResult<OptionRecord> {
    let kind = if fields.text(compact::KIND, "kind")? == compact::CALL_TOKEN {
        OptionKind::Call
    } else {
        OptionKind::Put
    };

    Ok(OptionRecord::builder(
        kind,
        fields.text(compact::TICKER, "ticker")?,
        fields.text(compact::STOCK_SYMBOL, "stock_symbol")?,
    )
    .dates(
        fields.date_code(compact::QUOTE_DATE, "quote_date")?,
        fields.date_code(compact::EXPIRATION, "expiration_date")?,
    )
    .spot_price(fields.float(compact::SPOT_PRICE, "spot_price")?)
    .strike(fields.float(compact::STRIKE, "strike")?)
    .bid_ask(
        fields.float(compact::BID, "bid")?,
        fields.float(compact::ASK, "ask")?,
    )
    .volume(fields.int(compact::VOLUME, "volume")?)
    .open_interest(fields.int(compact::OPEN_INTEREST, "open_interest")?)
    .implied_volatility(fields.float(compact::IMPLIED_VOL, "implied_volatility")?)
    .build())
}

/// Parse one line in either schema.
pub fn parse_line(line: &str) -> ParseResult<OptionRecord> {
    let fields = Fields::new(line);
    match fields.schema {
        RecordSchema::Wide => parse_wide(&fields),
        RecordSchema::Compact => parse_compact(&fields),
    }
}

/// Parse one line, turning any failure into `None`.
///
/// Intended for bulk ingestion where malformed rows are skipped; the
/// reason is emitted as a `debug` event.
pub fn parse_record(line: &str) -> Option<OptionRecord> {
    match parse_line(line) {
        Ok(record) => Some(record),
        Err(e) => {
            debug!(line = %line, error = %e, "Skipping malformed option record");
            None
        }
    }
}

impl FromStr for OptionRecord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_line(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DailyQuote;

    const WIDE_CALL: &str = "SPY,105.00,*,SPY210115C00100000,SPY,call,01/15/2021,01/04/2021,100,5.20,5.10,5.30,12,340,0.2500";
    const WIDE_PUT: &str = "SPY,105.00,*,SPY210115P00100000,SPY,put,01/15/2021,01/04/2021,100,0.45,0.40,0.50,7,1200,0.2800";
    const COMPACT_CALL: &str =
        "20210104,CallOption,SPY,105.0,SPY210115C00100000,100.0,20210115,5.1,5.3,12,340,0.25";

    #[test]
    fn test_schema_detection() {
        assert_eq!(RecordSchema::detect(15), RecordSchema::Wide);
        assert_eq!(RecordSchema::detect(13), RecordSchema::Wide);
        assert_eq!(RecordSchema::detect(12), RecordSchema::Compact);
        assert_eq!(RecordSchema::detect(3), RecordSchema::Compact);
    }

    #[test]
    fn test_split_drops_trailing_empty_fields() {
        assert_eq!(split_fields("a,,b,,"), vec!["a", "", "b"]);
        assert!(split_fields("").is_empty());
    }

    #[test]
    fn test_parse_wide_call() {
        let rec = parse_line(WIDE_CALL).unwrap();
        assert_eq!(rec.kind(), OptionKind::Call);
        assert_eq!(rec.ticker(), "SPY210115C00100000");
        assert_eq!(rec.stock_symbol(), "SPY");
        assert_eq!(rec.quote_date().raw(), 20210104);
        assert_eq!(rec.expiration_date().raw(), 20210115);
        assert_eq!(rec.spot_price(), 105.0);
        assert_eq!(rec.strike(), 100.0);
        assert_eq!(rec.bid(), 5.1);
        assert_eq!(rec.ask(), 5.3);
        assert_eq!(rec.volume(), 12);
        assert_eq!(rec.open_interest(), 340);
        assert_eq!(rec.implied_volatility(), 0.25);
    }

    #[test]
    fn test_parse_wide_put() {
        let rec = parse_line(WIDE_PUT).unwrap();
        assert_eq!(rec.kind(), OptionKind::Put);
        assert_eq!(rec.intrinsic_value(), 0.0);
        assert_eq!(rec.days_remaining(), 11);
    }

    #[test]
    fn test_wide_non_call_token_is_put() {
        let line = WIDE_CALL.replace(",call,", ",CALL,");
        assert_eq!(parse_line(&line).unwrap().kind(), OptionKind::Put);
    }

    #[test]
    fn test_parse_compact() {
        let rec = parse_line(COMPACT_CALL).unwrap();
        assert_eq!(rec.kind(), OptionKind::Call);
        assert_eq!(rec.ticker(), "SPY210115C00100000");
        assert_eq!(rec.quote_date().raw(), 20210104);

        let put = parse_line(&COMPACT_CALL.replace("CallOption", "PutOption")).unwrap();
        assert_eq!(put.kind(), OptionKind::Put);
    }

    #[test]
    fn test_wide_and_compact_agree() {
        let wide = parse_line(WIDE_CALL).unwrap();
        let compact = parse_line(COMPACT_CALL).unwrap();

        assert_eq!(wide.strike(), compact.strike());
        assert_eq!(wide.spot_price(), compact.spot_price());
        assert_eq!(wide.bid(), compact.bid());
        assert_eq!(wide.ask(), compact.ask());
        assert_eq!(wide.intrinsic_value(), compact.intrinsic_value());
        assert_eq!(wide, compact);
    }

    #[test]
    fn test_serialized_record_parses_back() {
        let rec = parse_line(WIDE_PUT).unwrap();
        let again: OptionRecord = rec.to_string().parse().unwrap();
        assert_eq!(rec, again);
    }

    #[test]
    fn test_trailing_commas_keep_compact_schema() {
        let line = format!("{},,,,", COMPACT_CALL);
        assert!(parse_line(&line).is_ok());
    }

    #[test]
    fn test_float_fields_allow_whitespace() {
        let line = COMPACT_CALL.replace(",5.1,", ", 5.1 ,");
        assert_eq!(parse_line(&line).unwrap().bid(), 5.1);
    }

    #[test]
    fn test_too_few_fields() {
        let err = parse_line("20210104,CallOption,SPY").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingField {
                schema: RecordSchema::Compact,
                index: 4,
                field: "ticker",
            }
        );
        assert!(parse_record("").is_none());
    }

    #[test]
    fn test_wide_row_missing_tail() {
        // 13 fields: wide, but no open interest or implied vol
        let line = "SPY,105.00,*,SPY210115C00100000,SPY,call,01/15/2021,01/04/2021,100,5.20,5.10,5.30,12";
        assert!(matches!(
            parse_line(line),
            Err(ParseError::MissingField { schema: RecordSchema::Wide, .. })
        ));
    }

    #[test]
    fn test_non_numeric_price() {
        let line = COMPACT_CALL.replace(",105.0,", ",n/a,");
        assert!(matches!(
            parse_line(&line),
            Err(ParseError::InvalidNumber { field: "spot_price", .. })
        ));
        assert!(parse_record(&line).is_none());
    }

    #[test]
    fn test_wide_bad_date_keeps_row() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let line = WIDE_CALL.replace("01/04/2021", "N/A");
        let rec = parse_record(&line).expect("row with unreadable quote date is kept");
        assert!(rec.quote_date().is_unparseable());
        assert_eq!(rec.expiration_date().raw(), 20210115);
        assert_eq!(rec.strike(), 100.0);
        assert_eq!(rec.bid(), 5.1);

        let line = WIDE_CALL.replace("01/15/2021", "2021-01-15");
        assert!(parse_line(&line).unwrap().expiration_date().is_unparseable());
    }

    #[test]
    fn test_counts_wider_than_32_bits_rejected() {
        let line = COMPACT_CALL.replace(",12,340,", ",3000000000,340,");
        assert!(matches!(
            parse_line(&line),
            Err(ParseError::InvalidNumber { field: "volume", .. })
        ));

        let line = COMPACT_CALL.replace(",12,340,", ",2147483647,340,");
        assert_eq!(parse_line(&line).unwrap().volume(), i64::from(i32::MAX));
    }

    #[test]
    fn test_parse_record_success() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        assert!(parse_record(WIDE_CALL).is_some());
        assert!(parse_record("garbage").is_none());
    }
}
