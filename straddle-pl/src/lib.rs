//! Historical option quote records and straddle P&L.
//!
//! Raw quote lines parse into [`OptionRecord`]s, a matched put and call form
//! a [`Straddle`], and two straddles of the same contracts on different
//! days form a [`StraddlePL`] valued under dealer, customer and mid-market
//! execution.

pub mod data;
pub mod error;
pub mod format;
pub mod position;

// Re-export commonly used types
pub use data::{
    parse_line, parse_record, DailyQuote, DateCode, OptionKind, OptionRecord, Quote,
    RecordSchema, StockPrice,
};
pub use error::{ConfigError, DateParseError, DateRangeError, ParseError, PositionError};
pub use position::{ExecutionConvention, LegChecks, PlOutcome, Straddle, StraddlePL};
