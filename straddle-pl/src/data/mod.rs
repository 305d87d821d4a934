pub mod date_code;
pub mod parser;
pub mod quote;
pub mod stock;
pub mod types;

pub use date_code::DateCode;
pub use parser::{parse_line, parse_record, split_fields, RecordSchema};
pub use quote::{sort_by_quote_date, DailyQuote, Quote};
pub use stock::StockPrice;
pub use types::{OptionKind, OptionRecord, OptionRecordBuilder};
