//! Straddle positions and their P&L across two quote dates.

pub mod checks;
pub mod pnl;
pub mod straddle;

pub use checks::LegChecks;
pub use pnl::{ExecutionConvention, PlOutcome, StraddlePL};
pub use straddle::Straddle;

/// Joins the two legs of a straddle and the two straddles of a P&L record.
pub const SEPARATOR: &str = ",|,";

/// Closes the position part of a P&L record, before the outcome fields.
pub const PL_SEPARATOR: &str = ",|";
