//! Straddle profit and loss between two snapshots.
//!
//! The P&L of holding a straddle from one quote date to another depends on
//! which side of the spread each trade is filled at:
//!
//! | Convention | Opens at | Closes at |
//! |------------|----------|-----------|
//! | Dealer     | bid      | ask       |
//! | Customer   | ask      | bid       |
//! | Mid        | mid      | mid       |
//!
//! Returns are P&L over the opening price. A zero opening price gives an
//! infinite or NaN return, which is reported as is.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::checks::LegChecks;
use super::straddle::Straddle;
use super::{PL_SEPARATOR, SEPARATOR};
use crate::error::PositionResult;
use crate::format::Num;

/// Which side of the bid/ask spread trades are filled at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionConvention {
    Dealer,
    Customer,
    Mid,
}

impl ExecutionConvention {
    /// All conventions in report order.
    pub const ALL: [ExecutionConvention; 3] = [Self::Dealer, Self::Customer, Self::Mid];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dealer => "dealer",
            Self::Customer => "customer",
            Self::Mid => "mid",
        }
    }

    /// Price paid to open the position.
    pub fn entry_price(&self, position: &Straddle) -> f64 {
        match self {
            Self::Dealer => position.bid(),
            Self::Customer => position.ask(),
            Self::Mid => position.mid(),
        }
    }

    /// Price received to close the position.
    pub fn exit_price(&self, position: &Straddle) -> f64 {
        match self {
            Self::Dealer => position.ask(),
            Self::Customer => position.bid(),
            Self::Mid => position.mid(),
        }
    }
}

impl fmt::Display for ExecutionConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// P&L and return under one convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlOutcome {
    pub convention: ExecutionConvention,
    pub pl: f64,
    #[serde(rename = "return")]
    pub ret: f64,
}

/// A straddle opened at one quote date and closed at a later one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StraddlePL {
    initial_position: Straddle,
    final_position: Straddle,
    short_term_rv: f64,
    long_term_rv: f64,
}

impl StraddlePL {
    /// Pair two straddles without checking they describe the same contracts.
    pub fn new(initial_position: Straddle, final_position: Straddle) -> Self {
        Self {
            initial_position,
            final_position,
            short_term_rv: f64::NAN,
            long_term_rv: f64::NAN,
        }
    }

    /// Pair two straddles, applying the position checks enabled in `checks`.
    pub fn checked(
        initial_position: Straddle,
        final_position: Straddle,
        checks: &LegChecks,
    ) -> PositionResult<Self> {
        checks.verify_positions(&initial_position, &final_position)?;
        Ok(Self::new(initial_position, final_position))
    }

    /// Attach realized volatility of the underlying over the holding period.
    pub fn with_realized_vol(mut self, short_term_rv: f64, long_term_rv: f64) -> Self {
        self.short_term_rv = short_term_rv;
        self.long_term_rv = long_term_rv;
        self
    }

    pub fn initial_position(&self) -> &Straddle {
        &self.initial_position
    }

    pub fn final_position(&self) -> &Straddle {
        &self.final_position
    }

    pub fn short_term_rv(&self) -> f64 {
        self.short_term_rv
    }

    pub fn long_term_rv(&self) -> f64 {
        self.long_term_rv
    }

    /// Calendar days between the two snapshots.
    pub fn holding_days(&self) -> i64 {
        self.initial_position
            .quote_date()
            .days_until(self.final_position.quote_date())
    }

    pub fn pl(&self, convention: ExecutionConvention) -> f64 {
        convention.exit_price(&self.final_position) - convention.entry_price(&self.initial_position)
    }

    pub fn return_on(&self, convention: ExecutionConvention) -> f64 {
        self.pl(convention) / convention.entry_price(&self.initial_position)
    }

    pub fn outcome(&self, convention: ExecutionConvention) -> PlOutcome {
        PlOutcome {
            convention,
            pl: self.pl(convention),
            ret: self.return_on(convention),
        }
    }

    /// Dealer, customer and mid outcomes, in that order.
    pub fn outcomes(&self) -> [PlOutcome; 3] {
        ExecutionConvention::ALL.map(|c| self.outcome(c))
    }

    pub fn dealer_pl(&self) -> f64 {
        self.pl(ExecutionConvention::Dealer)
    }

    pub fn dealer_return(&self) -> f64 {
        self.return_on(ExecutionConvention::Dealer)
    }

    pub fn customer_pl(&self) -> f64 {
        self.pl(ExecutionConvention::Customer)
    }

    pub fn customer_return(&self) -> f64 {
        self.return_on(ExecutionConvention::Customer)
    }

    pub fn mid_pl(&self) -> f64 {
        self.pl(ExecutionConvention::Mid)
    }

    pub fn mid_return(&self) -> f64 {
        self.return_on(ExecutionConvention::Mid)
    }
}

impl fmt::Display for StraddlePL {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.initial_position, SEPARATOR, self.final_position, PL_SEPARATOR
        )?;
        for outcome in self.outcomes() {
            write!(
                f,
                ",{},{},{}",
                outcome.convention,
                Num(outcome.pl),
                Num(outcome.ret)
            )?;
        }
        write!(
            f,
            ",strv,{},ltrv,{}",
            Num(self.short_term_rv),
            Num(self.long_term_rv)
        )
    }
}
