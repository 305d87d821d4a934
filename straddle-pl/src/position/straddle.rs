//! Straddle positions.
//!
//! A straddle is a put and a call on the same underlying with the same
//! strike and expiration. Buying both is a long straddle, a bet that the
//! underlying moves enough in either direction; selling both is a short
//! straddle, a bet that the combined premium exceeds the final intrinsic
//! value.

use std::fmt;

use serde::Serialize;

use super::checks::LegChecks;
use super::SEPARATOR;
use crate::data::{DailyQuote, DateCode, OptionKind, OptionRecord};
use crate::error::{PositionError, PositionResult};

/// One put leg and one call leg.
///
/// The caller is responsible for both legs sharing strike, expiration and
/// quote date; [`Straddle::new`] only checks that each leg is the right
/// kind. Use [`Straddle::checked`] to enforce the rest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Straddle {
    put: OptionRecord,
    call: OptionRecord,
}

impl Straddle {
    pub fn new(put: OptionRecord, call: OptionRecord) -> PositionResult<Self> {
        if !put.is_put() {
            return Err(PositionError::WrongKind {
                slot: "put",
                expected: OptionKind::Put,
                actual: put.kind(),
            });
        }
        if !call.is_call() {
            return Err(PositionError::WrongKind {
                slot: "call",
                expected: OptionKind::Call,
                actual: call.kind(),
            });
        }
        Ok(Self { put, call })
    }

    /// Build and apply the leg checks enabled in `checks`.
    pub fn checked(put: OptionRecord, call: OptionRecord, checks: &LegChecks) -> PositionResult<Self> {
        let straddle = Self::new(put, call)?;
        checks.verify_legs(&straddle.put, &straddle.call)?;
        Ok(straddle)
    }

    pub fn put(&self) -> &OptionRecord {
        &self.put
    }

    pub fn call(&self) -> &OptionRecord {
        &self.call
    }

    pub fn stock_symbol(&self) -> &str {
        self.put.stock_symbol()
    }

    pub fn strike(&self) -> f64 {
        self.put.strike()
    }

    pub fn expiration_date(&self) -> DateCode {
        self.put.expiration_date()
    }

    pub fn quote_date(&self) -> DateCode {
        self.put.quote_date()
    }

    pub fn intrinsic_value(&self) -> f64 {
        self.put.intrinsic_value() + self.call.intrinsic_value()
    }

    pub fn bid(&self) -> f64 {
        self.put.bid() + self.call.bid()
    }

    pub fn ask(&self) -> f64 {
        self.put.ask() + self.call.ask()
    }

    pub fn mid(&self) -> f64 {
        (self.bid() + self.ask()) / 2.0
    }

    /// Combined leg bids over the put leg's spot price.
    ///
    /// Uses bids rather than [`Straddle::mid`], and only the put's spot.
    pub fn mid_as_percent_of_spot(&self) -> f64 {
        (self.put.bid() + self.call.bid()) / self.put.spot_price()
    }
}

impl fmt::Display for Straddle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.put, SEPARATOR, self.call)
    }
}
