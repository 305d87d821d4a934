//! Optional consistency checks for straddle legs and P&L pairings.
//!
//! A straddle assumes its put and call share strike, expiration and quote
//! date, and a P&L pairing assumes both straddles are on the same contract
//! pair. Callers that already guarantee this build positions unchecked;
//! everyone else can turn these checks on.
//!
//! ```toml
//! check_legs = true
//! check_positions = true
//! strike_tolerance = 0.001
//! ```

use serde::{Deserialize, Serialize};

use super::straddle::Straddle;
use crate::data::{DailyQuote, OptionRecord};
use crate::error::{ConfigError, PositionError, PositionResult};

/// Which pairing invariants to enforce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegChecks {
    /// Require put and call to share strike, expiration and quote date.
    #[serde(default)]
    pub check_legs: bool,

    /// Require initial and final straddles to be on the same underlying,
    /// strike and expiration, with the final quoted no earlier.
    #[serde(default)]
    pub check_positions: bool,

    /// Largest strike difference treated as equal.
    #[serde(default = "default_strike_tolerance")]
    pub strike_tolerance: f64,
}

fn default_strike_tolerance() -> f64 {
    1e-9
}

impl Default for LegChecks {
    fn default() -> Self {
        Self {
            check_legs: false,
            check_positions: false,
            strike_tolerance: default_strike_tolerance(),
        }
    }
}

impl LegChecks {
    /// Every check enabled.
    pub fn strict() -> Self {
        Self {
            check_legs: true,
            check_positions: true,
            ..Default::default()
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let checks: Self = toml::from_str(s)?;
        checks.validate()?;
        Ok(checks)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.strike_tolerance.is_finite() || self.strike_tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "strike_tolerance must be a non-negative number, got {}",
                self.strike_tolerance
            )));
        }
        Ok(())
    }

    fn same_strike(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.strike_tolerance
    }

    pub(crate) fn verify_legs(&self, put: &OptionRecord, call: &OptionRecord) -> PositionResult<()> {
        if !self.check_legs {
            return Ok(());
        }

        let mismatch = |field: &'static str, left: String, right: String| {
            Err(PositionError::LegMismatch { field, left, right })
        };

        if !self.same_strike(put.strike(), call.strike()) {
            return mismatch("strike", put.strike().to_string(), call.strike().to_string());
        }
        if put.expiration_date() != call.expiration_date() {
            return mismatch(
                "expiration_date",
                put.expiration_date().to_string(),
                call.expiration_date().to_string(),
            );
        }
        if put.quote_date() != call.quote_date() {
            return mismatch(
                "quote_date",
                put.quote_date().to_string(),
                call.quote_date().to_string(),
            );
        }
        Ok(())
    }

    pub(crate) fn verify_positions(
        &self,
        initial: &Straddle,
        final_position: &Straddle,
    ) -> PositionResult<()> {
        if !self.check_positions {
            return Ok(());
        }

        let mismatch = |field: &'static str, initial: String, final_value: String| {
            Err(PositionError::PositionMismatch {
                field,
                initial,
                final_value,
            })
        };

        if initial.stock_symbol() != final_position.stock_symbol() {
            return mismatch(
                "stock_symbol",
                initial.stock_symbol().to_string(),
                final_position.stock_symbol().to_string(),
            );
        }
        if !self.same_strike(initial.strike(), final_position.strike()) {
            return mismatch(
                "strike",
                initial.strike().to_string(),
                final_position.strike().to_string(),
            );
        }
        if initial.expiration_date() != final_position.expiration_date() {
            return mismatch(
                "expiration_date",
                initial.expiration_date().to_string(),
                final_position.expiration_date().to_string(),
            );
        }
        if final_position.quote_date() < initial.quote_date() {
            return mismatch(
                "quote_date",
                initial.quote_date().to_string(),
                final_position.quote_date().to_string(),
            );
        }
        Ok(())
    }
}
