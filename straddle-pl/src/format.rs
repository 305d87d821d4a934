//! Number formatting shared by the text record writers.
//!
//! Downstream readers expect floats to always carry a fractional part and
//! non-finite values spelled `NaN`, `Infinity` and `-Infinity`. Magnitudes
//! in `[1e-3, 1e7)` print as plain decimals (`105.0`, `0.25`); anything
//! smaller or larger uses a mantissa with a fractional part and an `E`
//! exponent (`1.0E-5`, `4.440892098500626E-16`, `1.0E16`).

use std::fmt;

const PLAIN_MIN: f64 = 1e-3;
const PLAIN_MAX: f64 = 1e7;

/// Display adapter for a float field in a text record.
#[derive(Debug, Clone, Copy)]
pub struct Num(pub f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_nan() {
            return f.write_str("NaN");
        }
        if v == f64::INFINITY {
            return f.write_str("Infinity");
        }
        if v == f64::NEG_INFINITY {
            return f.write_str("-Infinity");
        }

        let magnitude = v.abs();
        if v == 0.0 || (PLAIN_MIN..PLAIN_MAX).contains(&magnitude) {
            // Debug keeps the trailing ".0" and stays plain in this range
            return write!(f, "{:?}", v);
        }

        let scientific = format!("{:e}", v);
        match scientific.split_once('e') {
            Some((mantissa, exponent)) if mantissa.contains('.') => {
                write!(f, "{}E{}", mantissa, exponent)
            }
            Some((mantissa, exponent)) => write!(f, "{}.0E{}", mantissa, exponent),
            None => f.write_str(&scientific),
        }
    }
}
