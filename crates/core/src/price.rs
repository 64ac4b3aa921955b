//! # Price Conversion
//!
//! Maps an average tick to a price: `1.0001^tick`, divided by
//! `10^decimal_shift` to undo the token decimal mismatch, then optionally
//! inverted to quote the other token. Which of these apply is always the
//! caller's choice; there is no default convention.
//!
//! Floating point is acceptable here because conversion is the final,
//! non-compounded step.

use bigdecimal::BigDecimal;
use num_traits::ToPrimitive;

use crate::constants::TICK_BASE;
use crate::errors::{CoreResult, TwapError};

#[cfg(feature = "client")]
use serde::{Deserialize, Serialize};

/// How an average tick becomes a quoted price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct PriceConvention {
    /// Power of ten the raw ratio is divided by
    pub decimal_shift: i32,
    /// Quote token0 in token1 instead of token1 in token0
    pub invert: bool,
}

impl PriceConvention {
    /// `1.0001^tick` as is
    pub const fn raw() -> Self {
        Self {
            decimal_shift: 0,
            invert: false,
        }
    }

    /// `1.0001^tick / 10^shift`
    pub const fn scaled(decimal_shift: i32) -> Self {
        Self {
            decimal_shift,
            invert: false,
        }
    }

    /// `1 / 1.0001^tick`
    pub const fn inverted() -> Self {
        Self {
            decimal_shift: 0,
            invert: true,
        }
    }

    /// Convention for a pool whose tokens carry `decimals0` and `decimals1`
    pub fn from_token_decimals(decimals0: u8, decimals1: u8, invert: bool) -> Self {
        Self {
            decimal_shift: decimals1 as i32 - decimals0 as i32,
            invert,
        }
    }

    /// Convert an average tick to a price
    pub fn convert(&self, average_tick: &BigDecimal) -> CoreResult<f64> {
        let exponent = average_tick.to_f64().ok_or_else(|| {
            TwapError::price_conversion(format!("tick {} not representable as f64", average_tick))
        })?;

        let mut price = TICK_BASE.powf(exponent);
        if self.decimal_shift != 0 {
            price /= 10f64.powi(self.decimal_shift);
        }
        if self.invert {
            price = price.recip();
        }

        if !price.is_finite() || price <= 0.0 {
            return Err(TwapError::price_conversion(format!(
                "tick {} yields non-finite price {}",
                average_tick, price
            )));
        }

        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        ((a - b) / b).abs() < 1e-9
    }

    #[test]
    fn test_raw_price() {
        let convention = PriceConvention::raw();

        assert_eq!(convention.convert(&BigDecimal::from(0)).unwrap(), 1.0);
        assert!(approx_eq(convention.convert(&BigDecimal::from(1)).unwrap(), 1.0001));
        assert!(approx_eq(
            convention.convert(&BigDecimal::from(-10000)).unwrap(),
            1.0001f64.powi(-10000)
        ));
    }

    #[test]
    fn test_scaled_price() {
        // USDC (6) / WETH (18) around tick 200000
        let convention = PriceConvention::from_token_decimals(6, 18, false);
        assert_eq!(convention.decimal_shift, 12);

        let price = convention.convert(&BigDecimal::from(200000)).unwrap();
        assert!(approx_eq(price, 1.0001f64.powi(200000) / 1e12));
    }

    #[test]
    fn test_inverted_and_scaled_price() {
        let convention = PriceConvention {
            decimal_shift: 12,
            invert: true,
        };

        let price = convention.convert(&BigDecimal::from(200000)).unwrap();
        assert!(approx_eq(price, 1e12 / 1.0001f64.powi(200000)));

        let inverted = PriceConvention::inverted()
            .convert(&BigDecimal::from(100))
            .unwrap();
        assert!(approx_eq(inverted, 1.0 / 1.0001f64.powi(100)));
    }

    #[test]
    fn test_fractional_tick() {
        let price = PriceConvention::raw()
            .convert(&"0.5".parse::<BigDecimal>().unwrap())
            .unwrap();
        assert!(approx_eq(price, 1.0001f64.sqrt()));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let result = PriceConvention::raw().convert(&BigDecimal::from(100_000_000));
        assert!(matches!(result, Err(TwapError::PriceConversion(_))));
    }
}
