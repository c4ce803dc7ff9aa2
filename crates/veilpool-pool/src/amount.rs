//! 256-bit amounts
//!
//! pool amounts are 256-bit unsigned values. field elements are narrower
//! than that, so an amount enters every hash as two 128-bit halves, low
//! half first. the half order is part of the wire contract.

use crate::{PoolError, Result};

/// a 256-bit unsigned amount split into 128-bit halves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Amount {
    pub low: u128,
    pub high: u128,
}

impl Amount {
    pub const ZERO: Self = Self { low: 0, high: 0 };

    pub fn new(low: u128, high: u128) -> Self {
        Self { low, high }
    }

    pub fn is_zero(&self) -> bool {
        self.low == 0 && self.high == 0
    }

    /// 0x-prefixed hex, up to 64 digits, case-insensitive
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| PoolError::InvalidAmount(format!("missing 0x prefix in {s:?}")))?;
        if hex.is_empty() || hex.len() > 64 {
            return Err(PoolError::InvalidAmount(format!(
                "expected 1..=64 hex digits, got {}",
                hex.len()
            )));
        }
        let (high_digits, low_digits) = if hex.len() > 32 {
            hex.split_at(hex.len() - 32)
        } else {
            ("", hex)
        };
        let low = u128::from_str_radix(low_digits, 16)
            .map_err(|e| PoolError::InvalidAmount(e.to_string()))?;
        let high = if high_digits.is_empty() {
            0
        } else {
            u128::from_str_radix(high_digits, 16)
                .map_err(|e| PoolError::InvalidAmount(e.to_string()))?
        };
        Ok(Self { low, high })
    }

    pub fn to_hex(&self) -> String {
        if self.high == 0 {
            format!("0x{:x}", self.low)
        } else {
            format!("0x{:x}{:032x}", self.high, self.low)
        }
    }
}

impl From<u128> for Amount {
    fn from(low: u128) -> Self {
        Self { low, high: 0 }
    }
}

impl From<u64> for Amount {
    fn from(low: u64) -> Self {
        Self { low: low as u128, high: 0 }
    }
}
