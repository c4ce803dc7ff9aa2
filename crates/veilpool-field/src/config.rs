//! field configuration
//!
//! owns the prime modulus and is the only way to mint a [`FieldElement`].
//! construction reduces every input modulo the prime, so elements are
//! canonical by the time anything else sees them.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::element::FieldElement;
use crate::{FieldError, Result, STARK_PRIME_DEC};

/// the prime field every pool value lives in
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldConfig {
    prime: BigUint,
}

impl FieldConfig {
    /// build a config around an explicit modulus
    ///
    /// the modulus must be odd and leave room for 128-bit amount halves,
    /// otherwise the commitment scheme's low/high split would wrap.
    pub fn new(prime: BigUint) -> Result<Self> {
        if prime.is_zero() || prime.is_one() {
            return Err(FieldError::InvalidPrime("modulus must be > 1".into()));
        }
        if (&prime % 2u8).is_zero() {
            return Err(FieldError::InvalidPrime("modulus must be odd".into()));
        }
        if prime.bits() <= 128 {
            return Err(FieldError::InvalidPrime(
                "modulus must exceed 128 bits to hold amount halves".into(),
            ));
        }
        // the sponge's cube S-box is only a bijection when 3 does not
        // divide P-1, i.e. P is not 1 mod 3
        if &prime % 3u8 == BigUint::one() {
            return Err(FieldError::InvalidPrime(
                "modulus must not be 1 mod 3 (cube S-box would not permute)".into(),
            ));
        }
        Ok(Self { prime })
    }

    /// parse a modulus from configuration, decimal or 0x-prefixed hex
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let prime = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            BigUint::parse_bytes(hex.as_bytes(), 16)
        } else {
            BigUint::parse_bytes(s.as_bytes(), 10)
        }
        .ok_or_else(|| FieldError::InvalidPrime(format!("unparseable modulus {s:?}")))?;
        Self::new(prime)
    }

    /// the default STARK field (~2^251)
    pub fn stark() -> Self {
        // the constant is a known-good prime; parse cannot fail on it
        Self::parse(STARK_PRIME_DEC).unwrap()
    }

    pub fn prime(&self) -> &BigUint {
        &self.prime
    }

    /// additive identity
    pub fn zero(&self) -> FieldElement {
        FieldElement::raw(BigUint::zero())
    }

    /// mint an element, reducing modulo the prime
    pub fn element(&self, value: BigUint) -> FieldElement {
        FieldElement::raw(value % &self.prime)
    }

    pub fn element_from_u64(&self, value: u64) -> FieldElement {
        self.element(BigUint::from(value))
    }

    pub fn element_from_u128(&self, value: u128) -> FieldElement {
        self.element(BigUint::from(value))
    }

    /// interpret big-endian bytes as an integer and reduce
    pub fn element_from_bytes_be(&self, bytes: &[u8]) -> FieldElement {
        self.element(BigUint::from_bytes_be(bytes))
    }

    /// parse a 0x-prefixed hex string (case-insensitive) into an element
    pub fn element_from_hex(&self, s: &str) -> Result<FieldElement> {
        let hex = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| FieldError::InvalidHex(format!("missing 0x prefix in {s:?}")))?;
        if hex.is_empty() {
            return Err(FieldError::InvalidHex("empty hex digits".into()));
        }
        let value = BigUint::parse_bytes(hex.as_bytes(), 16)
            .ok_or_else(|| FieldError::InvalidHex(format!("bad hex digits in {s:?}")))?;
        Ok(self.element(value))
    }
}
