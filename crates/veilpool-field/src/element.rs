//! canonical field elements
//!
//! a [`FieldElement`] is always strictly below the modulus of the
//! [`FieldConfig`](crate::FieldConfig) that minted it; reduction happens
//! at ingestion, never later. elements from different configs must not be
//! mixed - components hold one config and mint through it.

use std::fmt;

use num_bigint::BigUint;

/// an integer in `[0, P)`, serialized as 0x-prefixed lowercase hex
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FieldElement(BigUint);

impl FieldElement {
    /// wrap an already-reduced value. crate-internal: the public mint
    /// path is [`FieldConfig`](crate::FieldConfig), which reduces.
    pub(crate) fn raw(value: BigUint) -> Self {
        Self(value)
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        use num_traits::Zero;
        self.0.is_zero()
    }

    /// wire form: 0x-prefixed lowercase hex, no zero padding
    pub fn to_hex(&self) -> String {
        format!("0x{:x}", self.0)
    }

    /// big-endian bytes, minimal length (empty for zero)
    pub fn to_bytes_be(&self) -> Vec<u8> {
        self.0.to_bytes_be()
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({})", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use crate::FieldConfig;

    #[test]
    fn test_hex_wire_form() {
        let cfg = FieldConfig::stark();
        assert_eq!(cfg.zero().to_hex(), "0x0");
        assert_eq!(cfg.element_from_u64(255).to_hex(), "0xff");
        // round trip through the wire form
        let e = cfg.element_from_u128(0x1234_5678_9abc_def0_1122_3344);
        assert_eq!(cfg.element_from_hex(&e.to_hex()).unwrap(), e);
    }

    #[test]
    fn test_display_matches_hex() {
        let cfg = FieldConfig::stark();
        let e = cfg.element_from_u64(48879);
        assert_eq!(format!("{e}"), "0xbeef");
    }
}
