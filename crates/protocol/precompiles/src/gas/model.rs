//! L1 cost estimation for transaction calldata.

use crate::abi::ByteWeights;
use alloy_primitives::U256;

/// The L1 gas charged per zero calldata byte.
pub const ZERO_BYTE_COST: u64 = 4;

/// The compression discount applied to raw calldata units, as `(numerator, denominator)`.
pub const L1_COMPRESSION_DISCOUNT: (u64, u64) = (9, 10);

/// The default L1 base fee: 20 gwei.
pub const DEFAULT_L1_BASE_FEE: U256 = U256::from_limbs([20_000_000_000, 0, 0, 0]);

/// The configured price components of the chain.
///
/// All values are unsigned 256-bit integers; arithmetic over them saturates instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasPriceComponents {
    /// The L2 base fee, in wei.
    pub l2_base_fee: U256,
    /// The L1 gas charged per non-zero calldata byte.
    pub l1_calldata_cost_per_byte: U256,
    /// The L1 storage cost, in gas.
    pub l1_storage_cost: U256,
    /// The congestion fee, in wei.
    pub congestion_fee: U256,
}

impl Default for GasPriceComponents {
    fn default() -> Self {
        Self {
            l2_base_fee: U256::from(1_000_000_000u64),
            l1_calldata_cost_per_byte: U256::from(16u64),
            l1_storage_cost: U256::ZERO,
            congestion_fee: U256::ZERO,
        }
    }
}

/// Computes the per-transaction L1 fee estimate.
///
/// ```text
/// raw        = zero_bytes * 4 + non_zero_bytes * l1_calldata_cost_per_byte
/// discounted = floor(raw * 9 / 10)
/// fee        = discounted * l1_base_fee
/// ```
///
/// Everything is integer arithmetic so results are bit-reproducible across hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasPriceModel {
    /// The configured price components.
    pub components: GasPriceComponents,
    /// The L1 base fee, in wei.
    pub l1_base_fee: U256,
}

impl Default for GasPriceModel {
    fn default() -> Self {
        Self { components: GasPriceComponents::default(), l1_base_fee: DEFAULT_L1_BASE_FEE }
    }
}

impl GasPriceModel {
    /// Creates a new model.
    pub const fn new(components: GasPriceComponents, l1_base_fee: U256) -> Self {
        Self { components, l1_base_fee }
    }

    /// The undiscounted L1 gas units for `calldata`.
    pub fn raw_l1_units(&self, calldata: &[u8]) -> U256 {
        let weights = ByteWeights::count(calldata);
        let zero = U256::from(weights.zero).saturating_mul(U256::from(ZERO_BYTE_COST));
        let non_zero =
            U256::from(weights.non_zero).saturating_mul(self.components.l1_calldata_cost_per_byte);
        zero.saturating_add(non_zero)
    }

    /// The L1 gas units for `calldata` after the compression discount.
    pub fn l1_units(&self, calldata: &[u8]) -> U256 {
        apply_discount(self.raw_l1_units(calldata))
    }

    /// The L1 fee estimate for `calldata`, in wei.
    pub fn l1_fee(&self, calldata: &[u8]) -> U256 {
        self.l1_units(calldata).saturating_mul(self.l1_base_fee)
    }
}

/// `floor(raw * 9 / 10)`, computed without an intermediate product that could overflow.
fn apply_discount(raw: U256) -> U256 {
    let (num, den) = L1_COMPRESSION_DISCOUNT;
    let (num, den) = (U256::from(num), U256::from(den));
    let (quotient, remainder) = raw.div_rem(den);
    quotient * num + remainder * num / den
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn model(per_byte: u64, l1_base_fee: u64) -> GasPriceModel {
        GasPriceModel::new(
            GasPriceComponents {
                l1_calldata_cost_per_byte: U256::from(per_byte),
                ..Default::default()
            },
            U256::from(l1_base_fee),
        )
    }

    #[test]
    fn test_reference_fee() {
        let mut calldata = vec![0u8; 10];
        calldata.extend_from_slice(&[1, 2, 3, 4, 5]);

        let model = model(16, 1);
        assert_eq!(model.raw_l1_units(&calldata), U256::from(120));
        assert_eq!(model.l1_units(&calldata), U256::from(108));
        assert_eq!(model.l1_fee(&calldata), U256::from(108));
    }

    #[rstest]
    #[case::empty(&[], 0)]
    #[case::single_zero(&[0], 3)]
    #[case::single_non_zero(&[1], 14)]
    #[case::floors(&[0, 0, 0, 1], 25)]
    fn test_discount_truncates(#[case] calldata: &[u8], #[case] expected_units: u64) {
        assert_eq!(model(16, 1).l1_units(calldata), U256::from(expected_units));
    }

    #[test]
    fn test_fee_scales_with_base_fee() {
        let calldata = [0xffu8; 4];
        // 4 * 16 = 64 raw units, 57 after the discount.
        assert_eq!(model(16, 20_000_000_000).l1_fee(&calldata), U256::from(57u64 * 20_000_000_000));
    }

    #[test]
    fn test_discount_does_not_overflow() {
        // 2^256 - 1 ends in 5, so the remainder contributes floor(45 / 10) = 4.
        let expected = U256::MAX / U256::from(10) * U256::from(9) + U256::from(4);
        assert_eq!(apply_discount(U256::MAX), expected);
    }

    #[test]
    fn test_fee_saturates() {
        let model = GasPriceModel::new(
            GasPriceComponents { l1_calldata_cost_per_byte: U256::MAX, ..Default::default() },
            U256::MAX,
        );
        assert_eq!(model.l1_fee(&[1, 1]), U256::MAX);
    }

    #[test]
    fn test_defaults() {
        let model = GasPriceModel::default();
        assert_eq!(model.l1_base_fee, U256::from(20_000_000_000u64));
        assert_eq!(model.components.l2_base_fee, U256::from(1_000_000_000u64));
        assert_eq!(model.components.l1_calldata_cost_per_byte, U256::from(16));
        assert!(model.components.l1_storage_cost.is_zero());
        assert!(model.components.congestion_fee.is_zero());
    }
}
