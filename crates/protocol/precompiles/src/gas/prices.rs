//! The ordered six-field price tuple returned by `getPricesInWei()`.

use crate::{
    GasPriceComponents, PrecompileError, PrecompileResult,
    abi::{decode_words, encode_words},
};
use alloy_primitives::{Bytes, U256};

/// The positions of the fields inside a [`PriceTuple`].
///
/// The order is a wire contract: every consumer of `getPricesInWei()` reads the fields by
/// position, so this enum is the only place that defines it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum PriceField {
    /// The L2 base fee, in wei.
    L2BaseFee = 0,
    /// The L1 base fee estimate, in wei.
    L1BaseFeeEstimate = 1,
    /// The cost of a byte of L1 calldata, in wei.
    L1CalldataCost = 2,
    /// The L1 storage cost.
    L1StorageCost = 3,
    /// The congestion fee, in wei.
    CongestionFee = 4,
    /// Auxiliary total: the L2 base fee plus the congestion fee.
    Aux = 5,
}

/// The six-field gas price tuple, in wire order:
/// `[l2BaseFee, l1BaseFeeEstimate, l1CalldataCost, l1StorageCost, congestionFee, aux]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PriceTuple([U256; PriceTuple::LEN]);

impl PriceTuple {
    /// The number of fields in the tuple.
    pub const LEN: usize = 6;

    /// The tuple shipped with the shim, used when no other source is available.
    pub const FALLBACK: Self = Self([
        U256::from_limbs([100_000_000, 0, 0, 0]),
        U256::from_limbs([1_000_000_000, 0, 0, 0]),
        U256::from_limbs([2_000_000_000_000, 0, 0, 0]),
        U256::ZERO,
        U256::ZERO,
        U256::from_limbs([100_000_000, 0, 0, 0]),
    ]);

    /// Creates a tuple from its fields in wire order.
    pub const fn new(fields: [U256; Self::LEN]) -> Self {
        Self(fields)
    }

    /// Creates a tuple from a slice, failing unless it holds exactly six values.
    pub fn try_from_slice(values: &[U256]) -> PrecompileResult<Self> {
        let fields: [U256; Self::LEN] =
            values.try_into().map_err(|_| PrecompileError::InvalidTupleLength(values.len()))?;
        Ok(Self(fields))
    }

    /// Derives the construction-time tuple from configured components.
    ///
    /// The calldata cost is the L1 base fee times the per-byte gas cost and the auxiliary field is
    /// the total L2 fee (base plus congestion).
    pub fn from_components(components: &GasPriceComponents, l1_base_fee: U256) -> Self {
        Self([
            components.l2_base_fee,
            l1_base_fee,
            l1_base_fee.saturating_mul(components.l1_calldata_cost_per_byte),
            components.l1_storage_cost,
            components.congestion_fee,
            components.l2_base_fee.saturating_add(components.congestion_fee),
        ])
    }

    /// Returns the value of `field`.
    pub const fn get(&self, field: PriceField) -> U256 {
        self.0[field as usize]
    }

    /// The L2 base fee, in wei.
    pub const fn l2_base_fee(&self) -> U256 {
        self.get(PriceField::L2BaseFee)
    }

    /// The L1 base fee estimate, in wei.
    pub const fn l1_base_fee_estimate(&self) -> U256 {
        self.get(PriceField::L1BaseFeeEstimate)
    }

    /// The cost of a byte of L1 calldata, in wei.
    pub const fn l1_calldata_cost(&self) -> U256 {
        self.get(PriceField::L1CalldataCost)
    }

    /// The L1 storage cost.
    pub const fn l1_storage_cost(&self) -> U256 {
        self.get(PriceField::L1StorageCost)
    }

    /// The congestion fee, in wei.
    pub const fn congestion_fee(&self) -> U256 {
        self.get(PriceField::CongestionFee)
    }

    /// The auxiliary field.
    pub const fn aux(&self) -> U256 {
        self.get(PriceField::Aux)
    }

    /// Returns the fields in wire order.
    pub const fn as_array(&self) -> &[U256; Self::LEN] {
        &self.0
    }

    /// The tuple expressed in internal gas units, as returned by `getPricesInArbGas()`.
    ///
    /// The L1 base fee estimate, calldata cost and storage cost are each divided (rounding down)
    /// by the L2 base fee. A zero L2 base fee yields zero for every field.
    pub fn in_arb_gas(&self) -> [U256; 3] {
        let divisor = self.l2_base_fee();
        [self.l1_base_fee_estimate(), self.l1_calldata_cost(), self.l1_storage_cost()]
            .map(|value| value.checked_div(divisor).unwrap_or_default())
    }

    /// ABI-encodes the tuple as six consecutive words.
    pub fn encode(&self) -> Bytes {
        encode_words(&self.0)
    }

    /// Decodes a tuple from exactly six consecutive words.
    pub fn decode(data: &[u8]) -> PrecompileResult<Self> {
        decode_words::<{ Self::LEN }>(data).map(Self)
    }
}

impl From<[U256; PriceTuple::LEN]> for PriceTuple {
    fn from(fields: [U256; PriceTuple::LEN]) -> Self {
        Self(fields)
    }
}

impl TryFrom<Vec<U256>> for PriceTuple {
    type Error = PrecompileError;

    fn try_from(values: Vec<U256>) -> Result<Self, Self::Error> {
        Self::try_from_slice(&values)
    }
}
