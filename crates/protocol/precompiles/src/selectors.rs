//! The canonical selector table for the emulated precompiles.
//!
//! This table is the single source of truth for the wire selectors. Several historical
//! revisions of the shim disagreed on these values; the handlers resolve calls exclusively
//! through the constants below.

use alloy_primitives::{Selector, fixed_bytes};

/// Selectors answered by the chain-info precompile (`ArbSys`, `0x…64`).
pub mod arb_sys {
    use super::*;

    /// `arbChainID()`
    pub const CHAIN_ID: Selector = fixed_bytes!("d127f54a");
    /// `arbBlockNumber()`
    pub const BLOCK_NUMBER: Selector = fixed_bytes!("a3b1b31d");
    /// `arbOSVersion()`
    pub const OS_VERSION: Selector = fixed_bytes!("051038f2");
    /// `sendToL1(address,bytes)`
    pub const SEND_TO_L1: Selector = fixed_bytes!("6e8c1d6f");
    /// `mapL1SenderContractAddressToL2Alias(address)`
    pub const MAP_L1_SENDER_TO_L2_ALIAS: Selector = fixed_bytes!("a0c12269");
}

/// Selectors answered by the gas-info precompile (`ArbGasInfo`, `0x…6c`).
pub mod arb_gas_info {
    use super::*;

    /// `getPricesInWei()`
    pub const GET_PRICES_IN_WEI: Selector = fixed_bytes!("41b247a8");
    /// `getPricesInWeiWithAggregator(address)`
    pub const GET_PRICES_IN_WEI_WITH_AGGREGATOR: Selector = fixed_bytes!("43a28b2e");
    /// `getPricesInArbGas()`
    pub const GET_PRICES_IN_ARB_GAS: Selector = fixed_bytes!("02199f34");
    /// `getPricesInArbGasWithAggregator(address)`
    pub const GET_PRICES_IN_ARB_GAS_WITH_AGGREGATOR: Selector = fixed_bytes!("12f78baa");
    /// `getCurrentTxL1GasFees()`
    pub const GET_CURRENT_TX_L1_GAS_FEES: Selector = fixed_bytes!("c6f7de0e");
    /// `getL1BaseFeeEstimate()`
    pub const GET_L1_BASE_FEE_ESTIMATE: Selector = fixed_bytes!("f5d6ded7");
    /// `getL1GasPriceEstimate()`, deprecated alias of `getL1BaseFeeEstimate()`.
    pub const GET_L1_GAS_PRICE_ESTIMATE: Selector = fixed_bytes!("055f362f");
    /// `getL2BaseFeeEstimate()`
    pub const GET_L2_BASE_FEE_ESTIMATE: Selector = fixed_bytes!("b246b565");
    /// `getMinimumGasPrice()`
    pub const GET_MINIMUM_GAS_PRICE: Selector = fixed_bytes!("f918379a");
    /// `getGasAccountingParams()`
    pub const GET_GAS_ACCOUNTING_PARAMS: Selector = fixed_bytes!("612af178");
    /// `getAmortizedCostCapBips()`
    pub const GET_AMORTIZED_COST_CAP_BIPS: Selector = fixed_bytes!("7a7d6beb");
    /// `getL1BlobBaseFeeEstimate()`
    pub const GET_L1_BLOB_BASE_FEE_ESTIMATE: Selector = fixed_bytes!("67037bec");
}

/// Splits `input` into its selector and argument bytes.
///
/// Returns `None` if the input is shorter than a selector.
pub fn split_selector(input: &[u8]) -> Option<(Selector, &[u8])> {
    let (selector, args) = input.split_first_chunk::<4>()?;
    Some((Selector::from(*selector), args))
}
