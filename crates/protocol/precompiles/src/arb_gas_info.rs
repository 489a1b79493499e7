//! The gas-info precompile (`ArbGasInfo`).

use crate::{
    ExecutionContext, GasPriceModel, PrecompileError, PrecompileHandler, PrecompileResult,
    PriceTuple,
    abi::{SELECTOR_SIZE, encode_u64, encode_word, encode_words},
    selectors::{arb_gas_info, split_selector},
};
use alloy_primitives::{Address, Bytes, Selector, U256, address};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info};

/// The address `ArbGasInfo` is installed at.
pub const ARB_GAS_INFO_ADDRESS: Address = address!("0x000000000000000000000000000000000000006c");

/// The gas accounting parameters returned by `getGasAccountingParams()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasAccountingParams {
    /// The sustained gas throughput, in gas per second.
    pub speed_limit_per_second: u64,
    /// The maximum size of the gas pool.
    pub gas_pool_max: u64,
    /// The maximum gas limit of a single transaction.
    pub max_tx_gas_limit: u64,
}

impl Default for GasAccountingParams {
    fn default() -> Self {
        Self {
            speed_limit_per_second: 120_000_000,
            gas_pool_max: 32_000_000,
            max_tx_gas_limit: 32_000_000,
        }
    }
}

/// Static configuration of the [`ArbGasInfo`] handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasInfoConfig {
    /// The model used to compute `getCurrentTxL1GasFees()` outside of seeded mode.
    pub model: GasPriceModel,
    /// The tuple answered right after construction and after a [`reset`](ArbGasInfo::reset).
    pub prices: PriceTuple,
    /// The accounting parameters.
    pub accounting: GasAccountingParams,
    /// The amortized cost cap, in basis points.
    pub amortized_cost_cap_bips: u64,
    /// The L1 blob base fee estimate, in wei.
    pub l1_blob_base_fee: U256,
}

impl GasInfoConfig {
    /// Creates a configuration whose initial tuple is derived from `model`.
    pub fn new(model: GasPriceModel) -> Self {
        Self {
            model,
            prices: PriceTuple::from_components(&model.components, model.l1_base_fee),
            accounting: GasAccountingParams::default(),
            amortized_cost_cap_bips: 10_000,
            l1_blob_base_fee: U256::from(1),
        }
    }

    /// Replaces the initial tuple, for instance with one resolved from a live network.
    pub const fn with_prices(mut self, prices: PriceTuple) -> Self {
        self.prices = prices;
        self
    }
}

impl Default for GasInfoConfig {
    fn default() -> Self {
        Self::new(GasPriceModel::default())
    }
}

/// A call to [`ArbGasInfo`], resolved from its selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArbGasInfoCall {
    /// `getPricesInWei()` and `getPricesInWeiWithAggregator(address)`
    PricesInWei,
    /// `getPricesInArbGas()` and `getPricesInArbGasWithAggregator(address)`
    PricesInArbGas,
    /// `getCurrentTxL1GasFees()`
    CurrentTxL1GasFees,
    /// `getL1BaseFeeEstimate()` and the deprecated `getL1GasPriceEstimate()`
    L1BaseFeeEstimate,
    /// `getL2BaseFeeEstimate()`
    L2BaseFeeEstimate,
    /// `getMinimumGasPrice()`
    MinimumGasPrice,
    /// `getGasAccountingParams()`
    GasAccountingParams,
    /// `getAmortizedCostCapBips()`
    AmortizedCostCapBips,
    /// `getL1BlobBaseFeeEstimate()`
    L1BlobBaseFeeEstimate,
    /// A selector `ArbGasInfo` does not answer.
    Unknown(Selector),
}

impl ArbGasInfoCall {
    /// Resolves a selector.
    ///
    /// The aggregator variants answer exactly like their plain counterparts; the aggregator
    /// argument is ignored.
    pub fn from_selector(selector: Selector) -> Self {
        match selector {
            arb_gas_info::GET_PRICES_IN_WEI | arb_gas_info::GET_PRICES_IN_WEI_WITH_AGGREGATOR => {
                Self::PricesInWei
            }
            arb_gas_info::GET_PRICES_IN_ARB_GAS |
            arb_gas_info::GET_PRICES_IN_ARB_GAS_WITH_AGGREGATOR => Self::PricesInArbGas,
            arb_gas_info::GET_CURRENT_TX_L1_GAS_FEES => Self::CurrentTxL1GasFees,
            arb_gas_info::GET_L1_BASE_FEE_ESTIMATE | arb_gas_info::GET_L1_GAS_PRICE_ESTIMATE => {
                Self::L1BaseFeeEstimate
            }
            arb_gas_info::GET_L2_BASE_FEE_ESTIMATE => Self::L2BaseFeeEstimate,
            arb_gas_info::GET_MINIMUM_GAS_PRICE => Self::MinimumGasPrice,
            arb_gas_info::GET_GAS_ACCOUNTING_PARAMS => Self::GasAccountingParams,
            arb_gas_info::GET_AMORTIZED_COST_CAP_BIPS => Self::AmortizedCostCapBips,
            arb_gas_info::GET_L1_BLOB_BASE_FEE_ESTIMATE => Self::L1BlobBaseFeeEstimate,
            other => Self::Unknown(other),
        }
    }

    /// The static gas charged for the call.
    pub const fn gas_cost(&self) -> u64 {
        match self {
            Self::L1BaseFeeEstimate => 5,
            Self::PricesInWei |
            Self::CurrentTxL1GasFees |
            Self::L2BaseFeeEstimate |
            Self::MinimumGasPrice |
            Self::AmortizedCostCapBips |
            Self::L1BlobBaseFeeEstimate => 10,
            Self::GasAccountingParams => 20,
            Self::PricesInArbGas => 96,
            Self::Unknown(_) => 0,
        }
    }
}

#[derive(Debug)]
struct GasInfoState {
    prices: PriceTuple,
    seeded: bool,
}

/// Answers pricing and accounting queries.
///
/// The handler has two mutually exclusive answers to `getCurrentTxL1GasFees()`. Until it is
/// [seeded](Self::seed) the fee is computed from the call input with the configured
/// [`GasPriceModel`]. Once seeded, it returns the seeded L1 base fee estimate verbatim so that
/// reseed-driven tests stay deterministic regardless of calldata.
#[derive(Debug)]
pub struct ArbGasInfo {
    config: GasInfoConfig,
    state: RwLock<GasInfoState>,
}

impl ArbGasInfo {
    /// Creates a handler answering with `config.prices` in computed mode.
    pub const fn new(config: GasInfoConfig) -> Self {
        Self { state: RwLock::new(GasInfoState { prices: config.prices, seeded: false }), config }
    }

    /// Returns the handler configuration.
    pub const fn config(&self) -> &GasInfoConfig {
        &self.config
    }

    /// Returns the current price tuple.
    pub fn prices(&self) -> PriceTuple {
        self.state.read().unwrap_or_else(PoisonError::into_inner).prices
    }

    /// Returns `true` if the handler was seeded since construction or the last reset.
    pub fn is_seeded(&self) -> bool {
        self.state.read().unwrap_or_else(PoisonError::into_inner).seeded
    }

    /// Atomically replaces the price tuple and switches to seeded mode.
    ///
    /// Any length other than six fails with [`PrecompileError::InvalidTupleLength`] and leaves the
    /// current tuple untouched.
    pub fn seed(&self, values: &[U256]) -> PrecompileResult<()> {
        let prices = PriceTuple::try_from_slice(values)?;
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.prices = prices;
        state.seeded = true;
        info!(target: "arb_gas_info", prices = ?prices.as_array(), "Reseeded gas price tuple");
        Ok(())
    }

    /// Restores the construction-time tuple and the computed fee mode.
    pub fn reset(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.prices = self.config.prices;
        state.seeded = false;
        debug!(target: "arb_gas_info", "Reset gas price tuple");
    }

    fn current_tx_l1_gas_fees(&self, input: &[u8]) -> U256 {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        if state.seeded {
            return state.prices.l1_base_fee_estimate();
        }
        self.config.model.l1_fee(input)
    }
}

impl Default for ArbGasInfo {
    fn default() -> Self {
        Self::new(GasInfoConfig::default())
    }
}

impl PrecompileHandler for ArbGasInfo {
    fn address(&self) -> Address {
        ARB_GAS_INFO_ADDRESS
    }

    fn name(&self) -> &'static str {
        "ArbGasInfo"
    }

    fn call(&self, input: &[u8], _ctx: &ExecutionContext) -> PrecompileResult<Bytes> {
        let (selector, _) = split_selector(input).ok_or(PrecompileError::InvalidCalldata {
            expected: SELECTOR_SIZE,
            actual: input.len(),
        })?;

        let out = match ArbGasInfoCall::from_selector(selector) {
            ArbGasInfoCall::PricesInWei => self.prices().encode(),
            ArbGasInfoCall::PricesInArbGas => encode_words(&self.prices().in_arb_gas()),
            ArbGasInfoCall::CurrentTxL1GasFees => encode_word(self.current_tx_l1_gas_fees(input)),
            ArbGasInfoCall::L1BaseFeeEstimate => encode_word(self.prices().l1_base_fee_estimate()),
            ArbGasInfoCall::L2BaseFeeEstimate | ArbGasInfoCall::MinimumGasPrice => {
                encode_word(self.prices().l2_base_fee())
            }
            ArbGasInfoCall::GasAccountingParams => {
                let params = &self.config.accounting;
                encode_words(&[
                    U256::from(params.speed_limit_per_second),
                    U256::from(params.gas_pool_max),
                    U256::from(params.max_tx_gas_limit),
                ])
            }
            ArbGasInfoCall::AmortizedCostCapBips => encode_u64(self.config.amortized_cost_cap_bips),
            ArbGasInfoCall::L1BlobBaseFeeEstimate => encode_word(self.config.l1_blob_base_fee),
            ArbGasInfoCall::Unknown(selector) => {
                return Err(PrecompileError::UnknownSelector { precompile: self.name(), selector });
            }
        };
        Ok(out)
    }

    fn gas_cost(&self, input: &[u8]) -> u64 {
        split_selector(input)
            .map_or(0, |(selector, _)| ArbGasInfoCall::from_selector(selector).gas_cost())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GasPriceComponents, abi::decode_words};
    use alloy_primitives::fixed_bytes;
    use rstest::rstest;

    fn call(handler: &ArbGasInfo, input: &[u8]) -> Bytes {
        handler.call(input, &ExecutionContext::default()).unwrap()
    }

    fn word(bytes: &[u8]) -> U256 {
        decode_words::<1>(bytes).unwrap()[0]
    }

    fn values(values: [u64; 6]) -> Vec<U256> {
        values.into_iter().map(U256::from).collect()
    }

    #[test]
    fn test_initial_prices_follow_components() {
        let handler = ArbGasInfo::default();
        let out = call(&handler, arb_gas_info::GET_PRICES_IN_WEI.as_slice());
        let expected =
            PriceTuple::from_components(&GasPriceComponents::default(), U256::from(20_000_000_000u64));
        assert_eq!(PriceTuple::decode(&out).unwrap(), expected);
        assert!(!handler.is_seeded());
    }

    #[test]
    fn test_seed_then_get_prices_in_wei_keeps_order() {
        let handler = ArbGasInfo::default();
        handler.seed(&values([1, 2, 3, 4, 5, 6])).unwrap();

        let out = call(&handler, arb_gas_info::GET_PRICES_IN_WEI.as_slice());
        assert_eq!(decode_words::<6>(&out).unwrap().to_vec(), values([1, 2, 3, 4, 5, 6]));
        assert!(handler.is_seeded());
    }

    #[rstest]
    #[case::five(5)]
    #[case::seven(7)]
    #[case::empty(0)]
    fn test_seed_rejects_wrong_length(#[case] len: usize) {
        let handler = ArbGasInfo::default();
        handler.seed(&values([1, 2, 3, 4, 5, 6])).unwrap();

        let err = handler.seed(&vec![U256::from(9); len]).unwrap_err();
        assert_eq!(err, PrecompileError::InvalidTupleLength(len));
        assert_eq!(handler.prices(), PriceTuple::try_from(values([1, 2, 3, 4, 5, 6])).unwrap());
    }

    #[test]
    fn test_current_tx_l1_gas_fees_computed_over_full_input() {
        let handler = ArbGasInfo::default();
        // Four non-zero selector bytes: 64 raw units, 57 discounted, times 20 gwei.
        let out = call(&handler, arb_gas_info::GET_CURRENT_TX_L1_GAS_FEES.as_slice());
        assert_eq!(word(&out), U256::from(57u64 * 20_000_000_000));

        // Trailing zero bytes are priced at four units each.
        let mut input = arb_gas_info::GET_CURRENT_TX_L1_GAS_FEES.to_vec();
        input.extend_from_slice(&[0u8; 10]);
        // 64 + 40 = 104 raw units, 93 discounted.
        assert_eq!(word(&call(&handler, &input)), U256::from(93u64 * 20_000_000_000));
    }

    #[test]
    fn test_current_tx_l1_gas_fees_seeded_mode() {
        let handler = ArbGasInfo::default();
        handler.seed(&values([10, 777, 30, 40, 50, 60])).unwrap();

        let mut input = arb_gas_info::GET_CURRENT_TX_L1_GAS_FEES.to_vec();
        input.extend_from_slice(&[0xff; 64]);
        assert_eq!(word(&call(&handler, &input)), U256::from(777));

        handler.reset();
        assert!(!handler.is_seeded());
        assert_eq!(handler.prices(), handler.config().prices);
        let out = call(&handler, arb_gas_info::GET_CURRENT_TX_L1_GAS_FEES.as_slice());
        assert_eq!(word(&out), U256::from(57u64 * 20_000_000_000));
    }

    #[test]
    fn test_prices_in_arb_gas() {
        let handler = ArbGasInfo::new(GasInfoConfig::default().with_prices(PriceTuple::FALLBACK));
        let out = call(&handler, arb_gas_info::GET_PRICES_IN_ARB_GAS.as_slice());
        assert_eq!(
            decode_words::<3>(&out).unwrap(),
            [U256::from(10), U256::from(20_000), U256::ZERO]
        );

        let aggregated =
            call(&handler, arb_gas_info::GET_PRICES_IN_ARB_GAS_WITH_AGGREGATOR.as_slice());
        assert_eq!(aggregated, out);
    }

    #[test]
    fn test_scalar_accessors() {
        let handler = ArbGasInfo::default();
        handler.seed(&values([11, 22, 33, 44, 55, 66])).unwrap();

        for (selector, expected) in [
            (arb_gas_info::GET_L1_BASE_FEE_ESTIMATE, 22u64),
            (arb_gas_info::GET_L1_GAS_PRICE_ESTIMATE, 22),
            (arb_gas_info::GET_L2_BASE_FEE_ESTIMATE, 11),
            (arb_gas_info::GET_MINIMUM_GAS_PRICE, 11),
            (arb_gas_info::GET_AMORTIZED_COST_CAP_BIPS, 10_000),
            (arb_gas_info::GET_L1_BLOB_BASE_FEE_ESTIMATE, 1),
        ] {
            let out = call(&handler, selector.as_slice());
            assert_eq!(word(&out), U256::from(expected), "{selector}");
        }
    }

    #[test]
    fn test_gas_accounting_params() {
        let out = call(&ArbGasInfo::default(), arb_gas_info::GET_GAS_ACCOUNTING_PARAMS.as_slice());
        assert_eq!(
            decode_words::<3>(&out).unwrap(),
            [U256::from(120_000_000), U256::from(32_000_000), U256::from(32_000_000)]
        );
    }

    #[test]
    fn test_prices_with_aggregator_ignores_argument() {
        let handler = ArbGasInfo::default();
        let plain = call(&handler, arb_gas_info::GET_PRICES_IN_WEI.as_slice());
        let mut input = arb_gas_info::GET_PRICES_IN_WEI_WITH_AGGREGATOR.to_vec();
        input.extend_from_slice(&[0xaa; 32]);
        assert_eq!(call(&handler, &input), plain);
    }

    #[test]
    fn test_unknown_selector_and_short_input() {
        let handler = ArbGasInfo::default();
        let ctx = ExecutionContext::default();
        assert_eq!(
            handler.call(&[0xde, 0xad, 0xbe, 0xef], &ctx).unwrap_err(),
            PrecompileError::UnknownSelector {
                precompile: "ArbGasInfo",
                selector: fixed_bytes!("deadbeef")
            }
        );
        assert_eq!(
            handler.call(&[0x41], &ctx).unwrap_err(),
            PrecompileError::InvalidCalldata { expected: 4, actual: 1 }
        );
    }

    #[rstest]
    #[case::prices_in_wei(arb_gas_info::GET_PRICES_IN_WEI, 10)]
    #[case::l1_base_fee(arb_gas_info::GET_L1_BASE_FEE_ESTIMATE, 5)]
    #[case::prices_in_arb_gas(arb_gas_info::GET_PRICES_IN_ARB_GAS, 96)]
    #[case::accounting(arb_gas_info::GET_GAS_ACCOUNTING_PARAMS, 20)]
    #[case::unknown(fixed_bytes!("deadbeef"), 0)]
    fn test_gas_cost(#[case] selector: Selector, #[case] expected: u64) {
        assert_eq!(ArbGasInfo::default().gas_cost(selector.as_slice()), expected);
    }
}
