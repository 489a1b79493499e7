#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod abi;
pub mod selectors;

mod errors;
pub use errors::{PrecompileError, PrecompileResult};

mod context;
pub use context::ExecutionContext;

mod traits;
pub use traits::PrecompileHandler;

mod aliasing;
pub use aliasing::{ALIASING_CONSTANT, apply_l1_to_l2_alias, undo_l1_to_l2_alias};

mod gas;
pub use gas::{
    DEFAULT_L1_BASE_FEE, GasPriceComponents, GasPriceModel, L1_COMPRESSION_DISCOUNT, PriceField,
    PriceTuple, ZERO_BYTE_COST,
};

mod queue;
pub use queue::{L1Message, L1MessageId, L1MessageQueue, PendingL1Message};

mod arb_sys;
pub use arb_sys::{
    ARB_SYS_ADDRESS, ArbSys, ArbSysCall, ChainInfoConfig, DEFAULT_ARB_OS_VERSION, DEFAULT_CHAIN_ID,
};

mod arb_gas_info;
pub use arb_gas_info::{
    ARB_GAS_INFO_ADDRESS, ArbGasInfo, ArbGasInfoCall, GasAccountingParams, GasInfoConfig,
};

mod registry;
pub use registry::PrecompileRegistry;
