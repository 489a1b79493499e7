#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod errors;
pub use errors::{
    DepositError, DepositProcessingError, DepositValidationError, EnvelopeError,
    ValidationViolation,
};

mod transaction;
pub use transaction::{DEPOSIT_TX_TYPE, DepositField, DepositTransaction, source_hash_from_l1};

mod codec;

mod intent;
pub use intent::ExecutionIntent;

mod processor;
pub use processor::{
    DepositProcessor, ProcessedDeposit, TX_BASE_GAS, TX_DATA_GAS_PER_BYTE, TX_VALUE_TRANSFER_GAS,
};
