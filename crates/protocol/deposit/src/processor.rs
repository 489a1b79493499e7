//! Contains the [`DepositProcessor`], which turns raw envelopes into executable deposits.

use crate::{DepositProcessingError, DepositTransaction, ExecutionIntent};
use alloy_primitives::B256;
use tracing::{debug, warn};

/// The base gas charged for every deposit.
pub const TX_BASE_GAS: u64 = 21_000;

/// The gas charged per byte of deposit data.
pub const TX_DATA_GAS_PER_BYTE: u64 = 16;

/// The extra gas charged when the deposit transfers value.
pub const TX_VALUE_TRANSFER_GAS: u64 = 9_000;

/// A decoded, validated deposit ready for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedDeposit {
    /// The decoded transaction.
    pub transaction: DepositTransaction,
    /// The hash of the raw envelope.
    pub tx_hash: B256,
    /// What the host has to execute.
    pub intent: ExecutionIntent,
    /// The intrinsic gas estimate, never above the transaction's gas limit.
    pub intrinsic_gas: u64,
}

/// Decodes, validates and prices raw deposit envelopes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepositProcessor;

impl DepositProcessor {
    /// Creates a new processor.
    pub const fn new() -> Self {
        Self
    }

    /// Processes a raw `0x7e` envelope.
    pub fn process(&self, raw: &[u8]) -> Result<ProcessedDeposit, DepositProcessingError> {
        let transaction = DepositTransaction::decode(raw).inspect_err(|e| {
            debug!(target: "deposit", error = %e, "Rejected undecodable deposit");
        })?;
        let intent = transaction.execution_intent().inspect_err(|e| {
            warn!(
                target: "deposit",
                source_hash = %transaction.source_hash,
                error = %e,
                "Rejected invalid deposit"
            );
        })?;
        let intrinsic_gas = Self::intrinsic_gas(&transaction);
        let tx_hash = transaction.tx_hash();

        debug!(
            target: "deposit",
            %tx_hash,
            from = %transaction.from,
            create = intent.is_create(),
            intrinsic_gas,
            "Processed deposit"
        );
        Ok(ProcessedDeposit { transaction, tx_hash, intent, intrinsic_gas })
    }

    /// The intrinsic gas of a deposit, capped at its gas limit.
    pub fn intrinsic_gas(tx: &DepositTransaction) -> u64 {
        let data_gas = (tx.data.len() as u64).saturating_mul(TX_DATA_GAS_PER_BYTE);
        let value_gas = if tx.value.is_zero() { 0 } else { TX_VALUE_TRANSFER_GAS };
        TX_BASE_GAS.saturating_add(data_gas).saturating_add(value_gas).min(tx.gas_limit)
    }
}
