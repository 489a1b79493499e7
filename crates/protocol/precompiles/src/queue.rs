//! The outbound L2 → L1 message queue.

use alloy_primitives::{Address, B256, Bytes, U256};
use core::fmt;
use std::sync::{PoisonError, RwLock};

/// A monotonically increasing identifier of an [`L1Message`], scoped to its queue.
///
/// The string form is `l1msg-<n>`; the numeric suffix is what `sendToL1` returns on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct L1MessageId(u64);

impl L1MessageId {
    /// Returns the numeric part of the identifier.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for L1MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "l1msg-{}", self.0)
    }
}

/// An outbound message recorded by `sendToL1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L1Message {
    /// The identifier of the message.
    pub id: L1MessageId,
    /// The L2 sender.
    pub from: Address,
    /// The L1 destination.
    pub to: Address,
    /// The value carried by the message, in wei.
    pub value: U256,
    /// The message payload.
    pub data: Bytes,
    /// The timestamp of the L2 block the message was sent in.
    pub timestamp: u64,
    /// The L2 block number the message was sent in.
    pub block_number: u64,
    /// The hash of the L2 transaction that sent the message.
    pub tx_hash: B256,
}

/// The fields of an [`L1Message`] supplied by the sender; the queue assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingL1Message {
    /// The L2 sender.
    pub from: Address,
    /// The L1 destination.
    pub to: Address,
    /// The value carried by the message, in wei.
    pub value: U256,
    /// The message payload.
    pub data: Bytes,
    /// The timestamp of the L2 block the message was sent in.
    pub timestamp: u64,
    /// The L2 block number the message was sent in.
    pub block_number: u64,
    /// The hash of the L2 transaction that sent the message.
    pub tx_hash: B256,
}

#[derive(Debug, Default)]
struct QueueState {
    messages: Vec<L1Message>,
    last_id: u64,
}

/// An append-only record of outbound L2 → L1 messages.
///
/// Appends assign ids under the same write lock that pushes the message, so readers never observe
/// a half-appended entry. [`clear`](Self::clear) drops the recorded messages but keeps the id
/// counter, so an id is never handed out twice by the same queue.
#[derive(Debug, Default)]
pub struct L1MessageQueue {
    state: RwLock<QueueState>,
}

impl L1MessageQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and returns its freshly assigned id.
    pub fn push(&self, pending: PendingL1Message) -> L1MessageId {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.last_id += 1;
        let id = L1MessageId(state.last_id);
        state.messages.push(L1Message {
            id,
            from: pending.from,
            to: pending.to,
            value: pending.value,
            data: pending.data,
            timestamp: pending.timestamp,
            block_number: pending.block_number,
            tx_hash: pending.tx_hash,
        });
        id
    }

    /// Returns a snapshot of all recorded messages, oldest first.
    pub fn messages(&self) -> Vec<L1Message> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).messages.clone()
    }

    /// Returns the message with the given id, if it is still recorded.
    pub fn get(&self, id: L1MessageId) -> Option<L1Message> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.messages.iter().find(|m| m.id == id).cloned()
    }

    /// The number of recorded messages.
    pub fn len(&self) -> usize {
        self.state.read().unwrap_or_else(PoisonError::into_inner).messages.len()
    }

    /// Returns `true` if no messages are recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The most recently assigned id, if any message was ever pushed.
    pub fn last_id(&self) -> Option<L1MessageId> {
        let last = self.state.read().unwrap_or_else(PoisonError::into_inner).last_id;
        (last > 0).then_some(L1MessageId(last))
    }

    /// Drops every recorded message. Ids keep increasing after a clear.
    pub fn clear(&self) {
        self.state.write().unwrap_or_else(PoisonError::into_inner).messages.clear();
    }
}
