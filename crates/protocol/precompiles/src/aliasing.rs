//! L1 → L2 contract address aliasing.
//!
//! An L1 contract address is offset by [`ALIASING_CONSTANT`] modulo `2^160` so that messages sent
//! by L1 contracts can never impersonate an L2 externally-owned account at the same address.

use alloy_primitives::{Address, U160, address};

/// The offset added to an L1 contract address to produce its L2 alias.
pub const ALIASING_CONSTANT: Address = address!("0x1111000000000000000000000000000000001111");

/// Applies the L1 → L2 alias to `l1`.
///
/// The addition wraps modulo `2^160`, which makes the transform total and bijective.
pub fn apply_l1_to_l2_alias(l1: Address) -> Address {
    let aliased = to_u160(l1).wrapping_add(to_u160(ALIASING_CONSTANT));
    Address::from(aliased.to_be_bytes::<20>())
}

/// Reverses [`apply_l1_to_l2_alias`].
pub fn undo_l1_to_l2_alias(l2: Address) -> Address {
    let l1 = to_u160(l2).wrapping_sub(to_u160(ALIASING_CONSTANT));
    Address::from(l1.to_be_bytes::<20>())
}

fn to_u160(address: Address) -> U160 {
    U160::from_be_slice(address.as_slice())
}
