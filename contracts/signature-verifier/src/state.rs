//! State definitions for the signature verifier contract

use cosmwasm_std::Addr;
use cw_storage_plus::Item;

pub const CONTRACT_NAME: &str = "crates.io:signature-verifier";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Owner allowed to rotate the authority
pub const OWNER: Item<Addr> = Item::new("owner");

/// Proposed owner awaiting acceptance
pub const PENDING_OWNER: Item<Addr> = Item::new("pending_owner");

/// 20-byte address of the signer authority
pub const AUTHORITY: Item<[u8; 20]> = Item::new("authority");
