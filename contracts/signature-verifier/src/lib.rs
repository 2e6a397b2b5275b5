//! Signature Verifier Contract
//!
//! Owns the single mutable signer-authority value and validates that a
//! transfer authorization was produced by it.
//!
//! # Verification
//! 1. Digest = `keccak256(selector_hash ‖ payload_hash)`
//! 2. Recover the secp256k1 public key from the 65-byte `r ‖ s ‖ v` signature
//! 3. Derive the Ethereum-style address and compare it to the stored authority
//!
//! Verification is a pure read. Rotating the authority with `UpdateAuthority`
//! takes effect immediately for every gateway that references this contract.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;
pub mod verify;

pub use crate::error::ContractError;
pub use crate::verify::recover_signer;
