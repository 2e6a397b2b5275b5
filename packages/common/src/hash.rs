//! Hash computation for gateway authorization and outbound commitments.
//!
//! Every hash is keccak256 over a fixed concatenation. Integers are encoded as
//! 32-byte big-endian words, left-padded, so the layout matches an
//! `abi.encodePacked` of `bytes32`/`uint256` values on the signer side.
//!
//! # Selector hash
//! `keccak256(symbol ‖ direction_tag ‖ chain_name)` with direction tag `/to`
//! (mint) or `/from` (release). Scopes a signature to exactly one channel.
//!
//! # Signature hash (160 bytes hashed)
//! - Bytes 0-31:    pHash
//! - Bytes 32-63:   amount (uint256, big-endian, left-padded)
//! - Bytes 64-95:   selectorHash
//! - Bytes 96-127:  keccak256(recipient)
//! - Bytes 128-159: nHash
//!
//! # Verifier message (64 bytes hashed)
//! `keccak256(selectorHash ‖ sigHash)`, the digest the signer signs.
//!
//! # Outbound commitment (160 bytes hashed)
//! `keccak256(selectorHash ‖ nonce ‖ amount ‖ keccak256(to) ‖ keccak256(payload))`

use tiny_keccak::{Hasher, Keccak};

use crate::kind::GatewayKind;

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Compute the selector hash binding an asset symbol, direction and chain.
pub fn selector_hash(asset_symbol: &str, kind: GatewayKind, chain_name: &str) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(asset_symbol.as_bytes());
    hasher.update(kind.direction_tag().as_bytes());
    hasher.update(chain_name.as_bytes());
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Compute the signature hash an inbound transfer is authorized under.
///
/// The recipient is hashed so addresses of any length fit one word.
pub fn hash_for_signature(
    p_hash: &[u8; 32],
    amount: u128,
    selector_hash: &[u8; 32],
    recipient: &str,
    n_hash: &[u8; 32],
) -> [u8; 32] {
    let mut data = [0u8; 160];
    data[0..32].copy_from_slice(p_hash);
    data[32..64].copy_from_slice(&u128_word(amount));
    data[64..96].copy_from_slice(selector_hash);
    data[96..128].copy_from_slice(&keccak256(recipient.as_bytes()));
    data[128..160].copy_from_slice(n_hash);
    keccak256(&data)
}

/// Compute the digest the signer signs for a given payload hash.
pub fn verifier_message(selector_hash: &[u8; 32], payload_hash: &[u8; 32]) -> [u8; 32] {
    let mut data = [0u8; 64];
    data[0..32].copy_from_slice(selector_hash);
    data[32..64].copy_from_slice(payload_hash);
    keccak256(&data)
}

/// Compute the commitment an outbound (burn/lock) leg emits for the signer.
///
/// Layout: `selector ‖ nonce ‖ amount ‖ keccak256(to) ‖ keccak256(to_chain) ‖
/// keccak256(payload)`. Burns carry no destination chain and pass `""`.
pub fn outbound_commitment(
    selector_hash: &[u8; 32],
    nonce: u64,
    amount: u128,
    to: &str,
    to_chain: &str,
    payload: &[u8],
) -> [u8; 32] {
    let mut data = [0u8; 192];
    data[0..32].copy_from_slice(selector_hash);
    // u64 (8 bytes) goes into bytes 24-31 of its word
    data[32 + 24..64].copy_from_slice(&nonce.to_be_bytes());
    data[64..96].copy_from_slice(&u128_word(amount));
    data[96..128].copy_from_slice(&keccak256(to.as_bytes()));
    data[128..160].copy_from_slice(&keccak256(to_chain.as_bytes()));
    data[160..192].copy_from_slice(&keccak256(payload));
    keccak256(&data)
}

/// Derive the 20-byte Ethereum-style address of an uncompressed secp256k1 key.
///
/// Expects the 65-byte SEC1 form (`0x04 ‖ x ‖ y`).
pub fn eth_address(uncompressed_pubkey: &[u8]) -> Option<[u8; 20]> {
    if uncompressed_pubkey.len() != 65 || uncompressed_pubkey[0] != 0x04 {
        return None;
    }
    let digest = keccak256(&uncompressed_pubkey[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&digest[12..]);
    Some(address)
}

/// Interpret a byte slice as a 32-byte hash.
pub fn to_bytes32(bytes: &[u8]) -> Option<[u8; 32]> {
    bytes.try_into().ok()
}

/// Convert 32-byte hash to hex string (for attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse hex string (with or without 0x prefix) to 32-byte array
pub fn hex_to_bytes32(hex_str: &str) -> Result<[u8; 32], &'static str> {
    let stripped = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    if stripped.len() != 64 {
        return Err("Invalid hex length: expected 64 characters");
    }
    let mut result = [0u8; 32];
    hex::decode_to_slice(stripped, &mut result).map_err(|_| "Invalid hex character")?;
    Ok(result)
}

/// Parse a 20-byte address from hex (with or without 0x prefix)
pub fn hex_to_address(hex_str: &str) -> Result<[u8; 20], &'static str> {
    let stripped = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    if stripped.len() != 40 {
        return Err("Invalid hex length: expected 40 characters");
    }
    let mut result = [0u8; 20];
    hex::decode_to_slice(stripped, &mut result).map_err(|_| "Invalid hex character")?;
    Ok(result)
}

// ============================================================================
// Internal helpers
// ============================================================================

/// u128 (16 bytes) goes into bytes 16-31 of a uint256 word, bytes 0-15 remain zero
fn u128_word(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..32].copy_from_slice(&value.to_be_bytes());
    word
}
