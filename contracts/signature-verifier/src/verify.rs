//! secp256k1 signer recovery.

use cosmwasm_std::Api;

use common::hash::{eth_address, verifier_message};

/// Half of the secp256k1 group order. Signatures with a larger `s` are the
/// malleable twin of a valid signature and are rejected.
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b, 0x20, 0xa0,
];

/// Recover the address that signed `keccak256(selector_hash ‖ payload_hash)`.
///
/// Returns `None` for any malformed encoding: wrong length, unknown `v`,
/// high-`s`, or a signature that does not recover to a point.
pub fn recover_signer(
    api: &dyn Api,
    selector_hash: &[u8; 32],
    payload_hash: &[u8; 32],
    signature: &[u8],
) -> Option<[u8; 20]> {
    if signature.len() != 65 {
        return None;
    }

    let recovery_param = match signature[64] {
        v @ (0 | 1) => v,
        v @ (27 | 28) => v - 27,
        _ => return None,
    };

    let rs = &signature[..64];
    if rs[32..64] > SECP256K1_HALF_ORDER[..] {
        return None;
    }

    let digest = verifier_message(selector_hash, payload_hash);
    let pubkey = api
        .secp256k1_recover_pubkey(&digest, rs, recovery_param)
        .ok()?;
    eth_address(&pubkey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockApi;

    #[test]
    fn test_rejects_wrong_length() {
        let api = MockApi::default();
        assert!(recover_signer(&api, &[1u8; 32], &[2u8; 32], &[0u8; 64]).is_none());
        assert!(recover_signer(&api, &[1u8; 32], &[2u8; 32], &[0u8; 66]).is_none());
    }

    #[test]
    fn test_rejects_unknown_recovery_byte() {
        let api = MockApi::default();
        let mut sig = [1u8; 65];
        sig[64] = 29;
        assert!(recover_signer(&api, &[1u8; 32], &[2u8; 32], &sig).is_none());
    }

    #[test]
    fn test_rejects_high_s() {
        let api = MockApi::default();
        let mut sig = [1u8; 65];
        sig[32..64].copy_from_slice(&[0xff; 32]);
        sig[64] = 27;
        assert!(recover_signer(&api, &[1u8; 32], &[2u8; 32], &sig).is_none());
    }
}
