//! Replay-protection ledger.
//!
//! Each generation keeps its own spent sets. A hash settled anywhere in the
//! lineage counts as spent. Settlement only looks back through predecessors,
//! since relaying starts as soon as a successor is linked. Queries look both
//! ways, so a retired gateway still answers for hashes its successors settled.

use cosmwasm_std::{Addr, Binary, Deps, StdResult, Storage};

use common::hash::bytes32_to_hex;

use crate::error::ContractError;
use crate::msg::{IsSpentResponse, LineageDirection, QueryMsg};
use crate::state::{LINKS, SPENT_N_HASHES, SPENT_SIG_HASHES};

/// Spent status of both hashes in this gateway and its predecessors.
pub fn spent_status(deps: Deps, n_hash: &[u8; 32], sig_hash: &[u8; 32]) -> StdResult<IsSpentResponse> {
    lineage_status(deps, Some(n_hash), sig_hash, LineageDirection::Previous)
}

/// Spent status in this gateway and every generation in `direction`.
///
/// Without an `n_hash` only the signature hash is looked up.
pub fn lineage_status(
    deps: Deps,
    n_hash: Option<&[u8; 32]>,
    sig_hash: &[u8; 32],
    direction: LineageDirection,
) -> StdResult<IsSpentResponse> {
    let status = IsSpentResponse {
        n_hash_spent: n_hash.is_some_and(|n_hash| SPENT_N_HASHES.has(deps.storage, n_hash)),
        sig_hash_spent: SPENT_SIG_HASHES.has(deps.storage, sig_hash),
    };
    if settled(&status, n_hash) {
        return Ok(status);
    }

    let links = LINKS.load(deps.storage)?;
    let neighbour = match direction {
        LineageDirection::Previous => links.previous_gateway,
        LineageDirection::Next => links.next_gateway,
    };
    match neighbour {
        Some(neighbour) => merge_from(deps, &neighbour, status, n_hash, sig_hash, direction),
        None => Ok(status),
    }
}

/// Spent status anywhere in the lineage.
pub fn lineage_wide_status(
    deps: Deps,
    n_hash: Option<&[u8; 32]>,
    sig_hash: &[u8; 32],
) -> StdResult<IsSpentResponse> {
    let status = lineage_status(deps, n_hash, sig_hash, LineageDirection::Previous)?;
    if settled(&status, n_hash) {
        return Ok(status);
    }
    match LINKS.load(deps.storage)?.next_gateway {
        Some(next) => merge_from(deps, &next, status, n_hash, sig_hash, LineageDirection::Next),
        None => Ok(status),
    }
}

fn settled(status: &IsSpentResponse, n_hash: Option<&[u8; 32]>) -> bool {
    (n_hash.is_none() || status.n_hash_spent) && status.sig_hash_spent
}

fn merge_from(
    deps: Deps,
    gateway: &Addr,
    mut status: IsSpentResponse,
    n_hash: Option<&[u8; 32]>,
    sig_hash: &[u8; 32],
    direction: LineageDirection,
) -> StdResult<IsSpentResponse> {
    let other: IsSpentResponse = deps.querier.query_wasm_smart(
        gateway,
        &QueryMsg::LineageSpent {
            n_hash: n_hash.map(|n_hash| Binary::from(n_hash.to_vec())),
            sig_hash: Binary::from(sig_hash.to_vec()),
            direction,
        },
    )?;
    status.n_hash_spent |= other.n_hash_spent;
    status.sig_hash_spent |= other.sig_hash_spent;
    Ok(status)
}

/// Reject a transfer whose nonce hash or signature hash was already settled.
///
/// The nonce hash is checked first so a replay is reported as such even when
/// the signature would no longer verify.
pub fn ensure_unspent(
    deps: Deps,
    n_hash: &[u8; 32],
    sig_hash: &[u8; 32],
) -> Result<(), ContractError> {
    let status = spent_status(deps, n_hash, sig_hash)?;
    if status.n_hash_spent {
        return Err(ContractError::NonceAlreadySpent {
            n_hash: bytes32_to_hex(n_hash),
        });
    }
    if status.sig_hash_spent {
        return Err(ContractError::SignatureAlreadySpent {
            sig_hash: bytes32_to_hex(sig_hash),
        });
    }
    Ok(())
}

pub fn mark_spent(storage: &mut dyn Storage, n_hash: &[u8; 32], sig_hash: &[u8; 32]) -> StdResult<()> {
    SPENT_N_HASHES.save(storage, n_hash, &true)?;
    SPENT_SIG_HASHES.save(storage, sig_hash, &true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MigrationLinks;
    use cosmwasm_std::testing::mock_dependencies;

    #[test]
    fn test_mark_then_reject() {
        let mut deps = mock_dependencies();
        LINKS
            .save(deps.as_mut().storage, &MigrationLinks::default())
            .unwrap();

        let n_hash = [1u8; 32];
        let sig_hash = [2u8; 32];
        ensure_unspent(deps.as_ref(), &n_hash, &sig_hash).unwrap();

        mark_spent(deps.as_mut().storage, &n_hash, &sig_hash).unwrap();

        let err = ensure_unspent(deps.as_ref(), &n_hash, &[3u8; 32]).unwrap_err();
        assert!(matches!(err, ContractError::NonceAlreadySpent { .. }));

        let err = ensure_unspent(deps.as_ref(), &[4u8; 32], &sig_hash).unwrap_err();
        assert!(matches!(err, ContractError::SignatureAlreadySpent { .. }));

        let status = lineage_wide_status(deps.as_ref(), None, &sig_hash).unwrap();
        assert!(status.sig_hash_spent);
        assert!(!status.n_hash_spent);
        let status = lineage_wide_status(deps.as_ref(), Some(&n_hash), &[4u8; 32]).unwrap();
        assert!(status.n_hash_spent);
        assert!(!status.sig_hash_spent);
    }
}
