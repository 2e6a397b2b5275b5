//! Query handlers for the gateway contract.

use cosmwasm_std::{Binary, Deps, StdError, StdResult, Uint128};

use common::hash::{hash_for_signature, selector_hash, to_bytes32};

use crate::fee::FEE_CONFIG;
use crate::ledger::{lineage_status, lineage_wide_status};
use crate::msg::{
    ConfigResponse, CustodyResponse, FeeConfigResponse, HashForSignatureResponse, HealthResponse,
    IsSpentResponse, LineageDirection, MigrationLinksResponse, NonceResponse, OwnerResponse, SelectorHashResponse,
    StatsResponse, StatusResponse, TokenAuthorityResponse,
};
use crate::state::{
    Config, TokenAuthority, CONFIG, CUSTODY, LINKS, OUTGOING_NONCE, PENDING_OWNER, STATS,
    TOKEN_AUTHORITY,
};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        kind: config.kind,
        asset_symbol: config.asset_symbol,
        chain_name: config.chain_name,
        token: config.token,
        signature_verifier: config.signature_verifier,
        generation: config.generation,
        paused: config.paused,
    })
}

pub fn query_fee_config(deps: Deps) -> StdResult<FeeConfigResponse> {
    let fees = FEE_CONFIG.load(deps.storage)?;
    Ok(FeeConfigResponse {
        mint_fee_bps: fees.mint_fee_bps,
        burn_fee_bps: fees.burn_fee_bps,
        fee_recipient: fees.fee_recipient,
    })
}

pub fn query_selector_hash(deps: Deps) -> StdResult<SelectorHashResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(SelectorHashResponse {
        selector_hash: Binary::from(config.selector_hash.to_vec()),
        consistent: selector_consistent(&config),
    })
}

pub fn query_migration_links(deps: Deps) -> StdResult<MigrationLinksResponse> {
    let links = LINKS.load(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;
    Ok(MigrationLinksResponse {
        previous_gateway: links.previous_gateway,
        next_gateway: links.next_gateway,
        generation: config.generation,
    })
}

pub fn query_token_authority(deps: Deps) -> StdResult<TokenAuthorityResponse> {
    Ok(TokenAuthorityResponse {
        state: TOKEN_AUTHORITY.load(deps.storage)?,
    })
}

pub fn query_is_spent(deps: Deps, n_hash: Binary, sig_hash: Binary) -> StdResult<IsSpentResponse> {
    let n_hash = parse_hash("n_hash", &n_hash)?;
    let sig_hash = parse_hash("sig_hash", &sig_hash)?;
    lineage_wide_status(deps, Some(&n_hash), &sig_hash)
}

pub fn query_status(deps: Deps, sig_hash: Binary) -> StdResult<StatusResponse> {
    let sig_hash = parse_hash("sig_hash", &sig_hash)?;
    Ok(StatusResponse {
        spent: lineage_wide_status(deps, None, &sig_hash)?.sig_hash_spent,
    })
}

pub fn query_lineage_spent(
    deps: Deps,
    n_hash: Option<Binary>,
    sig_hash: Binary,
    direction: LineageDirection,
) -> StdResult<IsSpentResponse> {
    let n_hash = n_hash
        .map(|n_hash| parse_hash("n_hash", &n_hash))
        .transpose()?;
    let sig_hash = parse_hash("sig_hash", &sig_hash)?;
    lineage_status(deps, n_hash.as_ref(), &sig_hash, direction)
}

pub fn query_hash_for_signature(
    deps: Deps,
    p_hash: Binary,
    amount: Uint128,
    recipient: String,
    n_hash: Binary,
) -> StdResult<HashForSignatureResponse> {
    let config = CONFIG.load(deps.storage)?;
    let p_hash = parse_hash("p_hash", &p_hash)?;
    let n_hash = parse_hash("n_hash", &n_hash)?;
    let recipient = deps.api.addr_validate(&recipient)?;

    let sig_hash = hash_for_signature(
        &p_hash,
        amount.u128(),
        &config.selector_hash,
        recipient.as_str(),
        &n_hash,
    );
    Ok(HashForSignatureResponse {
        sig_hash: Binary::from(sig_hash.to_vec()),
    })
}

pub fn query_current_nonce(deps: Deps) -> StdResult<NonceResponse> {
    Ok(NonceResponse {
        nonce: OUTGOING_NONCE.load(deps.storage)?,
    })
}

pub fn query_custody(deps: Deps) -> StdResult<CustodyResponse> {
    Ok(CustodyResponse {
        asset: CONFIG.load(deps.storage)?.token,
        amount: CUSTODY.load(deps.storage)?,
    })
}

pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.load(deps.storage)?;
    Ok(StatsResponse {
        inbound_count: stats.inbound_count,
        outbound_count: stats.outbound_count,
        total_inbound: stats.total_inbound,
        total_outbound: stats.total_outbound,
        total_fees: stats.total_fees,
    })
}

pub fn query_health(deps: Deps) -> StdResult<HealthResponse> {
    let config = CONFIG.load(deps.storage)?;
    let token_authority = TOKEN_AUTHORITY.load(deps.storage)?;
    let forwarding = LINKS.load(deps.storage)?.next_gateway.is_some();
    let selector_consistent = selector_consistent(&config);

    Ok(HealthResponse {
        selector_consistent,
        token_authority,
        forwarding,
        paused: config.paused,
        usable: selector_consistent
            && token_authority == TokenAuthority::Held
            && !forwarding
            && !config.paused,
    })
}

pub fn query_owner(deps: Deps) -> StdResult<OwnerResponse> {
    Ok(OwnerResponse {
        owner: CONFIG.load(deps.storage)?.owner,
        pending_owner: PENDING_OWNER.may_load(deps.storage)?,
    })
}

fn selector_consistent(config: &Config) -> bool {
    selector_hash(&config.asset_symbol, config.kind, &config.chain_name) == config.selector_hash
}

fn parse_hash(field: &str, value: &Binary) -> StdResult<[u8; 32]> {
    to_bytes32(value).ok_or_else(|| {
        StdError::generic_err(format!("{} must be 32 bytes, got {}", field, value.len()))
    })
}
