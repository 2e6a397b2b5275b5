//! Configuration handlers (owner only).
//!
//! This module handles:
//! - Mint/burn fees and the fee recipient
//! - Selector hash and asset binding
//! - Signature verifier reference and its authority

use cosmwasm_std::{to_json_binary, Binary, DepsMut, MessageInfo, Response, WasmMsg};

use common::hash::{bytes32_to_hex, selector_hash, to_bytes32};
use signature_verifier::msg::ExecuteMsg as VerifierExecuteMsg;

use crate::error::ContractError;
use crate::execute::ensure_owner;
use crate::fee::{validate_fee_bps, FEE_CONFIG};
use crate::state::{CONFIG, LINKS};

// ============================================================================
// Fees
// ============================================================================

pub fn execute_update_mint_fee(
    deps: DepsMut,
    info: MessageInfo,
    fee_bps: u64,
) -> Result<Response, ContractError> {
    ensure_owner(deps.as_ref(), &info)?;
    validate_fee_bps(fee_bps)?;

    let mut fees = FEE_CONFIG.load(deps.storage)?;
    fees.mint_fee_bps = fee_bps;
    FEE_CONFIG.save(deps.storage, &fees)?;

    Ok(Response::new()
        .add_attribute("method", "update_mint_fee")
        .add_attribute("fee_bps", fee_bps.to_string()))
}

pub fn execute_update_burn_fee(
    deps: DepsMut,
    info: MessageInfo,
    fee_bps: u64,
) -> Result<Response, ContractError> {
    ensure_owner(deps.as_ref(), &info)?;
    validate_fee_bps(fee_bps)?;

    let mut fees = FEE_CONFIG.load(deps.storage)?;
    fees.burn_fee_bps = fee_bps;
    FEE_CONFIG.save(deps.storage, &fees)?;

    Ok(Response::new()
        .add_attribute("method", "update_burn_fee")
        .add_attribute("fee_bps", fee_bps.to_string()))
}

pub fn execute_update_fee_recipient(
    deps: DepsMut,
    info: MessageInfo,
    fee_recipient: Option<String>,
) -> Result<Response, ContractError> {
    ensure_owner(deps.as_ref(), &info)?;

    let fee_recipient = fee_recipient
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let mut fees = FEE_CONFIG.load(deps.storage)?;
    fees.fee_recipient = fee_recipient.clone();
    FEE_CONFIG.save(deps.storage, &fees)?;

    Ok(Response::new()
        .add_attribute("method", "update_fee_recipient")
        .add_attribute(
            "fee_recipient",
            fee_recipient.map_or_else(|| "none".to_string(), |a| a.to_string()),
        ))
}

// ============================================================================
// Selector & Asset
// ============================================================================

/// Accept a selector hash only when it matches the stored asset binding.
pub fn execute_update_selector_hash(
    deps: DepsMut,
    info: MessageInfo,
    new_selector_hash: Binary,
) -> Result<Response, ContractError> {
    let mut config = ensure_owner(deps.as_ref(), &info)?;

    let expected = selector_hash(&config.asset_symbol, config.kind, &config.chain_name);
    let got = to_bytes32(&new_selector_hash).ok_or_else(|| ContractError::InvalidHash {
        reason: format!("selector hash must be 32 bytes, got {}", new_selector_hash.len()),
    })?;
    if got != expected {
        return Err(ContractError::SelectorHashMismatch {
            expected: bytes32_to_hex(&expected),
            got: bytes32_to_hex(&got),
        });
    }

    config.selector_hash = got;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "update_selector_hash")
        .add_attribute("selector_hash", bytes32_to_hex(&got)))
}

/// Rebind the gateway to a new symbol/chain pair; the selector follows.
pub fn execute_update_asset(
    deps: DepsMut,
    info: MessageInfo,
    asset_symbol: String,
    chain_name: String,
) -> Result<Response, ContractError> {
    let mut config = ensure_owner(deps.as_ref(), &info)?;
    if asset_symbol.is_empty() || chain_name.is_empty() {
        return Err(ContractError::InvalidAsset {
            reason: "symbol and chain name must be non-empty".to_string(),
        });
    }
    // Linked generations must agree on the asset they serve.
    let links = LINKS.load(deps.storage)?;
    if links.previous_gateway.is_some() || links.next_gateway.is_some() {
        return Err(ContractError::InvalidLink {
            reason: "asset binding cannot change while migration links exist".to_string(),
        });
    }

    config.selector_hash = selector_hash(&asset_symbol, config.kind, &chain_name);
    config.asset_symbol = asset_symbol;
    config.chain_name = chain_name;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "update_asset")
        .add_attribute("asset_symbol", config.asset_symbol)
        .add_attribute("chain_name", config.chain_name)
        .add_attribute("selector_hash", bytes32_to_hex(&config.selector_hash)))
}

// ============================================================================
// Signature Verifier
// ============================================================================

pub fn execute_update_signature_verifier(
    deps: DepsMut,
    info: MessageInfo,
    signature_verifier: String,
) -> Result<Response, ContractError> {
    let mut config = ensure_owner(deps.as_ref(), &info)?;

    config.signature_verifier = deps.api.addr_validate(&signature_verifier)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "update_signature_verifier")
        .add_attribute("signature_verifier", config.signature_verifier))
}

/// Relay an authority rotation to the referenced verifier. The verifier only
/// accepts it from its owner, so the whole call reverts unless this gateway
/// owns the verifier.
pub fn execute_update_mint_authority(
    deps: DepsMut,
    info: MessageInfo,
    authority: String,
) -> Result<Response, ContractError> {
    let config = ensure_owner(deps.as_ref(), &info)?;

    let msg = WasmMsg::Execute {
        contract_addr: config.signature_verifier.to_string(),
        msg: to_json_binary(&VerifierExecuteMsg::UpdateAuthority {
            authority: authority.clone(),
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(msg)
        .add_attribute("method", "update_mint_authority")
        .add_attribute("signature_verifier", config.signature_verifier)
        .add_attribute("authority", authority))
}
