//! Admin operations handlers.
//!
//! This module handles:
//! - Defaults applied to newly deployed gateways
//! - Signature verifier and gateway owner references
//! - Owner transfer (propose/accept/cancel)

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use gateway::fee::MAX_FEE_BPS;

use crate::error::ContractError;
use crate::execute::ensure_owner;
use crate::state::{CONFIG, PENDING_OWNER};

// ============================================================================
// Defaults
// ============================================================================

pub(crate) fn validate_fee_bps(fee_bps: u64) -> Result<(), ContractError> {
    if fee_bps > MAX_FEE_BPS {
        return Err(ContractError::FeeTooHigh {
            fee_bps,
            max_bps: MAX_FEE_BPS,
        });
    }
    Ok(())
}

/// Fees and fee recipient for gateways deployed from now on. Live gateways
/// keep their own fee configuration.
pub fn execute_update_defaults(
    deps: DepsMut,
    info: MessageInfo,
    mint_fee_bps: u64,
    burn_fee_bps: u64,
    fee_recipient: Option<String>,
) -> Result<Response, ContractError> {
    let mut config = ensure_owner(deps.as_ref(), &info)?;
    validate_fee_bps(mint_fee_bps)?;
    validate_fee_bps(burn_fee_bps)?;

    config.mint_fee_bps = mint_fee_bps;
    config.burn_fee_bps = burn_fee_bps;
    config.fee_recipient = fee_recipient
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "update_defaults")
        .add_attribute("mint_fee_bps", mint_fee_bps.to_string())
        .add_attribute("burn_fee_bps", burn_fee_bps.to_string())
        .add_attribute(
            "fee_recipient",
            config
                .fee_recipient
                .map_or_else(|| "none".to_string(), |a| a.to_string()),
        ))
}

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

pub fn execute_update_gateway_owner(
    deps: DepsMut,
    info: MessageInfo,
    gateway_owner: String,
) -> Result<Response, ContractError> {
    let mut config = ensure_owner(deps.as_ref(), &info)?;

    config.gateway_owner = deps.api.addr_validate(&gateway_owner)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "update_gateway_owner")
        .add_attribute("gateway_owner", config.gateway_owner))
}

// ============================================================================
// Owner Transfer
// ============================================================================

pub fn execute_propose_owner(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.as_ref(), &info)?;

    let new_owner = deps.api.addr_validate(&new_owner)?;
    PENDING_OWNER.save(deps.storage, &new_owner)?;

    Ok(Response::new()
        .add_attribute("method", "propose_owner")
        .add_attribute("new_owner", new_owner))
}

pub fn execute_accept_owner(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let pending = PENDING_OWNER
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingOwner)?;

    if info.sender != pending {
        return Err(ContractError::UnauthorizedPendingOwner);
    }

    let mut config = CONFIG.load(deps.storage)?;
    config.owner = pending.clone();
    CONFIG.save(deps.storage, &config)?;
    PENDING_OWNER.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("method", "accept_owner")
        .add_attribute("new_owner", pending))
}

pub fn execute_cancel_owner_proposal(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    ensure_owner(deps.as_ref(), &info)?;
    PENDING_OWNER.remove(deps.storage);

    Ok(Response::new().add_attribute("method", "cancel_owner_proposal"))
}
