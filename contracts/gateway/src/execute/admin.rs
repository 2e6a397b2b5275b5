//! Admin operations handlers.
//!
//! This module handles:
//! - Pause/unpause gateway
//! - Owner transfer (propose/accept/cancel)
//!
//! Ownership changes take effect on acceptance; any delay is imposed by the
//! governance timelock that owns the gateway.

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use crate::error::ContractError;
use crate::execute::ensure_owner;
use crate::state::{CONFIG, PENDING_OWNER};

// ============================================================================
// Pause/Unpause
// ============================================================================

/// Pause the gateway (stops all transfers).
pub fn execute_pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = ensure_owner(deps.as_ref(), &info)?;

    config.paused = true;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("method", "pause"))
}

/// Unpause the gateway (resumes transfers).
pub fn execute_unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = ensure_owner(deps.as_ref(), &info)?;

    config.paused = false;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("method", "unpause"))
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
