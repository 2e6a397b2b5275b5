//! Signature Verifier Contract - Entry Points

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError,
    StdResult,
};
use cw2::{get_contract_version, set_contract_version};

use common::hash::{hex_to_address, to_bytes32};

use crate::error::ContractError;
use crate::msg::{
    AuthorityResponse, ExecuteMsg, InstantiateMsg, MigrateMsg, OwnerResponse, QueryMsg,
    VerifyResponse,
};
use crate::state::{AUTHORITY, CONTRACT_NAME, CONTRACT_VERSION, OWNER, PENDING_OWNER};
use crate::verify::recover_signer;

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = deps.api.addr_validate(&msg.owner)?;
    let authority = parse_authority(&msg.authority)?;

    OWNER.save(deps.storage, &owner)?;
    AUTHORITY.save(deps.storage, &authority)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", owner)
        .add_attribute("authority", format!("0x{}", hex::encode(authority))))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::UpdateAuthority { authority } => {
            execute_update_authority(deps, info, authority)
        }
        ExecuteMsg::ProposeOwner { new_owner } => execute_propose_owner(deps, info, new_owner),
        ExecuteMsg::AcceptOwner {} => execute_accept_owner(deps, info),
        ExecuteMsg::CancelOwnerProposal {} => execute_cancel_owner_proposal(deps, info),
    }
}

fn execute_update_authority(
    deps: DepsMut,
    info: MessageInfo,
    authority: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.as_ref(), &info)?;

    let new_authority = parse_authority(&authority)?;
    let old_authority = AUTHORITY.load(deps.storage)?;
    AUTHORITY.save(deps.storage, &new_authority)?;

    Ok(Response::new()
        .add_attribute("method", "update_authority")
        .add_attribute("old_authority", format!("0x{}", hex::encode(old_authority)))
        .add_attribute("new_authority", format!("0x{}", hex::encode(new_authority))))
}

fn execute_propose_owner(
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

fn execute_accept_owner(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let pending = PENDING_OWNER
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingOwner)?;

    if info.sender != pending {
        return Err(ContractError::UnauthorizedPendingOwner);
    }

    OWNER.save(deps.storage, &pending)?;
    PENDING_OWNER.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("method", "accept_owner")
        .add_attribute("new_owner", pending))
}

fn execute_cancel_owner_proposal(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    ensure_owner(deps.as_ref(), &info)?;
    PENDING_OWNER.remove(deps.storage);

    Ok(Response::new().add_attribute("method", "cancel_owner_proposal"))
}

fn ensure_owner(deps: Deps, info: &MessageInfo) -> Result<(), ContractError> {
    if info.sender != OWNER.load(deps.storage)? {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

fn parse_authority(authority: &str) -> Result<[u8; 20], ContractError> {
    let parsed = hex_to_address(authority).map_err(|reason| ContractError::InvalidAuthority {
        reason: reason.to_string(),
    })?;
    if parsed == [0u8; 20] {
        return Err(ContractError::InvalidAuthority {
            reason: "zero address".to_string(),
        });
    }
    Ok(parsed)
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Verify {
            selector_hash,
            payload_hash,
            signature,
        } => to_json_binary(&query_verify(
            deps,
            selector_hash,
            payload_hash,
            signature,
        )?),
        QueryMsg::Authority {} => to_json_binary(&AuthorityResponse {
            authority: format!("0x{}", hex::encode(AUTHORITY.load(deps.storage)?)),
        }),
        QueryMsg::Owner {} => to_json_binary(&OwnerResponse {
            owner: OWNER.load(deps.storage)?,
            pending_owner: PENDING_OWNER.may_load(deps.storage)?,
        }),
    }
}

fn query_verify(
    deps: Deps,
    selector_hash: Binary,
    payload_hash: Binary,
    signature: Binary,
) -> StdResult<VerifyResponse> {
    let (Some(selector_hash), Some(payload_hash)) =
        (to_bytes32(&selector_hash), to_bytes32(&payload_hash))
    else {
        return Ok(VerifyResponse { valid: false });
    };

    let authority = AUTHORITY.load(deps.storage)?;
    let valid = recover_signer(deps.api, &selector_hash, &payload_hash, &signature)
        .map(|signer| signer == authority)
        .unwrap_or(false);

    Ok(VerifyResponse { valid })
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::Std(StdError::generic_err(format!(
            "cannot migrate from {}",
            stored.contract
        ))));
    }
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
