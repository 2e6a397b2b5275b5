//! Execute handlers for the timelock.

use cosmwasm_std::{
    to_json_vec, Binary, CosmosMsg, DepsMut, Env, MessageInfo, Response, Timestamp,
};

use common::hash::{bytes32_to_hex, keccak256};

use crate::error::ContractError;
use crate::state::{Operation, MIN_DELAY, OPERATIONS, ROLES};

/// Operation id: `keccak256(json(msgs) ‖ salt)` as `0x` hex.
pub fn operation_id(msgs: &[CosmosMsg], salt: &[u8]) -> Result<String, ContractError> {
    let mut preimage = to_json_vec(msgs)?;
    preimage.extend_from_slice(salt);
    Ok(bytes32_to_hex(&keccak256(&preimage)))
}

fn ensure_proposer(deps: &DepsMut, info: &MessageInfo) -> Result<(), ContractError> {
    let roles = ROLES.load(deps.storage)?;
    if !roles.proposers.contains(&info.sender) {
        return Err(ContractError::NotProposer);
    }
    Ok(())
}

pub fn execute_schedule(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msgs: Vec<CosmosMsg>,
    salt: Binary,
    delay: u64,
) -> Result<Response, ContractError> {
    ensure_proposer(&deps, &info)?;
    if msgs.is_empty() {
        return Err(ContractError::EmptyOperation);
    }
    let min_delay = MIN_DELAY.load(deps.storage)?;
    if delay < min_delay {
        return Err(ContractError::DelayTooShort { delay, min_delay });
    }

    let id = operation_id(&msgs, &salt)?;
    if OPERATIONS.has(deps.storage, &id) {
        return Err(ContractError::OperationExists { id });
    }

    let ready_at = delay
        .checked_mul(1_000_000_000)
        .and_then(|nanos| env.block.time.nanos().checked_add(nanos))
        .map(Timestamp::from_nanos)
        .ok_or(ContractError::DelayTooLong { delay })?;
    OPERATIONS.save(
        deps.storage,
        &id,
        &Operation {
            msgs,
            proposer: info.sender.clone(),
            ready_at,
            executed: false,
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "schedule")
        .add_attribute("id", id)
        .add_attribute("proposer", info.sender)
        .add_attribute("ready_at", ready_at.seconds().to_string()))
}

pub fn execute_execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    id: String,
) -> Result<Response, ContractError> {
    let roles = ROLES.load(deps.storage)?;
    if !roles.executors.is_empty() && !roles.executors.contains(&info.sender) {
        return Err(ContractError::NotExecutor);
    }

    let mut operation = OPERATIONS
        .may_load(deps.storage, &id)?
        .ok_or_else(|| ContractError::OperationNotFound { id: id.clone() })?;
    if operation.executed {
        return Err(ContractError::OperationExecuted { id });
    }
    if env.block.time < operation.ready_at {
        return Err(ContractError::TimelockNotExpired {
            remaining_seconds: operation.ready_at.seconds() - env.block.time.seconds(),
        });
    }

    operation.executed = true;
    OPERATIONS.save(deps.storage, &id, &operation)?;

    Ok(Response::new()
        .add_messages(operation.msgs)
        .add_attribute("method", "execute")
        .add_attribute("id", id)
        .add_attribute("executor", info.sender))
}

pub fn execute_cancel(
    deps: DepsMut,
    info: MessageInfo,
    id: String,
) -> Result<Response, ContractError> {
    ensure_proposer(&deps, &info)?;

    let operation = OPERATIONS
        .may_load(deps.storage, &id)?
        .ok_or_else(|| ContractError::OperationNotFound { id: id.clone() })?;
    if operation.executed {
        return Err(ContractError::OperationExecuted { id });
    }
    OPERATIONS.remove(deps.storage, &id);

    Ok(Response::new()
        .add_attribute("method", "cancel")
        .add_attribute("id", id))
}

pub fn execute_update_min_delay(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    delay: u64,
) -> Result<Response, ContractError> {
    if info.sender != env.contract.address {
        return Err(ContractError::NotSelf);
    }

    let previous = MIN_DELAY.load(deps.storage)?;
    MIN_DELAY.save(deps.storage, &delay)?;

    Ok(Response::new()
        .add_attribute("method", "update_min_delay")
        .add_attribute("previous_delay", previous.to_string())
        .add_attribute("min_delay", delay.to_string()))
}
