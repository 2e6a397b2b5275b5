//! Timelock - Entry Points

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError,
    StdResult,
};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute::{
    execute_cancel, execute_execute, execute_schedule, execute_update_min_delay,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{query_min_delay, query_operation, query_operations, query_roles};
use crate::state::{Roles, CONTRACT_NAME, CONTRACT_VERSION, MIN_DELAY, ROLES};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.proposers.is_empty() {
        return Err(ContractError::NoProposers);
    }
    let proposers = msg
        .proposers
        .iter()
        .map(|addr| deps.api.addr_validate(addr))
        .collect::<StdResult<Vec<_>>>()?;
    let executors = msg
        .executors
        .iter()
        .map(|addr| deps.api.addr_validate(addr))
        .collect::<StdResult<Vec<_>>>()?;

    MIN_DELAY.save(deps.storage, &msg.min_delay)?;
    ROLES.save(
        deps.storage,
        &Roles {
            proposers,
            executors,
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("min_delay", msg.min_delay.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Schedule { msgs, salt, delay } => {
            execute_schedule(deps, env, info, msgs, salt, delay)
        }
        ExecuteMsg::Execute { id } => execute_execute(deps, env, info, id),
        ExecuteMsg::Cancel { id } => execute_cancel(deps, info, id),
        ExecuteMsg::UpdateMinDelay { delay } => execute_update_min_delay(deps, env, info, delay),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Operation { id } => to_json_binary(&query_operation(deps, env, id)?),
        QueryMsg::Operations { start_after, limit } => {
            to_json_binary(&query_operations(deps, env, start_after, limit)?)
        }
        QueryMsg::MinDelay {} => to_json_binary(&query_min_delay(deps)?),
        QueryMsg::Roles {} => to_json_binary(&query_roles(deps)?),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(StdError::generic_err(format!("cannot migrate from {}", stored.contract)).into());
    }
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new().add_attribute("method", "migrate"))
}
