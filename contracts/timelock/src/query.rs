//! Query handlers for the timelock.

use cosmwasm_std::{Deps, Env, Order, StdError, StdResult};
use cw_storage_plus::Bound;

use crate::msg::{MinDelayResponse, OperationResponse, OperationsResponse, RolesResponse};
use crate::state::{Operation, MIN_DELAY, OPERATIONS, ROLES};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

pub fn query_operation(deps: Deps, env: Env, id: String) -> StdResult<OperationResponse> {
    let operation = OPERATIONS
        .may_load(deps.storage, &id)?
        .ok_or_else(|| StdError::not_found(format!("operation {}", id)))?;
    Ok(operation_response(&env, id, operation))
}

/// List operations by id with cursor-based pagination.
pub fn query_operations(
    deps: Deps,
    env: Env,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<OperationsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let operations = OPERATIONS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (id, operation) = item?;
            Ok(operation_response(&env, id, operation))
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(OperationsResponse { operations })
}

pub fn query_min_delay(deps: Deps) -> StdResult<MinDelayResponse> {
    Ok(MinDelayResponse {
        min_delay: MIN_DELAY.load(deps.storage)?,
    })
}

pub fn query_roles(deps: Deps) -> StdResult<RolesResponse> {
    let roles = ROLES.load(deps.storage)?;
    Ok(RolesResponse {
        proposers: roles.proposers,
        executors: roles.executors,
    })
}

fn operation_response(env: &Env, id: String, operation: Operation) -> OperationResponse {
    OperationResponse {
        id,
        ready: !operation.executed && env.block.time >= operation.ready_at,
        msgs: operation.msgs,
        proposer: operation.proposer,
        ready_at: operation.ready_at,
        executed: operation.executed,
    }
}
