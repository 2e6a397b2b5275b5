//! Message types for the timelock contract

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, CosmosMsg, Timestamp};

#[cw_serde]
pub struct InstantiateMsg {
    pub min_delay: u64,
    pub proposers: Vec<String>,
    /// Empty lets anyone execute a ready operation
    pub executors: Vec<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Queue `msgs` for execution after `delay` seconds (proposer)
    Schedule {
        msgs: Vec<CosmosMsg>,
        salt: Binary,
        delay: u64,
    },
    /// Dispatch a ready operation (executor)
    Execute { id: String },
    /// Drop a pending operation (proposer)
    Cancel { id: String },
    /// Only reachable through a scheduled operation of this timelock
    UpdateMinDelay { delay: u64 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(OperationResponse)]
    Operation { id: String },

    #[returns(OperationsResponse)]
    Operations {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(MinDelayResponse)]
    MinDelay {},

    #[returns(RolesResponse)]
    Roles {},
}

#[cw_serde]
pub struct OperationResponse {
    pub id: String,
    pub msgs: Vec<CosmosMsg>,
    pub proposer: Addr,
    pub ready_at: Timestamp,
    /// Pending and past its delay
    pub ready: bool,
    pub executed: bool,
}

#[cw_serde]
pub struct OperationsResponse {
    pub operations: Vec<OperationResponse>,
}

#[cw_serde]
pub struct MinDelayResponse {
    pub min_delay: u64,
}

#[cw_serde]
pub struct RolesResponse {
    pub proposers: Vec<Addr>,
    pub executors: Vec<Addr>,
}

#[cw_serde]
pub struct MigrateMsg {}
