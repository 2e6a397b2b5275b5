//! State definitions for the timelock contract

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, CosmosMsg, Timestamp};
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:timelock";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cw_serde]
pub struct Roles {
    /// May schedule and cancel operations
    pub proposers: Vec<Addr>,
    /// May execute ready operations; empty means anyone
    pub executors: Vec<Addr>,
}

#[cw_serde]
pub struct Operation {
    pub msgs: Vec<CosmosMsg>,
    pub proposer: Addr,
    /// Block time from which the operation can be executed
    pub ready_at: Timestamp,
    pub executed: bool,
}

/// Minimum delay in seconds for newly scheduled operations
pub const MIN_DELAY: Item<u64> = Item::new("min_delay");

pub const ROLES: Item<Roles> = Item::new("roles");

/// Scheduled operations by `0x`-prefixed hex id
pub const OPERATIONS: Map<&str, Operation> = Map::new("operations");
