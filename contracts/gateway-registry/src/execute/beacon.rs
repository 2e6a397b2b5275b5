//! Beacon upgrades.
//!
//! A beacon is the `code_id` every contract of one family was instantiated
//! from. The registry is the wasm admin of those contracts, so an upgrade
//! migrates all of them, retired generations included, in one transaction.

use cosmwasm_std::{
    to_json_binary, Addr, CosmosMsg, DepsMut, Empty, MessageInfo, Order, Response, StdResult,
    WasmMsg,
};

use crate::error::ContractError;
use crate::state::{BeaconKind, BEACONS, BEACON_INSTANCES};

pub fn execute_upgrade_to(
    deps: DepsMut,
    info: MessageInfo,
    beacon: BeaconKind,
    code_id: u64,
    version: u32,
) -> Result<Response, ContractError> {
    let mut record = BEACONS.load(deps.storage, beacon.as_str())?;
    if info.sender != record.upgrader {
        return Err(ContractError::NotBeaconUpgrader {
            beacon: beacon.as_str().to_string(),
        });
    }
    if code_id == 0 {
        return Err(ContractError::InvalidCodeId { code_id });
    }
    if version <= record.version {
        return Err(ContractError::InvalidVersion {
            reason: format!("beacon version {} must exceed {}", version, record.version),
        });
    }

    record.code_id = code_id;
    record.version = version;
    BEACONS.save(deps.storage, beacon.as_str(), &record)?;

    let instances: Vec<Addr> = BEACON_INSTANCES
        .prefix(beacon.as_str())
        .keys(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<_>>()?;
    let migrate_msg = to_json_binary(&Empty {})?;
    let messages: Vec<CosmosMsg> = instances
        .iter()
        .map(|contract| {
            CosmosMsg::Wasm(WasmMsg::Migrate {
                contract_addr: contract.to_string(),
                new_code_id: code_id,
                msg: migrate_msg.clone(),
            })
        })
        .collect();

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", "upgrade_to")
        .add_attribute("beacon", beacon.as_str())
        .add_attribute("code_id", code_id.to_string())
        .add_attribute("version", version.to_string())
        .add_attribute("migrated", instances.len().to_string()))
}

// ============================================================================
// Upgrader Handover
// ============================================================================

pub fn execute_transfer_beacon_upgrader(
    deps: DepsMut,
    info: MessageInfo,
    beacon: BeaconKind,
    upgrader: String,
) -> Result<Response, ContractError> {
    let mut record = BEACONS.load(deps.storage, beacon.as_str())?;
    if info.sender != record.upgrader {
        return Err(ContractError::NotBeaconUpgrader {
            beacon: beacon.as_str().to_string(),
        });
    }

    let upgrader = deps.api.addr_validate(&upgrader)?;
    record.pending_upgrader = Some(upgrader.clone());
    BEACONS.save(deps.storage, beacon.as_str(), &record)?;

    Ok(Response::new()
        .add_attribute("method", "transfer_beacon_upgrader")
        .add_attribute("beacon", beacon.as_str())
        .add_attribute("pending_upgrader", upgrader))
}

pub fn execute_accept_beacon_upgrader(
    deps: DepsMut,
    info: MessageInfo,
    beacon: BeaconKind,
) -> Result<Response, ContractError> {
    let mut record = BEACONS.load(deps.storage, beacon.as_str())?;
    let pending = record
        .pending_upgrader
        .take()
        .ok_or_else(|| ContractError::NoPendingUpgrader {
            beacon: beacon.as_str().to_string(),
        })?;
    if info.sender != pending {
        return Err(ContractError::NotBeaconUpgrader {
            beacon: beacon.as_str().to_string(),
        });
    }

    record.upgrader = pending.clone();
    BEACONS.save(deps.storage, beacon.as_str(), &record)?;

    Ok(Response::new()
        .add_attribute("method", "accept_beacon_upgrader")
        .add_attribute("beacon", beacon.as_str())
        .add_attribute("upgrader", pending))
}
