//! Manual registration (owner only).

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use common::{AssetInfo, GatewayKind};

use crate::error::ContractError;
use crate::execute::{ensure_owner, ensure_unregistered, register, validate_symbol, verify_gateway};
use crate::state::{
    BeaconKind, GatewayEntry, LegacyGateway, BEACON_INSTANCES, ENTRIES, LEGACY_GATEWAYS,
    SYMBOL_BY_TOKEN,
};

pub fn execute_add_gateway(
    deps: DepsMut,
    info: MessageInfo,
    kind: GatewayKind,
    symbol: String,
    token: AssetInfo,
    gateway: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.as_ref(), &info)?;
    validate_symbol(&symbol)?;
    let token = token.validate(deps.api)?;
    let gateway = deps.api.addr_validate(&gateway)?;
    ensure_unregistered(deps.storage, kind, &symbol, Some(&token))?;

    let version = verify_gateway(deps.as_ref(), kind, &symbol, &token, &gateway)?;
    let beacon_managed =
        BEACON_INSTANCES.has(deps.storage, (BeaconKind::for_gateway(kind).as_str(), &gateway));

    register(
        deps.storage,
        kind,
        &symbol,
        &GatewayEntry {
            gateway: gateway.clone(),
            token: token.clone(),
            version,
            beacon_managed,
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "add_gateway")
        .add_attribute("kind", kind.as_str())
        .add_attribute("symbol", symbol)
        .add_attribute("gateway", gateway)
        .add_attribute("token", token.identifier()))
}

/// Replace the live gateway of `token`, keeping the token binding. The new
/// gateway must be a later generation; the old one becomes a legacy alias.
pub fn execute_update_gateway(
    deps: DepsMut,
    info: MessageInfo,
    kind: GatewayKind,
    token: AssetInfo,
    gateway: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.as_ref(), &info)?;
    let token = token.validate(deps.api)?;
    let gateway = deps.api.addr_validate(&gateway)?;

    let symbol = SYMBOL_BY_TOKEN
        .may_load(deps.storage, (kind.as_str(), token.identifier()))?
        .ok_or_else(|| ContractError::GatewayNotFound {
            kind: kind.as_str().to_string(),
            key: token.to_string(),
        })?;
    let current = ENTRIES.load(deps.storage, (kind.as_str(), symbol.as_str()))?;
    if current.gateway == gateway {
        return Err(ContractError::GatewayMismatch {
            reason: "gateway is already registered".to_string(),
        });
    }

    let version = verify_gateway(deps.as_ref(), kind, &symbol, &token, &gateway)?;
    if version <= current.version {
        return Err(ContractError::InvalidVersion {
            reason: format!(
                "replacement generation {} must exceed {}",
                version, current.version
            ),
        });
    }

    LEGACY_GATEWAYS.save(
        deps.storage,
        &current.gateway,
        &LegacyGateway {
            kind,
            symbol: symbol.clone(),
            successor: gateway.clone(),
        },
    )?;
    let beacon_managed =
        BEACON_INSTANCES.has(deps.storage, (BeaconKind::for_gateway(kind).as_str(), &gateway));
    register(
        deps.storage,
        kind,
        &symbol,
        &GatewayEntry {
            gateway: gateway.clone(),
            token,
            version,
            beacon_managed,
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "update_gateway")
        .add_attribute("kind", kind.as_str())
        .add_attribute("symbol", symbol)
        .add_attribute("previous_gateway", current.gateway)
        .add_attribute("gateway", gateway)
        .add_attribute("version", version.to_string()))
}

pub fn execute_remove_gateway(
    deps: DepsMut,
    info: MessageInfo,
    kind: GatewayKind,
    symbol: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.as_ref(), &info)?;

    let entry = ENTRIES
        .may_load(deps.storage, (kind.as_str(), symbol.as_str()))?
        .ok_or_else(|| ContractError::GatewayNotFound {
            kind: kind.as_str().to_string(),
            key: symbol.clone(),
        })?;
    ENTRIES.remove(deps.storage, (kind.as_str(), symbol.as_str()));
    SYMBOL_BY_TOKEN.remove(deps.storage, (kind.as_str(), entry.token.identifier()));

    Ok(Response::new()
        .add_attribute("method", "remove_gateway")
        .add_attribute("kind", kind.as_str())
        .add_attribute("symbol", symbol)
        .add_attribute("gateway", entry.gateway))
}
