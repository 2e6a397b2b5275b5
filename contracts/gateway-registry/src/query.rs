//! Query handlers for the gateway registry.

use cosmwasm_std::{Addr, Deps, Order, StdError, StdResult};

use common::GatewayKind;
use gateway::msg::{
    ConfigResponse as GatewayConfigResponse, HealthResponse, QueryMsg as GatewayQueryMsg,
};

use crate::msg::{
    AssetResponse, BeaconResponse, ConfigResponse, GatewayResponse, GatewaysResponse,
    LegacyGatewayResponse, OwnerResponse, SymbolsResponse,
};
use crate::state::{
    BeaconKind, GatewayEntry, BEACONS, BEACON_INSTANCES, CONFIG, ENTRIES, LEGACY_GATEWAYS,
    PENDING_OWNER, SYMBOL_BY_TOKEN,
};

// ============================================================================
// Gateway Queries
// ============================================================================

pub fn query_gateway_by_symbol(
    deps: Deps,
    kind: GatewayKind,
    symbol: String,
) -> StdResult<GatewayResponse> {
    let entry = load_entry(deps, kind, &symbol)?;
    Ok(gateway_response(deps, kind, symbol, entry))
}

pub fn query_gateway_by_token(
    deps: Deps,
    kind: GatewayKind,
    token: String,
) -> StdResult<GatewayResponse> {
    let symbol = SYMBOL_BY_TOKEN
        .may_load(deps.storage, (kind.as_str(), token.as_str()))?
        .ok_or_else(|| {
            StdError::not_found(format!("{} gateway for token {}", kind.as_str(), token))
        })?;
    let entry = load_entry(deps, kind, &symbol)?;
    Ok(gateway_response(deps, kind, symbol, entry))
}

pub fn query_asset_by_symbol(
    deps: Deps,
    kind: GatewayKind,
    symbol: String,
) -> StdResult<AssetResponse> {
    let entry = load_entry(deps, kind, &symbol)?;
    Ok(AssetResponse {
        usable: is_usable(deps, kind, &symbol, &entry),
        symbol,
        token: entry.token,
    })
}

/// Offset pagination over symbols in ascending order; `count == 0` means all.
pub fn query_gateway_symbols(
    deps: Deps,
    kind: GatewayKind,
    from: u32,
    count: u32,
) -> StdResult<SymbolsResponse> {
    let symbols = ENTRIES
        .prefix(kind.as_str())
        .keys(deps.storage, None, None, Order::Ascending)
        .skip(from as usize)
        .take(page_size(count))
        .collect::<StdResult<Vec<String>>>()?;
    Ok(SymbolsResponse { symbols })
}

pub fn query_gateways(
    deps: Deps,
    kind: GatewayKind,
    from: u32,
    count: u32,
) -> StdResult<GatewaysResponse> {
    let gateways = ENTRIES
        .prefix(kind.as_str())
        .range(deps.storage, None, None, Order::Ascending)
        .skip(from as usize)
        .take(page_size(count))
        .map(|item| {
            let (symbol, entry) = item?;
            Ok(gateway_response(deps, kind, symbol, entry))
        })
        .collect::<StdResult<Vec<_>>>()?;
    Ok(GatewaysResponse { gateways })
}

/// Follow the alias chain of a retired gateway to the live one. Aliases only
/// point at later generations, so the walk terminates.
pub fn query_legacy_gateway(deps: Deps, gateway: String) -> StdResult<LegacyGatewayResponse> {
    let gateway = deps.api.addr_validate(&gateway)?;
    let alias = LEGACY_GATEWAYS.load(deps.storage, &gateway)?;

    let mut live_gateway = alias.successor.clone();
    while let Some(next) = LEGACY_GATEWAYS.may_load(deps.storage, &live_gateway)? {
        live_gateway = next.successor;
    }

    Ok(LegacyGatewayResponse {
        kind: alias.kind,
        symbol: alias.symbol,
        successor: alias.successor,
        live_gateway,
    })
}

// ============================================================================
// Beacon & Config Queries
// ============================================================================

pub fn query_beacon(deps: Deps, beacon: BeaconKind) -> StdResult<BeaconResponse> {
    let record = BEACONS.load(deps.storage, beacon.as_str())?;
    let instances = BEACON_INSTANCES
        .prefix(beacon.as_str())
        .keys(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<Addr>>>()?;
    Ok(BeaconResponse {
        beacon,
        code_id: record.code_id,
        version: record.version,
        upgrader: record.upgrader,
        pending_upgrader: record.pending_upgrader,
        instances,
    })
}

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        chain_name: config.chain_name,
        signature_verifier: config.signature_verifier,
        gateway_owner: config.gateway_owner,
        mint_fee_bps: config.mint_fee_bps,
        burn_fee_bps: config.burn_fee_bps,
        fee_recipient: config.fee_recipient,
    })
}

pub fn query_owner(deps: Deps) -> StdResult<OwnerResponse> {
    Ok(OwnerResponse {
        owner: CONFIG.load(deps.storage)?.owner,
        pending_owner: PENDING_OWNER.may_load(deps.storage)?,
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn load_entry(deps: Deps, kind: GatewayKind, symbol: &str) -> StdResult<GatewayEntry> {
    ENTRIES
        .may_load(deps.storage, (kind.as_str(), symbol))?
        .ok_or_else(|| StdError::not_found(format!("{} gateway for {}", kind.as_str(), symbol)))
}

fn gateway_response(
    deps: Deps,
    kind: GatewayKind,
    symbol: String,
    entry: GatewayEntry,
) -> GatewayResponse {
    GatewayResponse {
        kind,
        usable: is_usable(deps, kind, &symbol, &entry),
        symbol,
        gateway: entry.gateway,
        token: entry.token,
        version: entry.version,
        beacon_managed: entry.beacon_managed,
    }
}

/// A gateway that cannot answer its queries is not usable.
fn is_usable(deps: Deps, kind: GatewayKind, symbol: &str, entry: &GatewayEntry) -> bool {
    binding_usable(deps, kind, symbol, entry).unwrap_or(false)
}

/// Healthy, and still bound to the kind, symbol, token and chain it was
/// registered under.
fn binding_usable(
    deps: Deps,
    kind: GatewayKind,
    symbol: &str,
    entry: &GatewayEntry,
) -> StdResult<bool> {
    let health: HealthResponse = deps
        .querier
        .query_wasm_smart(&entry.gateway, &GatewayQueryMsg::Health {})?;
    if !health.usable {
        return Ok(false);
    }

    let chain_name = CONFIG.load(deps.storage)?.chain_name;
    let config: GatewayConfigResponse = deps
        .querier
        .query_wasm_smart(&entry.gateway, &GatewayQueryMsg::Config {})?;
    Ok(config.kind == kind
        && config.asset_symbol == symbol
        && config.chain_name == chain_name
        && config.token == entry.token)
}

fn page_size(count: u32) -> usize {
    match count {
        0 => usize::MAX,
        n => n as usize,
    }
}
