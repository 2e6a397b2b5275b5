//! Execute handlers for the gateway registry.
//!
//! - `deploy` - Beacon deployments and their instantiate reply chain
//! - `registry` - Manual registration, replacement and removal
//! - `beacon` - Upgrades and upgrader handover
//! - `admin` - Defaults, verifier, gateway owner and ownership transfer

mod admin;
mod beacon;
mod deploy;
mod registry;

pub use admin::*;
pub use beacon::*;
pub use deploy::*;
pub use registry::*;

use cosmwasm_std::{Addr, Deps, MessageInfo, StdResult, Storage};
use cw20::{Cw20QueryMsg, MinterResponse};

use common::{AssetInfo, GatewayKind};
use gateway::msg::{ConfigResponse as GatewayConfigResponse, QueryMsg as GatewayQueryMsg};

use crate::error::ContractError;
use crate::state::{Config, GatewayEntry, CONFIG, ENTRIES, SYMBOL_BY_TOKEN};

/// Load the config, requiring the sender to be the owner.
pub(crate) fn ensure_owner(deps: Deps, info: &MessageInfo) -> Result<Config, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }
    Ok(config)
}

pub(crate) fn validate_symbol(symbol: &str) -> Result<(), ContractError> {
    if symbol.is_empty() || symbol.len() > 32 {
        return Err(ContractError::InvalidSymbol {
            reason: "symbol must be 1 to 32 bytes".to_string(),
        });
    }
    if symbol.chars().any(char::is_whitespace) {
        return Err(ContractError::InvalidSymbol {
            reason: "symbol must not contain whitespace".to_string(),
        });
    }
    Ok(())
}

/// Neither the symbol nor the token may already be registered for `kind`.
pub(crate) fn ensure_unregistered(
    storage: &dyn Storage,
    kind: GatewayKind,
    symbol: &str,
    token: Option<&AssetInfo>,
) -> Result<(), ContractError> {
    if ENTRIES.has(storage, (kind.as_str(), symbol)) {
        return Err(ContractError::SymbolAlreadyRegistered {
            kind: kind.as_str().to_string(),
            symbol: symbol.to_string(),
        });
    }
    if let Some(token) = token {
        if SYMBOL_BY_TOKEN.has(storage, (kind.as_str(), token.identifier())) {
            return Err(ContractError::TokenAlreadyRegistered {
                kind: kind.as_str().to_string(),
                token: token.to_string(),
            });
        }
    }
    Ok(())
}

/// Require `gateway` to be a `kind` gateway for `symbol` over `token`, and the
/// token's minter when it mints. Returns the gateway's generation.
pub(crate) fn verify_gateway(
    deps: Deps,
    kind: GatewayKind,
    symbol: &str,
    token: &AssetInfo,
    gateway: &Addr,
) -> Result<u32, ContractError> {
    let config: GatewayConfigResponse = deps
        .querier
        .query_wasm_smart(gateway, &GatewayQueryMsg::Config {})
        .map_err(|_| ContractError::GatewayMismatch {
            reason: format!("{} is not a gateway", gateway),
        })?;

    if config.kind != kind {
        return Err(ContractError::GatewayMismatch {
            reason: format!("gateway kind is {}", config.kind.as_str()),
        });
    }
    if config.asset_symbol != symbol {
        return Err(ContractError::GatewayMismatch {
            reason: format!("gateway symbol is {}", config.asset_symbol),
        });
    }
    if config.token != *token {
        return Err(ContractError::GatewayMismatch {
            reason: format!("gateway token is {}", config.token),
        });
    }

    if kind == GatewayKind::Mint {
        let contract_addr = token.cw20_addr().ok_or_else(|| ContractError::GatewayMismatch {
            reason: "mint gateways wrap a CW20 token".to_string(),
        })?;
        let minter: Option<MinterResponse> = deps
            .querier
            .query_wasm_smart(contract_addr, &Cw20QueryMsg::Minter {})?;
        if minter.map(|m| m.minter) != Some(gateway.to_string()) {
            return Err(ContractError::NotTokenMinter {
                gateway: gateway.to_string(),
                token: token.to_string(),
            });
        }
    }

    Ok(config.generation)
}

/// Write the entry and its reverse lookup.
pub(crate) fn register(
    storage: &mut dyn Storage,
    kind: GatewayKind,
    symbol: &str,
    entry: &GatewayEntry,
) -> StdResult<()> {
    ENTRIES.save(storage, (kind.as_str(), symbol), entry)?;
    SYMBOL_BY_TOKEN.save(
        storage,
        (kind.as_str(), entry.token.identifier()),
        &symbol.to_string(),
    )
}
