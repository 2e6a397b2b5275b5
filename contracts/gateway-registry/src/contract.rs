//! Gateway Registry - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute::{
    execute_accept_beacon_upgrader, execute_accept_owner, execute_add_gateway,
    execute_cancel_owner_proposal, execute_deploy_lock_gateway,
    execute_deploy_mint_gateway_and_asset, execute_propose_owner, execute_remove_gateway,
    execute_transfer_beacon_upgrader, execute_update_defaults, execute_update_gateway,
    execute_update_gateway_owner, execute_update_signature_verifier, execute_upgrade_to,
    reply_gateway_instantiated, reply_token_instantiated, validate_fee_bps, GATEWAY_REPLY_ID,
    TOKEN_REPLY_ID,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_asset_by_symbol, query_beacon, query_config, query_gateway_by_symbol,
    query_gateway_by_token, query_gateway_symbols, query_gateways, query_legacy_gateway,
    query_owner,
};
use crate::state::{Beacon, BeaconKind, Config, BEACONS, CONFIG, CONTRACT_NAME, CONTRACT_VERSION};

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
    let gateway_owner = match msg.gateway_owner {
        Some(addr) => deps.api.addr_validate(&addr)?,
        None => owner.clone(),
    };
    if msg.chain_name.is_empty() {
        return Err(ContractError::InvalidSymbol {
            reason: "chain name must be non-empty".to_string(),
        });
    }
    validate_fee_bps(msg.mint_fee_bps)?;
    validate_fee_bps(msg.burn_fee_bps)?;

    let config = Config {
        owner: owner.clone(),
        chain_name: msg.chain_name,
        signature_verifier: deps.api.addr_validate(&msg.signature_verifier)?,
        gateway_owner,
        mint_fee_bps: msg.mint_fee_bps,
        burn_fee_bps: msg.burn_fee_bps,
        fee_recipient: msg
            .fee_recipient
            .map(|addr| deps.api.addr_validate(&addr))
            .transpose()?,
    };
    CONFIG.save(deps.storage, &config)?;

    for (beacon, code_id) in [
        (BeaconKind::MintGateway, msg.mint_gateway_code_id),
        (BeaconKind::LockGateway, msg.lock_gateway_code_id),
        (BeaconKind::Token, msg.token_code_id),
    ] {
        if code_id == 0 {
            return Err(ContractError::InvalidCodeId { code_id });
        }
        BEACONS.save(
            deps.storage,
            beacon.as_str(),
            &Beacon {
                code_id,
                version: 1,
                upgrader: owner.clone(),
                pending_upgrader: None,
            },
        )?;
    }

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", owner)
        .add_attribute("chain_name", config.chain_name)
        .add_attribute("signature_verifier", config.signature_verifier))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Deployment
        ExecuteMsg::DeployMintGatewayAndAsset {
            symbol,
            name,
            ticker_symbol,
            decimals,
            version,
        } => execute_deploy_mint_gateway_and_asset(
            deps,
            env,
            info,
            symbol,
            name,
            ticker_symbol,
            decimals,
            version,
        ),
        ExecuteMsg::DeployLockGateway {
            symbol,
            token,
            version,
        } => execute_deploy_lock_gateway(deps, env, info, symbol, token, version),

        // Registration
        ExecuteMsg::AddGateway {
            kind,
            symbol,
            token,
            gateway,
        } => execute_add_gateway(deps, info, kind, symbol, token, gateway),
        ExecuteMsg::UpdateGateway {
            kind,
            token,
            gateway,
        } => execute_update_gateway(deps, info, kind, token, gateway),
        ExecuteMsg::RemoveGateway { kind, symbol } => {
            execute_remove_gateway(deps, info, kind, symbol)
        }

        // Beacons
        ExecuteMsg::UpgradeTo {
            beacon,
            code_id,
            version,
        } => execute_upgrade_to(deps, info, beacon, code_id, version),
        ExecuteMsg::TransferBeaconUpgrader { beacon, upgrader } => {
            execute_transfer_beacon_upgrader(deps, info, beacon, upgrader)
        }
        ExecuteMsg::AcceptBeaconUpgrader { beacon } => {
            execute_accept_beacon_upgrader(deps, info, beacon)
        }

        // Configuration
        ExecuteMsg::UpdateDefaults {
            mint_fee_bps,
            burn_fee_bps,
            fee_recipient,
        } => execute_update_defaults(deps, info, mint_fee_bps, burn_fee_bps, fee_recipient),
        ExecuteMsg::UpdateSignatureVerifier { signature_verifier } => {
            execute_update_signature_verifier(deps, info, signature_verifier)
        }
        ExecuteMsg::UpdateGatewayOwner { gateway_owner } => {
            execute_update_gateway_owner(deps, info, gateway_owner)
        }
        ExecuteMsg::ProposeOwner { new_owner } => execute_propose_owner(deps, info, new_owner),
        ExecuteMsg::AcceptOwner {} => execute_accept_owner(deps, info),
        ExecuteMsg::CancelOwnerProposal {} => execute_cancel_owner_proposal(deps, info),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        TOKEN_REPLY_ID => reply_token_instantiated(deps, env, msg),
        GATEWAY_REPLY_ID => reply_gateway_instantiated(deps, msg),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::GatewayBySymbol { kind, symbol } => {
            to_json_binary(&query_gateway_by_symbol(deps, kind, symbol)?)
        }
        QueryMsg::GatewayByToken { kind, token } => {
            to_json_binary(&query_gateway_by_token(deps, kind, token)?)
        }
        QueryMsg::AssetBySymbol { kind, symbol } => {
            to_json_binary(&query_asset_by_symbol(deps, kind, symbol)?)
        }
        QueryMsg::GatewaySymbols { kind, from, count } => {
            to_json_binary(&query_gateway_symbols(deps, kind, from, count)?)
        }
        QueryMsg::Gateways { kind, from, count } => {
            to_json_binary(&query_gateways(deps, kind, from, count)?)
        }
        QueryMsg::LegacyGateway { gateway } => to_json_binary(&query_legacy_gateway(deps, gateway)?),
        QueryMsg::Beacon { beacon } => to_json_binary(&query_beacon(deps, beacon)?),
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Owner {} => to_json_binary(&query_owner(deps)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::IncompatibleMigration {
            reason: format!("cannot migrate from {}", stored.contract),
        });
    }
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}

// ============================================================================
// Unit Tests
// ============================================================================
