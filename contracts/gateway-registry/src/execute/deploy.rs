//! Beacon deployments.
//!
//! A mint deployment runs as a reply chain inside one transaction:
//! 1. instantiate the CW20 token with the registry as minter (`TOKEN_REPLY_ID`)
//! 2. instantiate the gateway over that token (`GATEWAY_REPLY_ID`)
//! 3. hand the minter role to the gateway, claim its token authority, register
//!
//! Lock deployments start at step 2. Any failure reverts the whole chain.

use cosmwasm_std::{
    to_json_binary, Addr, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdError,
    SubMsg, WasmMsg,
};
use cw20::{Cw20ExecuteMsg, MinterResponse};
use cw20_base::msg::InstantiateMsg as TokenInstantiateMsg;

use common::{AssetInfo, GatewayKind};
use gateway::msg::{ExecuteMsg as GatewayExecuteMsg, InstantiateMsg as GatewayInstantiateMsg};

use crate::error::ContractError;
use crate::execute::{ensure_owner, ensure_unregistered, register, validate_symbol};
use crate::state::{
    BeaconKind, GatewayEntry, PendingDeployment, BEACONS, BEACON_INSTANCES, CONFIG,
    PENDING_DEPLOYMENT,
};

pub const TOKEN_REPLY_ID: u64 = 1;
pub const GATEWAY_REPLY_ID: u64 = 2;

#[allow(clippy::too_many_arguments)]
pub fn execute_deploy_mint_gateway_and_asset(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    symbol: String,
    name: String,
    ticker_symbol: String,
    decimals: u8,
    version: u32,
) -> Result<Response, ContractError> {
    ensure_owner(deps.as_ref(), &info)?;
    validate_symbol(&symbol)?;
    ensure_version(version)?;
    ensure_unregistered(deps.storage, GatewayKind::Mint, &symbol, None)?;

    let beacon = BEACONS.load(deps.storage, BeaconKind::Token.as_str())?;
    PENDING_DEPLOYMENT.save(
        deps.storage,
        &PendingDeployment {
            kind: GatewayKind::Mint,
            symbol: symbol.clone(),
            version,
            token: None,
        },
    )?;

    let registry = env.contract.address.to_string();
    let instantiate = WasmMsg::Instantiate {
        admin: Some(registry.clone()),
        code_id: beacon.code_id,
        msg: to_json_binary(&TokenInstantiateMsg {
            name,
            symbol: ticker_symbol,
            decimals,
            initial_balances: vec![],
            mint: Some(MinterResponse {
                minter: registry,
                cap: None,
            }),
            marketing: None,
        })?,
        funds: vec![],
        label: format!("{} wrapped token", symbol),
    };

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(instantiate, TOKEN_REPLY_ID))
        .add_attribute("method", "deploy_mint_gateway_and_asset")
        .add_attribute("symbol", symbol)
        .add_attribute("version", version.to_string()))
}

pub fn execute_deploy_lock_gateway(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    symbol: String,
    token: AssetInfo,
    version: u32,
) -> Result<Response, ContractError> {
    ensure_owner(deps.as_ref(), &info)?;
    validate_symbol(&symbol)?;
    ensure_version(version)?;
    let token = token.validate(deps.api)?;
    ensure_unregistered(deps.storage, GatewayKind::Lock, &symbol, Some(&token))?;

    let pending = PendingDeployment {
        kind: GatewayKind::Lock,
        symbol: symbol.clone(),
        version,
        token: Some(token.clone()),
    };
    PENDING_DEPLOYMENT.save(deps.storage, &pending)?;

    Ok(Response::new()
        .add_submessage(instantiate_gateway(deps.as_ref(), &env, &pending, token)?)
        .add_attribute("method", "deploy_lock_gateway")
        .add_attribute("symbol", symbol)
        .add_attribute("version", version.to_string()))
}

// ============================================================================
// Reply Chain
// ============================================================================

pub fn reply_token_instantiated(
    deps: DepsMut,
    env: Env,
    msg: Reply,
) -> Result<Response, ContractError> {
    let token = instantiated_address(deps.as_ref(), msg)?;
    let mut pending = PENDING_DEPLOYMENT
        .may_load(deps.storage)?
        .ok_or(ContractError::NoDeploymentInProgress)?;

    BEACON_INSTANCES.save(deps.storage, (BeaconKind::Token.as_str(), &token), &true)?;
    let asset = AssetInfo::Cw20 {
        contract_addr: token.clone(),
    };
    pending.token = Some(asset.clone());
    PENDING_DEPLOYMENT.save(deps.storage, &pending)?;

    Ok(Response::new()
        .add_submessage(instantiate_gateway(deps.as_ref(), &env, &pending, asset)?)
        .add_attribute("method", "token_instantiated")
        .add_attribute("token", token))
}

pub fn reply_gateway_instantiated(deps: DepsMut, msg: Reply) -> Result<Response, ContractError> {
    let gateway = instantiated_address(deps.as_ref(), msg)?;
    let pending = PENDING_DEPLOYMENT
        .may_load(deps.storage)?
        .ok_or(ContractError::NoDeploymentInProgress)?;
    PENDING_DEPLOYMENT.remove(deps.storage);
    let token = pending
        .token
        .ok_or(ContractError::NoDeploymentInProgress)?;

    BEACON_INSTANCES.save(
        deps.storage,
        (BeaconKind::for_gateway(pending.kind).as_str(), &gateway),
        &true,
    )?;

    let mut messages: Vec<CosmosMsg> = vec![];
    if let Some(contract_addr) = token.cw20_addr().filter(|_| pending.kind == GatewayKind::Mint) {
        messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: contract_addr.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::UpdateMinter {
                new_minter: Some(gateway.to_string()),
            })?,
            funds: vec![],
        }));
    }
    messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: gateway.to_string(),
        msg: to_json_binary(&GatewayExecuteMsg::ClaimTokenAuthority {})?,
        funds: vec![],
    }));

    register(
        deps.storage,
        pending.kind,
        &pending.symbol,
        &GatewayEntry {
            gateway: gateway.clone(),
            token: token.clone(),
            version: pending.version,
            beacon_managed: true,
        },
    )?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", "gateway_deployed")
        .add_attribute("kind", pending.kind.as_str())
        .add_attribute("symbol", pending.symbol)
        .add_attribute("gateway", gateway)
        .add_attribute("token", token.identifier()))
}

fn instantiate_gateway(
    deps: Deps,
    env: &Env,
    pending: &PendingDeployment,
    token: AssetInfo,
) -> Result<SubMsg, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let beacon = BEACONS.load(deps.storage, BeaconKind::for_gateway(pending.kind).as_str())?;

    let msg = GatewayInstantiateMsg {
        owner: config.gateway_owner.to_string(),
        kind: pending.kind,
        asset_symbol: pending.symbol.clone(),
        chain_name: config.chain_name,
        token,
        signature_verifier: config.signature_verifier.to_string(),
        generation: pending.version,
        mint_fee_bps: config.mint_fee_bps,
        burn_fee_bps: config.burn_fee_bps,
        fee_recipient: config.fee_recipient.map(|addr| addr.to_string()),
    };
    let instantiate = WasmMsg::Instantiate {
        admin: Some(env.contract.address.to_string()),
        code_id: beacon.code_id,
        msg: to_json_binary(&msg)?,
        funds: vec![],
        label: format!(
            "{} {} gateway v{}",
            pending.symbol,
            pending.kind.as_str(),
            pending.version
        ),
    };
    Ok(SubMsg::reply_on_success(instantiate, GATEWAY_REPLY_ID))
}

/// Address reported by the `instantiate` event of a reply.
fn instantiated_address(deps: Deps, msg: Reply) -> Result<Addr, ContractError> {
    let response = msg.result.into_result().map_err(StdError::generic_err)?;
    let address = response
        .events
        .iter()
        .filter(|event| event.ty == "instantiate")
        .flat_map(|event| event.attributes.iter())
        .find(|attr| attr.key == "_contract_address")
        .map(|attr| attr.value.clone())
        .ok_or(ContractError::MissingContractAddress)?;
    Ok(deps.api.addr_validate(&address)?)
}

fn ensure_version(version: u32) -> Result<(), ContractError> {
    if version == 0 {
        return Err(ContractError::InvalidVersion {
            reason: "gateway generations start at 1".to_string(),
        });
    }
    Ok(())
}
