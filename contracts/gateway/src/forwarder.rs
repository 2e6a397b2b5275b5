//! Gateway forwarder: migration links and token-authority handoff.
//!
//! # Migration sequence
//! 1. Successor `UpdatePreviousGateway { predecessor }`
//! 2. Predecessor `UpdateNextGateway { successor }`: transfers are relayed from here on
//! 3. Predecessor `TransferTokenAuthority {}`: minter role or custody moves, state `Released`
//! 4. Successor `ClaimTokenAuthority {}`: state `Held`, transfers settle again
//!
//! A gateway with no predecessor is claimed by its owner or wasm admin only;
//! once claimed it can no longer be linked as a successor.
//!
//! Between 2 and 4 relayed transfers fail with `MigrationNotReady`; nothing is
//! settled twice and nothing is lost. Links require
//! `predecessor.generation < successor.generation`, so following `next` links
//! always terminates.

use cosmwasm_std::{
    to_json_binary, Addr, Coin, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdError, SubMsg, Uint128, WasmMsg,
};
use cw20::{Cw20ExecuteMsg, MinterResponse};

use common::{AssetInfo, GatewayKind};

use crate::error::ContractError;
use crate::execute::{ensure_owner, mint_token, single_coin};
use crate::msg::{
    ConfigResponse, ExecuteMsg, MigrationLinksResponse, NonceResponse, QueryMsg, ReceiveMsg,
    TokenAuthorityResponse,
};
use crate::state::{
    Config, TokenAuthority, CONFIG, CUSTODY, LINKS, OUTGOING_NONCE, TOKEN_AUTHORITY,
};

/// Reply id of a relayed transfer; the successor's response data is passed through.
pub const FORWARD_REPLY_ID: u64 = 1;

// ============================================================================
// Relaying
// ============================================================================

/// Successor that transfers must be relayed to, if any.
///
/// Fails with `MigrationNotReady` while the successor does not yet point back
/// at this gateway.
pub fn forward_target(deps: Deps, env: &Env) -> Result<Option<Addr>, ContractError> {
    let Some(next) = LINKS.load(deps.storage)?.next_gateway else {
        return Ok(None);
    };

    let links: MigrationLinksResponse = deps
        .querier
        .query_wasm_smart(&next, &QueryMsg::MigrationLinks {})?;
    if links.previous_gateway.as_ref() != Some(&env.contract.address) {
        return Err(ContractError::not_ready(format!(
            "next gateway {} does not link back",
            next
        )));
    }

    Ok(Some(next))
}

/// Relay an execute message to the successor, passing `funds` along.
pub fn relay_execute(next: &Addr, msg: &ExecuteMsg, funds: Vec<Coin>) -> Result<SubMsg, ContractError> {
    let wasm = WasmMsg::Execute {
        contract_addr: next.to_string(),
        msg: to_json_binary(msg)?,
        funds,
    };
    Ok(SubMsg::reply_on_success(wasm, FORWARD_REPLY_ID))
}

/// Relay CW20 tokens to the successor with a receive hook.
pub fn relay_cw20(
    token: &Addr,
    next: &Addr,
    amount: Uint128,
    msg: &ReceiveMsg,
) -> Result<SubMsg, ContractError> {
    let wasm = WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Send {
            contract: next.to_string(),
            amount,
            msg: to_json_binary(msg)?,
        })?,
        funds: vec![],
    };
    Ok(SubMsg::reply_on_success(wasm, FORWARD_REPLY_ID))
}

/// Forwarded variants are only honored when relayed by the previous gateway.
pub fn ensure_from_previous(deps: Deps, relayer: &Addr) -> Result<(), ContractError> {
    match LINKS.load(deps.storage)?.previous_gateway {
        Some(previous) if previous == *relayer => Ok(()),
        _ => Err(ContractError::UnauthorizedForwarder),
    }
}

pub fn reply_forwarded(msg: Reply) -> Result<Response, ContractError> {
    if msg.id != FORWARD_REPLY_ID {
        return Err(ContractError::UnknownReplyId { id: msg.id });
    }
    let response = msg.result.into_result().map_err(StdError::generic_err)?;

    let mut res = Response::new().add_attribute("method", "forward_reply");
    if let Some(data) = response.data {
        res = res.set_data(data);
    }
    Ok(res)
}

// ============================================================================
// Links
// ============================================================================

pub fn execute_update_next_gateway(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    gateway: String,
) -> Result<Response, ContractError> {
    let config = ensure_owner(deps.as_ref(), &info)?;
    if TOKEN_AUTHORITY.load(deps.storage)? == TokenAuthority::Released {
        return Err(ContractError::TokenAuthorityReleased);
    }

    let next = deps.api.addr_validate(&gateway)?;
    if next == env.contract.address {
        return Err(ContractError::InvalidLink {
            reason: "gateway cannot link to itself".to_string(),
        });
    }
    let successor = load_compatible(deps.as_ref(), &next, &config)?;
    if successor.generation <= config.generation {
        return Err(ContractError::InvalidLink {
            reason: format!(
                "successor generation {} must exceed {}",
                successor.generation, config.generation
            ),
        });
    }

    let mut links = LINKS.load(deps.storage)?;
    links.next_gateway = Some(next.clone());
    LINKS.save(deps.storage, &links)?;

    Ok(Response::new()
        .add_attribute("method", "update_next_gateway")
        .add_attribute("next_gateway", next)
        .add_attribute("generation", successor.generation.to_string()))
}

pub fn execute_update_previous_gateway(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    gateway: String,
) -> Result<Response, ContractError> {
    let config = ensure_owner(deps.as_ref(), &info)?;
    if TOKEN_AUTHORITY.load(deps.storage)? != TokenAuthority::Pending {
        return Err(ContractError::InvalidLink {
            reason: "predecessor can only be linked before the token authority is claimed"
                .to_string(),
        });
    }

    let previous = deps.api.addr_validate(&gateway)?;
    if previous == env.contract.address {
        return Err(ContractError::InvalidLink {
            reason: "gateway cannot link to itself".to_string(),
        });
    }
    let predecessor = load_compatible(deps.as_ref(), &previous, &config)?;
    if predecessor.generation >= config.generation {
        return Err(ContractError::InvalidLink {
            reason: format!(
                "predecessor generation {} must be below {}",
                predecessor.generation, config.generation
            ),
        });
    }

    let mut links = LINKS.load(deps.storage)?;
    links.previous_gateway = Some(previous.clone());
    LINKS.save(deps.storage, &links)?;

    Ok(Response::new()
        .add_attribute("method", "update_previous_gateway")
        .add_attribute("previous_gateway", previous)
        .add_attribute("generation", predecessor.generation.to_string()))
}

/// Query a linked gateway and require the same kind, symbol and token.
fn load_compatible(
    deps: Deps,
    gateway: &Addr,
    config: &Config,
) -> Result<ConfigResponse, ContractError> {
    let other: ConfigResponse = deps
        .querier
        .query_wasm_smart(gateway, &QueryMsg::Config {})
        .map_err(|_| ContractError::InvalidLink {
            reason: format!("{} is not a gateway", gateway),
        })?;

    if other.kind != config.kind {
        return Err(ContractError::InvalidLink {
            reason: format!("kind {} differs", other.kind.as_str()),
        });
    }
    if other.asset_symbol != config.asset_symbol {
        return Err(ContractError::InvalidLink {
            reason: format!("asset symbol {} differs", other.asset_symbol),
        });
    }
    if other.token != config.token {
        return Err(ContractError::TokenMismatch {
            reason: format!("linked gateway uses {}", other.token),
        });
    }
    Ok(other)
}

// ============================================================================
// Token Authority Handoff
// ============================================================================

/// Hand the token authority to the next gateway (owner).
///
/// Mint kind: the CW20 minter role moves to the successor.
/// Lock kind: the whole custody balance moves through `AcceptCustody`.
pub fn execute_transfer_token_authority(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = ensure_owner(deps.as_ref(), &info)?;
    if TOKEN_AUTHORITY.load(deps.storage)? != TokenAuthority::Held {
        return Err(ContractError::not_ready("token authority is not held"));
    }
    let next = forward_target(deps.as_ref(), &env)?
        .ok_or_else(|| ContractError::not_ready("no next gateway linked"))?;

    let mut messages: Vec<CosmosMsg> = vec![];
    let mut handed_over = Uint128::zero();
    match config.kind {
        GatewayKind::Mint => {
            let token = mint_token(&config)?;
            messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: token.to_string(),
                msg: to_json_binary(&Cw20ExecuteMsg::UpdateMinter {
                    new_minter: Some(next.to_string()),
                })?,
                funds: vec![],
            }));
        }
        GatewayKind::Lock => {
            handed_over = CUSTODY.load(deps.storage)?;
            CUSTODY.save(deps.storage, &Uint128::zero())?;
            if !handed_over.is_zero() {
                messages.push(custody_handoff(&config.token, &next, handed_over)?);
            }
        }
    }

    TOKEN_AUTHORITY.save(deps.storage, &TokenAuthority::Released)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", "transfer_token_authority")
        .add_attribute("next_gateway", next)
        .add_attribute("custody", handed_over.to_string()))
}

fn custody_handoff(asset: &AssetInfo, next: &Addr, amount: Uint128) -> Result<CosmosMsg, ContractError> {
    let msg = match asset {
        AssetInfo::Native { denom } => CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: next.to_string(),
            msg: to_json_binary(&ExecuteMsg::AcceptCustody {})?,
            funds: vec![Coin {
                denom: denom.clone(),
                amount,
            }],
        }),
        AssetInfo::Cw20 { contract_addr } => CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: contract_addr.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Send {
                contract: next.to_string(),
                amount,
                msg: to_json_binary(&ReceiveMsg::AcceptCustody {})?,
            })?,
            funds: vec![],
        }),
    };
    Ok(msg)
}

/// Claim the token authority.
///
/// With a predecessor linked the claim is permissionless and objectively
/// checked. Without one, only the owner or the wasm admin may claim, since a
/// claimed gateway can no longer be linked to a predecessor.
///
/// Mint kind: this gateway must be the token's CW20 minter.
/// Lock kind: there is no predecessor, or the predecessor has released.
pub fn execute_claim_token_authority(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    match TOKEN_AUTHORITY.load(deps.storage)? {
        TokenAuthority::Held => return Err(ContractError::TokenAuthorityAlreadyHeld),
        TokenAuthority::Released => return Err(ContractError::TokenAuthorityReleased),
        TokenAuthority::Pending => {}
    }

    let previous_gateway = LINKS.load(deps.storage)?.previous_gateway;
    if previous_gateway.is_none() && info.sender != config.owner {
        let admin = deps
            .querier
            .query_wasm_contract_info(&env.contract.address)?
            .admin;
        if admin.as_deref() != Some(info.sender.as_str()) {
            return Err(ContractError::Unauthorized);
        }
    }

    match config.kind {
        GatewayKind::Mint => {
            let token = mint_token(&config)?;
            let minter: Option<MinterResponse> = deps
                .querier
                .query_wasm_smart(token, &cw20::Cw20QueryMsg::Minter {})?;
            if minter.map(|m| m.minter) != Some(env.contract.address.to_string()) {
                return Err(ContractError::not_ready("gateway is not the token minter"));
            }
        }
        GatewayKind::Lock => {
            if let Some(previous) = &previous_gateway {
                let authority: TokenAuthorityResponse = deps
                    .querier
                    .query_wasm_smart(previous, &QueryMsg::TokenAuthority {})?;
                if authority.state != TokenAuthority::Released {
                    return Err(ContractError::not_ready(format!(
                        "previous gateway {} still holds custody",
                        previous
                    )));
                }
            }
        }
    }

    // Outbound nonces continue where the predecessor stopped.
    let mut nonce = OUTGOING_NONCE.load(deps.storage)?;
    if let Some(previous) = &previous_gateway {
        let inherited: NonceResponse = deps
            .querier
            .query_wasm_smart(previous, &QueryMsg::CurrentNonce {})?;
        nonce = nonce.max(inherited.nonce);
        OUTGOING_NONCE.save(deps.storage, &nonce)?;
    }

    TOKEN_AUTHORITY.save(deps.storage, &TokenAuthority::Held)?;

    Ok(Response::new()
        .add_attribute("method", "claim_token_authority")
        .add_attribute("claimed_by", info.sender)
        .add_attribute("nonce", nonce.to_string()))
}

/// Credit custody handed over by the previous gateway.
pub fn accept_custody(
    deps: DepsMut,
    relayer: &Addr,
    amount: Uint128,
) -> Result<Response, ContractError> {
    ensure_from_previous(deps.as_ref(), relayer)?;

    let custody = CUSTODY.load(deps.storage)? + amount;
    CUSTODY.save(deps.storage, &custody)?;

    Ok(Response::new()
        .add_attribute("method", "accept_custody")
        .add_attribute("from", relayer.to_string())
        .add_attribute("amount", amount)
        .add_attribute("custody", custody))
}

/// Native custody handoff: funds arrive attached to `AcceptCustody {}`.
pub fn execute_accept_custody(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let amount = match &config.token {
        AssetInfo::Native { denom } => single_coin(&info.funds, denom)?,
        AssetInfo::Cw20 { .. } => {
            return Err(ContractError::InvalidFunds {
                reason: "custody of a CW20 asset must arrive through the token".to_string(),
            })
        }
    };
    accept_custody(deps, &info.sender, amount)
}
