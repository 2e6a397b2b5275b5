//! Outbound transfer handlers (Burn and Lock).
//!
//! Tokens leave this chain by being burned (mint kind) or taken into custody
//! (lock kind). Each accepted transfer gets the next outbound nonce and emits
//! a commitment the signer observes.

use cosmwasm_std::{
    from_json, to_json_binary, Addr, Binary, CosmosMsg, DepsMut, Env, MessageInfo, Response,
    Uint128,
};
use cw20::{Cw20ExecuteMsg, Cw20ReceiveMsg};

use common::hash::{bytes32_to_hex, outbound_commitment};
use common::{AssetInfo, GatewayKind};

use crate::error::ContractError;
use crate::execute::{
    cw20_execute, ensure_authority_held, ensure_kind, ensure_selector_consistent, mint_token,
    pay_out, single_coin,
};
use crate::fee::{split_fee, FEE_CONFIG};
use crate::forwarder::{
    accept_custody, ensure_from_previous, forward_target, relay_cw20, relay_execute,
};
use crate::msg::{ExecuteMsg, OutboundResponse, ReceiveMsg};
use crate::state::{Config, CONFIG, CUSTODY, OUTGOING_NONCE, STATS};

/// Destination of an outbound transfer
pub struct OutboundTransfer {
    pub to: String,
    /// Only meaningful for lock gateways; burns return to the asset's origin
    pub to_chain: Option<String>,
    pub payload: Option<Binary>,
}

// ============================================================================
// Native Lock
// ============================================================================

/// Lock the attached native funds (lock kind).
pub fn execute_lock_native(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    transfer: OutboundTransfer,
) -> Result<Response, ContractError> {
    lock_native(deps, env, info, None, transfer)
}

/// Native lock relayed by the previous gateway on behalf of `sender`.
pub fn execute_forwarded_lock_native(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    sender: String,
    transfer: OutboundTransfer,
) -> Result<Response, ContractError> {
    ensure_from_previous(deps.as_ref(), &info.sender)?;
    lock_native(deps, env, info, Some(sender), transfer)
}

fn lock_native(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    relayed_for: Option<String>,
    transfer: OutboundTransfer,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::Paused);
    }
    ensure_kind(&config, GatewayKind::Lock)?;

    let AssetInfo::Native { denom } = &config.token else {
        return Err(ContractError::InvalidFunds {
            reason: "gateway locks a CW20 token; use CW20 Send".to_string(),
        });
    };
    let amount = single_coin(&info.funds, denom)?;
    let sender = match relayed_for {
        Some(sender) => deps.api.addr_validate(&sender)?,
        None => info.sender,
    };

    if let Some(next) = forward_target(deps.as_ref(), &env)? {
        let msg = ExecuteMsg::ForwardedLock {
            sender: sender.to_string(),
            to: transfer.to,
            to_chain: transfer.to_chain.unwrap_or_default(),
            payload: transfer.payload,
        };
        return Ok(Response::new()
            .add_submessage(relay_execute(&next, &msg, info.funds)?)
            .add_attribute("method", "forward_lock")
            .add_attribute("next_gateway", next)
            .add_attribute("sender", sender));
    }

    settle_outbound(deps, config, sender, amount, transfer)
}

// ============================================================================
// CW20 Receive
// ============================================================================

/// CW20 receiver hook.
pub fn execute_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let token = info.sender;
    if config.token.cw20_addr() != Some(&token) {
        return Err(ContractError::InvalidFunds {
            reason: format!("unexpected token {}", token),
        });
    }

    let amount = cw20_msg.amount;
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    let cw20_sender = deps.api.addr_validate(&cw20_msg.sender)?;

    match from_json(&cw20_msg.msg)? {
        ReceiveMsg::Burn { to, payload } => outbound_cw20(
            deps,
            env,
            config,
            token,
            cw20_sender,
            GatewayKind::Mint,
            amount,
            OutboundTransfer {
                to,
                to_chain: None,
                payload,
            },
        ),
        ReceiveMsg::Lock {
            to,
            to_chain,
            payload,
        } => outbound_cw20(
            deps,
            env,
            config,
            token,
            cw20_sender,
            GatewayKind::Lock,
            amount,
            OutboundTransfer {
                to,
                to_chain: Some(to_chain),
                payload,
            },
        ),
        ReceiveMsg::ForwardedBurn {
            sender,
            to,
            payload,
        } => {
            ensure_from_previous(deps.as_ref(), &cw20_sender)?;
            let sender = deps.api.addr_validate(&sender)?;
            outbound_cw20(
                deps,
                env,
                config,
                token,
                sender,
                GatewayKind::Mint,
                amount,
                OutboundTransfer {
                    to,
                    to_chain: None,
                    payload,
                },
            )
        }
        ReceiveMsg::ForwardedLock {
            sender,
            to,
            to_chain,
            payload,
        } => {
            ensure_from_previous(deps.as_ref(), &cw20_sender)?;
            let sender = deps.api.addr_validate(&sender)?;
            outbound_cw20(
                deps,
                env,
                config,
                token,
                sender,
                GatewayKind::Lock,
                amount,
                OutboundTransfer {
                    to,
                    to_chain: Some(to_chain),
                    payload,
                },
            )
        }
        ReceiveMsg::AcceptCustody {} => {
            ensure_kind(&config, GatewayKind::Lock)?;
            accept_custody(deps, &cw20_sender, amount)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn outbound_cw20(
    deps: DepsMut,
    env: Env,
    config: Config,
    token: Addr,
    sender: Addr,
    kind: GatewayKind,
    amount: Uint128,
    transfer: OutboundTransfer,
) -> Result<Response, ContractError> {
    if config.paused {
        return Err(ContractError::Paused);
    }
    ensure_kind(&config, kind)?;

    if let Some(next) = forward_target(deps.as_ref(), &env)? {
        let (method, msg) = match kind {
            GatewayKind::Mint => (
                "forward_burn",
                ReceiveMsg::ForwardedBurn {
                    sender: sender.to_string(),
                    to: transfer.to,
                    payload: transfer.payload,
                },
            ),
            GatewayKind::Lock => (
                "forward_lock",
                ReceiveMsg::ForwardedLock {
                    sender: sender.to_string(),
                    to: transfer.to,
                    to_chain: transfer.to_chain.unwrap_or_default(),
                    payload: transfer.payload,
                },
            ),
        };
        return Ok(Response::new()
            .add_submessage(relay_cw20(&token, &next, amount, &msg)?)
            .add_attribute("method", method)
            .add_attribute("next_gateway", next)
            .add_attribute("sender", sender));
    }

    settle_outbound(deps, config, sender, amount, transfer)
}

// ============================================================================
// Settlement
// ============================================================================

fn settle_outbound(
    deps: DepsMut,
    config: Config,
    sender: Addr,
    amount: Uint128,
    transfer: OutboundTransfer,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    if transfer.to.trim().is_empty() {
        return Err(ContractError::InvalidDestination {
            reason: "recipient is empty".to_string(),
        });
    }
    if config.kind == GatewayKind::Lock
        && transfer.to_chain.as_deref().unwrap_or_default().is_empty()
    {
        return Err(ContractError::InvalidDestination {
            reason: "destination chain is empty".to_string(),
        });
    }

    ensure_selector_consistent(&config)?;
    ensure_authority_held(deps.as_ref())?;

    let fees = FEE_CONFIG.load(deps.storage)?;
    let split = split_fee(amount, fees.burn_fee_bps);
    let fee_recipient = fees.fee_recipient.filter(|_| !split.fee.is_zero());

    let mut messages: Vec<CosmosMsg> = vec![];
    match config.kind {
        GatewayKind::Mint => {
            let token = mint_token(&config)?;
            // Without a fee recipient the fee is burned with the rest.
            let burned = match &fee_recipient {
                Some(fee_recipient) => {
                    messages.push(cw20_execute(
                        token,
                        &Cw20ExecuteMsg::Transfer {
                            recipient: fee_recipient.to_string(),
                            amount: split.fee,
                        },
                    )?);
                    split.net
                }
                None => amount,
            };
            messages.push(cw20_execute(
                token,
                &Cw20ExecuteMsg::Burn { amount: burned },
            )?);
        }
        GatewayKind::Lock => {
            // Without a fee recipient the fee stays in custody.
            let retained = match &fee_recipient {
                Some(fee_recipient) => {
                    messages.push(pay_out(&config.token, fee_recipient, split.fee)?);
                    split.net
                }
                None => amount,
            };
            let custody = CUSTODY.load(deps.storage)? + retained;
            CUSTODY.save(deps.storage, &custody)?;
        }
    }

    let nonce = OUTGOING_NONCE.load(deps.storage)?;
    OUTGOING_NONCE.save(deps.storage, &(nonce + 1))?;

    let payload = transfer.payload.unwrap_or_default();
    let commitment = outbound_commitment(
        &config.selector_hash,
        nonce,
        split.net.u128(),
        &transfer.to,
        transfer.to_chain.as_deref().unwrap_or_default(),
        payload.as_slice(),
    );

    let mut stats = STATS.load(deps.storage)?;
    stats.outbound_count += 1;
    stats.total_outbound += split.net;
    stats.total_fees += split.fee;
    STATS.save(deps.storage, &stats)?;

    let method = match config.kind {
        GatewayKind::Mint => "burn",
        GatewayKind::Lock => "lock",
    };

    let mut res = Response::new()
        .add_messages(messages)
        .set_data(to_json_binary(&OutboundResponse { nonce })?)
        .add_attribute("method", method)
        .add_attribute("sender", sender)
        .add_attribute("to", transfer.to);
    if let Some(to_chain) = transfer.to_chain {
        res = res.add_attribute("to_chain", to_chain);
    }
    res = res
        .add_attribute("amount", split.net)
        .add_attribute("fee", split.fee)
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("commitment", bytes32_to_hex(&commitment));
    if !payload.is_empty() {
        res = res.add_attribute("payload", payload.to_base64());
    }
    Ok(res)
}
