//! Inbound transfer handlers (Mint and Release).
//!
//! Settlement order, all-or-nothing:
//! 1. not paused, correct kind; relay to the successor if one is linked
//! 2. selector hash consistent, token authority held
//! 3. nHash then sigHash unspent in every generation
//! 4. verifier accepts the signature
//! 5. mark both hashes spent, split the fee, mint or release

use cosmwasm_std::{
    to_json_binary, Addr, Binary, CosmosMsg, DepsMut, Env, MessageInfo, Response, Uint128,
};
use cw20::Cw20ExecuteMsg;

use common::hash::{bytes32_to_hex, hash_for_signature, to_bytes32};
use common::GatewayKind;
use signature_verifier::msg::{QueryMsg as VerifierQueryMsg, VerifyResponse};

use crate::error::ContractError;
use crate::execute::{
    cw20_execute, ensure_authority_held, ensure_kind, ensure_selector_consistent, mint_token,
    pay_out,
};
use crate::fee::{split_fee, FEE_CONFIG};
use crate::forwarder::{ensure_from_previous, forward_target, relay_execute};
use crate::ledger::{ensure_unspent, mark_spent};
use crate::msg::{ExecuteMsg, InboundResponse};
use crate::state::{CONFIG, CUSTODY, STATS};

/// Signed inbound transfer as submitted by the recipient
pub struct InboundTransfer {
    pub p_hash: Binary,
    pub amount: Uint128,
    pub n_hash: Binary,
    pub sig: Binary,
}

// ============================================================================
// Entry Handlers
// ============================================================================

pub fn execute_mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    transfer: InboundTransfer,
) -> Result<Response, ContractError> {
    settle_inbound(deps, env, info.sender, GatewayKind::Mint, transfer)
}

pub fn execute_release(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    transfer: InboundTransfer,
) -> Result<Response, ContractError> {
    settle_inbound(deps, env, info.sender, GatewayKind::Lock, transfer)
}

/// Inbound transfer relayed by the previous gateway on behalf of `sender`.
pub fn execute_forwarded_inbound(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    kind: GatewayKind,
    sender: String,
    transfer: InboundTransfer,
) -> Result<Response, ContractError> {
    ensure_from_previous(deps.as_ref(), &info.sender)?;
    let recipient = deps.api.addr_validate(&sender)?;
    settle_inbound(deps, env, recipient, kind, transfer)
}

// ============================================================================
// Settlement
// ============================================================================

fn settle_inbound(
    deps: DepsMut,
    env: Env,
    recipient: Addr,
    kind: GatewayKind,
    transfer: InboundTransfer,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::Paused);
    }
    ensure_kind(&config, kind)?;

    if let Some(next) = forward_target(deps.as_ref(), &env)? {
        return relay_inbound(next, recipient, kind, transfer);
    }

    if transfer.amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    let p_hash = parse_hash("p_hash", &transfer.p_hash)?;
    let n_hash = parse_hash("n_hash", &transfer.n_hash)?;

    ensure_selector_consistent(&config)?;
    ensure_authority_held(deps.as_ref())?;

    let sig_hash = hash_for_signature(
        &p_hash,
        transfer.amount.u128(),
        &config.selector_hash,
        recipient.as_str(),
        &n_hash,
    );
    ensure_unspent(deps.as_ref(), &n_hash, &sig_hash)?;

    let verified: VerifyResponse = deps.querier.query_wasm_smart(
        &config.signature_verifier,
        &VerifierQueryMsg::Verify {
            selector_hash: Binary::from(config.selector_hash.to_vec()),
            payload_hash: Binary::from(sig_hash.to_vec()),
            signature: transfer.sig,
        },
    )?;
    if !verified.valid {
        return Err(ContractError::VerificationFailed);
    }

    mark_spent(deps.storage, &n_hash, &sig_hash)?;

    let fees = FEE_CONFIG.load(deps.storage)?;
    let split = split_fee(transfer.amount, fees.mint_fee_bps);
    let fee_recipient = fees.fee_recipient.filter(|_| !split.fee.is_zero());

    let mut messages: Vec<CosmosMsg> = vec![];
    match kind {
        GatewayKind::Mint => {
            let token = mint_token(&config)?;
            messages.push(cw20_execute(
                token,
                &Cw20ExecuteMsg::Mint {
                    recipient: recipient.to_string(),
                    amount: split.net,
                },
            )?);
            if let Some(fee_recipient) = &fee_recipient {
                messages.push(cw20_execute(
                    token,
                    &Cw20ExecuteMsg::Mint {
                        recipient: fee_recipient.to_string(),
                        amount: split.fee,
                    },
                )?);
            }
        }
        GatewayKind::Lock => {
            // Without a fee recipient the fee stays in custody.
            let payout = match fee_recipient {
                Some(_) => transfer.amount,
                None => split.net,
            };
            let custody = CUSTODY.load(deps.storage)?;
            if custody < payout {
                return Err(ContractError::InsufficientCustody {
                    available: custody,
                    required: payout,
                });
            }
            CUSTODY.save(deps.storage, &(custody - payout))?;

            messages.push(pay_out(&config.token, &recipient, split.net)?);
            if let Some(fee_recipient) = &fee_recipient {
                messages.push(pay_out(&config.token, fee_recipient, split.fee)?);
            }
        }
    }

    let mut stats = STATS.load(deps.storage)?;
    stats.inbound_count += 1;
    stats.total_inbound += transfer.amount;
    stats.total_fees += split.fee;
    STATS.save(deps.storage, &stats)?;

    let method = match kind {
        GatewayKind::Mint => "mint",
        GatewayKind::Lock => "release",
    };

    Ok(Response::new()
        .add_messages(messages)
        .set_data(to_json_binary(&InboundResponse {
            net_amount: split.net,
        })?)
        .add_attribute("method", method)
        .add_attribute("recipient", recipient)
        .add_attribute("amount", transfer.amount)
        .add_attribute("net_amount", split.net)
        .add_attribute("fee", split.fee)
        .add_attribute("p_hash", bytes32_to_hex(&p_hash))
        .add_attribute("n_hash", bytes32_to_hex(&n_hash))
        .add_attribute("sig_hash", bytes32_to_hex(&sig_hash)))
}

fn relay_inbound(
    next: Addr,
    recipient: Addr,
    kind: GatewayKind,
    transfer: InboundTransfer,
) -> Result<Response, ContractError> {
    let InboundTransfer {
        p_hash,
        amount,
        n_hash,
        sig,
    } = transfer;
    let sender = recipient.to_string();
    let (method, msg) = match kind {
        GatewayKind::Mint => (
            "forward_mint",
            ExecuteMsg::ForwardedMint {
                sender,
                p_hash,
                amount,
                n_hash,
                sig,
            },
        ),
        GatewayKind::Lock => (
            "forward_release",
            ExecuteMsg::ForwardedRelease {
                sender,
                p_hash,
                amount,
                n_hash,
                sig,
            },
        ),
    };

    Ok(Response::new()
        .add_submessage(relay_execute(&next, &msg, vec![])?)
        .add_attribute("method", method)
        .add_attribute("next_gateway", next)
        .add_attribute("recipient", recipient))
}

fn parse_hash(field: &str, value: &Binary) -> Result<[u8; 32], ContractError> {
    to_bytes32(value).ok_or_else(|| ContractError::InvalidHash {
        reason: format!("{} must be 32 bytes, got {}", field, value.len()),
    })
}
