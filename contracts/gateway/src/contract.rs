//! Gateway Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `forwarder` - Migration links, relaying and token-authority handoff
//! - `ledger` - Replay protection across generations
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult, Uint128,
};
use cw2::{get_contract_version, set_contract_version};

use common::hash::{bytes32_to_hex, selector_hash};
use common::GatewayKind;

use crate::error::ContractError;
use crate::execute::{
    ensure_selector_consistent, execute_accept_owner, execute_cancel_owner_proposal,
    execute_forwarded_inbound, execute_forwarded_lock_native, execute_lock_native, execute_mint,
    execute_pause, execute_propose_owner, execute_receive, execute_release, execute_unpause,
    execute_update_asset, execute_update_burn_fee, execute_update_fee_recipient,
    execute_update_mint_authority, execute_update_mint_fee, execute_update_selector_hash,
    execute_update_signature_verifier, InboundTransfer, OutboundTransfer,
};
use crate::fee::{FeeConfig, FEE_CONFIG};
use crate::forwarder::{
    execute_accept_custody, execute_claim_token_authority, execute_transfer_token_authority,
    execute_update_next_gateway, execute_update_previous_gateway, reply_forwarded,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_config, query_current_nonce, query_custody, query_fee_config, query_hash_for_signature,
    query_health, query_is_spent, query_lineage_spent, query_migration_links, query_owner,
    query_selector_hash, query_stats, query_status, query_token_authority,
};
use crate::state::{
    Config, MigrationLinks, Stats, TokenAuthority, CONFIG, CONTRACT_NAME, CONTRACT_VERSION,
    CUSTODY, LAYOUT_VERSION, LINKS, OUTGOING_NONCE, STATS, STORAGE_LAYOUT_VERSION,
    TOKEN_AUTHORITY,
};

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
    let signature_verifier = deps.api.addr_validate(&msg.signature_verifier)?;
    if msg.asset_symbol.is_empty() || msg.chain_name.is_empty() {
        return Err(ContractError::InvalidAsset {
            reason: "symbol and chain name must be non-empty".to_string(),
        });
    }
    let token = msg.token.validate(deps.api)?;
    if msg.kind == GatewayKind::Mint && token.is_native() {
        return Err(ContractError::InvalidAsset {
            reason: "mint gateway requires a CW20 token".to_string(),
        });
    }

    let fee_config = FeeConfig {
        mint_fee_bps: msg.mint_fee_bps,
        burn_fee_bps: msg.burn_fee_bps,
        fee_recipient: msg
            .fee_recipient
            .map(|addr| deps.api.addr_validate(&addr))
            .transpose()?,
    };
    fee_config.validate()?;
    FEE_CONFIG.save(deps.storage, &fee_config)?;

    let config = Config {
        owner,
        kind: msg.kind,
        selector_hash: selector_hash(&msg.asset_symbol, msg.kind, &msg.chain_name),
        asset_symbol: msg.asset_symbol,
        chain_name: msg.chain_name,
        token,
        signature_verifier,
        generation: msg.generation,
        paused: false,
    };
    CONFIG.save(deps.storage, &config)?;

    LINKS.save(deps.storage, &MigrationLinks::default())?;
    TOKEN_AUTHORITY.save(deps.storage, &TokenAuthority::Pending)?;
    OUTGOING_NONCE.save(deps.storage, &0u64)?;
    CUSTODY.save(deps.storage, &Uint128::zero())?;
    STATS.save(deps.storage, &Stats::default())?;
    LAYOUT_VERSION.save(deps.storage, &STORAGE_LAYOUT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("kind", config.kind.as_str())
        .add_attribute("asset_symbol", config.asset_symbol)
        .add_attribute("chain_name", config.chain_name)
        .add_attribute("token", config.token.to_string())
        .add_attribute("generation", config.generation.to_string())
        .add_attribute("selector_hash", bytes32_to_hex(&config.selector_hash)))
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
        // Inbound transfers
        ExecuteMsg::Mint {
            p_hash,
            amount,
            n_hash,
            sig,
        } => execute_mint(
            deps,
            env,
            info,
            InboundTransfer {
                p_hash,
                amount,
                n_hash,
                sig,
            },
        ),
        ExecuteMsg::Release {
            p_hash,
            amount,
            n_hash,
            sig,
        } => execute_release(
            deps,
            env,
            info,
            InboundTransfer {
                p_hash,
                amount,
                n_hash,
                sig,
            },
        ),

        // Outbound transfers
        ExecuteMsg::Lock {
            to,
            to_chain,
            payload,
        } => execute_lock_native(
            deps,
            env,
            info,
            OutboundTransfer {
                to,
                to_chain: Some(to_chain),
                payload,
            },
        ),
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, env, info, cw20_msg),

        // Forwarding
        ExecuteMsg::ForwardedMint {
            sender,
            p_hash,
            amount,
            n_hash,
            sig,
        } => execute_forwarded_inbound(
            deps,
            env,
            info,
            GatewayKind::Mint,
            sender,
            InboundTransfer {
                p_hash,
                amount,
                n_hash,
                sig,
            },
        ),
        ExecuteMsg::ForwardedRelease {
            sender,
            p_hash,
            amount,
            n_hash,
            sig,
        } => execute_forwarded_inbound(
            deps,
            env,
            info,
            GatewayKind::Lock,
            sender,
            InboundTransfer {
                p_hash,
                amount,
                n_hash,
                sig,
            },
        ),
        ExecuteMsg::ForwardedLock {
            sender,
            to,
            to_chain,
            payload,
        } => execute_forwarded_lock_native(
            deps,
            env,
            info,
            sender,
            OutboundTransfer {
                to,
                to_chain: Some(to_chain),
                payload,
            },
        ),
        ExecuteMsg::AcceptCustody {} => execute_accept_custody(deps, info),

        // Migration
        ExecuteMsg::UpdateNextGateway { gateway } => {
            execute_update_next_gateway(deps, env, info, gateway)
        }
        ExecuteMsg::UpdatePreviousGateway { gateway } => {
            execute_update_previous_gateway(deps, env, info, gateway)
        }
        ExecuteMsg::TransferTokenAuthority {} => execute_transfer_token_authority(deps, env, info),
        ExecuteMsg::ClaimTokenAuthority {} => execute_claim_token_authority(deps, env, info),

        // Configuration
        ExecuteMsg::UpdateMintFee { fee_bps } => execute_update_mint_fee(deps, info, fee_bps),
        ExecuteMsg::UpdateBurnFee { fee_bps } => execute_update_burn_fee(deps, info, fee_bps),
        ExecuteMsg::UpdateFeeRecipient { fee_recipient } => {
            execute_update_fee_recipient(deps, info, fee_recipient)
        }
        ExecuteMsg::UpdateSelectorHash { selector_hash } => {
            execute_update_selector_hash(deps, info, selector_hash)
        }
        ExecuteMsg::UpdateAsset {
            asset_symbol,
            chain_name,
        } => execute_update_asset(deps, info, asset_symbol, chain_name),
        ExecuteMsg::UpdateSignatureVerifier { signature_verifier } => {
            execute_update_signature_verifier(deps, info, signature_verifier)
        }
        ExecuteMsg::UpdateMintAuthority { authority } => {
            execute_update_mint_authority(deps, info, authority)
        }

        // Admin operations
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
        ExecuteMsg::ProposeOwner { new_owner } => execute_propose_owner(deps, info, new_owner),
        ExecuteMsg::AcceptOwner {} => execute_accept_owner(deps, info),
        ExecuteMsg::CancelOwnerProposal {} => execute_cancel_owner_proposal(deps, info),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    reply_forwarded(msg)
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::FeeConfig {} => to_json_binary(&query_fee_config(deps)?),
        QueryMsg::SelectorHash {} => to_json_binary(&query_selector_hash(deps)?),
        QueryMsg::MigrationLinks {} => to_json_binary(&query_migration_links(deps)?),
        QueryMsg::TokenAuthority {} => to_json_binary(&query_token_authority(deps)?),
        QueryMsg::IsSpent { n_hash, sig_hash } => {
            to_json_binary(&query_is_spent(deps, n_hash, sig_hash)?)
        }
        QueryMsg::Status { sig_hash } => to_json_binary(&query_status(deps, sig_hash)?),
        QueryMsg::LineageSpent {
            n_hash,
            sig_hash,
            direction,
        } => to_json_binary(&query_lineage_spent(deps, n_hash, sig_hash, direction)?),
        QueryMsg::HashForSignature {
            p_hash,
            amount,
            recipient,
            n_hash,
        } => to_json_binary(&query_hash_for_signature(
            deps, p_hash, amount, recipient, n_hash,
        )?),
        QueryMsg::CurrentNonce {} => to_json_binary(&query_current_nonce(deps)?),
        QueryMsg::Custody {} => to_json_binary(&query_custody(deps)?),
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),
        QueryMsg::Health {} => to_json_binary(&query_health(deps)?),
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
            reason: format!("cannot migrate {} into {}", stored.contract, CONTRACT_NAME),
        });
    }

    let layout = LAYOUT_VERSION.may_load(deps.storage)?.unwrap_or(1);
    if layout > STORAGE_LAYOUT_VERSION {
        return Err(ContractError::IncompatibleMigration {
            reason: format!(
                "stored layout {} is newer than {}",
                layout, STORAGE_LAYOUT_VERSION
            ),
        });
    }

    ensure_selector_consistent(&CONFIG.load(deps.storage)?)?;

    LAYOUT_VERSION.save(deps.storage, &STORAGE_LAYOUT_VERSION)?;
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION)
        .add_attribute("storage_layout", STORAGE_LAYOUT_VERSION.to_string()))
}
