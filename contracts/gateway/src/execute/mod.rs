//! Execute handlers for the gateway contract.
//!
//! This module contains all execute message handlers, organized by category:
//! - `inbound` - Mint and Release (signed transfers settled on this chain)
//! - `outbound` - Burn and Lock (commitments observed by the signer)
//! - `config` - Fees, selector hash, asset and verifier management
//! - `admin` - Pause, unpause and ownership transfer

mod admin;
mod config;
mod inbound;
mod outbound;

pub use admin::*;
pub use config::*;
pub use inbound::*;
pub use outbound::*;

use cosmwasm_std::{to_json_binary, Addr, BankMsg, Coin, CosmosMsg, Deps, MessageInfo, Uint128, WasmMsg};
use cw20::Cw20ExecuteMsg;

use common::hash::{bytes32_to_hex, selector_hash};
use common::{AssetInfo, GatewayKind};

use crate::error::ContractError;
use crate::state::{Config, TokenAuthority, CONFIG, TOKEN_AUTHORITY};

// ============================================================================
// Guards
// ============================================================================

/// Load the config, requiring the sender to be the owner.
pub(crate) fn ensure_owner(deps: Deps, info: &MessageInfo) -> Result<Config, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }
    Ok(config)
}

pub(crate) fn ensure_kind(config: &Config, expected: GatewayKind) -> Result<(), ContractError> {
    if config.kind != expected {
        return Err(ContractError::WrongKind {
            expected: expected.as_str().to_string(),
        });
    }
    Ok(())
}

/// The stored selector hash must equal the one derived from symbol, kind and chain.
pub(crate) fn ensure_selector_consistent(config: &Config) -> Result<(), ContractError> {
    let expected = selector_hash(&config.asset_symbol, config.kind, &config.chain_name);
    if expected != config.selector_hash {
        return Err(ContractError::SelectorHashMismatch {
            expected: bytes32_to_hex(&expected),
            got: bytes32_to_hex(&config.selector_hash),
        });
    }
    Ok(())
}

pub(crate) fn ensure_authority_held(deps: Deps) -> Result<(), ContractError> {
    match TOKEN_AUTHORITY.load(deps.storage)? {
        TokenAuthority::Held => Ok(()),
        other => Err(ContractError::not_ready(format!(
            "token authority is {}",
            other.as_str()
        ))),
    }
}

// ============================================================================
// Asset Helpers
// ============================================================================

pub(crate) fn mint_token(config: &Config) -> Result<&Addr, ContractError> {
    config
        .token
        .cw20_addr()
        .ok_or_else(|| ContractError::InvalidAsset {
            reason: "mint gateway requires a CW20 token".to_string(),
        })
}

/// Amount of `denom` in `funds`, which must hold exactly that one coin.
pub(crate) fn single_coin(funds: &[Coin], denom: &str) -> Result<Uint128, ContractError> {
    match funds {
        [coin] if coin.denom == denom && !coin.amount.is_zero() => Ok(coin.amount),
        _ => Err(ContractError::InvalidFunds {
            reason: format!("expected a single {} coin", denom),
        }),
    }
}

pub(crate) fn cw20_execute(token: &Addr, msg: &Cw20ExecuteMsg) -> Result<CosmosMsg, ContractError> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }))
}

/// Pay `amount` of the custody asset out to `to`.
pub(crate) fn pay_out(asset: &AssetInfo, to: &Addr, amount: Uint128) -> Result<CosmosMsg, ContractError> {
    match asset {
        AssetInfo::Native { denom } => Ok(CosmosMsg::Bank(BankMsg::Send {
            to_address: to.to_string(),
            amount: vec![Coin {
                denom: denom.clone(),
                amount,
            }],
        })),
        AssetInfo::Cw20 { contract_addr } => cw20_execute(
            contract_addr,
            &Cw20ExecuteMsg::Transfer {
                recipient: to.to_string(),
                amount,
            },
        ),
    }
}
