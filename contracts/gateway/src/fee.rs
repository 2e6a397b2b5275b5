//! Fee configuration and calculation
//!
//! | Fee      | Applies to             | Disposal without recipient      |
//! |----------|------------------------|---------------------------------|
//! | Mint fee | inbound mint / release | never minted / kept in custody  |
//! | Burn fee | outbound burn / lock   | burned / kept in custody        |
//!
//! Fees round down: `fee = floor(amount * bps / 10_000)`.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::Item;

use crate::error::ContractError;

// ============================================================================
// Constants
// ============================================================================

/// Basis points denominator (10000 = 100%)
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Maximum fee in basis points (10%)
pub const MAX_FEE_BPS: u64 = 1_000;

// ============================================================================
// Data Structures
// ============================================================================

#[cw_serde]
pub struct FeeConfig {
    /// Fee on inbound legs, in basis points
    pub mint_fee_bps: u64,
    /// Fee on outbound legs, in basis points
    pub burn_fee_bps: u64,
    /// Address receiving collected fees
    pub fee_recipient: Option<Addr>,
}

impl FeeConfig {
    pub fn validate(&self) -> Result<(), ContractError> {
        validate_fee_bps(self.mint_fee_bps)?;
        validate_fee_bps(self.burn_fee_bps)
    }
}

/// Result of applying a fee to a gross amount
#[cw_serde]
pub struct FeeSplit {
    pub fee: Uint128,
    pub net: Uint128,
}

pub const FEE_CONFIG: Item<FeeConfig> = Item::new("fee_config");

// ============================================================================
// Fee Calculation
// ============================================================================

pub fn validate_fee_bps(fee_bps: u64) -> Result<(), ContractError> {
    if fee_bps > MAX_FEE_BPS {
        return Err(ContractError::FeeTooHigh {
            fee_bps,
            max_bps: MAX_FEE_BPS,
        });
    }
    Ok(())
}

/// Split `amount` into fee and net. `fee + net == amount` always holds.
pub fn split_fee(amount: Uint128, fee_bps: u64) -> FeeSplit {
    let fee = amount.multiply_ratio(fee_bps as u128, BPS_DENOMINATOR);
    FeeSplit {
        fee,
        net: amount - fee,
    }
}
