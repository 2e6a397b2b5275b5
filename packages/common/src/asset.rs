use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Api, StdError, StdResult};

/// An asset a gateway governs: a native bank denom or a CW20 contract.
#[cw_serde]
pub enum AssetInfo {
    Native { denom: String },
    Cw20 { contract_addr: Addr },
}

impl AssetInfo {
    /// Re-validate an asset received in a message.
    pub fn validate(&self, api: &dyn Api) -> StdResult<AssetInfo> {
        match self {
            AssetInfo::Native { denom } => {
                if denom.is_empty() {
                    return Err(StdError::generic_err("native denom must not be empty"));
                }
                Ok(AssetInfo::Native {
                    denom: denom.clone(),
                })
            }
            AssetInfo::Cw20 { contract_addr } => Ok(AssetInfo::Cw20 {
                contract_addr: api.addr_validate(contract_addr.as_str())?,
            }),
        }
    }

    /// Denom or contract address; this is the key the registry's reverse map uses.
    pub fn identifier(&self) -> &str {
        match self {
            AssetInfo::Native { denom } => denom,
            AssetInfo::Cw20 { contract_addr } => contract_addr.as_str(),
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, AssetInfo::Native { .. })
    }

    /// The CW20 contract, if this is a CW20 asset.
    pub fn cw20_addr(&self) -> Option<&Addr> {
        match self {
            AssetInfo::Cw20 { contract_addr } => Some(contract_addr),
            AssetInfo::Native { .. } => None,
        }
    }
}

impl fmt::Display for AssetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetInfo::Native { denom } => write!(f, "native:{}", denom),
            AssetInfo::Cw20 { contract_addr } => write!(f, "cw20:{}", contract_addr),
        }
    }
}
