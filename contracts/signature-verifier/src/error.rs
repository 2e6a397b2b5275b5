//! Error types for the signature verifier contract

use cosmwasm_std::StdError;
use thiserror::Error;

use common::FailureKind;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: only owner can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only pending owner can accept")]
    UnauthorizedPendingOwner,

    #[error("No pending owner change")]
    NoPendingOwner,

    #[error("Invalid authority: {reason}")]
    InvalidAuthority { reason: String },
}

impl ContractError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ContractError::Unauthorized | ContractError::UnauthorizedPendingOwner => {
                FailureKind::PrivilegeViolation
            }
            ContractError::Std(_)
            | ContractError::NoPendingOwner
            | ContractError::InvalidAuthority { .. } => FailureKind::InvalidRequest,
        }
    }
}
