//! Error types for the timelock contract

use cosmwasm_std::StdError;
use thiserror::Error;

use common::FailureKind;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: only a proposer can perform this action")]
    NotProposer,

    #[error("Unauthorized: only an executor can perform this action")]
    NotExecutor,

    #[error("Unauthorized: only the timelock itself can perform this action")]
    NotSelf,

    #[error("Delay {delay} is below the minimum delay {min_delay}")]
    DelayTooShort { delay: u64, min_delay: u64 },

    #[error("Delay {delay} puts the operation beyond the representable time range")]
    DelayTooLong { delay: u64 },

    #[error("Operation {id} is already scheduled")]
    OperationExists { id: String },

    #[error("Operation {id} not found")]
    OperationNotFound { id: String },

    #[error("Operation {id} was already executed")]
    OperationExecuted { id: String },

    #[error("Timelock not expired: {remaining_seconds} seconds remaining")]
    TimelockNotExpired { remaining_seconds: u64 },

    #[error("Operation has no messages")]
    EmptyOperation,

    #[error("At least one proposer is required")]
    NoProposers,
}

impl ContractError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ContractError::NotProposer | ContractError::NotExecutor | ContractError::NotSelf => {
                FailureKind::PrivilegeViolation
            }
            ContractError::OperationExecuted { .. } => FailureKind::ReplayConflict,
            ContractError::Std(_)
            | ContractError::DelayTooShort { .. }
            | ContractError::DelayTooLong { .. }
            | ContractError::OperationExists { .. }
            | ContractError::OperationNotFound { .. }
            | ContractError::TimelockNotExpired { .. }
            | ContractError::EmptyOperation
            | ContractError::NoProposers => FailureKind::InvalidRequest,
        }
    }
}
