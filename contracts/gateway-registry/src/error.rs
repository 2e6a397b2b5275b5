//! Error types for the gateway registry

use cosmwasm_std::StdError;
use thiserror::Error;

use common::FailureKind;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only owner can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only pending owner can accept")]
    UnauthorizedPendingOwner,

    #[error("No pending owner change")]
    NoPendingOwner,

    #[error("Unauthorized: only the {beacon} beacon upgrader can perform this action")]
    NotBeaconUpgrader { beacon: String },

    #[error("No pending upgrader for the {beacon} beacon")]
    NoPendingUpgrader { beacon: String },

    // ========================================================================
    // Registry Errors
    // ========================================================================

    #[error("Symbol {symbol} already registered for {kind} gateways")]
    SymbolAlreadyRegistered { kind: String, symbol: String },

    #[error("Token {token} already registered for {kind} gateways")]
    TokenAlreadyRegistered { kind: String, token: String },

    #[error("No {kind} gateway registered for {key}")]
    GatewayNotFound { kind: String, key: String },

    #[error("Gateway does not match registration: {reason}")]
    GatewayMismatch { reason: String },

    #[error("Gateway {gateway} is not the minter of {token}")]
    NotTokenMinter { gateway: String, token: String },

    #[error("Invalid version: {reason}")]
    InvalidVersion { reason: String },

    #[error("Incompatible migration: {reason}")]
    IncompatibleMigration { reason: String },

    // ========================================================================
    // Request Errors
    // ========================================================================

    #[error("Invalid symbol: {reason}")]
    InvalidSymbol { reason: String },

    #[error("Invalid code id {code_id}")]
    InvalidCodeId { code_id: u64 },

    #[error("Fee {fee_bps} bps exceeds maximum {max_bps} bps")]
    FeeTooHigh { fee_bps: u64, max_bps: u64 },

    #[error("No deployment in progress")]
    NoDeploymentInProgress,

    #[error("Instantiate reply carried no contract address")]
    MissingContractAddress,

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}

impl ContractError {
    /// Failure taxonomy bucket of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            ContractError::Unauthorized
            | ContractError::UnauthorizedPendingOwner
            | ContractError::NotBeaconUpgrader { .. } => FailureKind::PrivilegeViolation,
            ContractError::GatewayMismatch { .. }
            | ContractError::NotTokenMinter { .. }
            | ContractError::IncompatibleMigration { .. } => {
                FailureKind::ConfigurationInconsistency
            }
            _ => FailureKind::InvalidRequest,
        }
    }
}
