//! Error types for the gateway contract
//!
//! Every variant maps onto one `FailureKind` so integrators can tell a replay
//! apart from a bad signature without parsing reason strings.

use cosmwasm_std::{StdError, Uint128};
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

    #[error("Unauthorized: forwarded transfers are only accepted from the previous gateway")]
    UnauthorizedForwarder,

    #[error("No pending owner change")]
    NoPendingOwner,

    // ========================================================================
    // Replay Errors
    // ========================================================================

    #[error("Nonce hash already spent: {n_hash}")]
    NonceAlreadySpent { n_hash: String },

    #[error("Signature hash already spent: {sig_hash}")]
    SignatureAlreadySpent { sig_hash: String },

    // ========================================================================
    // Verification Errors
    // ========================================================================

    #[error("Signature verification failed")]
    VerificationFailed,

    // ========================================================================
    // Configuration Errors
    // ========================================================================

    #[error("Selector hash mismatch: expected {expected}, got {got}")]
    SelectorHashMismatch { expected: String, got: String },

    #[error("Incompatible migration: {reason}")]
    IncompatibleMigration { reason: String },

    #[error("Token mismatch: {reason}")]
    TokenMismatch { reason: String },

    #[error("Invalid migration link: {reason}")]
    InvalidLink { reason: String },

    // ========================================================================
    // Migration Errors
    // ========================================================================

    #[error("Migration not ready: {reason}")]
    MigrationNotReady { reason: String },

    #[error("Token authority already held")]
    TokenAuthorityAlreadyHeld,

    #[error("Token authority has been released to the next gateway")]
    TokenAuthorityReleased,

    // ========================================================================
    // Request Errors
    // ========================================================================

    #[error("Gateway is paused")]
    Paused,

    #[error("Operation requires a {expected} gateway")]
    WrongKind { expected: String },

    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Invalid hash: {reason}")]
    InvalidHash { reason: String },

    #[error("Invalid funds: {reason}")]
    InvalidFunds { reason: String },

    #[error("Invalid asset: {reason}")]
    InvalidAsset { reason: String },

    #[error("Invalid destination: {reason}")]
    InvalidDestination { reason: String },

    #[error("Fee {fee_bps} bps exceeds maximum {max_bps} bps")]
    FeeTooHigh { fee_bps: u64, max_bps: u64 },

    #[error("Insufficient custody: available {available}, required {required}")]
    InsufficientCustody {
        available: Uint128,
        required: Uint128,
    },

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}

impl ContractError {
    /// Failure taxonomy bucket of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            ContractError::NonceAlreadySpent { .. } | ContractError::SignatureAlreadySpent { .. } => {
                FailureKind::ReplayConflict
            }
            ContractError::VerificationFailed => FailureKind::VerificationFailure,
            ContractError::SelectorHashMismatch { .. }
            | ContractError::IncompatibleMigration { .. }
            | ContractError::TokenMismatch { .. }
            | ContractError::InvalidLink { .. } => FailureKind::ConfigurationInconsistency,
            ContractError::MigrationNotReady { .. } => FailureKind::MigrationNotReady,
            ContractError::Unauthorized
            | ContractError::UnauthorizedPendingOwner
            | ContractError::UnauthorizedForwarder => FailureKind::PrivilegeViolation,
            ContractError::Std(_)
            | ContractError::NoPendingOwner
            | ContractError::TokenAuthorityAlreadyHeld
            | ContractError::TokenAuthorityReleased
            | ContractError::Paused
            | ContractError::WrongKind { .. }
            | ContractError::ZeroAmount
            | ContractError::InvalidHash { .. }
            | ContractError::InvalidFunds { .. }
            | ContractError::InvalidAsset { .. }
            | ContractError::InvalidDestination { .. }
            | ContractError::FeeTooHigh { .. }
            | ContractError::InsufficientCustody { .. }
            | ContractError::UnknownReplyId { .. } => FailureKind::InvalidRequest,
        }
    }

    pub(crate) fn not_ready(reason: impl Into<String>) -> Self {
        ContractError::MigrationNotReady {
            reason: reason.into(),
        }
    }
}
