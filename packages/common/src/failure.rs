//! Failure taxonomy shared by the protocol contracts.
//!
//! Reason strings vary per contract; the kind is what integrators branch on.
//! In particular a replay conflict must stay distinguishable from a
//! verification failure: the first means "already settled, never resubmit",
//! the second means "the authority did not sign this, retry after a fix".

use cosmwasm_schema::cw_serde;

#[cw_serde]
#[derive(Copy, Eq)]
pub enum FailureKind {
    /// A nonce hash or signature hash was already spent.
    ReplayConflict,
    /// The authorization does not validate against the current authority.
    VerificationFailure,
    /// Selector hash, registry binding, or storage layout mismatch.
    ConfigurationInconsistency,
    /// A migration link or authority handoff is incomplete.
    MigrationNotReady,
    /// A privileged operation was invoked by a non-authorized caller.
    PrivilegeViolation,
    /// Malformed or out-of-range input, or the target is paused.
    InvalidRequest,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::ReplayConflict => "replay_conflict",
            FailureKind::VerificationFailure => "verification_failure",
            FailureKind::ConfigurationInconsistency => "configuration_inconsistency",
            FailureKind::MigrationNotReady => "migration_not_ready",
            FailureKind::PrivilegeViolation => "privilege_violation",
            FailureKind::InvalidRequest => "invalid_request",
        }
    }
}
