//! Message types for the signature verifier contract

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary};

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    /// Owner allowed to rotate the authority (a gateway, the registry or governance)
    pub owner: String,
    /// Signer authority as a 20-byte hex address (`0x` prefix optional)
    pub authority: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Replace the signer authority. Effective immediately for every gateway
    /// referencing this verifier.
    UpdateAuthority { authority: String },

    /// Propose a new owner (two-step)
    ProposeOwner { new_owner: String },
    /// Accept a pending ownership proposal
    AcceptOwner {},
    /// Drop a pending ownership proposal
    CancelOwnerProposal {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Check that `signature` was produced by the authority over
    /// `keccak256(selector_hash ‖ payload_hash)`
    #[returns(VerifyResponse)]
    Verify {
        selector_hash: Binary,
        payload_hash: Binary,
        signature: Binary,
    },

    #[returns(AuthorityResponse)]
    Authority {},

    #[returns(OwnerResponse)]
    Owner {},
}

#[cw_serde]
pub struct VerifyResponse {
    pub valid: bool,
}

#[cw_serde]
pub struct AuthorityResponse {
    /// `0x`-prefixed hex address
    pub authority: String,
}

#[cw_serde]
pub struct OwnerResponse {
    pub owner: Addr,
    pub pending_owner: Option<Addr>,
}
