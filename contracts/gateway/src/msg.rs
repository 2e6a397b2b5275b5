//! Message types for the gateway contract

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

use common::{AssetInfo, GatewayKind};

use crate::state::TokenAuthority;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    pub kind: GatewayKind,
    /// Asset symbol bound into the selector hash (e.g. "BTC")
    pub asset_symbol: String,
    /// Chain name bound into the selector hash (e.g. "Terra")
    pub chain_name: String,
    /// Wrapped CW20 token (mint kind) or the asset taken into custody (lock kind)
    pub token: AssetInfo,
    pub signature_verifier: String,
    /// Position in the migration lineage; successors must use a larger value
    pub generation: u32,
    pub mint_fee_bps: u64,
    pub burn_fee_bps: u64,
    pub fee_recipient: Option<String>,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Inbound Transfers
    // ========================================================================
    /// Mint `amount` of the wrapped token to the caller (mint kind).
    ///
    /// The signature must cover
    /// `keccak256(p_hash ‖ amount ‖ selector_hash ‖ keccak256(caller) ‖ n_hash)`.
    Mint {
        p_hash: Binary,
        amount: Uint128,
        n_hash: Binary,
        sig: Binary,
    },
    /// Release `amount` from custody to the caller (lock kind).
    Release {
        p_hash: Binary,
        amount: Uint128,
        n_hash: Binary,
        sig: Binary,
    },

    // ========================================================================
    // Outbound Transfers
    // ========================================================================
    /// Take the attached native funds into custody (lock kind)
    Lock {
        to: String,
        to_chain: String,
        payload: Option<Binary>,
    },
    /// CW20 receiver hook: burn (mint kind), lock (lock kind), custody handoff
    Receive(cw20::Cw20ReceiveMsg),

    // ========================================================================
    // Forwarding (accepted only from the previous gateway)
    // ========================================================================
    ForwardedMint {
        sender: String,
        p_hash: Binary,
        amount: Uint128,
        n_hash: Binary,
        sig: Binary,
    },
    ForwardedRelease {
        sender: String,
        p_hash: Binary,
        amount: Uint128,
        n_hash: Binary,
        sig: Binary,
    },
    ForwardedLock {
        sender: String,
        to: String,
        to_chain: String,
        payload: Option<Binary>,
    },
    /// Native custody balance handed over by the previous gateway
    AcceptCustody {},

    // ========================================================================
    // Migration
    // ========================================================================
    /// Point this gateway at its successor; transfers are relayed from then on
    UpdateNextGateway { gateway: String },
    /// Record the predecessor whose ledger and custody this gateway inherits
    UpdatePreviousGateway { gateway: String },
    /// Hand minter role or custody to the next gateway
    TransferTokenAuthority {},
    /// Start settling once the token authority is objectively held
    ClaimTokenAuthority {},

    // ========================================================================
    // Configuration (owner)
    // ========================================================================
    UpdateMintFee { fee_bps: u64 },
    UpdateBurnFee { fee_bps: u64 },
    UpdateFeeRecipient { fee_recipient: Option<String> },
    /// Only accepted when equal to the hash recomputed from the stored asset
    UpdateSelectorHash { selector_hash: Binary },
    UpdateAsset {
        asset_symbol: String,
        chain_name: String,
    },
    UpdateSignatureVerifier { signature_verifier: String },
    /// Rotate the authority of the referenced verifier. Fails unless this
    /// gateway owns that verifier.
    UpdateMintAuthority { authority: String },

    // ========================================================================
    // Admin
    // ========================================================================
    Pause {},
    Unpause {},
    ProposeOwner { new_owner: String },
    AcceptOwner {},
    CancelOwnerProposal {},
}

/// Messages carried inside a CW20 `Send`
#[cw_serde]
pub enum ReceiveMsg {
    /// Burn the sent wrapped tokens and commit an outbound transfer (mint kind)
    Burn {
        to: String,
        payload: Option<Binary>,
    },
    /// Lock the sent CW20 tokens and commit an outbound transfer (lock kind)
    Lock {
        to: String,
        to_chain: String,
        payload: Option<Binary>,
    },
    ForwardedBurn {
        sender: String,
        to: String,
        payload: Option<Binary>,
    },
    ForwardedLock {
        sender: String,
        to: String,
        to_chain: String,
        payload: Option<Binary>,
    },
    /// CW20 custody balance handed over by the previous gateway
    AcceptCustody {},
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(FeeConfigResponse)]
    FeeConfig {},

    #[returns(SelectorHashResponse)]
    SelectorHash {},

    #[returns(MigrationLinksResponse)]
    MigrationLinks {},

    #[returns(TokenAuthorityResponse)]
    TokenAuthority {},

    /// Spent status across the whole lineage, predecessors and successors
    #[returns(IsSpentResponse)]
    IsSpent { n_hash: Binary, sig_hash: Binary },

    /// Whether a signature hash has been settled in any generation
    #[returns(StatusResponse)]
    Status { sig_hash: Binary },

    /// Spent status in this gateway and the generations on one side of it.
    /// Linked gateways use this to walk the lineage without looping back.
    #[returns(IsSpentResponse)]
    LineageSpent {
        n_hash: Option<Binary>,
        sig_hash: Binary,
        direction: LineageDirection,
    },

    /// Signature hash a transfer to `recipient` must be authorized under
    #[returns(HashForSignatureResponse)]
    HashForSignature {
        p_hash: Binary,
        amount: Uint128,
        recipient: String,
        n_hash: Binary,
    },

    #[returns(NonceResponse)]
    CurrentNonce {},

    #[returns(CustodyResponse)]
    Custody {},

    #[returns(StatsResponse)]
    Stats {},

    /// Whether the gateway can settle transfers right now
    #[returns(HealthResponse)]
    Health {},

    #[returns(OwnerResponse)]
    Owner {},
}

#[cw_serde]
pub enum LineageDirection {
    Previous,
    Next,
}

// ============================================================================
// Responses
// ============================================================================

/// Response data of an inbound leg
#[cw_serde]
pub struct InboundResponse {
    pub net_amount: Uint128,
}

/// Response data of an outbound leg
#[cw_serde]
pub struct OutboundResponse {
    pub nonce: u64,
}

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub kind: GatewayKind,
    pub asset_symbol: String,
    pub chain_name: String,
    pub token: AssetInfo,
    pub signature_verifier: Addr,
    pub generation: u32,
    pub paused: bool,
}

#[cw_serde]
pub struct FeeConfigResponse {
    pub mint_fee_bps: u64,
    pub burn_fee_bps: u64,
    pub fee_recipient: Option<Addr>,
}

#[cw_serde]
pub struct SelectorHashResponse {
    pub selector_hash: Binary,
    /// Stored hash equals the one recomputed from symbol, kind and chain
    pub consistent: bool,
}

#[cw_serde]
pub struct MigrationLinksResponse {
    pub previous_gateway: Option<Addr>,
    pub next_gateway: Option<Addr>,
    pub generation: u32,
}

#[cw_serde]
pub struct TokenAuthorityResponse {
    pub state: TokenAuthority,
}

#[cw_serde]
pub struct IsSpentResponse {
    pub n_hash_spent: bool,
    pub sig_hash_spent: bool,
}

#[cw_serde]
pub struct StatusResponse {
    pub spent: bool,
}

#[cw_serde]
pub struct HashForSignatureResponse {
    pub sig_hash: Binary,
}

#[cw_serde]
pub struct NonceResponse {
    pub nonce: u64,
}

#[cw_serde]
pub struct CustodyResponse {
    pub asset: AssetInfo,
    pub amount: Uint128,
}

#[cw_serde]
pub struct StatsResponse {
    pub inbound_count: u64,
    pub outbound_count: u64,
    pub total_inbound: Uint128,
    pub total_outbound: Uint128,
    pub total_fees: Uint128,
}

#[cw_serde]
pub struct HealthResponse {
    pub selector_consistent: bool,
    pub token_authority: TokenAuthority,
    pub forwarding: bool,
    pub paused: bool,
    /// All of the above allow settlement
    pub usable: bool,
}

#[cw_serde]
pub struct OwnerResponse {
    pub owner: Addr,
    pub pending_owner: Option<Addr>,
}
