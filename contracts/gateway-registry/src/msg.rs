//! Message types for the gateway registry

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

use common::{AssetInfo, GatewayKind};

use crate::state::BeaconKind;

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    pub chain_name: String,
    pub signature_verifier: String,
    /// Owner of deployed gateways; defaults to `owner`
    pub gateway_owner: Option<String>,
    pub mint_fee_bps: u64,
    pub burn_fee_bps: u64,
    pub fee_recipient: Option<String>,
    pub mint_gateway_code_id: u64,
    pub lock_gateway_code_id: u64,
    pub token_code_id: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Deployment (owner)
    // ========================================================================
    /// Instantiate a wrapped CW20 token and its mint gateway, hand the minter
    /// role to the gateway and register the pair.
    DeployMintGatewayAndAsset {
        symbol: String,
        name: String,
        ticker_symbol: String,
        decimals: u8,
        version: u32,
    },
    /// Instantiate a lock gateway for an existing asset and register it.
    DeployLockGateway {
        symbol: String,
        token: AssetInfo,
        version: u32,
    },

    // ========================================================================
    // Registration (owner)
    // ========================================================================
    AddGateway {
        kind: GatewayKind,
        symbol: String,
        token: AssetInfo,
        gateway: String,
    },
    /// Replace the gateway registered for `token`; the old one becomes a
    /// legacy alias of the new one.
    UpdateGateway {
        kind: GatewayKind,
        token: AssetInfo,
        gateway: String,
    },
    RemoveGateway {
        kind: GatewayKind,
        symbol: String,
    },

    // ========================================================================
    // Beacons (beacon upgrader)
    // ========================================================================
    /// Point the beacon at `code_id` and migrate every instance
    UpgradeTo {
        beacon: BeaconKind,
        code_id: u64,
        version: u32,
    },
    TransferBeaconUpgrader {
        beacon: BeaconKind,
        upgrader: String,
    },
    AcceptBeaconUpgrader {
        beacon: BeaconKind,
    },

    // ========================================================================
    // Configuration (owner)
    // ========================================================================
    UpdateDefaults {
        mint_fee_bps: u64,
        burn_fee_bps: u64,
        fee_recipient: Option<String>,
    },
    UpdateSignatureVerifier {
        signature_verifier: String,
    },
    UpdateGatewayOwner {
        gateway_owner: String,
    },
    ProposeOwner {
        new_owner: String,
    },
    AcceptOwner {},
    CancelOwnerProposal {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(GatewayResponse)]
    GatewayBySymbol { kind: GatewayKind, symbol: String },

    /// `token` is a native denom or a CW20 contract address
    #[returns(GatewayResponse)]
    GatewayByToken { kind: GatewayKind, token: String },

    #[returns(AssetResponse)]
    AssetBySymbol { kind: GatewayKind, symbol: String },

    /// Registered symbols; `count == 0` returns every symbol from `from`
    #[returns(SymbolsResponse)]
    GatewaySymbols {
        kind: GatewayKind,
        from: u32,
        count: u32,
    },

    /// Registered gateways; `count == 0` returns every gateway from `from`
    #[returns(GatewaysResponse)]
    Gateways {
        kind: GatewayKind,
        from: u32,
        count: u32,
    },

    /// Resolve a retired gateway to the live one
    #[returns(LegacyGatewayResponse)]
    LegacyGateway { gateway: String },

    #[returns(BeaconResponse)]
    Beacon { beacon: BeaconKind },

    #[returns(ConfigResponse)]
    Config {},

    #[returns(OwnerResponse)]
    Owner {},
}

#[cw_serde]
pub struct GatewayResponse {
    pub kind: GatewayKind,
    pub symbol: String,
    pub gateway: Addr,
    pub token: AssetInfo,
    pub version: u32,
    pub beacon_managed: bool,
    /// The gateway reports itself able to settle transfers
    pub usable: bool,
}

#[cw_serde]
pub struct AssetResponse {
    pub symbol: String,
    pub token: AssetInfo,
    pub usable: bool,
}

#[cw_serde]
pub struct SymbolsResponse {
    pub symbols: Vec<String>,
}

#[cw_serde]
pub struct GatewaysResponse {
    pub gateways: Vec<GatewayResponse>,
}

#[cw_serde]
pub struct LegacyGatewayResponse {
    pub kind: GatewayKind,
    pub symbol: String,
    /// Gateway that directly replaced the queried one
    pub successor: Addr,
    /// End of the alias chain
    pub live_gateway: Addr,
}

#[cw_serde]
pub struct BeaconResponse {
    pub beacon: BeaconKind,
    pub code_id: u64,
    pub version: u32,
    pub upgrader: Addr,
    pub pending_upgrader: Option<Addr>,
    pub instances: Vec<Addr>,
}

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub chain_name: String,
    pub signature_verifier: Addr,
    pub gateway_owner: Addr,
    pub mint_fee_bps: u64,
    pub burn_fee_bps: u64,
    pub fee_recipient: Option<Addr>,
}

#[cw_serde]
pub struct OwnerResponse {
    pub owner: Addr,
    pub pending_owner: Option<Addr>,
}
