//! State definitions for the gateway registry

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

use common::{AssetInfo, GatewayKind};

/// Contract name for migration info
pub const CONTRACT_NAME: &str = "crates.io:gateway-registry";
/// Contract version
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Registry configuration
#[cw_serde]
pub struct Config {
    pub owner: Addr,
    /// Chain name bound into the selector hash of every deployed gateway
    pub chain_name: String,
    pub signature_verifier: Addr,
    /// Owner assigned to gateways the registry deploys
    pub gateway_owner: Addr,
    pub mint_fee_bps: u64,
    pub burn_fee_bps: u64,
    pub fee_recipient: Option<Addr>,
}

/// Contract families the registry deploys and upgrades
#[cw_serde]
#[derive(Copy, Eq)]
pub enum BeaconKind {
    MintGateway,
    LockGateway,
    Token,
}

impl BeaconKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BeaconKind::MintGateway => "mint_gateway",
            BeaconKind::LockGateway => "lock_gateway",
            BeaconKind::Token => "token",
        }
    }

    pub fn for_gateway(kind: GatewayKind) -> Self {
        match kind {
            GatewayKind::Mint => BeaconKind::MintGateway,
            GatewayKind::Lock => BeaconKind::LockGateway,
        }
    }
}

/// Active implementation of one contract family
#[cw_serde]
pub struct Beacon {
    pub code_id: u64,
    pub version: u32,
    pub upgrader: Addr,
    pub pending_upgrader: Option<Addr>,
}

/// Live gateway for one `(kind, symbol)`
#[cw_serde]
pub struct GatewayEntry {
    pub gateway: Addr,
    pub token: AssetInfo,
    /// Generation of the registered gateway
    pub version: u32,
    /// Deployed from a beacon, so `UpgradeTo` migrates it
    pub beacon_managed: bool,
}

/// Retired gateway and the gateway that replaced it
#[cw_serde]
pub struct LegacyGateway {
    pub kind: GatewayKind,
    pub symbol: String,
    pub successor: Addr,
}

/// Deployment carried across the instantiate reply chain
#[cw_serde]
pub struct PendingDeployment {
    pub kind: GatewayKind,
    pub symbol: String,
    pub version: u32,
    /// Known up front for lock gateways; set by the token reply for mint gateways
    pub token: Option<AssetInfo>,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const PENDING_OWNER: Item<Addr> = Item::new("pending_owner");

/// Beacon name → beacon
pub const BEACONS: Map<&str, Beacon> = Map::new("beacons");
/// (beacon name, contract) → instantiated from that beacon
pub const BEACON_INSTANCES: Map<(&str, &Addr), bool> = Map::new("beacon_instances");

/// (kind, symbol) → live gateway
pub const ENTRIES: Map<(&str, &str), GatewayEntry> = Map::new("entries");
/// (kind, token identifier) → symbol
pub const SYMBOL_BY_TOKEN: Map<(&str, &str), String> = Map::new("symbol_by_token");
/// Retired gateway → alias
pub const LEGACY_GATEWAYS: Map<&Addr, LegacyGateway> = Map::new("legacy_gateways");

pub const PENDING_DEPLOYMENT: Item<PendingDeployment> = Item::new("pending_deployment");
