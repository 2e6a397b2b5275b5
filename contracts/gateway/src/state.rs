//! State definitions for the gateway contract
//!
//! Replay-protection ledgers are append-only: nothing in this crate ever
//! removes an entry from `SPENT_N_HASHES` or `SPENT_SIG_HASHES`.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

use common::{AssetInfo, GatewayKind};

pub const CONTRACT_NAME: &str = "crates.io:gateway";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version of the persisted layout below. Bump when a field is added or
/// reinterpreted so `migrate` can refuse a downgrade.
pub const STORAGE_LAYOUT_VERSION: u32 = 1;

// ============================================================================
// Core Configuration
// ============================================================================

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    pub kind: GatewayKind,
    pub asset_symbol: String,
    pub chain_name: String,
    /// `keccak256(asset_symbol ‖ direction_tag ‖ chain_name)`
    pub selector_hash: [u8; 32],
    /// Wrapped CW20 (mint kind) or the locked asset (lock kind)
    pub token: AssetInfo,
    pub signature_verifier: Addr,
    /// Position in the migration lineage, strictly increasing along links
    pub generation: u32,
    pub paused: bool,
}

#[cw_serde]
#[derive(Default)]
pub struct MigrationLinks {
    pub previous_gateway: Option<Addr>,
    pub next_gateway: Option<Addr>,
}

/// Right to mint the wrapped token or to spend the custody balance.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum TokenAuthority {
    /// Deployed or linked, not yet claimed
    Pending,
    /// Settles transfers
    Held,
    /// Handed to the next gateway; never settles again
    Released,
}

impl TokenAuthority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenAuthority::Pending => "pending",
            TokenAuthority::Held => "held",
            TokenAuthority::Released => "released",
        }
    }
}

#[cw_serde]
#[derive(Default)]
pub struct Stats {
    pub inbound_count: u64,
    pub outbound_count: u64,
    pub total_inbound: Uint128,
    pub total_outbound: Uint128,
    pub total_fees: Uint128,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const PENDING_OWNER: Item<Addr> = Item::new("pending_owner");
pub const LINKS: Item<MigrationLinks> = Item::new("migration_links");
pub const TOKEN_AUTHORITY: Item<TokenAuthority> = Item::new("token_authority");
pub const LAYOUT_VERSION: Item<u32> = Item::new("storage_layout_version");

// ============================================================================
// Replay Protection
// ============================================================================

/// nHash -> spent
pub const SPENT_N_HASHES: Map<&[u8], bool> = Map::new("spent_n_hashes");

/// sigHash -> spent
pub const SPENT_SIG_HASHES: Map<&[u8], bool> = Map::new("spent_sig_hashes");

// ============================================================================
// Outbound & Custody
// ============================================================================

/// Next nonce assigned to an outbound commitment
pub const OUTGOING_NONCE: Item<u64> = Item::new("outgoing_nonce");

/// Asset held in custody by a lock gateway
pub const CUSTODY: Item<Uint128> = Item::new("custody");

pub const STATS: Item<Stats> = Item::new("stats");
