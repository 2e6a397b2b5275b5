use cosmwasm_schema::cw_serde;

/// Which transfer legs a gateway implements.
///
/// - `Mint`: inbound mints a wrapped CW20 token, outbound burns it.
/// - `Lock`: outbound takes the asset into custody, inbound releases it.
#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub enum GatewayKind {
    Mint,
    Lock,
}

impl GatewayKind {
    /// Storage/attribute form of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayKind::Mint => "mint",
            GatewayKind::Lock => "lock",
        }
    }

    /// Direction tag bound into the selector hash.
    ///
    /// A mint gateway authorizes assets moving *to* this chain; a lock
    /// gateway authorizes releases of assets coming back *from* elsewhere.
    pub fn direction_tag(&self) -> &'static str {
        match self {
            GatewayKind::Mint => "/to",
            GatewayKind::Lock => "/from",
        }
    }
}
