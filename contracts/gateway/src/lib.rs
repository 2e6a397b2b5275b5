//! Mint/Lock Gateway Contract
//!
//! Settles signed inbound transfers and records outbound ones for a single
//! asset on a single chain.
//!
//! # Kinds
//! - **Mint**: inbound mints a wrapped CW20 token; outbound burns it.
//! - **Lock**: outbound takes the asset into custody; inbound releases it.
//!
//! # Inbound authorization
//! A transfer is settled once per nonce hash (`nHash`) and once per signature
//! hash (`sigHash`), across every generation of the gateway, and only when the
//! signature verifier confirms the authority signed
//! `keccak256(selector_hash ‖ sigHash)`.
//!
//! # Migration
//! Gateways form a lineage through `previous`/`next` links. A gateway with a
//! successor relays every transfer to it; see [`forwarder`].

pub mod contract;
pub mod error;
pub mod execute;
pub mod fee;
pub mod forwarder;
pub mod ledger;
pub mod msg;
pub mod query;
pub mod state;

pub use crate::error::ContractError;
