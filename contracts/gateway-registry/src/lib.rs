//! Gateway Registry Contract
//!
//! Maps `(kind, asset symbol)` to the live mint or lock gateway and its token,
//! and is the one place new gateways come from.
//!
//! # Beacons
//! Each contract family (`mint_gateway`, `lock_gateway`, `token`) has a beacon:
//! the code id new instances are created from. The registry is the wasm admin
//! of every instance, so `UpgradeTo` moves a whole family to new code at once.
//!
//! # Migration
//! `UpdateGateway` swaps in a later generation for a token and records the
//! retired gateway as a legacy alias of its successor.

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
