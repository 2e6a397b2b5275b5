//! Governance Timelock
//!
//! Holds privileged roles (gateway owner, registry owner, beacon upgrader,
//! verifier owner) and releases calls to them only after a public delay.
//!
//! Operations are identified by `keccak256(json(msgs) ‖ salt)`. Proposers
//! schedule and cancel; executors dispatch once the delay has passed. The
//! minimum delay itself can only change through a scheduled operation.

pub mod contract;
pub mod error;
pub mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
