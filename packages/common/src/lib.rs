//! Common - Shared Types and Utilities for the Gateway Protocol Contracts
//!
//! This package provides the asset and gateway-kind types, the keccak256
//! hashing scheme that binds signatures to a gateway channel, and the failure
//! taxonomy shared by the gateway, registry, and signature verifier contracts.

pub mod asset;
pub mod failure;
pub mod hash;
pub mod kind;

pub use asset::AssetInfo;
pub use failure::FailureKind;
pub use kind::GatewayKind;
