//! cw-multi-test setup for the registry: real gateways, tokens and verifier.

#![allow(dead_code, unused_macros)]

use cosmwasm_std::{coins, Addr, Binary, Empty, Uint128};
use cw20::{BalanceResponse, Cw20QueryMsg};
use cw_multi_test::{App, Contract, ContractWrapper, Executor};
use k256::ecdsa::SigningKey;

use common::hash::{eth_address, hash_for_signature, keccak256, verifier_message};
use common::{AssetInfo, GatewayKind};
use gateway::msg::{
    ExecuteMsg as GatewayExecuteMsg, InstantiateMsg as GatewayInstantiateMsg,
    QueryMsg as GatewayQueryMsg, SelectorHashResponse,
};
use gateway_registry::msg::{ExecuteMsg, GatewayResponse, InstantiateMsg, QueryMsg};

pub const OWNER: &str = "terra1owner";
pub const USER: &str = "terra1user";
pub const FEE_COLLECTOR: &str = "terra1feecollector";
pub const CHAIN: &str = "Terra";
pub const DENOM: &str = "uluna";

/// Fail with a registry error matching `$pat`.
macro_rules! assert_registry_err {
    ($res:expr, $pat:pat) => {{
        let err = $res.unwrap_err();
        match err.root_cause().downcast_ref::<gateway_registry::ContractError>() {
            Some(e) => assert!(matches!(e, $pat), "unexpected error: {}", e),
            None => panic!("not a registry error: {}", err),
        }
    }};
}

// ============================================================================
// Contracts
// ============================================================================

pub fn contract_registry() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        gateway_registry::contract::execute,
        gateway_registry::contract::instantiate,
        gateway_registry::contract::query,
    )
    .with_reply(gateway_registry::contract::reply)
    .with_migrate(gateway_registry::contract::migrate);
    Box::new(contract)
}

pub fn contract_gateway() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        gateway::contract::execute,
        gateway::contract::instantiate,
        gateway::contract::query,
    )
    .with_reply(gateway::contract::reply)
    .with_migrate(gateway::contract::migrate);
    Box::new(contract)
}

pub fn contract_cw20() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    )
    .with_migrate(cw20_base::contract::migrate);
    Box::new(contract)
}

pub fn contract_verifier() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        signature_verifier::contract::execute,
        signature_verifier::contract::instantiate,
        signature_verifier::contract::query,
    );
    Box::new(contract)
}

// ============================================================================
// Signing
// ============================================================================

pub fn signer(seed: u8) -> SigningKey {
    SigningKey::from_slice(&[seed; 32]).unwrap()
}

pub fn signer_address(key: &SigningKey) -> String {
    let point = key.verifying_key().to_encoded_point(false);
    format!("0x{}", hex::encode(eth_address(point.as_bytes()).unwrap()))
}

fn sign(key: &SigningKey, selector_hash: &[u8; 32], sig_hash: &[u8; 32]) -> Binary {
    let digest = verifier_message(selector_hash, sig_hash);
    let (signature, recovery_id) = key.sign_prehash_recoverable(&digest).unwrap();
    let mut out = signature.to_bytes().to_vec();
    out.push(recovery_id.to_byte() + 27);
    Binary::from(out)
}

// ============================================================================
// Suite
// ============================================================================

pub struct Suite {
    pub app: App,
    pub owner: Addr,
    pub user: Addr,
    pub signer: SigningKey,
    pub verifier: Addr,
    pub registry: Addr,
    pub gateway_code: u64,
    pub cw20_code: u64,
}

impl Suite {
    pub fn new() -> Self {
        Self::with_fees(0, 0, None)
    }

    pub fn with_fees(mint_fee_bps: u64, burn_fee_bps: u64, fee_recipient: Option<&str>) -> Self {
        let mut app = App::default();
        let owner = Addr::unchecked(OWNER);
        let user = Addr::unchecked(USER);

        app.init_modules(|router, _, storage| {
            for account in [&owner, &user] {
                router
                    .bank
                    .init_balance(storage, account, coins(10_000_000_000, DENOM))
                    .unwrap();
            }
        });

        let registry_code = app.store_code(contract_registry());
        let gateway_code = app.store_code(contract_gateway());
        let cw20_code = app.store_code(contract_cw20());
        let verifier_code = app.store_code(contract_verifier());

        let key = signer(11);
        let verifier = app
            .instantiate_contract(
                verifier_code,
                owner.clone(),
                &signature_verifier::msg::InstantiateMsg {
                    owner: owner.to_string(),
                    authority: signer_address(&key),
                },
                &[],
                "signature-verifier",
                Some(owner.to_string()),
            )
            .unwrap();

        let registry = app
            .instantiate_contract(
                registry_code,
                owner.clone(),
                &InstantiateMsg {
                    owner: owner.to_string(),
                    chain_name: CHAIN.to_string(),
                    signature_verifier: verifier.to_string(),
                    gateway_owner: None,
                    mint_fee_bps,
                    burn_fee_bps,
                    fee_recipient: fee_recipient.map(str::to_string),
                    mint_gateway_code_id: gateway_code,
                    lock_gateway_code_id: gateway_code,
                    token_code_id: cw20_code,
                },
                &[],
                "gateway-registry",
                Some(owner.to_string()),
            )
            .unwrap();

        Suite {
            app,
            owner,
            user,
            signer: key,
            verifier,
            registry,
            gateway_code,
            cw20_code,
        }
    }

    pub fn execute(&mut self, msg: &ExecuteMsg) -> cw_multi_test::AppResponse {
        self.app
            .execute_contract(self.owner.clone(), self.registry.clone(), msg, &[])
            .unwrap()
    }

    /// Deploy a wrapped token and its mint gateway through the registry.
    pub fn deploy_mint(&mut self, symbol: &str, version: u32) -> GatewayResponse {
        self.execute(&ExecuteMsg::DeployMintGatewayAndAsset {
            symbol: symbol.to_string(),
            name: format!("Wrapped {}", symbol),
            ticker_symbol: format!("W{}", symbol),
            decimals: 8,
            version,
        });
        self.by_symbol(GatewayKind::Mint, symbol)
    }

    pub fn deploy_lock(&mut self, symbol: &str, token: AssetInfo, version: u32) -> GatewayResponse {
        self.execute(&ExecuteMsg::DeployLockGateway {
            symbol: symbol.to_string(),
            token,
            version,
        });
        self.by_symbol(GatewayKind::Lock, symbol)
    }

    /// Gateway instantiated outside the registry, owned by the registry owner.
    pub fn standalone_gateway(
        &mut self,
        kind: GatewayKind,
        symbol: &str,
        token: AssetInfo,
        generation: u32,
    ) -> Addr {
        self.app
            .instantiate_contract(
                self.gateway_code,
                self.owner.clone(),
                &GatewayInstantiateMsg {
                    owner: self.owner.to_string(),
                    kind,
                    asset_symbol: symbol.to_string(),
                    chain_name: CHAIN.to_string(),
                    token,
                    signature_verifier: self.verifier.to_string(),
                    generation,
                    mint_fee_bps: 0,
                    burn_fee_bps: 0,
                    fee_recipient: None,
                },
                &[],
                format!("{}-{}-{}", symbol, kind.as_str(), generation),
                Some(self.owner.to_string()),
            )
            .unwrap()
    }

    /// Link `previous -> next`, hand over token authority and claim it.
    pub fn migrate_gateway(&mut self, previous: &Addr, next: &Addr) {
        let owner = self.owner.clone();
        for (contract, msg) in [
            (
                next,
                GatewayExecuteMsg::UpdatePreviousGateway {
                    gateway: previous.to_string(),
                },
            ),
            (
                previous,
                GatewayExecuteMsg::UpdateNextGateway {
                    gateway: next.to_string(),
                },
            ),
            (previous, GatewayExecuteMsg::TransferTokenAuthority {}),
            (next, GatewayExecuteMsg::ClaimTokenAuthority {}),
        ] {
            self.app
                .execute_contract(owner.clone(), contract.clone(), &msg, &[])
                .unwrap();
        }
    }

    pub fn by_symbol(&self, kind: GatewayKind, symbol: &str) -> GatewayResponse {
        self.query(&QueryMsg::GatewayBySymbol {
            kind,
            symbol: symbol.to_string(),
        })
    }

    pub fn query<T: serde::de::DeserializeOwned>(&self, msg: &QueryMsg) -> T {
        self.app.wrap().query_wasm_smart(&self.registry, msg).unwrap()
    }

    /// Mint message for `recipient` signed by the suite's authority key.
    pub fn signed_mint(
        &self,
        gateway: &Addr,
        recipient: &Addr,
        amount: u128,
        nonce: &str,
    ) -> GatewayExecuteMsg {
        let res: SelectorHashResponse = self
            .app
            .wrap()
            .query_wasm_smart(gateway, &GatewayQueryMsg::SelectorHash {})
            .unwrap();
        let selector: [u8; 32] = res.selector_hash.to_vec().try_into().unwrap();
        let p_hash = keccak256(format!("payload:{}", nonce).as_bytes());
        let n_hash = keccak256(format!("nonce:{}", nonce).as_bytes());
        let sig_hash = hash_for_signature(&p_hash, amount, &selector, recipient.as_str(), &n_hash);
        GatewayExecuteMsg::Mint {
            p_hash: Binary::from(p_hash.to_vec()),
            amount: Uint128::new(amount),
            n_hash: Binary::from(n_hash.to_vec()),
            sig: sign(&self.signer, &selector, &sig_hash),
        }
    }

    pub fn cw20_balance(&self, token: &Addr, account: &str) -> u128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                token,
                &Cw20QueryMsg::Balance {
                    address: account.to_string(),
                },
            )
            .unwrap();
        res.balance.u128()
    }
}

pub fn cw20_of(token: &AssetInfo) -> Addr {
    token.cw20_addr().cloned().expect("cw20 token")
}
