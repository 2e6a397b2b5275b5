//! Shared cw-multi-test setup for the gateway integration tests.

#![allow(dead_code, unused_macros)]

use cosmwasm_std::{coins, from_json, Addr, Binary, Empty, Uint128};
use cw20::{BalanceResponse, Cw20QueryMsg, MinterResponse, TokenInfoResponse};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};
use k256::ecdsa::SigningKey;

use common::hash::{eth_address, hash_for_signature, keccak256, verifier_message};
use common::{AssetInfo, GatewayKind};
use gateway::msg::{ExecuteMsg, InstantiateMsg, QueryMsg, SelectorHashResponse};

pub const ADMIN: &str = "terra1admin";
pub const USER: &str = "terra1user";
pub const OTHER_USER: &str = "terra1other";
pub const FEE_COLLECTOR: &str = "terra1feecollector";
pub const CHAIN: &str = "Terra";
pub const DENOM: &str = "uluna";

/// Fail with a gateway error matching `$pat`.
macro_rules! assert_gateway_err {
    ($res:expr, $pat:pat) => {{
        let err = $res.unwrap_err();
        match err.root_cause().downcast_ref::<gateway::ContractError>() {
            Some(e) => assert!(matches!(e, $pat), "unexpected error: {}", e),
            None => panic!("not a gateway error: {}", err),
        }
    }};
}

/// Failure kind of a gateway error.
macro_rules! failure_kind {
    ($res:expr) => {
        $res.unwrap_err()
            .root_cause()
            .downcast_ref::<gateway::ContractError>()
            .map(|e| e.kind())
    };
}

// ============================================================================
// Contracts
// ============================================================================

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
    );
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

/// 65-byte `r ‖ s ‖ v` signature over `keccak256(selector_hash ‖ sig_hash)`
pub fn sign(key: &SigningKey, selector_hash: &[u8; 32], sig_hash: &[u8; 32]) -> Binary {
    let digest = verifier_message(selector_hash, sig_hash);
    let (signature, recovery_id) = key.sign_prehash_recoverable(&digest).unwrap();
    let mut out = signature.to_bytes().to_vec();
    out.push(recovery_id.to_byte() + 27);
    Binary::from(out)
}

/// A signed inbound transfer ready to submit
#[derive(Clone)]
pub struct SignedTransfer {
    pub p_hash: Binary,
    pub amount: Uint128,
    pub n_hash: Binary,
    pub sig: Binary,
    pub sig_hash: [u8; 32],
}

impl SignedTransfer {
    pub fn mint_msg(&self) -> ExecuteMsg {
        ExecuteMsg::Mint {
            p_hash: self.p_hash.clone(),
            amount: self.amount,
            n_hash: self.n_hash.clone(),
            sig: self.sig.clone(),
        }
    }

    pub fn release_msg(&self) -> ExecuteMsg {
        ExecuteMsg::Release {
            p_hash: self.p_hash.clone(),
            amount: self.amount,
            n_hash: self.n_hash.clone(),
            sig: self.sig.clone(),
        }
    }
}

// ============================================================================
// Suite
// ============================================================================

pub struct Suite {
    pub app: App,
    pub admin: Addr,
    pub user: Addr,
    pub verifier: Addr,
    pub signer: SigningKey,
    pub gateway_code: u64,
    pub cw20_code: u64,
    pub verifier_code: u64,
}

impl Suite {
    pub fn new() -> Self {
        let mut app = App::default();
        let admin = Addr::unchecked(ADMIN);
        let user = Addr::unchecked(USER);
        let other = Addr::unchecked(OTHER_USER);

        app.init_modules(|router, _, storage| {
            for account in [&admin, &user, &other] {
                router
                    .bank
                    .init_balance(storage, account, coins(10_000_000_000, DENOM))
                    .unwrap();
            }
        });

        let gateway_code = app.store_code(contract_gateway());
        let cw20_code = app.store_code(contract_cw20());
        let verifier_code = app.store_code(contract_verifier());

        let key = signer(7);
        let verifier = app
            .instantiate_contract(
                verifier_code,
                admin.clone(),
                &signature_verifier::msg::InstantiateMsg {
                    owner: admin.to_string(),
                    authority: signer_address(&key),
                },
                &[],
                "signature-verifier",
                Some(admin.to_string()),
            )
            .unwrap();

        Suite {
            app,
            admin,
            user,
            verifier,
            signer: key,
            gateway_code,
            cw20_code,
            verifier_code,
        }
    }

    pub fn cw20_token(&mut self, symbol: &str, minter: &Addr) -> Addr {
        self.app
            .instantiate_contract(
                self.cw20_code,
                self.admin.clone(),
                &cw20_base::msg::InstantiateMsg {
                    name: format!("Wrapped {}", symbol),
                    symbol: symbol.to_string(),
                    decimals: 8,
                    initial_balances: vec![],
                    mint: Some(MinterResponse {
                        minter: minter.to_string(),
                        cap: None,
                    }),
                    marketing: None,
                },
                &[],
                symbol,
                Some(self.admin.to_string()),
            )
            .unwrap()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn gateway(
        &mut self,
        kind: GatewayKind,
        symbol: &str,
        token: AssetInfo,
        generation: u32,
        mint_fee_bps: u64,
        burn_fee_bps: u64,
        fee_recipient: Option<&str>,
    ) -> Addr {
        self.app
            .instantiate_contract(
                self.gateway_code,
                self.admin.clone(),
                &InstantiateMsg {
                    owner: self.admin.to_string(),
                    kind,
                    asset_symbol: symbol.to_string(),
                    chain_name: CHAIN.to_string(),
                    token,
                    signature_verifier: self.verifier.to_string(),
                    generation,
                    mint_fee_bps,
                    burn_fee_bps,
                    fee_recipient: fee_recipient.map(str::to_string),
                },
                &[],
                format!("{}-{}-gateway-{}", symbol, kind.as_str(), generation),
                Some(self.admin.to_string()),
            )
            .unwrap()
    }

    /// Wrapped token plus a mint gateway that holds its minter role.
    pub fn mint_gateway(
        &mut self,
        mint_fee_bps: u64,
        burn_fee_bps: u64,
        fee_recipient: Option<&str>,
    ) -> (Addr, Addr) {
        let admin = self.admin.clone();
        let token = self.cw20_token("BTC", &admin);
        let gateway = self.gateway(
            GatewayKind::Mint,
            "BTC",
            AssetInfo::Cw20 {
                contract_addr: token.clone(),
            },
            1,
            mint_fee_bps,
            burn_fee_bps,
            fee_recipient,
        );
        self.hand_minter(&token, &gateway);
        self.claim(&gateway);
        (gateway, token)
    }

    /// Native lock gateway that holds its custody authority.
    pub fn lock_gateway(
        &mut self,
        mint_fee_bps: u64,
        burn_fee_bps: u64,
        fee_recipient: Option<&str>,
    ) -> Addr {
        let gateway = self.gateway(
            GatewayKind::Lock,
            "LUNA",
            AssetInfo::Native {
                denom: DENOM.to_string(),
            },
            1,
            mint_fee_bps,
            burn_fee_bps,
            fee_recipient,
        );
        self.claim(&gateway);
        gateway
    }

    pub fn hand_minter(&mut self, token: &Addr, gateway: &Addr) {
        self.app
            .execute_contract(
                self.admin.clone(),
                token.clone(),
                &cw20::Cw20ExecuteMsg::UpdateMinter {
                    new_minter: Some(gateway.to_string()),
                },
                &[],
            )
            .unwrap();
    }

    pub fn claim(&mut self, gateway: &Addr) {
        self.app
            .execute_contract(
                self.admin.clone(),
                gateway.clone(),
                &ExecuteMsg::ClaimTokenAuthority {},
                &[],
            )
            .unwrap();
    }

    pub fn selector_hash(&self, gateway: &Addr) -> [u8; 32] {
        let res: SelectorHashResponse = self
            .app
            .wrap()
            .query_wasm_smart(gateway, &QueryMsg::SelectorHash {})
            .unwrap();
        res.selector_hash.to_vec().try_into().unwrap()
    }

    /// Sign an inbound transfer to `recipient` with the suite's authority key.
    pub fn signed(&self, gateway: &Addr, recipient: &Addr, amount: u128, nonce: &str) -> SignedTransfer {
        self.signed_by(&self.signer, gateway, recipient, amount, nonce)
    }

    pub fn signed_by(
        &self,
        key: &SigningKey,
        gateway: &Addr,
        recipient: &Addr,
        amount: u128,
        nonce: &str,
    ) -> SignedTransfer {
        let selector = self.selector_hash(gateway);
        let p_hash = keccak256(format!("payload:{}", nonce).as_bytes());
        let n_hash = keccak256(format!("nonce:{}", nonce).as_bytes());
        let sig_hash = hash_for_signature(&p_hash, amount, &selector, recipient.as_str(), &n_hash);
        SignedTransfer {
            p_hash: Binary::from(p_hash.to_vec()),
            amount: Uint128::new(amount),
            n_hash: Binary::from(n_hash.to_vec()),
            sig: sign(key, &selector, &sig_hash),
            sig_hash,
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

    pub fn total_supply(&self, token: &Addr) -> u128 {
        let res: TokenInfoResponse = self
            .app
            .wrap()
            .query_wasm_smart(token, &Cw20QueryMsg::TokenInfo {})
            .unwrap();
        res.total_supply.u128()
    }

    pub fn native_balance(&self, account: &str) -> u128 {
        self.app
            .wrap()
            .query_balance(account, DENOM)
            .unwrap()
            .amount
            .u128()
    }

    pub fn query<T: serde::de::DeserializeOwned>(&self, gateway: &Addr, msg: &QueryMsg) -> T {
        self.app.wrap().query_wasm_smart(gateway, msg).unwrap()
    }
}

/// Decode the JSON response data of an execution.
pub fn response_data<T: serde::de::DeserializeOwned>(data: Option<Binary>) -> T {
    from_json(data.expect("response data")).unwrap()
}

/// Attribute `key` emitted by `contract` in its wasm event.
pub fn wasm_attr(res: &AppResponse, contract: &Addr, key: &str) -> Option<String> {
    res.events
        .iter()
        .filter(|e| e.ty == "wasm")
        .filter(|e| {
            e.attributes
                .iter()
                .any(|a| a.key == "_contract_address" && a.value == contract.as_str())
        })
        .flat_map(|e| e.attributes.iter())
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
}
