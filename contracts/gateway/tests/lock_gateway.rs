//! Lock gateway: custody of native and CW20 assets, releases and fees.

#[macro_use]
mod helpers;

use cosmwasm_std::{coin, coins, to_json_binary, Addr, Binary, Uint128};
use cw20::Cw20ExecuteMsg;
use cw_multi_test::Executor;

use common::hash::{bytes32_to_hex, outbound_commitment};
use common::{AssetInfo, FailureKind, GatewayKind};
use gateway::msg::{
    CustodyResponse, ExecuteMsg, NonceResponse, OutboundResponse, QueryMsg, ReceiveMsg,
    StatsResponse,
};
use gateway::ContractError;

use helpers::{response_data, wasm_attr, Suite, DENOM, FEE_COLLECTOR};

fn lock_msg(to: &str, to_chain: &str) -> ExecuteMsg {
    ExecuteMsg::Lock {
        to: to.to_string(),
        to_chain: to_chain.to_string(),
        payload: None,
    }
}

fn custody(suite: &Suite, gateway: &Addr) -> u128 {
    let res: CustodyResponse = suite.query(gateway, &QueryMsg::Custody {});
    res.amount.u128()
}

// ============================================================================
// Native
// ============================================================================

#[test]
fn test_lock_takes_native_custody() {
    let mut suite = Suite::new();
    let gateway = suite.lock_gateway(0, 0, None);
    let user = suite.user.clone();
    let before = suite.native_balance(user.as_str());

    let res = suite
        .app
        .execute_contract(
            user.clone(),
            gateway.clone(),
            &lock_msg("0xdestination", "BSC"),
            &coins(1_000_000, DENOM),
        )
        .unwrap();

    let data: OutboundResponse = response_data(res.data.clone());
    assert_eq!(data.nonce, 0);
    assert_eq!(wasm_attr(&res, &gateway, "method").as_deref(), Some("lock"));
    assert_eq!(wasm_attr(&res, &gateway, "to_chain").as_deref(), Some("BSC"));

    let selector = suite.selector_hash(&gateway);
    let commitment = outbound_commitment(&selector, 0, 1_000_000, "0xdestination", "BSC", &[]);
    assert_eq!(
        wasm_attr(&res, &gateway, "commitment"),
        Some(bytes32_to_hex(&commitment))
    );

    assert_eq!(suite.native_balance(user.as_str()), before - 1_000_000);
    assert_eq!(suite.native_balance(gateway.as_str()), 1_000_000);
    assert_eq!(custody(&suite, &gateway), 1_000_000);
}

#[test]
fn test_lock_commitment_binds_destination_chain() {
    let mut suite = Suite::new();
    let gateway = suite.lock_gateway(0, 0, None);
    let user = suite.user.clone();
    let selector = suite.selector_hash(&gateway);

    let mut commitments = vec![];
    for (nonce, to_chain) in [(0u64, "Solana"), (1u64, "BSC")] {
        let res = suite
            .app
            .execute_contract(
                user.clone(),
                gateway.clone(),
                &lock_msg("0xabc", to_chain),
                &coins(100, DENOM),
            )
            .unwrap();
        let emitted = wasm_attr(&res, &gateway, "commitment").unwrap();

        let own = outbound_commitment(&selector, nonce, 100, "0xabc", to_chain, &[]);
        let unbound = outbound_commitment(&selector, nonce, 100, "0xabc", "", &[]);
        assert_eq!(emitted, bytes32_to_hex(&own));
        assert_ne!(emitted, bytes32_to_hex(&unbound));
        commitments.push((nonce, emitted));
    }

    // Swapping the chains between the two locks breaks both commitments.
    let (nonce, solana) = &commitments[0];
    let swapped = outbound_commitment(&selector, *nonce, 100, "0xabc", "BSC", &[]);
    assert_ne!(*solana, bytes32_to_hex(&swapped));
    let (nonce, bsc) = &commitments[1];
    let swapped = outbound_commitment(&selector, *nonce, 100, "0xabc", "Solana", &[]);
    assert_ne!(*bsc, bytes32_to_hex(&swapped));
}

#[test]
fn test_lock_rejects_bad_funds() {
    let mut suite = Suite::new();
    let gateway = suite.lock_gateway(0, 0, None);
    let user = suite.user.clone();

    let res = suite.app.execute_contract(
        user.clone(),
        gateway.clone(),
        &lock_msg("0xdestination", "BSC"),
        &[],
    );
    assert_gateway_err!(res, ContractError::InvalidFunds { .. });

    let res = suite.app.execute_contract(
        user.clone(),
        gateway.clone(),
        &lock_msg("0xdestination", ""),
        &coins(1_000, DENOM),
    );
    assert_gateway_err!(res, ContractError::InvalidDestination { .. });

    let res = suite.app.execute_contract(
        user,
        gateway,
        &lock_msg("", "BSC"),
        &[coin(1_000, DENOM)],
    );
    assert_gateway_err!(res, ContractError::InvalidDestination { .. });
}

#[test]
fn test_lock_fee_without_recipient_stays_in_custody() {
    let mut suite = Suite::new();
    let gateway = suite.lock_gateway(0, 100, None);
    let user = suite.user.clone();

    let res = suite
        .app
        .execute_contract(
            user,
            gateway.clone(),
            &lock_msg("0xdestination", "BSC"),
            &coins(1_000_000, DENOM),
        )
        .unwrap();

    assert_eq!(wasm_attr(&res, &gateway, "amount").as_deref(), Some("990000"));
    assert_eq!(wasm_attr(&res, &gateway, "fee").as_deref(), Some("10000"));
    assert_eq!(custody(&suite, &gateway), 1_000_000);
}

#[test]
fn test_lock_fee_paid_to_recipient() {
    let mut suite = Suite::new();
    let gateway = suite.lock_gateway(0, 100, Some(FEE_COLLECTOR));
    let user = suite.user.clone();

    suite
        .app
        .execute_contract(
            user,
            gateway.clone(),
            &lock_msg("0xdestination", "BSC"),
            &coins(1_000_000, DENOM),
        )
        .unwrap();

    assert_eq!(suite.native_balance(FEE_COLLECTOR), 10_000);
    assert_eq!(custody(&suite, &gateway), 990_000);
    assert_eq!(suite.native_balance(gateway.as_str()), 990_000);
}

#[test]
fn test_release_pays_from_custody() {
    let mut suite = Suite::new();
    let gateway = suite.lock_gateway(20, 0, Some(FEE_COLLECTOR));
    let user = suite.user.clone();
    let admin = suite.admin.clone();

    suite
        .app
        .execute_contract(
            admin,
            gateway.clone(),
            &lock_msg("0xdestination", "BSC"),
            &coins(2_000_000, DENOM),
        )
        .unwrap();

    let before = suite.native_balance(user.as_str());
    let transfer = suite.signed(&gateway, &user, 1_000_000, "1");
    let res = suite
        .app
        .execute_contract(user.clone(), gateway.clone(), &transfer.release_msg(), &[])
        .unwrap();
    assert_eq!(wasm_attr(&res, &gateway, "method").as_deref(), Some("release"));

    assert_eq!(suite.native_balance(user.as_str()), before + 998_000);
    assert_eq!(suite.native_balance(FEE_COLLECTOR), 2_000);
    assert_eq!(custody(&suite, &gateway), 1_000_000);

    let res = suite
        .app
        .execute_contract(user, gateway, &transfer.release_msg(), &[]);
    assert_eq!(failure_kind!(res), Some(FailureKind::ReplayConflict));
}

#[test]
fn test_release_beyond_custody_is_rejected() {
    let mut suite = Suite::new();
    let gateway = suite.lock_gateway(0, 0, None);
    let user = suite.user.clone();

    suite
        .app
        .execute_contract(
            user.clone(),
            gateway.clone(),
            &lock_msg("0xdestination", "BSC"),
            &coins(1_000, DENOM),
        )
        .unwrap();

    let transfer = suite.signed(&gateway, &user, 1_001, "1");
    let res = suite
        .app
        .execute_contract(user.clone(), gateway.clone(), &transfer.release_msg(), &[]);
    assert_gateway_err!(res, ContractError::InsufficientCustody { .. });

    // Nothing was marked spent by the failed release.
    let stats: StatsResponse = suite.query(&gateway, &QueryMsg::Stats {});
    assert_eq!(stats.inbound_count, 0);
}

#[test]
fn test_kind_mismatch_is_rejected() {
    let mut suite = Suite::new();
    let lock_gateway = suite.lock_gateway(0, 0, None);
    let (mint_gateway, _token) = suite.mint_gateway(0, 0, None);
    let user = suite.user.clone();

    let transfer = suite.signed(&lock_gateway, &user, 100, "1");
    let res = suite
        .app
        .execute_contract(user.clone(), lock_gateway, &transfer.mint_msg(), &[]);
    assert_gateway_err!(res, ContractError::WrongKind { .. });

    let transfer = suite.signed(&mint_gateway, &user, 100, "2");
    let res = suite
        .app
        .execute_contract(user.clone(), mint_gateway.clone(), &transfer.release_msg(), &[]);
    assert_gateway_err!(res, ContractError::WrongKind { .. });

    let res = suite.app.execute_contract(
        user,
        mint_gateway,
        &lock_msg("0xdestination", "BSC"),
        &coins(1_000, DENOM),
    );
    assert_gateway_err!(res, ContractError::WrongKind { .. });
}

#[test]
fn test_direct_custody_deposit_is_rejected() {
    let mut suite = Suite::new();
    let gateway = suite.lock_gateway(0, 0, None);
    let user = suite.user.clone();

    let res = suite.app.execute_contract(
        user,
        gateway,
        &ExecuteMsg::AcceptCustody {},
        &coins(1_000, DENOM),
    );
    assert_gateway_err!(res, ContractError::UnauthorizedForwarder);
}

// ============================================================================
// CW20
// ============================================================================

#[test]
fn test_cw20_lock_and_release() {
    let mut suite = Suite::new();
    let user = suite.user.clone();
    let token = suite.cw20_token("CLEY", &user);
    suite
        .app
        .execute_contract(
            user.clone(),
            token.clone(),
            &Cw20ExecuteMsg::Mint {
                recipient: user.to_string(),
                amount: Uint128::new(5_000),
            },
            &[],
        )
        .unwrap();

    let gateway = suite.gateway(
        GatewayKind::Lock,
        "CLEY",
        AssetInfo::Cw20 {
            contract_addr: token.clone(),
        },
        1,
        0,
        0,
        None,
    );
    suite.claim(&gateway);

    let res = suite
        .app
        .execute_contract(
            user.clone(),
            token.clone(),
            &Cw20ExecuteMsg::Send {
                contract: gateway.to_string(),
                amount: Uint128::new(3_000),
                msg: to_json_binary(&ReceiveMsg::Lock {
                    to: "0xdestination".to_string(),
                    to_chain: "BSC".to_string(),
                    payload: Some(Binary::from(b"hello".to_vec())),
                })
                .unwrap(),
            },
            &[],
        )
        .unwrap();
    assert_eq!(wasm_attr(&res, &gateway, "nonce").as_deref(), Some("0"));
    assert_eq!(suite.cw20_balance(&token, gateway.as_str()), 3_000);
    assert_eq!(custody(&suite, &gateway), 3_000);

    // Native funds are refused by a CW20 lock gateway.
    let res = suite.app.execute_contract(
        user.clone(),
        gateway.clone(),
        &lock_msg("0xdestination", "BSC"),
        &coins(1_000, DENOM),
    );
    assert_gateway_err!(res, ContractError::InvalidFunds { .. });

    let transfer = suite.signed(&gateway, &user, 1_200, "1");
    suite
        .app
        .execute_contract(user.clone(), gateway.clone(), &transfer.release_msg(), &[])
        .unwrap();
    assert_eq!(suite.cw20_balance(&token, user.as_str()), 3_200);
    assert_eq!(custody(&suite, &gateway), 1_800);

    let nonce: NonceResponse = suite.query(&gateway, &QueryMsg::CurrentNonce {});
    assert_eq!(nonce.nonce, 1);
}

#[test]
fn test_cw20_burn_hook_on_lock_gateway_is_rejected() {
    let mut suite = Suite::new();
    let user = suite.user.clone();
    let token = suite.cw20_token("CLEY", &user);
    suite
        .app
        .execute_contract(
            user.clone(),
            token.clone(),
            &Cw20ExecuteMsg::Mint {
                recipient: user.to_string(),
                amount: Uint128::new(5_000),
            },
            &[],
        )
        .unwrap();
    let gateway = suite.gateway(
        GatewayKind::Lock,
        "CLEY",
        AssetInfo::Cw20 {
            contract_addr: token.clone(),
        },
        1,
        0,
        0,
        None,
    );
    suite.claim(&gateway);

    let res = suite.app.execute_contract(
        user,
        token,
        &Cw20ExecuteMsg::Send {
            contract: gateway.to_string(),
            amount: Uint128::new(1_000),
            msg: to_json_binary(&ReceiveMsg::Burn {
                to: "0xdestination".to_string(),
                payload: None,
            })
            .unwrap(),
        },
        &[],
    );
    assert_gateway_err!(res, ContractError::WrongKind { .. });
}
