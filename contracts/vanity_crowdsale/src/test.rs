#![cfg(test)]

use super::*;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

const HOUR: u64 = 60 * 60;
const WEEK: u64 = 7 * 24 * HOUR;
const UNIT: i128 = 10_000_000;

// ============================================================================
// TEST UTILITIES
// ============================================================================

struct Setup {
    env: Env,
    contract_id: Address,
    client: VanityCrowdsaleClient<'static>,
    payment: token::Client<'static>,
    payment_admin: token::StellarAssetClient<'static>,
    owner: Address,
    owner_wallet: Address,
    start_time: u64,
    end_time: u64,
}

impl Setup {
    fn travel_to(&self, timestamp: u64) {
        self.env.ledger().set_timestamp(timestamp);
    }

    fn funded_participant(&self, amount: i128) -> Address {
        let participant = Address::generate(&self.env);
        self.payment_admin.mint(&participant, &amount);
        participant
    }
}

fn setup(route: PaymentRoute) -> Setup {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000_000);

    let owner = Address::generate(&env);
    let owner_wallet = Address::generate(&env);

    let asset_admin = Address::generate(&env);
    let asset = env.register_stellar_asset_contract_v2(asset_admin);
    let payment = token::Client::new(&env, &asset.address());
    let payment_admin = token::StellarAssetClient::new(&env, &asset.address());

    let contract_id = env.register_contract(None, VanityCrowdsale);
    let client = VanityCrowdsaleClient::new(&env, &contract_id);

    let start_time = env.ledger().timestamp() + WEEK;
    let end_time = start_time + 10 * WEEK;
    client.initialize(
        &owner,
        &start_time,
        &end_time,
        &owner_wallet,
        &payment.address,
        &route,
    );

    Setup {
        env,
        contract_id,
        client,
        payment,
        payment_admin,
        owner,
        owner_wallet,
        start_time,
        end_time,
    }
}

// ============================================================================
// INITIALIZATION
// ============================================================================

#[test]
fn test_initialize() {
    let s = setup(PaymentRoute::OwnerWallet);

    assert_eq!(s.client.owner(), s.owner);
    assert_eq!(s.client.owner_wallet(), s.owner_wallet);
    assert_eq!(s.client.start_time(), s.start_time);
    assert_eq!(s.client.end_time(), s.end_time);
    assert_eq!(s.client.payment_token(), s.payment.address);
    assert_eq!(s.client.participants_count(), 0);
    assert!(!s.client.finalized());
    assert_eq!(s.client.phase(), Phase::Created);
}

#[test]
fn test_double_initialize_fails() {
    let s = setup(PaymentRoute::OwnerWallet);

    let result = s.client.try_initialize(
        &s.owner,
        &s.start_time,
        &s.end_time,
        &s.owner_wallet,
        &s.payment.address,
        &PaymentRoute::OwnerWallet,
    );
    assert_eq!(result, Err(Ok(CrowdsaleError::AlreadyInitialized)));
}

#[test]
fn test_initialize_rejects_bad_window() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(5_000);

    let owner = Address::generate(&env);
    let wallet = Address::generate(&env);
    let payment = Address::generate(&env);
    let client = VanityCrowdsaleClient::new(&env, &env.register_contract(None, VanityCrowdsale));

    let reversed =
        client.try_initialize(&owner, &9_000, &6_000, &wallet, &payment, &PaymentRoute::OwnerWallet);
    assert_eq!(reversed, Err(Ok(CrowdsaleError::InvalidWindow)));

    let in_the_past =
        client.try_initialize(&owner, &4_000, &6_000, &wallet, &payment, &PaymentRoute::OwnerWallet);
    assert_eq!(in_the_past, Err(Ok(CrowdsaleError::InvalidWindow)));

    let zero_wallet = client.try_initialize(
        &owner,
        &6_000,
        &9_000,
        &zero_address(&env),
        &payment,
        &PaymentRoute::OwnerWallet,
    );
    assert_eq!(zero_wallet, Err(Ok(CrowdsaleError::InvalidWallet)));
}

// ============================================================================
// OWNER WALLET
// ============================================================================

#[test]
fn test_owner_can_change_wallet() {
    let s = setup(PaymentRoute::OwnerWallet);
    let wallet1 = Address::generate(&s.env);

    s.client.set_owner_wallet(&s.owner, &wallet1);
    assert_eq!(s.client.owner_wallet(), wallet1);
}

#[test]
fn test_owner_cannot_set_zero_wallet() {
    let s = setup(PaymentRoute::OwnerWallet);

    let result = s.client.try_set_owner_wallet(&s.owner, &zero_address(&s.env));
    assert_eq!(result, Err(Ok(CrowdsaleError::InvalidWallet)));
    assert_eq!(s.client.owner_wallet(), s.owner_wallet);
}

#[test]
fn test_others_cannot_change_wallet() {
    let s = setup(PaymentRoute::OwnerWallet);
    let wallet1 = Address::generate(&s.env);
    let wallet2 = Address::generate(&s.env);

    assert_eq!(
        s.client.try_set_owner_wallet(&wallet1, &wallet1),
        Err(Ok(CrowdsaleError::Unauthorized))
    );
    assert_eq!(
        s.client.try_set_owner_wallet(&wallet2, &wallet1),
        Err(Ok(CrowdsaleError::Unauthorized))
    );
    assert_eq!(s.client.owner_wallet(), s.owner_wallet);
}

#[test]
fn test_transfer_ownership() {
    let s = setup(PaymentRoute::OwnerWallet);
    let new_owner = Address::generate(&s.env);
    let wallet1 = Address::generate(&s.env);

    s.client.transfer_ownership(&s.owner, &new_owner);
    assert_eq!(s.client.owner(), new_owner);

    assert_eq!(
        s.client.try_set_owner_wallet(&s.owner, &wallet1),
        Err(Ok(CrowdsaleError::Unauthorized))
    );
    s.client.set_owner_wallet(&new_owner, &wallet1);
    assert_eq!(s.client.owner_wallet(), wallet1);
}

// ============================================================================
// BEFORE START
// ============================================================================

#[test]
fn test_register_fails_before_start() {
    let s = setup(PaymentRoute::OwnerWallet);
    s.travel_to(s.start_time - HOUR);
    let wallet1 = Address::generate(&s.env);

    assert_eq!(
        s.client.try_register_participant(&wallet1),
        Err(Ok(CrowdsaleError::NotStarted))
    );
    assert!(!s.client.registered(&wallet1));
}

#[test]
#[should_panic(expected = "Error(Contract, #6)")]
fn test_contribute_panics_before_start() {
    let s = setup(PaymentRoute::OwnerWallet);
    s.travel_to(s.start_time - HOUR);
    let wallet1 = s.funded_participant(5 * UNIT);

    s.client.contribute(&wallet1, &(2 * UNIT));
}

// ============================================================================
// AFTER START
// ============================================================================

#[test]
fn test_register_since_start() {
    let s = setup(PaymentRoute::OwnerWallet);
    s.travel_to(s.start_time);
    let wallet = Address::generate(&s.env);

    assert_eq!(s.client.phase(), Phase::RegistrationOpen);
    assert!(!s.client.registered(&wallet));

    let index = s.client.register_participant(&wallet);
    assert_eq!(index, 0);
    assert!(s.client.registered(&wallet));
    assert_eq!(s.client.participants_count(), 1);
    assert_eq!(s.client.participant(&0), wallet);
}

#[test]
fn test_cannot_register_twice() {
    let s = setup(PaymentRoute::OwnerWallet);
    s.travel_to(s.start_time);
    let wallet1 = Address::generate(&s.env);

    s.client.register_participant(&wallet1);
    assert_eq!(
        s.client.try_register_participant(&wallet1),
        Err(Ok(CrowdsaleError::AlreadyRegistered))
    );
    assert_eq!(s.client.participants_count(), 1);
}

#[test]
fn test_register_by_payment() {
    let s = setup(PaymentRoute::OwnerWallet);
    s.travel_to(s.start_time);
    let wallet2 = s.funded_participant(5 * UNIT);

    assert!(!s.client.registered(&wallet2));
    s.client.contribute(&wallet2, &(2 * UNIT));

    assert!(s.client.registered(&wallet2));
    assert_eq!(s.client.contribution(&wallet2), 2 * UNIT);
    assert_eq!(s.client.participants_count(), 1);
}

#[test]
fn test_repeated_payment_registers_once() {
    let s = setup(PaymentRoute::OwnerWallet);
    s.travel_to(s.start_time);
    let wallet2 = s.funded_participant(5 * UNIT);

    s.client.register_participant(&wallet2);
    s.client.contribute(&wallet2, &UNIT);
    s.client.contribute(&wallet2, &UNIT);

    assert_eq!(s.client.participants_count(), 1);
    assert_eq!(s.client.contribution(&wallet2), 2 * UNIT);
    assert_eq!(s.client.total_contributed(), 2 * UNIT);
}

#[test]
fn test_no_balance_kept_on_contract() {
    let s = setup(PaymentRoute::OwnerWallet);
    s.travel_to(s.start_time);
    let wallet3 = s.funded_participant(5 * UNIT);

    assert_eq!(s.payment.balance(&s.contract_id), 0);
    s.client.contribute(&wallet3, &(2 * UNIT));

    assert_eq!(s.payment.balance(&s.contract_id), 0);
    assert_eq!(s.payment.balance(&s.owner_wallet), 2 * UNIT);
    assert_eq!(s.payment.balance(&wallet3), 3 * UNIT);
}

#[test]
fn test_payment_follows_changed_wallet() {
    let s = setup(PaymentRoute::OwnerWallet);
    let wallet1 = Address::generate(&s.env);
    s.client.set_owner_wallet(&s.owner, &wallet1);

    s.travel_to(s.start_time);
    let payer = s.funded_participant(5 * UNIT);
    s.client.contribute(&payer, &UNIT);

    assert_eq!(s.payment.balance(&wallet1), UNIT);
    assert_eq!(s.payment.balance(&s.owner_wallet), 0);
}

#[test]
fn test_payments_returned_to_sender() {
    let s = setup(PaymentRoute::Sender);
    s.travel_to(s.start_time);
    let wallet4 = s.funded_participant(5 * UNIT);

    s.client.contribute(&wallet4, &(2 * UNIT));

    assert!(s.client.registered(&wallet4));
    assert_eq!(s.payment.balance(&wallet4), 5 * UNIT);
    assert_eq!(s.payment.balance(&s.contract_id), 0);
    assert_eq!(s.payment.balance(&s.owner_wallet), 0);
    assert_eq!(s.client.contribution(&wallet4), 2 * UNIT);
}

#[test]
fn test_contribute_rejects_non_positive_amount() {
    let s = setup(PaymentRoute::OwnerWallet);
    s.travel_to(s.start_time);
    let payer = s.funded_participant(UNIT);

    assert_eq!(
        s.client.try_contribute(&payer, &0),
        Err(Ok(CrowdsaleError::InvalidAmount))
    );
    assert_eq!(
        s.client.try_contribute(&payer, &-1),
        Err(Ok(CrowdsaleError::InvalidAmount))
    );
    assert!(!s.client.registered(&payer));
}

#[test]
fn test_participants_keep_registration_order() {
    let s = setup(PaymentRoute::OwnerWallet);
    s.travel_to(s.start_time);
    let wallet1 = Address::generate(&s.env);
    let wallet2 = s.funded_participant(UNIT);
    let wallet3 = Address::generate(&s.env);

    s.client.register_participant(&wallet1);
    s.client.contribute(&wallet2, &UNIT);
    s.client.register_participant(&wallet3);

    assert_eq!(s.client.participants_count(), 3);
    assert_eq!(s.client.participant(&0), wallet1);
    assert_eq!(s.client.participant(&1), wallet2);
    assert_eq!(s.client.participant(&2), wallet3);
    assert_eq!(
        s.client.try_participant(&3),
        Err(Ok(CrowdsaleError::ParticipantNotFound))
    );
}

// ============================================================================
// BEFORE END
// ============================================================================

#[test]
fn test_nobody_can_finalize_before_end() {
    let s = setup(PaymentRoute::OwnerWallet);
    s.travel_to(s.end_time - HOUR);
    let wallet1 = Address::generate(&s.env);

    assert_eq!(
        s.client.try_finalize(&wallet1),
        Err(Ok(CrowdsaleError::Unauthorized))
    );
    assert_eq!(
        s.client.try_finalize(&s.owner),
        Err(Ok(CrowdsaleError::NotEnded))
    );
}

#[test]
fn test_cannot_finalize_exactly_at_end() {
    let s = setup(PaymentRoute::OwnerWallet);
    s.travel_to(s.end_time);

    assert_eq!(s.client.phase(), Phase::RegistrationClosed);
    assert_eq!(
        s.client.try_finalize(&s.owner),
        Err(Ok(CrowdsaleError::NotEnded))
    );
}

// ============================================================================
// AFTER END
// ============================================================================

fn setup_after_end() -> (Setup, Address) {
    let s = setup(PaymentRoute::OwnerWallet);
    s.travel_to(s.start_time);
    let wallet1 = Address::generate(&s.env);
    s.client.register_participant(&wallet1);

    s.travel_to(s.end_time + 1);
    (s, wallet1)
}

#[test]
fn test_cannot_register_after_end() {
    let (s, _) = setup_after_end();
    let wallet2 = Address::generate(&s.env);
    let wallet3 = s.funded_participant(UNIT);

    assert_eq!(
        s.client.try_register_participant(&wallet2),
        Err(Ok(CrowdsaleError::RegistrationClosed))
    );
    assert_eq!(
        s.client.try_contribute(&wallet3, &UNIT),
        Err(Ok(CrowdsaleError::RegistrationClosed))
    );
    assert_eq!(s.client.participants_count(), 1);
}

#[test]
fn test_cannot_register_exactly_at_end() {
    let s = setup(PaymentRoute::OwnerWallet);
    s.travel_to(s.end_time);
    let wallet2 = Address::generate(&s.env);

    assert_eq!(
        s.client.try_register_participant(&wallet2),
        Err(Ok(CrowdsaleError::RegistrationClosed))
    );
}

#[test]
fn test_only_owner_can_finalize() {
    let (s, _) = setup_after_end();
    let wallet2 = Address::generate(&s.env);
    let wallet3 = Address::generate(&s.env);

    assert_eq!(
        s.client.try_finalize(&wallet2),
        Err(Ok(CrowdsaleError::Unauthorized))
    );
    assert_eq!(
        s.client.try_finalize(&wallet3),
        Err(Ok(CrowdsaleError::Unauthorized))
    );
    assert!(!s.client.finalized());
}

#[test]
fn test_owner_can_finalize() {
    let (s, _) = setup_after_end();

    assert!(!s.client.finalized());
    s.client.finalize(&s.owner);
    assert!(s.client.finalized());
    assert_eq!(s.client.phase(), Phase::Finalized);
}

// ============================================================================
// AFTER FINALIZATION
// ============================================================================

fn setup_finalized() -> (Setup, [Address; 3]) {
    let s = setup(PaymentRoute::OwnerWallet);
    s.travel_to(s.start_time);
    let wallets = [
        s.funded_participant(UNIT),
        s.funded_participant(2 * UNIT),
        s.funded_participant(3 * UNIT),
    ];
    for wallet in wallets.iter() {
        s.client.register_participant(wallet);
    }

    s.travel_to(s.end_time + 1);
    s.client.finalize(&s.owner);
    (s, wallets)
}

#[test]
fn test_register_fails_after_finalization() {
    let (s, _) = setup_finalized();
    let wallet4 = Address::generate(&s.env);

    assert_eq!(
        s.client.try_register_participant(&wallet4),
        Err(Ok(CrowdsaleError::RegistrationClosed))
    );
}

#[test]
fn test_cannot_finalize_again() {
    let (s, _) = setup_finalized();

    assert_eq!(
        s.client.try_finalize(&s.owner),
        Err(Ok(CrowdsaleError::AlreadyFinalized))
    );
    assert!(s.client.finalized());
}

#[test]
fn test_compute_total_amount() {
    let (s, wallets) = setup_finalized();

    let expected: i128 = wallets.iter().map(|w| s.payment.balance(w)).sum();
    assert_eq!(expected, 6 * UNIT);
    assert_eq!(s.client.compute_total_amount(), expected);

    // Balances are read live, not snapshotted at finalization.
    s.payment_admin.mint(&wallets[0], &UNIT);
    assert_eq!(s.client.compute_total_amount(), 7 * UNIT);
    assert_eq!(s.client.payment_balance(&wallets[0]), 2 * UNIT);
}
