use soroban_sdk::{Address, Env};

use crate::types::{AllowanceValue, DataKey, DistributionConfig, TokenError};

pub fn has_owner(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

pub fn get_owner(env: &Env) -> Result<Address, TokenError> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(TokenError::NotInitialized)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}

pub fn is_minting_finished(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::MintingFinished)
        .unwrap_or(false)
}

pub fn set_minting_finished(env: &Env) {
    env.storage().instance().set(&DataKey::MintingFinished, &true);
}

pub fn get_total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn set_total_supply(env: &Env, supply: i128) {
    env.storage().instance().set(&DataKey::TotalSupply, &supply);
}

// ── Distribution ──────────────────────────────────────────

pub fn get_distribution(env: &Env) -> Option<DistributionConfig> {
    env.storage().instance().get(&DataKey::Distribution)
}

pub fn set_distribution(env: &Env, config: &DistributionConfig) {
    env.storage().instance().set(&DataKey::Distribution, config);
}

pub fn get_distributed_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::DistributedCount)
        .unwrap_or(0)
}

pub fn set_distributed_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::DistributedCount, &count);
}

pub fn get_distributed_weight(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::DistributedWeight)
        .unwrap_or(0)
}

pub fn set_distributed_weight(env: &Env, weight: i128) {
    env.storage()
        .instance()
        .set(&DataKey::DistributedWeight, &weight);
}

pub fn is_distributed(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Distributed)
        .unwrap_or(false)
}

pub fn set_distributed(env: &Env) {
    env.storage().instance().set(&DataKey::Distributed, &true);
}

// ── Balances ──────────────────────────────────────────────

pub fn get_balance(env: &Env, id: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(id.clone()))
        .unwrap_or(0)
}

pub fn set_balance(env: &Env, id: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Balance(id.clone()), &amount);
}

// ── Allowances ────────────────────────────────────────────

/// Allowance still usable at the current ledger (expired ones read as zero)
pub fn get_allowance(env: &Env, from: &Address, spender: &Address) -> AllowanceValue {
    let key = DataKey::Allowance(from.clone(), spender.clone());
    match env.storage().persistent().get::<_, AllowanceValue>(&key) {
        Some(allowance) if allowance.expiration_ledger >= env.ledger().sequence() => allowance,
        Some(allowance) => AllowanceValue {
            amount: 0,
            expiration_ledger: allowance.expiration_ledger,
        },
        None => AllowanceValue {
            amount: 0,
            expiration_ledger: 0,
        },
    }
}

pub fn set_allowance(env: &Env, from: &Address, spender: &Address, allowance: &AllowanceValue) {
    env.storage()
        .persistent()
        .set(&DataKey::Allowance(from.clone(), spender.clone()), allowance);
}
