use soroban_sdk::{Address, Env};

use crate::types::{CrowdsaleConfig, CrowdsaleError, DataKey};

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &CrowdsaleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> Result<CrowdsaleConfig, CrowdsaleError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(CrowdsaleError::NotInitialized)
}

pub fn set_owner_wallet(env: &Env, wallet: &Address) {
    env.storage().instance().set(&DataKey::OwnerWallet, wallet);
}

pub fn get_owner_wallet(env: &Env) -> Result<Address, CrowdsaleError> {
    env.storage()
        .instance()
        .get(&DataKey::OwnerWallet)
        .ok_or(CrowdsaleError::NotInitialized)
}

pub fn set_finalized(env: &Env) {
    env.storage().instance().set(&DataKey::Finalized, &true);
}

pub fn is_finalized(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Finalized)
        .unwrap_or(false)
}

pub fn get_participants_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::ParticipantsCount)
        .unwrap_or(0)
}

pub fn is_registered(env: &Env, participant: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Registered(participant.clone()))
}

/// Append a participant in registration order and return its index
pub fn push_participant(env: &Env, participant: &Address) -> Result<u32, CrowdsaleError> {
    let index = get_participants_count(env);
    let next = index.checked_add(1).ok_or(CrowdsaleError::Overflow)?;

    env.storage()
        .persistent()
        .set(&DataKey::Participant(index), participant);
    env.storage()
        .persistent()
        .set(&DataKey::Registered(participant.clone()), &true);
    env.storage()
        .instance()
        .set(&DataKey::ParticipantsCount, &next);
    Ok(index)
}

pub fn get_participant(env: &Env, index: u32) -> Option<Address> {
    env.storage().persistent().get(&DataKey::Participant(index))
}

pub fn get_contribution(env: &Env, participant: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Contribution(participant.clone()))
        .unwrap_or(0)
}

/// Record a payment for `participant` and bump the running total
pub fn add_contribution(
    env: &Env,
    participant: &Address,
    amount: i128,
) -> Result<i128, CrowdsaleError> {
    let contributed = get_contribution(env, participant)
        .checked_add(amount)
        .ok_or(CrowdsaleError::Overflow)?;
    let total = get_total_contributed(env)
        .checked_add(amount)
        .ok_or(CrowdsaleError::Overflow)?;

    env.storage()
        .persistent()
        .set(&DataKey::Contribution(participant.clone()), &contributed);
    env.storage()
        .instance()
        .set(&DataKey::TotalContributed, &total);
    Ok(contributed)
}

pub fn get_total_contributed(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalContributed)
        .unwrap_or(0)
}
