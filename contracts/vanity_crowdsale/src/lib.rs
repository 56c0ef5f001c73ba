#![no_std]

//! Time-boxed participant registration for the Vanity token sale.
//!
//! Addresses register (for free, or by paying in the payment asset) while the
//! window `[start_time, end_time)` is open. Payments never stay on the
//! contract: they are forwarded to the owner wallet or handed back to the
//! payer in the same call. After the window closes the owner finalizes the
//! sale once, which unlocks token distribution on the token contract.

use soroban_sdk::{
    contract, contractimpl, log, symbol_short, token, Address, Env, String, Symbol,
};

mod storage;
mod types;

pub use types::{CrowdsaleConfig, CrowdsaleError, DataKey, PaymentRoute, Phase};

#[cfg(test)]
mod test;

// ──────────────────────────────────────────────────────────
// EVENTS
// ──────────────────────────────────────────────────────────

const EVT_INIT: Symbol = symbol_short!("init");
const EVT_WALLET: Symbol = symbol_short!("wallet");
const EVT_REGISTER: Symbol = symbol_short!("register");
const EVT_CONTRIB: Symbol = symbol_short!("contrib");
const EVT_FINALIZE: Symbol = symbol_short!("finalize");
const EVT_OWNER: Symbol = symbol_short!("owner");

/// Strkey of the all-zero ed25519 account, the chain's "burn" address.
pub const ZERO_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

// ──────────────────────────────────────────────────────────
// CONTRACT
// ──────────────────────────────────────────────────────────

#[contract]
pub struct VanityCrowdsale;

#[contractimpl]
impl VanityCrowdsale {
    /// Initialize the crowdsale
    ///
    /// # Arguments
    /// * `owner` - Address allowed to change the wallet and finalize
    /// * `start_time` - First second of the registration window
    /// * `end_time` - First second after the registration window
    /// * `owner_wallet` - Receiver of forwarded payments
    /// * `payment_token` - Asset used for payments and balance totals
    /// * `payment_route` - Whether payments go to the wallet or back to the payer
    pub fn initialize(
        env: Env,
        owner: Address,
        start_time: u64,
        end_time: u64,
        owner_wallet: Address,
        payment_token: Address,
        payment_route: PaymentRoute,
    ) -> Result<(), CrowdsaleError> {
        if storage::has_config(&env) {
            return Err(CrowdsaleError::AlreadyInitialized);
        }

        owner.require_auth();

        if start_time >= end_time || start_time < env.ledger().timestamp() {
            return Err(CrowdsaleError::InvalidWindow);
        }
        Self::validate_wallet(&env, &owner_wallet)?;

        let config = CrowdsaleConfig {
            owner: owner.clone(),
            start_time,
            end_time,
            payment_token,
            payment_route,
        };
        storage::set_config(&env, &config);
        storage::set_owner_wallet(&env, &owner_wallet);

        log!(&env, "VanityCrowdsale: window {} .. {}", start_time, end_time);
        env.events().publish((EVT_INIT, owner), (start_time, end_time));

        Ok(())
    }

    // ========================================================================
    // OWNER OPERATIONS
    // ========================================================================

    /// Replace the wallet that receives forwarded payments (owner only)
    pub fn set_owner_wallet(
        env: Env,
        caller: Address,
        wallet: Address,
    ) -> Result<(), CrowdsaleError> {
        Self::require_owner(&env, &caller)?;
        Self::validate_wallet(&env, &wallet)?;

        storage::set_owner_wallet(&env, &wallet);
        env.events().publish((EVT_WALLET,), wallet);
        Ok(())
    }

    /// Close the sale for good. Only the owner, only strictly after
    /// `end_time`, only once.
    pub fn finalize(env: Env, caller: Address) -> Result<(), CrowdsaleError> {
        let config = Self::require_owner(&env, &caller)?;

        if storage::is_finalized(&env) {
            return Err(CrowdsaleError::AlreadyFinalized);
        }
        if env.ledger().timestamp() <= config.end_time {
            return Err(CrowdsaleError::NotEnded);
        }

        storage::set_finalized(&env);
        env.events()
            .publish((EVT_FINALIZE,), storage::get_participants_count(&env));
        Ok(())
    }

    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), CrowdsaleError> {
        let mut config = Self::require_owner(&env, &caller)?;
        config.owner = new_owner.clone();
        storage::set_config(&env, &config);

        env.events().publish((EVT_OWNER, caller), new_owner);
        Ok(())
    }

    // ========================================================================
    // REGISTRATION
    // ========================================================================

    /// Register the caller as a participant; returns its registration index
    pub fn register_participant(env: Env, participant: Address) -> Result<u32, CrowdsaleError> {
        participant.require_auth();

        let config = storage::get_config(&env)?;
        Self::require_open(&env, &config)?;

        if storage::is_registered(&env, &participant) {
            return Err(CrowdsaleError::AlreadyRegistered);
        }

        Self::register(&env, &participant)
    }

    /// Pay into the sale. Registers the payer on first payment and moves the
    /// value out again within the same call, so the crowdsale never holds a
    /// balance.
    pub fn contribute(env: Env, participant: Address, amount: i128) -> Result<(), CrowdsaleError> {
        participant.require_auth();

        let config = storage::get_config(&env)?;
        if amount <= 0 {
            return Err(CrowdsaleError::InvalidAmount);
        }
        Self::require_open(&env, &config)?;

        if !storage::is_registered(&env, &participant) {
            Self::register(&env, &participant)?;
        }
        let contributed = storage::add_contribution(&env, &participant, amount)?;

        let payment = token::Client::new(&env, &config.payment_token);
        match config.payment_route {
            PaymentRoute::OwnerWallet => {
                let wallet = storage::get_owner_wallet(&env)?;
                payment.transfer(&participant, &wallet, &amount);
            }
            PaymentRoute::Sender => {
                let this = env.current_contract_address();
                payment.transfer(&participant, &this, &amount);
                payment.transfer(&this, &participant, &amount);
            }
        }

        env.events()
            .publish((EVT_CONTRIB, participant), (amount, contributed));
        Ok(())
    }

    // ========================================================================
    // VIEWS
    // ========================================================================

    /// Sum of the payment-asset balances currently held by all participants
    pub fn compute_total_amount(env: Env) -> Result<i128, CrowdsaleError> {
        let config = storage::get_config(&env)?;
        let payment = token::Client::new(&env, &config.payment_token);

        let mut total: i128 = 0;
        for index in 0..storage::get_participants_count(&env) {
            let participant =
                storage::get_participant(&env, index).ok_or(CrowdsaleError::ParticipantNotFound)?;
            total = total
                .checked_add(payment.balance(&participant))
                .ok_or(CrowdsaleError::Overflow)?;
        }
        Ok(total)
    }

    pub fn phase(env: Env) -> Result<Phase, CrowdsaleError> {
        let config = storage::get_config(&env)?;
        if storage::is_finalized(&env) {
            return Ok(Phase::Finalized);
        }

        let now = env.ledger().timestamp();
        let phase = if now < config.start_time {
            Phase::Created
        } else if now < config.end_time {
            Phase::RegistrationOpen
        } else {
            Phase::RegistrationClosed
        };
        Ok(phase)
    }

    pub fn config(env: Env) -> Result<CrowdsaleConfig, CrowdsaleError> {
        storage::get_config(&env)
    }

    pub fn owner(env: Env) -> Result<Address, CrowdsaleError> {
        Ok(storage::get_config(&env)?.owner)
    }

    pub fn owner_wallet(env: Env) -> Result<Address, CrowdsaleError> {
        storage::get_owner_wallet(&env)
    }

    pub fn start_time(env: Env) -> Result<u64, CrowdsaleError> {
        Ok(storage::get_config(&env)?.start_time)
    }

    pub fn end_time(env: Env) -> Result<u64, CrowdsaleError> {
        Ok(storage::get_config(&env)?.end_time)
    }

    pub fn payment_token(env: Env) -> Result<Address, CrowdsaleError> {
        Ok(storage::get_config(&env)?.payment_token)
    }

    pub fn finalized(env: Env) -> bool {
        storage::is_finalized(&env)
    }

    pub fn registered(env: Env, participant: Address) -> bool {
        storage::is_registered(&env, &participant)
    }

    pub fn participants_count(env: Env) -> u32 {
        storage::get_participants_count(&env)
    }

    /// Participant at `index` in registration order
    pub fn participant(env: Env, index: u32) -> Result<Address, CrowdsaleError> {
        storage::get_participant(&env, index).ok_or(CrowdsaleError::ParticipantNotFound)
    }

    /// Amount the participant paid in through `contribute`
    pub fn contribution(env: Env, participant: Address) -> i128 {
        storage::get_contribution(&env, &participant)
    }

    /// Current payment-asset balance of any address
    pub fn payment_balance(env: Env, participant: Address) -> Result<i128, CrowdsaleError> {
        let config = storage::get_config(&env)?;
        Ok(token::Client::new(&env, &config.payment_token).balance(&participant))
    }

    pub fn total_contributed(env: Env) -> i128 {
        storage::get_total_contributed(&env)
    }

    // ========================================================================
    // INTERNAL
    // ========================================================================

    fn require_owner(env: &Env, caller: &Address) -> Result<CrowdsaleConfig, CrowdsaleError> {
        caller.require_auth();
        let config = storage::get_config(env)?;
        if *caller != config.owner {
            return Err(CrowdsaleError::Unauthorized);
        }
        Ok(config)
    }

    fn require_open(env: &Env, config: &CrowdsaleConfig) -> Result<(), CrowdsaleError> {
        let now = env.ledger().timestamp();
        if now < config.start_time {
            return Err(CrowdsaleError::NotStarted);
        }
        if now >= config.end_time || storage::is_finalized(env) {
            return Err(CrowdsaleError::RegistrationClosed);
        }
        Ok(())
    }

    fn validate_wallet(env: &Env, wallet: &Address) -> Result<(), CrowdsaleError> {
        if *wallet == zero_address(env) || *wallet == env.current_contract_address() {
            return Err(CrowdsaleError::InvalidWallet);
        }
        Ok(())
    }

    fn register(env: &Env, participant: &Address) -> Result<u32, CrowdsaleError> {
        let index = storage::push_participant(env, participant)?;
        env.events()
            .publish((EVT_REGISTER, participant.clone()), index);
        Ok(index)
    }
}

/// The all-zero account as an `Address`
pub fn zero_address(env: &Env) -> Address {
    Address::from_string(&String::from_str(env, ZERO_ACCOUNT))
}
