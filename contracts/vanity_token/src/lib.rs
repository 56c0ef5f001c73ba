#![no_std]

//! Vanity token: an ownable, mintable, pausable fungible token that pays out
//! the Vanity crowdsale.
//!
//! Once the linked crowdsale is finalized the owner distributes tokens in
//! batches, walking the participant list in registration order. When the last
//! participant has been served the reserve receives its ratio allocation.

use soroban_sdk::{
    contract, contractimpl, log, symbol_short, token, Address, Env, String, Symbol, Vec,
};
use soroban_token_sdk::{metadata::TokenMetadata, TokenUtils};

mod crowdsale;
mod distribution;
mod storage;
mod types;

pub use crowdsale::CrowdsaleClient;
pub use types::{AllowanceValue, DataKey, DistributionBasis, DistributionConfig, TokenError};


// ──────────────────────────────────────────────────────────
// EVENTS
// ──────────────────────────────────────────────────────────

const EVT_INIT: Symbol = symbol_short!("init");
const EVT_DISTRIB: Symbol = symbol_short!("distrib");
const EVT_DONE: Symbol = symbol_short!("distdone");
const EVT_RECOVER: Symbol = symbol_short!("recover");
const EVT_PAUSE: Symbol = symbol_short!("pause");
const EVT_UNPAUSE: Symbol = symbol_short!("unpause");
const EVT_MINT_END: Symbol = symbol_short!("mintend");
const EVT_OWNER: Symbol = symbol_short!("owner");

const MAX_DECIMALS: u32 = 18;

// ──────────────────────────────────────────────────────────
// CONTRACT
// ──────────────────────────────────────────────────────────

#[contract]
pub struct VanityToken;

#[contractimpl]
impl VanityToken {
    /// Initialize the token. It starts paused with minting open.
    ///
    /// # Arguments
    /// * `owner` - Address allowed to mint, pause and distribute
    /// * `decimal`, `name`, `symbol` - Token metadata
    /// * `distribution` - Crowdsale link; `None` for a plain token
    pub fn initialize(
        env: Env,
        owner: Address,
        decimal: u32,
        name: String,
        symbol: String,
        distribution: Option<DistributionConfig>,
    ) -> Result<(), TokenError> {
        if storage::has_owner(&env) {
            return Err(TokenError::AlreadyInitialized);
        }

        owner.require_auth();

        if decimal > MAX_DECIMALS {
            return Err(TokenError::InvalidConfig);
        }
        if let Some(config) = &distribution {
            distribution::validate(config)?;
            storage::set_distribution(&env, config);
        }

        storage::set_owner(&env, &owner);
        storage::set_paused(&env, true);
        TokenUtils::new(&env).metadata().set_metadata(&TokenMetadata {
            decimal,
            name,
            symbol,
        });

        log!(&env, "VanityToken: initialized with owner {}", owner);
        env.events()
            .publish((EVT_INIT, owner), distribution.is_some());

        Ok(())
    }

    // ========================================================================
    // DISTRIBUTION
    // ========================================================================

    /// Credit the next `count` participants of the finalized crowdsale.
    /// Returns the number of participants served so far.
    pub fn distribute(env: Env, caller: Address, count: u32) -> Result<u32, TokenError> {
        let owner = Self::require_owner(&env, &caller)?;
        let config = storage::get_distribution(&env).ok_or(TokenError::NoCrowdsale)?;
        Self::require_minting(&env)?;

        let crowdsale = CrowdsaleClient::new(&env, &config.crowdsale);
        if !crowdsale.finalized() {
            return Err(TokenError::CrowdsaleNotFinalized);
        }

        let participants = crowdsale.participants_count();
        let done = storage::get_distributed_count(&env);
        let target = done.checked_add(count).ok_or(TokenError::InvalidCount)?;
        if count == 0 || target > participants {
            return Err(TokenError::InvalidCount);
        }

        let mut total_weight = storage::get_distributed_weight(&env);
        for index in done..target {
            let participant = crowdsale.participant(&index);
            let weight = match config.basis {
                DistributionBasis::Contribution => crowdsale.contribution(&participant),
                DistributionBasis::Balance => crowdsale.payment_balance(&participant),
            };

            let (capped, amount) = distribution::participant_share(&config, weight)?;
            Self::mint_to(&env, &owner, &participant, amount)?;
            total_weight = total_weight
                .checked_add(capped)
                .ok_or(TokenError::Overflow)?;
        }

        storage::set_distributed_count(&env, target);
        storage::set_distributed_weight(&env, total_weight);
        env.events().publish((EVT_DISTRIB,), (done, target));

        if target == participants {
            let reserve_amount = distribution::reserve_share(&config, total_weight)?;
            Self::mint_to(&env, &owner, &config.reserve, reserve_amount)?;
            storage::set_distributed(&env);
            env.events()
                .publish((EVT_DONE, config.reserve), (total_weight, reserve_amount));
        }

        Ok(target)
    }

    pub fn distributed_count(env: Env) -> u32 {
        storage::get_distributed_count(&env)
    }

    pub fn distributed(env: Env) -> bool {
        storage::is_distributed(&env)
    }

    pub fn distribution_config(env: Env) -> Option<DistributionConfig> {
        storage::get_distribution(&env)
    }

    // ========================================================================
    // RECOVERY
    // ========================================================================

    /// Move whatever balance of `token` this contract holds to `to`.
    /// `token` may be this contract itself. Returns the recovered amount.
    pub fn recover_lost(
        env: Env,
        caller: Address,
        token: Address,
        to: Address,
    ) -> Result<i128, TokenError> {
        Self::require_owner(&env, &caller)?;

        let this = env.current_contract_address();
        let amount = if token == this {
            let amount = storage::get_balance(&env, &this);
            if amount > 0 {
                Self::move_balance(&env, &this, &to, amount)?;
            }
            amount
        } else {
            let foreign = token::Client::new(&env, &token);
            let amount = foreign.balance(&this);
            if amount > 0 {
                foreign.transfer(&this, &to, &amount);
            }
            amount
        };

        env.events().publish((EVT_RECOVER, token), (to, amount));
        Ok(amount)
    }

    // ========================================================================
    // MINTING
    // ========================================================================

    pub fn mint(env: Env, caller: Address, to: Address, amount: i128) -> Result<(), TokenError> {
        let owner = Self::require_owner(&env, &caller)?;
        Self::require_minting(&env)?;
        if amount < 0 {
            return Err(TokenError::InvalidAmount);
        }

        Self::mint_to(&env, &owner, &to, amount)
    }

    pub fn mint_to_many(
        env: Env,
        caller: Address,
        recipients: Vec<Address>,
        amounts: Vec<i128>,
    ) -> Result<(), TokenError> {
        let owner = Self::require_owner(&env, &caller)?;
        Self::require_minting(&env)?;
        if recipients.len() != amounts.len() {
            return Err(TokenError::LengthMismatch);
        }

        for (to, amount) in recipients.iter().zip(amounts.iter()) {
            if amount < 0 {
                return Err(TokenError::InvalidAmount);
            }
            Self::mint_to(&env, &owner, &to, amount)?;
        }
        Ok(())
    }

    /// Close minting for good
    pub fn finish_minting(env: Env, caller: Address) -> Result<(), TokenError> {
        Self::require_owner(&env, &caller)?;
        Self::require_minting(&env)?;

        storage::set_minting_finished(&env);
        env.events()
            .publish((EVT_MINT_END,), storage::get_total_supply(&env));
        Ok(())
    }

    pub fn minting_finished(env: Env) -> bool {
        storage::is_minting_finished(&env)
    }

    // ========================================================================
    // PAUSE & OWNERSHIP
    // ========================================================================

    pub fn pause(env: Env, caller: Address) -> Result<(), TokenError> {
        Self::require_owner(&env, &caller)?;
        Self::require_not_paused(&env)?;

        storage::set_paused(&env, true);
        env.events().publish((EVT_PAUSE,), ());
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), TokenError> {
        Self::require_owner(&env, &caller)?;
        if !storage::is_paused(&env) {
            return Err(TokenError::NotPaused);
        }

        storage::set_paused(&env, false);
        env.events().publish((EVT_UNPAUSE,), ());
        Ok(())
    }

    pub fn paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), TokenError> {
        Self::require_owner(&env, &caller)?;
        storage::set_owner(&env, &new_owner);

        env.events().publish((EVT_OWNER, caller), new_owner);
        Ok(())
    }

    pub fn owner(env: Env) -> Result<Address, TokenError> {
        storage::get_owner(&env)
    }

    // ========================================================================
    // TOKEN INTERFACE
    // ========================================================================

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        storage::get_allowance(&env, &from, &spender).amount
    }

    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32,
    ) -> Result<(), TokenError> {
        from.require_auth();
        Self::require_not_paused(&env)?;

        if amount < 0 {
            return Err(TokenError::InvalidAmount);
        }
        if amount > 0 && expiration_ledger < env.ledger().sequence() {
            return Err(TokenError::InvalidExpiration);
        }

        storage::set_allowance(
            &env,
            &from,
            &spender,
            &AllowanceValue {
                amount,
                expiration_ledger,
            },
        );
        TokenUtils::new(&env)
            .events()
            .approve(from, spender, amount, expiration_ledger);
        Ok(())
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        storage::get_balance(&env, &id)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), TokenError> {
        from.require_auth();
        Self::require_not_paused(&env)?;
        if amount < 0 {
            return Err(TokenError::InvalidAmount);
        }

        Self::move_balance(&env, &from, &to, amount)
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), TokenError> {
        spender.require_auth();
        Self::require_not_paused(&env)?;
        if amount < 0 {
            return Err(TokenError::InvalidAmount);
        }

        let mut allowance = storage::get_allowance(&env, &from, &spender);
        if allowance.amount < amount {
            return Err(TokenError::InsufficientAllowance);
        }
        allowance.amount -= amount;
        storage::set_allowance(&env, &from, &spender, &allowance);

        Self::move_balance(&env, &from, &to, amount)
    }

    pub fn total_supply(env: Env) -> i128 {
        storage::get_total_supply(&env)
    }

    pub fn decimals(env: Env) -> u32 {
        TokenUtils::new(&env).metadata().get_metadata().decimal
    }

    pub fn name(env: Env) -> String {
        TokenUtils::new(&env).metadata().get_metadata().name
    }

    pub fn symbol(env: Env) -> String {
        TokenUtils::new(&env).metadata().get_metadata().symbol
    }

    // ========================================================================
    // INTERNAL
    // ========================================================================

    fn require_owner(env: &Env, caller: &Address) -> Result<Address, TokenError> {
        caller.require_auth();
        let owner = storage::get_owner(env)?;
        if *caller != owner {
            return Err(TokenError::Unauthorized);
        }
        Ok(owner)
    }

    fn require_minting(env: &Env) -> Result<(), TokenError> {
        if storage::is_minting_finished(env) {
            return Err(TokenError::MintingFinished);
        }
        Ok(())
    }

    fn require_not_paused(env: &Env) -> Result<(), TokenError> {
        if storage::is_paused(env) {
            return Err(TokenError::Paused);
        }
        Ok(())
    }

    fn mint_to(env: &Env, minter: &Address, to: &Address, amount: i128) -> Result<(), TokenError> {
        if amount == 0 {
            return Ok(());
        }

        let balance = storage::get_balance(env, to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        let supply = storage::get_total_supply(env)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        storage::set_balance(env, to, balance);
        storage::set_total_supply(env, supply);
        TokenUtils::new(env)
            .events()
            .mint(minter.clone(), to.clone(), amount);
        Ok(())
    }

    fn move_balance(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), TokenError> {
        let from_balance = storage::get_balance(env, from);
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance);
        }

        if from != to {
            let to_balance = storage::get_balance(env, to)
                .checked_add(amount)
                .ok_or(TokenError::Overflow)?;
            storage::set_balance(env, from, from_balance - amount);
            storage::set_balance(env, to, to_balance);
        }

        TokenUtils::new(env)
            .events()
            .transfer(from.clone(), to.clone(), amount);
        Ok(())
    }
}
