use soroban_sdk::{Address, Env};

// Read-only view of the crowdsale contract used during distribution.
#[soroban_sdk::contractclient(name = "CrowdsaleClient")]
pub trait Crowdsale {
    fn finalized(env: Env) -> bool;
    fn participants_count(env: Env) -> u32;
    fn participant(env: Env, index: u32) -> Address;
    fn contribution(env: Env, participant: Address) -> i128;
    fn payment_balance(env: Env, participant: Address) -> i128;
}
