use soroban_sdk::{contracterror, contracttype, Address};

/// Errors that can occur in the crowdsale
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CrowdsaleError {
    /// Contract not initialized
    NotInitialized = 1,
    /// Already initialized
    AlreadyInitialized = 2,
    /// Caller is not the owner
    Unauthorized = 3,
    /// Start must precede end and must not lie in the past
    InvalidWindow = 4,
    /// Payout wallet is the zero address or the crowdsale itself
    InvalidWallet = 5,
    /// Registration window has not opened yet
    NotStarted = 6,
    /// Registration window is over
    RegistrationClosed = 7,
    /// Address is already a participant
    AlreadyRegistered = 8,
    /// Payment amount must be positive
    InvalidAmount = 9,
    /// Finalization requested before the end of the window
    NotEnded = 10,
    /// Finalization already happened
    AlreadyFinalized = 11,
    /// No participant at the requested index
    ParticipantNotFound = 12,
    /// Arithmetic overflow
    Overflow = 13,
}

/// Where a payment received through `contribute` is sent
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PaymentRoute {
    /// Forward the value to the owner wallet
    OwnerWallet,
    /// Hand the value straight back to the payer
    Sender,
}

/// Lifecycle of the crowdsale, derived from the ledger clock and the
/// finalization flag
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    Created,
    RegistrationOpen,
    RegistrationClosed,
    Finalized,
}

/// Immutable crowdsale parameters (everything except the owner wallet,
/// which the owner may replace)
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CrowdsaleConfig {
    pub owner: Address,
    /// First second of the registration window
    pub start_time: u64,
    /// First second after the registration window
    pub end_time: u64,
    /// Asset standing in for the native coin: payments and balances
    pub payment_token: Address,
    pub payment_route: PaymentRoute,
}

/// Data keys for storage
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    OwnerWallet,
    Finalized,
    ParticipantsCount,
    TotalContributed,
    /// Participant address by registration index
    Participant(u32),
    /// Registration flag per address
    Registered(Address),
    /// Amount paid in through `contribute`
    Contribution(Address),
}
